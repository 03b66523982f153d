// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropdown questions: an independent single-select per template slot.
//!
//! Each slot offers the content items whose position affinity matches the
//! slot's position id. Choosing a value touches that slot only. There is no
//! shared pool: the same candidate may be chosen in several slots, and choosing
//! again simply overwrites.

use tracing::debug;
use understory_template::{RichText, SlotRef, Template};

use crate::payload::{ContentItem, ItemId};

/// One choice offered by a dropdown slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// Content API id of the item.
    pub item: ItemId,
    /// Display value.
    pub value: RichText,
}

/// The choices and current selection of one slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropdownSlot {
    slot: SlotRef,
    candidates: Vec<Candidate>,
    selected: Option<usize>,
}

impl DropdownSlot {
    /// The template slot.
    #[must_use]
    pub fn slot(&self) -> &SlotRef {
        &self.slot
    }

    /// The choices, in content order.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// The chosen candidate, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Candidate> {
        self.selected.and_then(|index| self.candidates.get(index))
    }
}

/// Per-slot selections for a dropdown question.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dropdown {
    slots: Vec<DropdownSlot>,
}

impl Dropdown {
    /// One slot per template slot segment, each offering the matching items.
    #[must_use]
    pub fn new(template: &Template, items: &[ContentItem]) -> Self {
        let slots = template
            .slots()
            .map(|slot| DropdownSlot {
                slot: slot.clone(),
                candidates: items
                    .iter()
                    .filter(|item| {
                        item.position_id
                            .as_deref()
                            .is_some_and(|position| slot.position_id.matches_item(position))
                    })
                    .map(|item| Candidate {
                        item: item.id.clone(),
                        value: RichText::new(item.value.as_str()),
                    })
                    .collect(),
                selected: None,
            })
            .collect();
        Self { slots }
    }

    /// All slots in template order.
    #[must_use]
    pub fn slots(&self) -> &[DropdownSlot] {
        &self.slots
    }

    /// The slot state for `slot`.
    #[must_use]
    pub fn get(&self, slot: &SlotRef) -> Option<&DropdownSlot> {
        self.slots.iter().find(|s| &s.slot == slot)
    }

    /// Chooses the first candidate of `slot` whose value is `value`.
    ///
    /// Returns `true` if the selection changed. Unknown slots and values that
    /// are not candidates of that slot are ignored.
    pub fn select(&mut self, slot: &SlotRef, value: &str) -> bool {
        let Some(state) = self.slots.iter_mut().find(|s| &s.slot == slot) else {
            debug!(slot = %slot, "select on unknown dropdown slot");
            return false;
        };
        let Some(index) = state
            .candidates
            .iter()
            .position(|candidate| candidate.value.as_raw() == value)
        else {
            debug!(slot = %slot, value, "value is not a candidate for this slot");
            return false;
        };
        let changed = state.selected != Some(index);
        state.selected = Some(index);
        changed
    }

    /// Unsets the selection of `slot`. Returns `true` if there was one.
    pub fn clear(&mut self, slot: &SlotRef) -> bool {
        self.slots
            .iter_mut()
            .find(|s| &s.slot == slot)
            .and_then(|state| state.selected.take())
            .is_some()
    }

    /// Unsets every selection.
    pub fn clear_all(&mut self) {
        for state in &mut self.slots {
            state.selected = None;
        }
    }

    /// The chosen value for `slot`.
    #[must_use]
    pub fn selection(&self, slot: &SlotRef) -> Option<&RichText> {
        self.get(slot)
            .and_then(DropdownSlot::selected)
            .map(|candidate| &candidate.value)
    }

    /// Every slot with its chosen value, in template order.
    pub fn selections(&self) -> impl Iterator<Item = (&SlotRef, Option<&RichText>)> + '_ {
        self.slots
            .iter()
            .map(|state| (&state.slot, state.selected().map(|candidate| &candidate.value)))
    }
}

#[cfg(test)]
mod tests {
    use understory_template::parse;

    use super::*;

    fn capitals() -> Dropdown {
        let items = [
            ContentItem::new("1", "France").at_position("pos_1").correct(true),
            ContentItem::new("2", "Germany").at_position("pos_1"),
            ContentItem::new("3", "Italy").at_position("1"),
            ContentItem::new("4", "Paris").at_position("2"),
            ContentItem::new("5", "loose"),
        ];
        Dropdown::new(&parse("[[pos_1]] has capital [[pos_2]]"), &items)
    }

    #[test]
    fn candidates_are_filtered_by_position() {
        let dropdown = capitals();
        let first: Vec<_> = dropdown.slots()[0]
            .candidates()
            .iter()
            .map(|c| c.value.as_raw())
            .collect();
        assert_eq!(first, ["France", "Germany", "Italy"]);
        assert_eq!(dropdown.slots()[1].candidates().len(), 1);
    }

    #[test]
    fn reselecting_overwrites() {
        let mut dropdown = capitals();
        let pos_1 = SlotRef::first("1");
        assert!(dropdown.select(&pos_1, "Germany"));
        assert!(dropdown.select(&pos_1, "France"));
        assert!(!dropdown.select(&pos_1, "France"));
        assert_eq!(dropdown.selection(&pos_1).map(RichText::as_raw), Some("France"));
    }

    #[test]
    fn foreign_values_and_slots_are_ignored() {
        let mut dropdown = capitals();
        assert!(!dropdown.select(&SlotRef::first("1"), "Paris"));
        assert!(!dropdown.select(&SlotRef::first("9"), "France"));
        assert!(dropdown.selections().all(|(_, value)| value.is_none()));
    }

    #[test]
    fn clear_unsets_one_slot() {
        let mut dropdown = capitals();
        dropdown.select(&SlotRef::first("1"), "Italy");
        dropdown.select(&SlotRef::first("2"), "Paris");
        assert!(dropdown.clear(&SlotRef::first("1")));
        assert!(!dropdown.clear(&SlotRef::first("1")));
        assert_eq!(
            dropdown.selection(&SlotRef::first("2")).map(RichText::as_raw),
            Some("Paris")
        );
        dropdown.clear_all();
        assert!(dropdown.selection(&SlotRef::first("2")).is_none());
    }
}
