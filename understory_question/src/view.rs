// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-ready snapshots of an engine.
//!
//! A [`QuestionView`] is everything a host needs to draw a question: the
//! template as literal runs and slots with their current contents, the pool of
//! unplaced items, and for rearrange questions the positional sequence. It is
//! a plain value and serializes to JSON for hosts across an FFI or IPC seam.

use serde::Serialize;
use understory_placement::{DragPlacement, InstanceId, PoolEntry};
use understory_template::{RichText, Segment, SlotRef};

use crate::engine::{QuestionEngine, QuestionKind, SlotKey};
use crate::payload::{QuestionId, QuestionType};

/// A candidate as shown to the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EntryView {
    /// Placement identity; hosts echo it back in drag-start gestures.
    pub instance: InstanceId,
    /// Display text.
    pub value: RichText,
}

impl From<&PoolEntry> for EntryView {
    fn from(entry: &PoolEntry) -> Self {
        Self {
            instance: entry.instance(),
            value: RichText::new(entry.value()),
        }
    }
}

/// What a template slot currently shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotContent {
    /// A drop target.
    Placed {
        /// The occupant, if any.
        entry: Option<EntryView>,
        /// Whether the current drag hovers this slot.
        highlighted: bool,
    },
    /// A select.
    Choice {
        /// The options, in content order.
        candidates: Vec<RichText>,
        /// The chosen option, if any.
        selected: Option<RichText>,
    },
    /// A text field.
    Text {
        /// Its current text.
        text: String,
    },
    /// A token in a question type that does not answer through slots.
    Inert,
}

/// One piece of the rendered question text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SegmentView {
    /// Text between tokens.
    Literal {
        /// The text.
        text: RichText,
    },
    /// A token position.
    Slot {
        /// Which token.
        slot: SlotRef,
        /// Its contents.
        content: SlotContent,
    },
}

/// One position of a rearrange question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PositionView {
    /// Zero-based position.
    pub index: usize,
    /// The occupant, if any.
    pub entry: Option<EntryView>,
    /// Whether the current drag hovers this position.
    pub highlighted: bool,
}

/// A snapshot of one question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    /// Question id.
    pub id: QuestionId,
    /// Question type.
    pub question_type: QuestionType,
    /// The question text, in order.
    pub segments: Vec<SegmentView>,
    /// Unplaced items. Empty for dropdown and fill-in-the-blank.
    pub pool: Vec<EntryView>,
    /// Rearrange positions. Empty for other types.
    pub positions: Vec<PositionView>,
    /// The item being dragged, if any.
    pub dragging: Option<EntryView>,
    /// Rearrange completion. `None` for other types.
    pub complete: Option<bool>,
}

impl QuestionView {
    /// The highlighted slot, if a drag hovers one.
    #[must_use]
    pub fn highlighted(&self) -> Option<SlotKey> {
        let from_segments = self.segments.iter().find_map(|segment| match segment {
            SegmentView::Slot {
                slot,
                content: SlotContent::Placed { highlighted: true, .. },
            } => Some(SlotKey::Position(slot.clone())),
            _ => None,
        });
        from_segments.or_else(|| {
            self.positions
                .iter()
                .find(|position| position.highlighted)
                .map(|position| SlotKey::Index(position.index))
        })
    }
}

impl QuestionEngine {
    /// Takes a render-ready snapshot.
    #[must_use]
    pub fn view(&self) -> QuestionView {
        let segments = self
            .template()
            .segments()
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => SegmentView::Literal { text: text.clone() },
                Segment::Slot(slot) => SegmentView::Slot {
                    slot: slot.clone(),
                    content: self.slot_content(slot),
                },
            })
            .collect();

        let (pool, positions, dragging) = match self.kind() {
            QuestionKind::DragAndDrop(drag) => (pool_view(drag), Vec::new(), dragging_view(drag)),
            QuestionKind::Rearrange(rearrange) => {
                let drag = rearrange.drag();
                let positions = (0..rearrange.slot_count())
                    .map(|index| PositionView {
                        index,
                        entry: drag.pool().occupant(&index).map(EntryView::from),
                        highlighted: drag.highlighted() == Some(&index),
                    })
                    .collect();
                (pool_view(drag), positions, dragging_view(drag))
            }
            QuestionKind::Dropdown(_) | QuestionKind::FillBlank(_) => {
                (Vec::new(), Vec::new(), None)
            }
        };

        QuestionView {
            id: self.id().clone(),
            question_type: self.question_type(),
            segments,
            pool,
            positions,
            dragging,
            complete: self.is_complete(),
        }
    }

    fn slot_content(&self, slot: &SlotRef) -> SlotContent {
        match self.kind() {
            QuestionKind::DragAndDrop(drag) => SlotContent::Placed {
                entry: drag.pool().occupant(slot).map(EntryView::from),
                highlighted: drag.highlighted() == Some(slot),
            },
            QuestionKind::Dropdown(dropdown) => match dropdown.get(slot) {
                Some(state) => SlotContent::Choice {
                    candidates: state
                        .candidates()
                        .iter()
                        .map(|candidate| candidate.value.clone())
                        .collect(),
                    selected: state.selected().map(|candidate| candidate.value.clone()),
                },
                None => SlotContent::Inert,
            },
            QuestionKind::FillBlank(blanks) => SlotContent::Text {
                text: blanks.text(slot).unwrap_or_default().to_owned(),
            },
            QuestionKind::Rearrange(_) => SlotContent::Inert,
        }
    }
}

fn pool_view<S>(drag: &DragPlacement<S>) -> Vec<EntryView>
where
    S: Clone + PartialEq + std::fmt::Debug,
{
    drag.pool().pool().iter().map(EntryView::from).collect()
}

fn dragging_view<S>(drag: &DragPlacement<S>) -> Option<EntryView>
where
    S: Clone + PartialEq + std::fmt::Debug,
{
    drag.dragged().map(EntryView::from)
}
