// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Free sequencing: place every candidate into positional slots `0..N`.
//!
//! [`Rearrange`] is a [`DragPlacement`] keyed by slot index. There is one slot
//! per non-blank candidate, and the question is complete once every slot is
//! filled and the pool is empty.
//!
//! ```
//! use understory_placement::rearrange::Rearrange;
//!
//! let mut sentence = Rearrange::new(["programming", "I", "love"]);
//! for (slot, value) in [(0, "I"), (1, "love"), (2, "programming")] {
//!     let instance = sentence
//!         .drag()
//!         .pool()
//!         .pool()
//!         .iter()
//!         .find(|entry| entry.value() == value)
//!         .map(|entry| entry.instance())
//!         .unwrap();
//!     sentence.start_from_pool(instance);
//!     sentence.drop_on_slot(slot);
//! }
//! assert!(sentence.is_complete());
//! assert_eq!(sentence.sequence(), [Some("I"), Some("love"), Some("programming")]);
//! ```

use tracing::debug;

use crate::drag::{CancelPolicy, DragOutcome, DragPlacement};
use crate::pool::{InstanceId, ItemPool};

/// Sequencing state for one question instance.
#[derive(Clone, Debug)]
pub struct Rearrange {
    drag: DragPlacement<usize>,
}

impl Rearrange {
    /// Builds one empty slot per non-blank value; blank values are dropped.
    #[must_use]
    pub fn new<V>(values: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<String>,
    {
        Self::with_placements(values, std::iter::empty())
    }

    /// Like [`Rearrange::new`], then seeds `(slot index, source index)`
    /// placements.
    ///
    /// The source index counts every supplied value, blank ones included.
    /// The slot count grows to cover the highest seeded slot index if that is
    /// beyond the number of candidates, up to twice the candidate count.
    /// Placements pointing at blank values, missing values, a slot index past
    /// that bound, or an already filled slot are skipped.
    #[must_use]
    pub fn with_placements<V>(
        values: impl IntoIterator<Item = V>,
        placements: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self
    where
        V: Into<String>,
    {
        // Source index of each kept value; pool position i holds `kept[i]`.
        let mut kept = Vec::new();
        let mut kept_values = Vec::new();
        for (source, value) in values.into_iter().enumerate() {
            let value: String = value.into();
            if value.trim().is_empty() {
                continue;
            }
            kept.push(source);
            kept_values.push(value);
        }

        let declared = kept_values.len();
        // Seeds may grow the slot count, but not past this many slots.
        let slot_limit = declared.saturating_mul(2);

        let placements: Vec<(usize, InstanceId)> = placements
            .into_iter()
            .filter_map(|(slot, source)| {
                if slot >= slot_limit {
                    debug!(slot, source, slot_limit, "seed placement slot out of range; skipping");
                    return None;
                }
                let position = kept.iter().position(|&kept_source| kept_source == source);
                if position.is_none() {
                    debug!(slot, source, "seed placement names no candidate; skipping");
                }
                let raw = u32::try_from(position?).ok()?;
                Some((slot, InstanceId::new(raw)))
            })
            .collect();

        let slot_count = placements
            .iter()
            .filter_map(|&(slot, _)| slot.checked_add(1))
            .fold(declared, usize::max);

        let mut pool = ItemPool::with_distinct_slots(kept_values, 0..slot_count);
        for (slot, instance) in placements {
            pool.prefill(&slot, instance);
        }
        Self {
            drag: DragPlacement::new(pool),
        }
    }

    /// Sets the policy for drags that end without a drop.
    #[must_use]
    pub fn with_cancel_policy(self, policy: CancelPolicy) -> Self {
        Self {
            drag: self.drag.with_cancel_policy(policy),
        }
    }

    /// The underlying drag state machine.
    #[must_use]
    pub fn drag(&self) -> &DragPlacement<usize> {
        &self.drag
    }

    /// Mutable access to the drag state machine, for hosts that route events
    /// generically over slot keys.
    pub fn drag_mut(&mut self) -> &mut DragPlacement<usize> {
        &mut self.drag
    }

    /// Number of positional slots.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.drag.pool().slot_count()
    }

    /// Returns `true` once the pool is empty and every slot is filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        let pool = self.drag.pool();
        !self.drag.is_dragging() && pool.pool().is_empty() && pool.placed_count() == pool.slot_count()
    }

    /// Placed values in slot order; `None` marks an empty slot.
    #[must_use]
    pub fn sequence(&self) -> Vec<Option<&str>> {
        self.drag
            .pool()
            .slots()
            .map(|(_, entry)| entry.map(|entry| entry.value()))
            .collect()
    }

    /// See [`DragPlacement::start_from_pool`].
    pub fn start_from_pool(&mut self, instance: InstanceId) -> DragOutcome<usize> {
        self.drag.start_from_pool(instance)
    }

    /// See [`DragPlacement::start_from_slot`].
    pub fn start_from_slot(&mut self, slot: usize) -> DragOutcome<usize> {
        self.drag.start_from_slot(&slot)
    }

    /// See [`DragPlacement::drag_over`].
    pub fn drag_over(&mut self, slot: usize) -> DragOutcome<usize> {
        self.drag.drag_over(&slot)
    }

    /// See [`DragPlacement::drag_leave`].
    pub fn drag_leave(&mut self) -> DragOutcome<usize> {
        self.drag.drag_leave()
    }

    /// See [`DragPlacement::drop_on_slot`].
    pub fn drop_on_slot(&mut self, slot: usize) -> DragOutcome<usize> {
        self.drag.drop_on_slot(&slot)
    }

    /// See [`DragPlacement::drop_on_pool_area`].
    pub fn drop_on_pool_area(&mut self) -> DragOutcome<usize> {
        self.drag.drop_on_pool_area()
    }

    /// See [`DragPlacement::end_without_drop`].
    pub fn end_without_drop(&mut self) -> DragOutcome<usize> {
        self.drag.end_without_drop()
    }

    /// See [`DragPlacement::reset`].
    pub fn reset(&mut self) {
        self.drag.reset();
    }
}
