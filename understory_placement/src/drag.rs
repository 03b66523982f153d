// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-placement state machine: move entries between the pool and slots.
//!
//! [`DragPlacement`] wraps an [`ItemPool`] with an explicit two-phase state,
//! [`DragPhase::Idle`] or [`DragPhase::Dragging`]. Every native drag event maps
//! to one method:
//!
//! | Event                         | Method                                   |
//! |-------------------------------|------------------------------------------|
//! | drag start on a pool item     | [`DragPlacement::start_from_pool`]       |
//! | drag start on a filled slot   | [`DragPlacement::start_from_slot`]       |
//! | drag over a slot              | [`DragPlacement::drag_over`]             |
//! | drag leave a slot             | [`DragPlacement::drag_leave`]            |
//! | drop on a slot                | [`DragPlacement::drop_on_slot`]          |
//! | drop on the pool area         | [`DragPlacement::drop_on_pool_area`]     |
//! | drag end with no drop         | [`DragPlacement::end_without_drop`]      |
//!
//! Each method returns a [`DragOutcome`]. Events that make no sense in the
//! current state (a drop while idle, a stale instance id, an unknown slot)
//! come back as [`DragOutcome::Ignored`] and leave the pool and slots as they
//! were.
//!
//! ## Accounting during a drag
//!
//! A drag that starts in the pool leaves its entry listed in the pool until it
//! lands. A drag that starts in a slot clears that slot right away, and the
//! entry is held by the drag until a drop or drag end routes it. Outside a drag,
//! the pool plus occupied slots always add up to the number of entries the
//! pool was built with, and no identity appears twice.
//!
//! ## Minimal example
//!
//! ```
//! use understory_placement::drag::{DragOutcome, DragPlacement};
//! use understory_placement::pool::ItemPool;
//!
//! let mut drag = DragPlacement::new(ItemPool::new(["I", "love"], ["a", "b"]));
//! let love = drag.pool().pool()[1].instance();
//!
//! assert_eq!(drag.start_from_pool(love), DragOutcome::Started);
//! assert!(drag.is_dragging());
//! assert_eq!(
//!     drag.drop_on_slot(&"b"),
//!     DragOutcome::Placed { slot: "b", evicted: None }
//! );
//! assert!(drag.is_settled());
//! assert_eq!(drag.pool().occupant(&"b").map(|e| e.value()), Some("love"));
//! ```

use std::fmt;

use tracing::{debug, trace, warn};

use crate::pool::{InstanceId, ItemPool, PoolEntry, UnknownSlot};

/// What happens to a slot-origin entry when its drag ends without a drop.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CancelPolicy {
    /// Send the entry back to the end of the pool. The slot stays empty.
    #[default]
    ReturnToPool,
    /// Put the entry back into the slot it was dragged out of.
    RestoreOrigin,
}

/// Where the dragged entry came from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DragOrigin<S> {
    /// The entry is still listed in the pool.
    Pool,
    /// The entry was lifted out of this slot, which is now empty.
    Slot(S),
}

/// An in-progress drag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragContext<S> {
    entry: PoolEntry,
    origin: DragOrigin<S>,
}

impl<S> DragContext<S> {
    /// The entry being dragged.
    #[must_use]
    pub fn entry(&self) -> &PoolEntry {
        &self.entry
    }

    /// Where the drag started.
    #[must_use]
    pub fn origin(&self) -> &DragOrigin<S> {
        &self.origin
    }
}

/// Drag phase of one question instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragPhase<S> {
    /// No gesture in progress.
    Idle,
    /// A gesture is in progress.
    Dragging(DragContext<S>),
}

impl<S> Default for DragPhase<S> {
    fn default() -> Self {
        Self::Idle
    }
}

/// Why an event was ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The event needs a drag in progress and there is none.
    NotDragging,
    /// The instance id is not in the pool (stale or duplicated event).
    UnknownInstance(InstanceId),
    /// The slot has nothing to drag.
    EmptySlot,
    /// The slot is not declared for this question.
    UnknownSlot,
}

/// Result of a drag transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragOutcome<S> {
    /// A drag began.
    Started,
    /// The highlighted slot changed. Nothing else did.
    HighlightChanged,
    /// The entry landed in `slot`; `evicted` went back to the pool.
    Placed {
        /// Target slot.
        slot: S,
        /// Former occupant of `slot`, now at the end of the pool.
        evicted: Option<InstanceId>,
    },
    /// The entry was dropped on its own slot and put back.
    Restored {
        /// The slot the entry started and ended in.
        slot: S,
    },
    /// A slot-origin entry was dropped on the pool area.
    ReturnedToPool,
    /// A pool-origin entry was dropped on the pool area; nothing moved.
    Unchanged,
    /// The drag ended without a drop.
    Cancelled {
        /// The slot the entry was put back into, under
        /// [`CancelPolicy::RestoreOrigin`]. `None` if it went to the pool, or
        /// if the drag came from the pool.
        restored_to: Option<S>,
    },
    /// The event did not apply; pool and slots are unchanged.
    Ignored(IgnoreReason),
}

impl<S> DragOutcome<S> {
    /// Returns `true` for [`DragOutcome::Ignored`].
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored(_))
    }

    /// Converts the slot keys carried by this outcome.
    #[must_use]
    pub fn map_slot<T>(self, mut f: impl FnMut(S) -> T) -> DragOutcome<T> {
        match self {
            Self::Started => DragOutcome::Started,
            Self::HighlightChanged => DragOutcome::HighlightChanged,
            Self::Placed { slot, evicted } => DragOutcome::Placed {
                slot: f(slot),
                evicted,
            },
            Self::Restored { slot } => DragOutcome::Restored { slot: f(slot) },
            Self::ReturnedToPool => DragOutcome::ReturnedToPool,
            Self::Unchanged => DragOutcome::Unchanged,
            Self::Cancelled { restored_to } => DragOutcome::Cancelled {
                restored_to: restored_to.map(f),
            },
            Self::Ignored(reason) => DragOutcome::Ignored(reason),
        }
    }
}

/// Pool and slots plus the drag state machine over them.
#[derive(Clone, Debug)]
pub struct DragPlacement<S> {
    pool: ItemPool<S>,
    phase: DragPhase<S>,
    highlighted: Option<S>,
    cancel_policy: CancelPolicy,
}

impl<S> DragPlacement<S>
where
    S: Clone + PartialEq + fmt::Debug,
{
    /// Wraps `pool` with the default [`CancelPolicy`].
    #[must_use]
    pub fn new(pool: ItemPool<S>) -> Self {
        Self {
            pool,
            phase: DragPhase::Idle,
            highlighted: None,
            cancel_policy: CancelPolicy::default(),
        }
    }

    /// Sets the policy for drags that end without a drop.
    #[must_use]
    pub fn with_cancel_policy(mut self, policy: CancelPolicy) -> Self {
        self.cancel_policy = policy;
        self
    }

    /// The underlying pool and slots.
    #[must_use]
    pub fn pool(&self) -> &ItemPool<S> {
        &self.pool
    }

    /// The current phase.
    #[must_use]
    pub fn phase(&self) -> &DragPhase<S> {
        &self.phase
    }

    /// Returns `true` while a gesture is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    /// The entry currently being dragged.
    #[must_use]
    pub fn dragged(&self) -> Option<&PoolEntry> {
        match &self.phase {
            DragPhase::Dragging(context) => Some(&context.entry),
            DragPhase::Idle => None,
        }
    }

    /// The slot last hovered during the current drag.
    #[must_use]
    pub fn highlighted(&self) -> Option<&S> {
        self.highlighted.as_ref()
    }

    /// The active cancellation policy.
    #[must_use]
    pub fn cancel_policy(&self) -> CancelPolicy {
        self.cancel_policy
    }

    /// Number of entries held by the drag rather than the pool or a slot.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        match &self.phase {
            DragPhase::Dragging(DragContext {
                origin: DragOrigin::Slot(_),
                ..
            }) => 1,
            _ => 0,
        }
    }

    /// Returns `true` if idle with every entry accounted for exactly once.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !self.is_dragging() && self.pool.is_conserved(0)
    }

    /// Begins dragging the pool entry `instance`. The entry stays in the pool.
    pub fn start_from_pool(&mut self, instance: InstanceId) -> DragOutcome<S> {
        self.cancel_stale_drag();
        let Some(entry) = self.pool.find_in_pool(instance).cloned() else {
            debug!(instance = %instance, "drag start on entry not in pool");
            return DragOutcome::Ignored(IgnoreReason::UnknownInstance(instance));
        };
        trace!(instance = %instance, "drag from pool");
        self.phase = DragPhase::Dragging(DragContext {
            entry,
            origin: DragOrigin::Pool,
        });
        DragOutcome::Started
    }

    /// Begins dragging the occupant of `slot`, clearing the slot.
    pub fn start_from_slot(&mut self, slot: &S) -> DragOutcome<S> {
        self.cancel_stale_drag();
        if !self.pool.contains_slot(slot) {
            debug!(slot = ?slot, "drag start on undeclared slot");
            return DragOutcome::Ignored(IgnoreReason::UnknownSlot);
        }
        let Some(entry) = self.pool.clear(slot) else {
            return DragOutcome::Ignored(IgnoreReason::EmptySlot);
        };
        trace!(slot = ?slot, instance = %entry.instance(), "drag from slot");
        self.phase = DragPhase::Dragging(DragContext {
            entry,
            origin: DragOrigin::Slot(slot.clone()),
        });
        DragOutcome::Started
    }

    /// Highlights `slot` as the current hover target.
    pub fn drag_over(&mut self, slot: &S) -> DragOutcome<S> {
        if !self.is_dragging() {
            return DragOutcome::Ignored(IgnoreReason::NotDragging);
        }
        if !self.pool.contains_slot(slot) {
            return DragOutcome::Ignored(IgnoreReason::UnknownSlot);
        }
        if self.highlighted.as_ref() != Some(slot) {
            self.highlighted = Some(slot.clone());
        }
        DragOutcome::HighlightChanged
    }

    /// Clears the hover highlight.
    pub fn drag_leave(&mut self) -> DragOutcome<S> {
        if !self.is_dragging() {
            return DragOutcome::Ignored(IgnoreReason::NotDragging);
        }
        self.highlighted = None;
        DragOutcome::HighlightChanged
    }

    /// Drops the dragged entry on `target`.
    ///
    /// An occupied target has its occupant sent to the end of the pool.
    /// Dropping a slot-origin entry back on its own slot restores it.
    /// Dropping on an undeclared slot is ignored and the drag continues.
    pub fn drop_on_slot(&mut self, target: &S) -> DragOutcome<S> {
        if !self.is_dragging() {
            debug!(slot = ?target, "drop with no drag in progress");
            return DragOutcome::Ignored(IgnoreReason::NotDragging);
        }
        if !self.pool.contains_slot(target) {
            debug!(slot = ?target, "drop on undeclared slot");
            return DragOutcome::Ignored(IgnoreReason::UnknownSlot);
        }
        let Some(context) = self.finish() else {
            return DragOutcome::Ignored(IgnoreReason::NotDragging);
        };

        let outcome = match context.origin {
            DragOrigin::Pool => {
                let instance = context.entry.instance();
                let Some(entry) = self.pool.take_from_pool(instance) else {
                    return DragOutcome::Ignored(IgnoreReason::UnknownInstance(instance));
                };
                let evicted = self.place(target, entry);
                DragOutcome::Placed {
                    slot: target.clone(),
                    evicted,
                }
            }
            DragOrigin::Slot(origin) if origin == *target => {
                self.place(target, context.entry);
                DragOutcome::Restored { slot: origin }
            }
            DragOrigin::Slot(_) => {
                let evicted = self.place(target, context.entry);
                DragOutcome::Placed {
                    slot: target.clone(),
                    evicted,
                }
            }
        };
        trace!(outcome = ?outcome, "drop on slot");
        self.debug_check();
        outcome
    }

    /// Drops the dragged entry on the pool area.
    pub fn drop_on_pool_area(&mut self) -> DragOutcome<S> {
        let Some(context) = self.finish() else {
            debug!("drop on pool area with no drag in progress");
            return DragOutcome::Ignored(IgnoreReason::NotDragging);
        };
        let outcome = match context.origin {
            DragOrigin::Pool => DragOutcome::Unchanged,
            DragOrigin::Slot(_) => {
                self.pool.return_to_pool(context.entry);
                DragOutcome::ReturnedToPool
            }
        };
        self.debug_check();
        outcome
    }

    /// Ends a drag that reached no drop target.
    ///
    /// A drag that already dropped is idle by now, so the trailing drag-end
    /// event lands here as [`IgnoreReason::NotDragging`].
    pub fn end_without_drop(&mut self) -> DragOutcome<S> {
        let Some(context) = self.finish() else {
            trace!("drag end after drop");
            return DragOutcome::Ignored(IgnoreReason::NotDragging);
        };
        let restored_to = match (context.origin, self.cancel_policy) {
            (DragOrigin::Pool, _) => None,
            (DragOrigin::Slot(_), CancelPolicy::ReturnToPool) => {
                self.pool.return_to_pool(context.entry);
                None
            }
            (DragOrigin::Slot(origin), CancelPolicy::RestoreOrigin) => {
                self.place(&origin, context.entry);
                Some(origin)
            }
        };
        trace!(restored_to = ?restored_to, "drag cancelled");
        self.debug_check();
        DragOutcome::Cancelled { restored_to }
    }

    /// Cancels any drag and sends every placed entry back to the pool.
    pub fn reset(&mut self) {
        if self.is_dragging() {
            self.end_without_drop();
        }
        self.pool.return_all();
        self.debug_check();
    }

    /// Consumes the machine, returning the pool. A drag in progress is
    /// cancelled first.
    #[must_use]
    pub fn into_pool(mut self) -> ItemPool<S> {
        if self.is_dragging() {
            self.end_without_drop();
        }
        self.pool
    }

    /// Leaves the dragging phase, returning its context.
    fn finish(&mut self) -> Option<DragContext<S>> {
        self.highlighted = None;
        match std::mem::take(&mut self.phase) {
            DragPhase::Dragging(context) => Some(context),
            DragPhase::Idle => None,
        }
    }

    /// Puts `entry` in `slot`, routing any evicted occupant to the pool.
    fn place(&mut self, slot: &S, entry: PoolEntry) -> Option<InstanceId> {
        match self.pool.assign(slot, entry) {
            Ok(Some(evicted)) => {
                let instance = evicted.instance();
                self.pool.return_to_pool(evicted);
                Some(instance)
            }
            Ok(None) => None,
            Err(UnknownSlot { entry, .. }) => {
                self.pool.return_to_pool(entry);
                None
            }
        }
    }

    /// A start event while dragging means the previous drag-end never arrived.
    fn cancel_stale_drag(&mut self) {
        if self.is_dragging() {
            warn!("drag started while another drag was in progress; cancelling it");
            self.end_without_drop();
        }
    }

    fn debug_check(&self) {
        debug_assert!(
            !self.is_dragging() && self.pool.is_conserved(self.in_flight()),
            "placement invariants violated after a completed transition"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> DragPlacement<u8> {
        DragPlacement::new(ItemPool::new(["a", "b", "c"], [1, 2]))
    }

    fn id(raw: u32) -> InstanceId {
        InstanceId::new(raw)
    }

    fn values(drag: &DragPlacement<u8>) -> Vec<&str> {
        drag.pool().pool().iter().map(PoolEntry::value).collect()
    }

    #[test]
    fn new_machine_is_idle_and_settled() {
        let drag = machine();
        assert_eq!(drag.phase(), &DragPhase::Idle);
        assert!(drag.is_settled());
        assert_eq!(drag.cancel_policy(), CancelPolicy::ReturnToPool);
    }

    #[test]
    fn start_from_pool_keeps_entry_listed() {
        let mut drag = machine();
        assert_eq!(drag.start_from_pool(id(0)), DragOutcome::Started);
        assert_eq!(values(&drag), ["a", "b", "c"]);
        assert_eq!(drag.dragged().map(PoolEntry::value), Some("a"));
        assert_eq!(drag.in_flight(), 0);
    }

    #[test]
    fn start_from_unknown_instance_is_ignored() {
        let mut drag = machine();
        assert_eq!(
            drag.start_from_pool(id(42)),
            DragOutcome::Ignored(IgnoreReason::UnknownInstance(id(42)))
        );
        assert!(!drag.is_dragging());
    }

    #[test]
    fn start_from_slot_clears_it_optimistically() {
        let mut drag = machine();
        drag.start_from_pool(id(1));
        drag.drop_on_slot(&1);

        assert_eq!(drag.start_from_slot(&1), DragOutcome::Started);
        assert!(drag.pool().occupant(&1).is_none());
        assert_eq!(drag.in_flight(), 1);
        assert!(drag.pool().is_conserved(drag.in_flight()));
        assert!(!drag.is_settled());
    }

    #[test]
    fn start_from_empty_or_unknown_slot_is_ignored() {
        let mut drag = machine();
        assert_eq!(
            drag.start_from_slot(&1),
            DragOutcome::Ignored(IgnoreReason::EmptySlot)
        );
        assert_eq!(
            drag.start_from_slot(&9),
            DragOutcome::Ignored(IgnoreReason::UnknownSlot)
        );
    }

    #[test]
    fn drag_over_only_highlights() {
        let mut drag = machine();
        assert!(drag.drag_over(&1).is_ignored());

        drag.start_from_pool(id(0));
        let before = drag.pool().revision();
        assert_eq!(drag.drag_over(&2), DragOutcome::HighlightChanged);
        assert_eq!(drag.highlighted(), Some(&2));
        assert_eq!(drag.pool().revision(), before);

        drag.drag_leave();
        assert_eq!(drag.highlighted(), None);
    }

    #[test]
    fn drag_leave_while_idle_is_ignored() {
        let mut drag = machine();
        assert_eq!(
            drag.drag_leave(),
            DragOutcome::Ignored(IgnoreReason::NotDragging)
        );
        drag.start_from_pool(id(0));
        drag.drop_on_slot(&1);
        assert_eq!(
            drag.drag_leave(),
            DragOutcome::Ignored(IgnoreReason::NotDragging)
        );
    }

    #[test]
    fn drop_clears_highlight() {
        let mut drag = machine();
        drag.start_from_pool(id(0));
        drag.drag_over(&2);
        drag.drop_on_slot(&2);
        assert_eq!(drag.highlighted(), None);
    }

    #[test]
    fn drop_from_pool_evicts_occupant_to_pool_end() {
        let mut drag = machine();
        drag.start_from_pool(id(0));
        drag.drop_on_slot(&1);

        drag.start_from_pool(id(1));
        assert_eq!(
            drag.drop_on_slot(&1),
            DragOutcome::Placed {
                slot: 1,
                evicted: Some(id(0)),
            }
        );
        assert_eq!(values(&drag), ["c", "a"]);
        assert_eq!(drag.pool().occupant(&1).map(PoolEntry::value), Some("b"));
        assert!(drag.is_settled());
    }

    #[test]
    fn drop_between_slots_moves_and_evicts() {
        let mut drag = machine();
        drag.start_from_pool(id(0));
        drag.drop_on_slot(&1);
        drag.start_from_pool(id(1));
        drag.drop_on_slot(&2);

        drag.start_from_slot(&1);
        assert_eq!(
            drag.drop_on_slot(&2),
            DragOutcome::Placed {
                slot: 2,
                evicted: Some(id(1)),
            }
        );
        assert!(drag.pool().occupant(&1).is_none());
        assert_eq!(drag.pool().occupant(&2).map(PoolEntry::value), Some("a"));
        assert_eq!(values(&drag), ["c", "b"]);
        assert!(drag.is_settled());
    }

    #[test]
    fn drop_on_own_slot_restores() {
        let mut drag = machine();
        drag.start_from_pool(id(2));
        drag.drop_on_slot(&2);

        drag.start_from_slot(&2);
        assert_eq!(drag.drop_on_slot(&2), DragOutcome::Restored { slot: 2 });
        assert_eq!(drag.pool().occupant(&2).map(PoolEntry::value), Some("c"));
        assert!(drag.is_settled());
    }

    #[test]
    fn drop_on_unknown_slot_keeps_dragging() {
        let mut drag = machine();
        drag.start_from_pool(id(0));
        assert_eq!(
            drag.drop_on_slot(&7),
            DragOutcome::Ignored(IgnoreReason::UnknownSlot)
        );
        assert!(drag.is_dragging());
        assert_eq!(
            drag.end_without_drop(),
            DragOutcome::Cancelled { restored_to: None }
        );
        assert!(drag.is_settled());
    }

    #[test]
    fn drop_while_idle_is_ignored() {
        let mut drag = machine();
        assert!(drag.drop_on_slot(&1).is_ignored());
        assert!(drag.drop_on_pool_area().is_ignored());
        assert!(drag.end_without_drop().is_ignored());
        assert!(drag.is_settled());
    }

    #[test]
    fn pool_origin_drop_on_pool_area_is_unchanged() {
        let mut drag = machine();
        drag.start_from_pool(id(1));
        assert_eq!(drag.drop_on_pool_area(), DragOutcome::Unchanged);
        assert_eq!(values(&drag), ["a", "b", "c"]);
        assert!(drag.is_settled());
    }

    #[test]
    fn slot_origin_drop_on_pool_area_returns() {
        let mut drag = machine();
        drag.start_from_pool(id(0));
        drag.drop_on_slot(&1);
        drag.start_from_slot(&1);
        assert_eq!(drag.drop_on_pool_area(), DragOutcome::ReturnedToPool);
        assert_eq!(values(&drag), ["b", "c", "a"]);
        assert!(drag.is_settled());
    }

    #[test]
    fn trailing_end_after_drop_is_harmless() {
        let mut drag = machine();
        drag.start_from_pool(id(0));
        drag.drop_on_slot(&1);
        assert_eq!(
            drag.end_without_drop(),
            DragOutcome::Ignored(IgnoreReason::NotDragging)
        );
        assert_eq!(drag.pool().occupant(&1).map(PoolEntry::value), Some("a"));
    }

    #[test]
    fn cancel_from_slot_returns_to_pool_by_default() {
        let mut drag = machine();
        drag.start_from_pool(id(0));
        drag.drop_on_slot(&1);
        drag.start_from_slot(&1);
        assert_eq!(
            drag.end_without_drop(),
            DragOutcome::Cancelled { restored_to: None }
        );
        assert!(drag.pool().occupant(&1).is_none());
        assert_eq!(values(&drag), ["b", "c", "a"]);
    }

    #[test]
    fn cancel_from_slot_can_restore_origin() {
        let mut drag = machine().with_cancel_policy(CancelPolicy::RestoreOrigin);
        drag.start_from_pool(id(0));
        drag.drop_on_slot(&1);
        drag.start_from_slot(&1);
        assert_eq!(
            drag.end_without_drop(),
            DragOutcome::Cancelled {
                restored_to: Some(1),
            }
        );
        assert_eq!(drag.pool().occupant(&1).map(PoolEntry::value), Some("a"));
        assert_eq!(values(&drag), ["b", "c"]);
    }

    #[test]
    fn new_start_cancels_stale_drag() {
        let mut drag = machine();
        drag.start_from_pool(id(0));
        drag.drop_on_slot(&1);
        drag.start_from_slot(&1);

        // The drag-end for the slot drag never arrived.
        assert_eq!(drag.start_from_pool(id(1)), DragOutcome::Started);
        assert_eq!(values(&drag), ["b", "c", "a"]);
        assert_eq!(drag.in_flight(), 0);
        assert!(drag.pool().is_conserved(0));
    }

    #[test]
    fn restarting_a_placed_instance_is_ignored() {
        let mut drag = machine();
        drag.start_from_pool(id(0));
        drag.drop_on_slot(&1);
        // A second start for the same instance fails: it is no longer in the pool.
        assert!(drag.start_from_pool(id(0)).is_ignored());
        assert!(!drag.is_dragging());
    }

    #[test]
    fn pool_entry_gone_at_drop_goes_idle() {
        let mut drag = machine();
        drag.start_from_pool(id(2));
        let lost = drag.pool.take_from_pool(id(2));
        assert!(lost.is_some());

        assert_eq!(
            drag.drop_on_slot(&1),
            DragOutcome::Ignored(IgnoreReason::UnknownInstance(id(2)))
        );
        assert!(!drag.is_dragging());
        assert_eq!(drag.highlighted(), None);
        assert!(drag.pool().occupant(&1).is_none());
        assert_eq!(values(&drag), ["a", "b"]);
    }

    #[test]
    fn reset_returns_everything() {
        let mut drag = machine();
        drag.start_from_pool(id(0));
        drag.drop_on_slot(&1);
        drag.start_from_pool(id(1));
        drag.drop_on_slot(&2);
        drag.start_from_slot(&2);

        drag.reset();
        assert!(drag.is_settled());
        assert_eq!(drag.pool().placed_count(), 0);
        assert_eq!(drag.pool().pool().len(), 3);
    }

    #[test]
    fn into_pool_cancels_drag() {
        let mut drag = machine();
        drag.start_from_pool(id(0));
        drag.drop_on_slot(&1);
        drag.start_from_slot(&1);
        let pool = drag.into_pool();
        assert!(pool.is_conserved(0));
    }
}
