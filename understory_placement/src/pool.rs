// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item pool: unplaced candidates plus the slot → occupant map.
//!
//! [`ItemPool`] owns every candidate entry of one question instance. Each entry
//! lives in exactly one place: the pool, or a single slot. Entries carry a
//! synthetic [`InstanceId`] so that two candidates with the same display value
//! are never confused.
//!
//! The primitives here do not route anything on their own. [`ItemPool::assign`]
//! hands back an evicted occupant and [`ItemPool::clear`] hands back the removed
//! one; the caller decides where those go. The drag state machine in
//! [`crate::drag`] is the intended caller.
//!
//! ## Minimal example
//!
//! ```
//! use understory_placement::pool::ItemPool;
//!
//! let mut pool = ItemPool::new(["I", "love", "Rust"], [0_usize, 1, 2]);
//! let love = pool.pool()[1].instance();
//!
//! let entry = pool.take_from_pool(love).unwrap();
//! assert_eq!(pool.assign(&1, entry).unwrap(), None);
//!
//! assert_eq!(pool.occupant(&1).map(|e| e.value()), Some("love"));
//! assert_eq!(pool.pool().len(), 2);
//! assert!(pool.is_conserved(0));
//! ```

use std::fmt;

use tracing::debug;

/// Synthetic identity of one candidate entry within a question instance.
///
/// Assigned from a counter in source order when the pool is built.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct InstanceId(u32);

impl InstanceId {
    /// Creates an instance id from its raw counter value.
    #[must_use]
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw counter value.
    #[must_use]
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One candidate: its identity and display value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolEntry {
    instance: InstanceId,
    value: String,
}

impl PoolEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(instance: InstanceId, value: impl Into<String>) -> Self {
        Self {
            instance,
            value: value.into(),
        }
    }

    /// The entry's identity.
    #[must_use]
    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    /// The entry's display value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Error returned by [`ItemPool::assign`] for a slot the pool does not declare.
///
/// The rejected entry is handed back so the caller can put it somewhere.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("slot {slot:?} is not declared for this question")]
pub struct UnknownSlot<S: fmt::Debug> {
    /// The slot key that was not found.
    pub slot: S,
    /// The entry that could not be placed.
    pub entry: PoolEntry,
}

/// Where an entry currently sits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Location<'a, S> {
    /// Unplaced, listed in the pool.
    Pool,
    /// Occupying the given slot.
    Slot(&'a S),
}

/// The pool and slot assignments of one question instance.
///
/// Slots are kept in declaration order. Lookups scan linearly; questions have
/// a handful of slots, and `S` only needs equality.
#[derive(Clone, Debug)]
pub struct ItemPool<S> {
    pool: Vec<PoolEntry>,
    slots: Vec<(S, Option<PoolEntry>)>,
    total: usize,
    revision: u64,
}

impl<S> ItemPool<S>
where
    S: Clone + PartialEq + fmt::Debug,
{
    /// Builds a pool holding every value, in order, and one empty slot per
    /// distinct key in `slots`.
    ///
    /// # Panics
    ///
    /// Panics if there are more than `u32::MAX` values.
    #[must_use]
    pub fn new<V>(values: impl IntoIterator<Item = V>, slots: impl IntoIterator<Item = S>) -> Self
    where
        V: Into<String>,
    {
        let mut declared: Vec<(S, Option<PoolEntry>)> = Vec::new();
        for slot in slots {
            if !declared.iter().any(|(key, _)| *key == slot) {
                declared.push((slot, None));
            }
        }
        Self::from_parts(values, declared)
    }

    /// Like [`ItemPool::new`], for slot keys the caller knows to be distinct.
    ///
    /// Skips the duplicate scan, so construction is linear in the number of
    /// slots. Passing a repeated key leaves the later copy unreachable.
    ///
    /// # Panics
    ///
    /// Panics if there are more than `u32::MAX` values.
    #[must_use]
    pub fn with_distinct_slots<V>(
        values: impl IntoIterator<Item = V>,
        slots: impl IntoIterator<Item = S>,
    ) -> Self
    where
        V: Into<String>,
    {
        Self::from_parts(values, slots.into_iter().map(|slot| (slot, None)).collect())
    }

    fn from_parts<V>(
        values: impl IntoIterator<Item = V>,
        slots: Vec<(S, Option<PoolEntry>)>,
    ) -> Self
    where
        V: Into<String>,
    {
        let pool: Vec<PoolEntry> = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                let raw = u32::try_from(index).expect("too many pool entries for InstanceId (u32)");
                PoolEntry::new(InstanceId::new(raw), value)
            })
            .collect();

        Self {
            total: pool.len(),
            pool,
            slots,
            revision: 0,
        }
    }

    /// Unplaced entries, in pool order.
    #[must_use]
    pub fn pool(&self) -> &[PoolEntry] {
        &self.pool
    }

    /// Every declared slot with its occupant, in declaration order.
    pub fn slots(&self) -> impl Iterator<Item = (&S, Option<&PoolEntry>)> + '_ {
        self.slots.iter().map(|(key, entry)| (key, entry.as_ref()))
    }

    /// Number of declared slots.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if `slot` is declared.
    #[must_use]
    pub fn contains_slot(&self, slot: &S) -> bool {
        self.slots.iter().any(|(key, _)| key == slot)
    }

    /// The entry in `slot`, if any.
    #[must_use]
    pub fn occupant(&self, slot: &S) -> Option<&PoolEntry> {
        self.slots
            .iter()
            .find(|(key, _)| key == slot)
            .and_then(|(_, entry)| entry.as_ref())
    }

    /// The pool entry with identity `instance`, if it is currently unplaced.
    #[must_use]
    pub fn find_in_pool(&self, instance: InstanceId) -> Option<&PoolEntry> {
        self.pool.iter().find(|entry| entry.instance == instance)
    }

    /// Where `instance` currently sits, or `None` if it is in neither the
    /// pool nor a slot (held by a drag, or never existed).
    #[must_use]
    pub fn locate(&self, instance: InstanceId) -> Option<Location<'_, S>> {
        if self.find_in_pool(instance).is_some() {
            return Some(Location::Pool);
        }
        self.slots.iter().find_map(|(key, entry)| {
            entry
                .as_ref()
                .filter(|entry| entry.instance == instance)
                .map(|_| Location::Slot(key))
        })
    }

    /// Number of entries supplied at construction.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.slots.iter().filter(|(_, entry)| entry.is_some()).count()
    }

    /// Monotonic counter bumped on every mutation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Removes and returns the pool entry with identity `instance`.
    ///
    /// Returns `None`, leaving everything unchanged, if the entry is not in the
    /// pool. Stale or duplicated drop events end up here.
    pub fn take_from_pool(&mut self, instance: InstanceId) -> Option<PoolEntry> {
        let Some(index) = self.pool.iter().position(|entry| entry.instance == instance) else {
            debug!(instance = %instance, "entry not in pool; ignoring take");
            return None;
        };
        self.revision += 1;
        Some(self.pool.remove(index))
    }

    /// Appends `entry` to the end of the pool.
    pub fn return_to_pool(&mut self, entry: PoolEntry) {
        self.pool.push(entry);
        self.revision += 1;
    }

    /// Puts `entry` into `slot`, returning the previous occupant, if any.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownSlot`], carrying `entry` back, if `slot` is not declared.
    pub fn assign(&mut self, slot: &S, entry: PoolEntry) -> Result<Option<PoolEntry>, UnknownSlot<S>> {
        let Some((_, occupant)) = self.slots.iter_mut().find(|(key, _)| key == slot) else {
            return Err(UnknownSlot {
                slot: slot.clone(),
                entry,
            });
        };
        self.revision += 1;
        Ok(occupant.replace(entry))
    }

    /// Removes and returns the occupant of `slot` without placing it anywhere.
    pub fn clear(&mut self, slot: &S) -> Option<PoolEntry> {
        let taken = self
            .slots
            .iter_mut()
            .find(|(key, _)| key == slot)
            .and_then(|(_, occupant)| occupant.take());
        match taken {
            Some(_) => self.revision += 1,
            None => debug!(slot = ?slot, "slot empty or undeclared; ignoring clear"),
        }
        taken
    }

    /// Moves the pool entry `instance` straight into the empty slot `slot`.
    ///
    /// Returns `false`, changing nothing, if the slot is undeclared or occupied
    /// or the entry is not in the pool.
    pub fn prefill(&mut self, slot: &S, instance: InstanceId) -> bool {
        let slot_is_free = self
            .slots
            .iter()
            .any(|(key, occupant)| key == slot && occupant.is_none());
        if !slot_is_free || self.find_in_pool(instance).is_none() {
            debug!(slot = ?slot, instance = %instance, "cannot prefill slot");
            return false;
        }
        let Some(entry) = self.take_from_pool(instance) else {
            return false;
        };
        matches!(self.assign(slot, entry), Ok(None))
    }

    /// Empties every slot back into the pool, in slot order.
    pub fn return_all(&mut self) {
        let mut moved = false;
        for (_, occupant) in &mut self.slots {
            if let Some(entry) = occupant.take() {
                self.pool.push(entry);
                moved = true;
            }
        }
        if moved {
            self.revision += 1;
        }
    }

    /// Checks conservation and uniqueness of entries.
    ///
    /// `in_flight` is the number of entries currently held outside both the
    /// pool and the slots (an in-progress drag from a slot holds one).
    #[must_use]
    pub fn is_conserved(&self, in_flight: usize) -> bool {
        if self.pool.len() + self.placed_count() + in_flight != self.total {
            return false;
        }
        let mut ids: Vec<InstanceId> = self
            .pool
            .iter()
            .chain(self.slots.iter().filter_map(|(_, entry)| entry.as_ref()))
            .map(PoolEntry::instance)
            .collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        ids.len() == before
    }
}
