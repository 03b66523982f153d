// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_placement --heading-base-level=0

//! Understory Placement: answer placement for drag-and-drop question UIs.
//!
//! This crate tracks where candidate answers sit while a question is being
//! answered: in a shared pool of unplaced items, or in one of the question's
//! slots. It is split into three layers:
//!
//! - [`pool`]: the [`ItemPool`] bookkeeping primitives. Take an entry from the
//!   pool, return it, assign it to a slot, clear a slot.
//! - [`drag`]: the [`DragPlacement`] state machine that maps native drag
//!   events (start, over, drop, end) onto those primitives.
//! - [`rearrange`]: [`Rearrange`], the sequencing variant where slots are the
//!   positions `0..N` and completion means every candidate has been placed.
//!
//! Slots are generic. Template-driven questions key them by the token they
//! came from; sequencing questions key them by index. The crate knows nothing
//! about rendering, event routing, or grading.
//!
//! ## Guarantees
//!
//! Every candidate gets a synthetic [`InstanceId`], so duplicate display
//! values are always told apart. Outside an in-progress drag:
//!
//! - the pool plus the occupied slots hold exactly the candidates the pool was
//!   built with, and
//! - no instance appears in two places.
//!
//! Events that do not fit the current state are reported as ignored and change
//! nothing, so duplicated or out-of-order DOM events are harmless.
//!
//! ## Example
//!
//! ```rust
//! use understory_placement::{DragOutcome, DragPlacement, ItemPool};
//!
//! let mut drag = DragPlacement::new(ItemPool::new(["love", "hate"], ["verb"]));
//! let love = drag.pool().pool()[0].instance();
//! let hate = drag.pool().pool()[1].instance();
//!
//! drag.start_from_pool(love);
//! drag.drop_on_slot(&"verb");
//!
//! // Dropping another item on a filled slot sends the occupant back.
//! drag.start_from_pool(hate);
//! assert_eq!(
//!     drag.drop_on_slot(&"verb"),
//!     DragOutcome::Placed { slot: "verb", evicted: Some(love) }
//! );
//! assert_eq!(drag.pool().pool()[0].value(), "love");
//! ```
//!
//! ## Logging
//!
//! Ignored events and pool misses are reported through [`tracing`] at `debug`
//! level; accepted transitions at `trace`. No subscriber is installed here.
//!
//! ## Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` for ids, entries, origins and
//!   the cancel policy.

pub mod drag;
pub mod pool;
pub mod rearrange;

pub use drag::{CancelPolicy, DragOrigin, DragOutcome, DragPhase, DragPlacement, IgnoreReason};
pub use pool::{InstanceId, ItemPool, PoolEntry, UnknownSlot};
pub use rearrange::Rearrange;
