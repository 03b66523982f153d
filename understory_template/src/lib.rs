// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_template --heading-base-level=0

//! Understory Template: question templates with embedded slot tokens.
//!
//! A question template is plain text with placeholder tokens of the form
//! `[[pos_<id>]]`. This crate turns such a string into an ordered list of
//! [`Segment`]s: runs of literal text and the slots between them. It does not
//! know what a slot will be filled with; placement crates and question engines
//! build on top of the parsed [`Template`].
//!
//! Parsing is total. A token that is not complete (for example `[[pos_` with no
//! closing `]]`, or `[[pos_]]` with no id) stays in the literal text, so any
//! input string produces a renderable template.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_template::{Segment, parse};
//!
//! let template = parse("The capital of [[pos_1]] is [[pos_2]].");
//! assert_eq!(template.slot_count(), 2);
//!
//! let kinds: Vec<_> = template
//!     .segments()
//!     .iter()
//!     .map(|segment| match segment {
//!         Segment::Literal(_) => "text",
//!         Segment::Slot(_) => "slot",
//!     })
//!     .collect();
//! assert_eq!(kinds, ["text", "slot", "text", "slot", "text"]);
//! ```
//!
//! ## Repeated positions
//!
//! The same position id may appear more than once. Each appearance is its own
//! slot, told apart by a zero-based occurrence index:
//!
//! ```rust
//! use understory_template::parse;
//!
//! let template = parse("[[pos_a]] or [[pos_a]]?");
//! let slots: Vec<_> = template.slots().collect();
//! assert_eq!(slots[0].occurrence, 0);
//! assert_eq!(slots[1].occurrence, 1);
//! assert_eq!(slots[0].position_id, slots[1].position_id);
//! ```
//!
//! ## Rich text
//!
//! Literal segments and candidate values may carry inline markup. [`RichText`]
//! keeps that markup opaque and offers an escaped form for hosts that do not
//! route it through a sanitizing renderer.
//!
//! ## Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` for the public data types.
//!   The serialization tests only build with it enabled
//!   (`cargo test -p understory_template --all-features`).

mod rich_text;
mod segment;

pub use rich_text::RichText;
pub use segment::{PositionId, Segment, SlotRef, Template, parse};
