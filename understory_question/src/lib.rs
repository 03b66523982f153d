// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_question --heading-base-level=0

//! Understory Question: interaction engines for template-driven questions.
//!
//! A hosting page supplies one [`QuestionPayload`] per question: an id, a
//! [`QuestionType`], a template with `[[pos_<id>]]` tokens, and candidate items.
//! This crate turns each payload into a [`QuestionEngine`] that holds the live
//! answer state for the question type:
//!
//! - `DRAG_AND_DROP`: a shared pool dragged into template slots.
//! - `REARRANGE`: a shared pool dragged into positions `0..N`.
//! - `DROPDOWN`: one independent select per slot, candidates grouped by
//!   `positionId`.
//! - `FILL_IN_THE_BLANK`: one text field per slot.
//!
//! The host forwards its raw UI events as [`GestureEvent`]s and redraws from
//! [`QuestionEngine::view`]. Every event carries the id of the question it
//! started in; engines ignore events from other questions, and
//! [`QuestionBoard`] routes events when several questions share a page.
//!
//! Grading, submission, and rendering stay with the host.
//!
//! ## Example
//!
//! ```rust
//! use understory_placement::DragOutcome;
//! use understory_question::{Gesture, GestureEvent, GestureOutcome, QuestionBoard, QuestionPayload};
//! use understory_template::SlotRef;
//!
//! let payload = QuestionPayload::from_json(
//!     r#"{
//!         "id": 7,
//!         "questionType": "DRAG_AND_DROP",
//!         "questionText": "I [[pos_1]] Rust.",
//!         "content": { "data": [
//!             { "id": 1, "value": "love" },
//!             { "id": 2, "value": "fear" }
//!         ] }
//!     }"#,
//! )?;
//!
//! let mut board = QuestionBoard::new();
//! let love = board.mount(&payload)?.view().pool[0].instance;
//!
//! let q7 = payload.id.clone();
//! board.dispatch(&q7, GestureEvent::new("7", Gesture::StartFromPool(love)));
//! let outcome = board.dispatch(
//!     &q7,
//!     GestureEvent::new("7", Gesture::DropOnSlot(SlotRef::first("1").into())),
//! );
//! assert!(matches!(outcome, GestureOutcome::Drag(DragOutcome::Placed { .. })));
//!
//! let view = board.view(&q7).unwrap();
//! assert_eq!(view.pool.len(), 1);
//! # Ok::<(), understory_question::QuestionError>(())
//! ```
//!
//! ## Logging
//!
//! Ignored events (foreign question, unknown slot, wrong gesture for the type)
//! are logged through [`tracing`] at `debug`. Remounting a question that is
//! already mounted logs a `warn`.

mod board;
mod dropdown;
mod engine;
mod error;
mod fill_blank;
mod payload;
mod view;

pub use board::QuestionBoard;
pub use dropdown::{Candidate, Dropdown, DropdownSlot};
pub use engine::{
    EngineOptions, Gesture, GestureEvent, GestureOutcome, Ignored, QuestionEngine, QuestionKind,
    SlotKey,
};
pub use error::QuestionError;
pub use fill_blank::FillBlank;
pub use payload::{Content, ContentItem, ItemId, QuestionId, QuestionPayload, QuestionType};
pub use view::{EntryView, PositionView, QuestionView, SegmentView, SlotContent};
