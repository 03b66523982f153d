// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One engine per mounted question, with question-id guarded event routing.

use std::fmt;

use serde::Serialize;
use tracing::debug;
use understory_placement::{CancelPolicy, DragOutcome, DragPlacement, InstanceId, ItemPool, Rearrange};
use understory_template::{SlotRef, Template, parse};

use crate::QuestionError;
use crate::dropdown::Dropdown;
use crate::fill_blank::FillBlank;
use crate::payload::{QuestionId, QuestionPayload, QuestionType};

/// Settings applied to every engine built from a payload.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// What happens to a slot-origin item whose drag ends without a drop.
    pub cancel_policy: CancelPolicy,
}

/// A slot as addressed by host events.
///
/// Template-driven questions use [`SlotKey::Position`]; rearrange questions
/// use [`SlotKey::Index`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKey {
    /// A template slot.
    Position(SlotRef),
    /// A positional slot of a rearrange question.
    Index(usize),
}

impl SlotKey {
    /// The template slot, if this is one.
    #[must_use]
    pub fn into_position(self) -> Option<SlotRef> {
        match self {
            Self::Position(slot) => Some(slot),
            Self::Index(_) => None,
        }
    }

    /// The positional index, if this is one.
    #[must_use]
    pub fn into_index(self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(index),
            Self::Position(_) => None,
        }
    }
}

impl From<SlotRef> for SlotKey {
    fn from(slot: SlotRef) -> Self {
        Self::Position(slot)
    }
}

impl From<usize> for SlotKey {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// A user gesture, as reported by the host's event handlers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Gesture {
    /// Drag start on a pool item.
    StartFromPool(InstanceId),
    /// Drag start on a filled slot.
    StartFromSlot(SlotKey),
    /// Drag over a slot.
    DragOver(SlotKey),
    /// Drag leaves the hovered slot.
    DragLeave,
    /// Drop on a slot.
    DropOnSlot(SlotKey),
    /// Drop on the pool area.
    DropOnPoolArea,
    /// Drag end that reached no drop target.
    EndWithoutDrop,
    /// Dropdown choice.
    Select {
        /// The dropdown slot.
        slot: SlotRef,
        /// The chosen candidate value.
        value: String,
    },
    /// Dropdown reset to no choice.
    ClearSelection(SlotRef),
    /// Text typed into a blank.
    SetText {
        /// The blank.
        slot: SlotRef,
        /// Its full new text.
        text: String,
    },
}

/// A gesture tagged with the question it originated from.
///
/// Drag payloads carry the originating question id so that a drop landing on
/// a different question on the same page can be recognized and ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GestureEvent {
    /// The question whose UI produced the event.
    pub question: QuestionId,
    /// What happened.
    pub gesture: Gesture,
}

impl GestureEvent {
    /// Creates an event.
    #[must_use]
    pub fn new(question: impl Into<QuestionId>, gesture: Gesture) -> Self {
        Self {
            question: question.into(),
            gesture,
        }
    }
}

/// Why a gesture was ignored before reaching any state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ignored {
    /// The event came from a different question.
    ForeignQuestion,
    /// No engine is mounted for the target question.
    NotMounted,
    /// The gesture does not apply to this question type.
    NotApplicable,
    /// A positional key for a template question, or the other way round.
    WrongSlotKind,
}

/// Result of applying a [`GestureEvent`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GestureOutcome {
    /// A drag transition ran.
    Drag(DragOutcome<SlotKey>),
    /// A dropdown gesture ran; `true` if the selection changed.
    SelectionChanged(bool),
    /// A blank's text was set; `true` if it changed.
    TextChanged(bool),
    /// Nothing happened.
    Ignored(Ignored),
}

impl GestureOutcome {
    /// Returns `true` if the gesture had no effect on placement state.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        match self {
            Self::Drag(outcome) => outcome.is_ignored(),
            Self::Ignored(_) => true,
            Self::SelectionChanged(_) | Self::TextChanged(_) => false,
        }
    }
}

/// Interaction state, by question type.
#[derive(Clone, Debug)]
pub enum QuestionKind {
    /// Pool items dragged into template slots.
    DragAndDrop(DragPlacement<SlotRef>),
    /// Pool items dragged into positional order.
    Rearrange(Rearrange),
    /// One select per template slot.
    Dropdown(Dropdown),
    /// One text field per template slot.
    FillBlank(FillBlank),
}

/// Live interaction state of one question while it is mounted.
#[derive(Clone, Debug)]
pub struct QuestionEngine {
    id: QuestionId,
    question_type: QuestionType,
    template: Template,
    kind: QuestionKind,
}

impl QuestionEngine {
    /// Parses the template and initializes the state for the question type.
    ///
    /// # Errors
    ///
    /// Returns [`QuestionError::UnsupportedQuestionType`] for question types
    /// answered with plain forms.
    pub fn from_payload(
        payload: &QuestionPayload,
        options: &EngineOptions,
    ) -> Result<Self, QuestionError> {
        let template = parse(&payload.question_text);
        let values = || payload.items().iter().map(|item| item.value.clone());

        let kind = match payload.question_type {
            QuestionType::DragAndDrop => QuestionKind::DragAndDrop(
                DragPlacement::new(ItemPool::new(values(), template.slots().cloned()))
                    .with_cancel_policy(options.cancel_policy),
            ),
            QuestionType::Rearrange => QuestionKind::Rearrange(
                Rearrange::new(values()).with_cancel_policy(options.cancel_policy),
            ),
            QuestionType::Dropdown => {
                QuestionKind::Dropdown(Dropdown::new(&template, payload.items()))
            }
            QuestionType::FillInTheBlank => QuestionKind::FillBlank(FillBlank::new(&template)),
            question_type @ (QuestionType::MultipleChoice
            | QuestionType::MultipleSelect
            | QuestionType::TrueOrFalse
            | QuestionType::Rewrite) => {
                return Err(QuestionError::UnsupportedQuestionType {
                    id: payload.id.clone(),
                    question_type,
                });
            }
        };

        Ok(Self {
            id: payload.id.clone(),
            question_type: payload.question_type,
            template,
            kind,
        })
    }

    /// The question's id.
    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    /// The question's type.
    #[must_use]
    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    /// The parsed question text.
    #[must_use]
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// The interaction state.
    #[must_use]
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// For rearrange questions, whether every position is filled.
    #[must_use]
    pub fn is_complete(&self) -> Option<bool> {
        match &self.kind {
            QuestionKind::Rearrange(rearrange) => Some(rearrange.is_complete()),
            _ => None,
        }
    }

    /// Applies a gesture. Events from another question are ignored.
    pub fn apply(&mut self, event: GestureEvent) -> GestureOutcome {
        if event.question != self.id {
            debug!(
                question = %self.id,
                origin = %event.question,
                "ignoring gesture from another question"
            );
            return GestureOutcome::Ignored(Ignored::ForeignQuestion);
        }

        match &mut self.kind {
            QuestionKind::DragAndDrop(drag) => {
                drive(drag, event.gesture, SlotKey::into_position, SlotKey::Position)
            }
            QuestionKind::Rearrange(rearrange) => drive(
                rearrange.drag_mut(),
                event.gesture,
                SlotKey::into_index,
                SlotKey::Index,
            ),
            QuestionKind::Dropdown(dropdown) => match event.gesture {
                Gesture::Select { slot, value } => {
                    GestureOutcome::SelectionChanged(dropdown.select(&slot, &value))
                }
                Gesture::ClearSelection(slot) => {
                    GestureOutcome::SelectionChanged(dropdown.clear(&slot))
                }
                _ => GestureOutcome::Ignored(Ignored::NotApplicable),
            },
            QuestionKind::FillBlank(blanks) => match event.gesture {
                Gesture::SetText { slot, text } => {
                    GestureOutcome::TextChanged(blanks.set_text(&slot, text))
                }
                _ => GestureOutcome::Ignored(Ignored::NotApplicable),
            },
        }
    }

    /// Clears every answer: placed items go back to the pool, selections and
    /// texts are emptied.
    pub fn reset(&mut self) {
        match &mut self.kind {
            QuestionKind::DragAndDrop(drag) => drag.reset(),
            QuestionKind::Rearrange(rearrange) => rearrange.reset(),
            QuestionKind::Dropdown(dropdown) => dropdown.clear_all(),
            QuestionKind::FillBlank(blanks) => blanks.clear_all(),
        }
    }
}

/// Routes a drag gesture to `drag`, translating slot keys with `key` and back
/// with `wrap`.
fn drive<S>(
    drag: &mut DragPlacement<S>,
    gesture: Gesture,
    key: fn(SlotKey) -> Option<S>,
    wrap: fn(S) -> SlotKey,
) -> GestureOutcome
where
    S: Clone + PartialEq + fmt::Debug,
{
    let wrong_kind = |slot: &SlotKey| {
        debug!(slot = ?slot, "slot key does not fit this question type");
        GestureOutcome::Ignored(Ignored::WrongSlotKind)
    };

    let outcome = match gesture {
        Gesture::StartFromPool(instance) => drag.start_from_pool(instance),
        Gesture::StartFromSlot(slot) => match key(slot.clone()) {
            Some(slot) => drag.start_from_slot(&slot),
            None => return wrong_kind(&slot),
        },
        Gesture::DragOver(slot) => match key(slot.clone()) {
            Some(slot) => drag.drag_over(&slot),
            None => return wrong_kind(&slot),
        },
        Gesture::DragLeave => drag.drag_leave(),
        Gesture::DropOnSlot(slot) => match key(slot.clone()) {
            Some(slot) => drag.drop_on_slot(&slot),
            None => return wrong_kind(&slot),
        },
        Gesture::DropOnPoolArea => drag.drop_on_pool_area(),
        Gesture::EndWithoutDrop => drag.end_without_drop(),
        Gesture::Select { .. } | Gesture::ClearSelection(_) | Gesture::SetText { .. } => {
            return GestureOutcome::Ignored(Ignored::NotApplicable);
        }
    };
    GestureOutcome::Drag(outcome.map_slot(wrap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::ContentItem;

    fn drag_and_drop() -> QuestionEngine {
        let payload = QuestionPayload::new("q1", QuestionType::DragAndDrop, "[[pos_1]] [[pos_2]]")
            .with_items([ContentItem::new("a", "I"), ContentItem::new("b", "love")]);
        QuestionEngine::from_payload(&payload, &EngineOptions::default()).unwrap()
    }

    #[test]
    fn plain_form_types_are_rejected() {
        let payload = QuestionPayload::new("q", QuestionType::MultipleChoice, "Pick one");
        let err = QuestionEngine::from_payload(&payload, &EngineOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            QuestionError::UnsupportedQuestionType {
                question_type: QuestionType::MultipleChoice,
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "question q: MultipleChoice questions have no placement engine"
        );
    }

    #[test]
    fn foreign_events_change_nothing() {
        let mut engine = drag_and_drop();
        let outcome = engine.apply(GestureEvent::new(
            "q2",
            Gesture::StartFromPool(InstanceId::new(0)),
        ));
        assert_eq!(outcome, GestureOutcome::Ignored(Ignored::ForeignQuestion));
        let QuestionKind::DragAndDrop(drag) = engine.kind() else {
            panic!("expected a drag-and-drop engine");
        };
        assert!(!drag.is_dragging());
    }

    #[test]
    fn index_keys_do_not_address_template_slots() {
        let mut engine = drag_and_drop();
        engine.apply(GestureEvent::new("q1", Gesture::StartFromPool(InstanceId::new(0))));
        let outcome = engine.apply(GestureEvent::new("q1", Gesture::DropOnSlot(SlotKey::Index(0))));
        assert_eq!(outcome, GestureOutcome::Ignored(Ignored::WrongSlotKind));
        assert!(outcome.is_ignored());
    }

    #[test]
    fn outcomes_carry_slot_keys() {
        let mut engine = drag_and_drop();
        engine.apply(GestureEvent::new("q1", Gesture::StartFromPool(InstanceId::new(1))));
        let outcome = engine.apply(GestureEvent::new(
            "q1",
            Gesture::DropOnSlot(SlotRef::first("2").into()),
        ));
        assert_eq!(
            outcome,
            GestureOutcome::Drag(DragOutcome::Placed {
                slot: SlotKey::Position(SlotRef::first("2")),
                evicted: None,
            })
        );
    }

    #[test]
    fn selection_gestures_do_not_apply_to_drag_questions() {
        let mut engine = drag_and_drop();
        let outcome = engine.apply(GestureEvent::new(
            "q1",
            Gesture::Select {
                slot: SlotRef::first("1"),
                value: "I".into(),
            },
        ));
        assert_eq!(outcome, GestureOutcome::Ignored(Ignored::NotApplicable));
    }

    #[test]
    fn completion_is_reported_for_rearrange_only() {
        assert_eq!(drag_and_drop().is_complete(), None);
        let payload = QuestionPayload::new("r", QuestionType::Rearrange, "")
            .with_items([ContentItem::new("a", "x")]);
        let engine = QuestionEngine::from_payload(&payload, &EngineOptions::default()).unwrap();
        assert_eq!(engine.is_complete(), Some(false));
    }

    #[test]
    fn options_reach_the_drag_machine() {
        let payload = QuestionPayload::new("q", QuestionType::DragAndDrop, "[[pos_1]]")
            .with_items([ContentItem::new("a", "x")]);
        let options = EngineOptions {
            cancel_policy: CancelPolicy::RestoreOrigin,
        };
        let engine = QuestionEngine::from_payload(&payload, &options).unwrap();
        let QuestionKind::DragAndDrop(drag) = engine.kind() else {
            panic!("expected a drag-and-drop engine");
        };
        assert_eq!(drag.cancel_policy(), CancelPolicy::RestoreOrigin);
    }
}
