// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Every question mounted on one page.
//!
//! Several questions may be on screen at once, and the host's drop targets
//! belong to whichever question rendered them. [`QuestionBoard::dispatch`]
//! routes an event to the question that owns the target; that engine then
//! rejects events whose origin is a different question, so a drag started in
//! one question can never place an item into another.

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use tracing::{debug, warn};

use crate::QuestionError;
use crate::engine::{EngineOptions, GestureEvent, GestureOutcome, Ignored, QuestionEngine};
use crate::payload::{QuestionId, QuestionPayload};
use crate::view::QuestionView;

/// Engines keyed by question id.
#[derive(Clone, Debug, Default)]
pub struct QuestionBoard {
    engines: HashMap<QuestionId, QuestionEngine>,
    options: EngineOptions,
}

impl QuestionBoard {
    /// Creates an empty board with default [`EngineOptions`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty board whose engines use `options`.
    #[must_use]
    pub fn with_options(options: EngineOptions) -> Self {
        Self {
            engines: HashMap::new(),
            options,
        }
    }

    /// The options new engines are built with.
    #[must_use]
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Builds an engine for `payload` and mounts it.
    ///
    /// A question already mounted under the same id is replaced, discarding its
    /// answers.
    ///
    /// # Errors
    ///
    /// Returns [`QuestionError::UnsupportedQuestionType`] if the type has no
    /// engine. The board is left unchanged.
    pub fn mount(&mut self, payload: &QuestionPayload) -> Result<&mut QuestionEngine, QuestionError> {
        let engine = QuestionEngine::from_payload(payload, &self.options)?;
        match self.engines.entry(engine.id().clone()) {
            Entry::Occupied(mut occupied) => {
                warn!(question = %occupied.key(), "remounting question, previous answers discarded");
                occupied.insert(engine);
                Ok(occupied.into_mut())
            }
            Entry::Vacant(vacant) => {
                debug!(
                    question = %vacant.key(),
                    question_type = ?engine.question_type(),
                    "mounted question"
                );
                Ok(vacant.insert(engine))
            }
        }
    }

    /// Removes a question, returning its engine.
    pub fn unmount(&mut self, id: &QuestionId) -> Option<QuestionEngine> {
        let engine = self.engines.remove(id);
        if engine.is_some() {
            debug!(question = %id, "unmounted question");
        }
        engine
    }

    /// The engine for `id`.
    #[must_use]
    pub fn get(&self, id: &QuestionId) -> Option<&QuestionEngine> {
        self.engines.get(id)
    }

    /// The engine for `id`, mutably.
    #[must_use]
    pub fn get_mut(&mut self, id: &QuestionId) -> Option<&mut QuestionEngine> {
        self.engines.get_mut(id)
    }

    /// Number of mounted questions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    /// Returns `true` if nothing is mounted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    /// Ids of every mounted question, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &QuestionId> + '_ {
        self.engines.keys()
    }

    /// Delivers `event` to the question that owns the event's target.
    ///
    /// `target` is the question whose element received the event; for drag
    /// starts and drag ends that is the originating question, for drops it is
    /// the question owning the drop zone.
    pub fn dispatch(&mut self, target: &QuestionId, event: GestureEvent) -> GestureOutcome {
        match self.engines.get_mut(target) {
            Some(engine) => engine.apply(event),
            None => {
                debug!(question = %target, "event for a question that is not mounted");
                GestureOutcome::Ignored(Ignored::NotMounted)
            }
        }
    }

    /// A snapshot of the question `id`.
    #[must_use]
    pub fn view(&self, id: &QuestionId) -> Option<QuestionView> {
        self.engines.get(id).map(QuestionEngine::view)
    }
}
