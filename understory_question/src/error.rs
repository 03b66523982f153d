// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::payload::{QuestionId, QuestionType};

/// Errors raised while turning a payload into an engine.
///
/// Gestures never fail; they report ignored outcomes instead.
#[derive(Debug, thiserror::Error)]
pub enum QuestionError {
    /// The question type is answered with a plain form and has no engine.
    #[error("question {id}: {question_type:?} questions have no placement engine")]
    UnsupportedQuestionType {
        /// The question's id.
        id: QuestionId,
        /// Its type.
        question_type: QuestionType,
    },
    /// The payload JSON could not be decoded.
    #[error("invalid question payload: {0}")]
    Json(#[from] serde_json::Error),
}
