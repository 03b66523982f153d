// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The static per-question payload supplied by the hosting page.
//!
//! Field names follow the content API's JSON (`questionType`, `questionText`,
//! `content.data[].positionId`). Ids arrive as strings or numbers and are kept
//! as text.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::QuestionError;

/// A JSON id that may be written as a string or a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl TextOrNumber {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Integer(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
        }
    }
}

fn optional_text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TextOrNumber>::deserialize(deserializer)?.map(TextOrNumber::into_text))
}

/// Identity of a question. Engines and board routing are keyed by it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Creates a question id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        TextOrNumber::deserialize(deserializer).map(|raw| Self(raw.into_text()))
    }
}

impl From<QuestionId> for String {
    fn from(id: QuestionId) -> Self {
        id.0
    }
}

impl From<&str> for QuestionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a content item as assigned by the content API.
///
/// This is not the placement identity; see
/// [`InstanceId`](understory_placement::InstanceId).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Creates an item id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        TextOrNumber::deserialize(deserializer).map(|raw| Self(raw.into_text()))
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

/// Question kinds known to the content API.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    /// Drag candidates from a pool into template slots.
    DragAndDrop,
    /// Drag every candidate into positional order.
    Rearrange,
    /// Pick one candidate per template slot from a select.
    Dropdown,
    /// Type free text into each template slot.
    FillInTheBlank,
    /// Plain form, no placement engine.
    MultipleChoice,
    /// Plain form, no placement engine.
    MultipleSelect,
    /// Plain form, no placement engine.
    TrueOrFalse,
    /// Plain form, no placement engine.
    Rewrite,
}

impl QuestionType {
    /// Returns `true` for the types driven by a [`QuestionEngine`](crate::QuestionEngine).
    #[must_use]
    pub fn has_engine(self) -> bool {
        matches!(
            self,
            Self::DragAndDrop | Self::Rearrange | Self::Dropdown | Self::FillInTheBlank
        )
    }
}

/// One candidate answer unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Content API id.
    pub id: ItemId,
    /// Display text; may contain inline markup.
    #[serde(default)]
    pub value: String,
    /// The slot token id this item belongs to, bare (`"1"`) or prefixed
    /// (`"pos_1"`). Dropdown questions group candidates by it.
    #[serde(default, deserialize_with = "optional_text_or_number")]
    pub position_id: Option<String>,
    /// Advisory correctness flag. Placement never reads it.
    #[serde(default)]
    pub correct: bool,
}

impl ContentItem {
    /// Creates an item with no position affinity.
    #[must_use]
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(id),
            value: value.into(),
            position_id: None,
            correct: false,
        }
    }

    /// Sets the position affinity.
    #[must_use]
    pub fn at_position(mut self, position_id: impl Into<String>) -> Self {
        self.position_id = Some(position_id.into());
        self
    }

    /// Sets the advisory correctness flag.
    #[must_use]
    pub fn correct(mut self, correct: bool) -> Self {
        self.correct = correct;
        self
    }
}

/// Wrapper matching the API's `content: { data: [...] }` shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Candidate items, in source order.
    #[serde(default)]
    pub data: Vec<ContentItem>,
}

/// Everything the engine needs to know about one question.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPayload {
    /// Question id.
    pub id: QuestionId,
    /// Which interaction applies.
    pub question_type: QuestionType,
    /// Raw template with `[[pos_<id>]]` tokens.
    #[serde(default)]
    pub question_text: String,
    /// Candidate items.
    #[serde(default)]
    pub content: Content,
    /// Points awarded by the grader. Carried through, never interpreted.
    #[serde(default)]
    pub score: Option<f64>,
}

impl QuestionPayload {
    /// Creates a payload with no candidates and no score.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        question_type: QuestionType,
        question_text: impl Into<String>,
    ) -> Self {
        Self {
            id: QuestionId::new(id),
            question_type,
            question_text: question_text.into(),
            content: Content::default(),
            score: None,
        }
    }

    /// Appends candidate items.
    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = ContentItem>) -> Self {
        self.content.data.extend(items);
        self
    }

    /// Candidate items, in source order.
    #[must_use]
    pub fn items(&self) -> &[ContentItem] {
        &self.content.data
    }

    /// Parses a payload from the content API's JSON.
    ///
    /// # Errors
    ///
    /// Returns [`QuestionError::Json`] if the JSON does not describe a payload.
    pub fn from_json(json: &str) -> Result<Self, QuestionError> {
        Ok(serde_json::from_str(json)?)
    }
}
