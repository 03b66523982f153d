// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Template segments and the token scanner.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::RichText;

/// `[[pos_<id>]]`, where `<id>` is one or more characters other than brackets.
static SLOT_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[pos_([^\[\]]+)\]\]").expect("slot token pattern is a valid regex")
});

/// The id carried by a slot token, e.g. `"1"` for `[[pos_1]]`.
///
/// Ids are opaque: numbers and strings are both kept as text.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PositionId(String);

impl PositionId {
    /// Creates a position id from its textual form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as written inside the token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if a content item's position affinity names this id.
    ///
    /// Content payloads write the affinity either bare (`"1"`) or with the
    /// token prefix (`"pos_1"`); both forms match.
    #[must_use]
    pub fn matches_item(&self, item_position: &str) -> bool {
        item_position == self.0 || item_position.strip_prefix("pos_") == Some(self.0.as_str())
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PositionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One slot in a template: a position id plus which repeat of it this is.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotRef {
    /// The id from the `[[pos_<id>]]` token.
    pub position_id: PositionId,
    /// Zero-based count of earlier tokens with the same id in this template.
    pub occurrence: usize,
}

impl SlotRef {
    /// Creates a slot reference.
    #[must_use]
    pub fn new(position_id: impl Into<PositionId>, occurrence: usize) -> Self {
        Self {
            position_id: position_id.into(),
            occurrence,
        }
    }

    /// Shorthand for the first occurrence of `position_id`.
    #[must_use]
    pub fn first(position_id: impl Into<PositionId>) -> Self {
        Self::new(position_id, 0)
    }
}

impl fmt::Display for SlotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pos_{}#{}", self.position_id, self.occurrence)
    }
}

/// A parsed piece of a template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Segment {
    /// Text shown as-is. Never empty.
    Literal(RichText),
    /// A fillable position.
    Slot(SlotRef),
}

impl Segment {
    /// Returns the slot reference if this is a slot segment.
    #[must_use]
    pub fn as_slot(&self) -> Option<&SlotRef> {
        match self {
            Self::Slot(slot) => Some(slot),
            Self::Literal(_) => None,
        }
    }
}

/// A template split into literal and slot segments, in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Returns all segments in document order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Consumes the template, returning its segments.
    #[must_use]
    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// Iterates every slot in document order.
    pub fn slots(&self) -> impl Iterator<Item = &SlotRef> + '_ {
        self.segments.iter().filter_map(Segment::as_slot)
    }

    /// Number of slot segments.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots().count()
    }

    /// Distinct position ids, in order of first appearance.
    #[must_use]
    pub fn position_ids(&self) -> Vec<&PositionId> {
        let mut ids: Vec<&PositionId> = Vec::new();
        for slot in self.slots() {
            if !ids.contains(&&slot.position_id) {
                ids.push(&slot.position_id);
            }
        }
        ids
    }

    /// Returns `true` if the template has no segments at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns `true` if `slot` appears in this template.
    #[must_use]
    pub fn contains_slot(&self, slot: &SlotRef) -> bool {
        self.slots().any(|s| s == slot)
    }
}

impl From<&str> for Template {
    fn from(raw: &str) -> Self {
        parse(raw)
    }
}

/// Splits `raw` into literal and slot segments.
///
/// Tokens are matched left to right without overlap. Empty literal runs
/// (between adjacent tokens, or at either end) are omitted.
#[must_use]
pub fn parse(raw: &str) -> Template {
    let mut segments = Vec::new();
    let mut seen: Vec<(&str, usize)> = Vec::new();
    let mut cursor = 0;

    for captures in SLOT_TOKEN.captures_iter(raw) {
        let (Some(token), Some(id)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        push_literal(&mut segments, &raw[cursor..token.start()]);

        let id = id.as_str();
        let occurrence = match seen.iter_mut().find(|(seen_id, _)| *seen_id == id) {
            Some((_, count)) => {
                *count += 1;
                *count
            }
            None => {
                seen.push((id, 0));
                0
            }
        };
        segments.push(Segment::Slot(SlotRef::new(id, occurrence)));
        cursor = token.end();
    }
    push_literal(&mut segments, &raw[cursor..]);

    Template { segments }
}

fn push_literal(segments: &mut Vec<Segment>, text: &str) {
    if !text.is_empty() {
        segments.push(Segment::Literal(RichText::new(text)));
    }
}
