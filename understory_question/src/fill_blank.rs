// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fill-in-the-blank questions: free text per template slot.

use tracing::debug;
use understory_template::{SlotRef, Template};

/// Current text of every blank, in template order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FillBlank {
    texts: Vec<(SlotRef, String)>,
}

impl FillBlank {
    /// One empty blank per template slot segment.
    #[must_use]
    pub fn new(template: &Template) -> Self {
        Self {
            texts: template.slots().map(|slot| (slot.clone(), String::new())).collect(),
        }
    }

    /// Replaces the text of `slot`. Returns `true` if it changed.
    pub fn set_text(&mut self, slot: &SlotRef, text: impl Into<String>) -> bool {
        let Some((_, current)) = self.texts.iter_mut().find(|(s, _)| s == slot) else {
            debug!(slot = %slot, "text for unknown blank");
            return false;
        };
        let text = text.into();
        if *current == text {
            return false;
        }
        *current = text;
        true
    }

    /// The text of `slot`.
    #[must_use]
    pub fn text(&self, slot: &SlotRef) -> Option<&str> {
        self.texts
            .iter()
            .find(|(s, _)| s == slot)
            .map(|(_, text)| text.as_str())
    }

    /// Every blank with its text.
    pub fn texts(&self) -> impl Iterator<Item = (&SlotRef, &str)> + '_ {
        self.texts.iter().map(|(slot, text)| (slot, text.as_str()))
    }

    /// Empties every blank.
    pub fn clear_all(&mut self) {
        for (_, text) in &mut self.texts {
            text.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use understory_template::parse;

    use super::*;

    #[test]
    fn tracks_text_per_occurrence() {
        let mut blanks = FillBlank::new(&parse("[[pos_a]] and [[pos_a]]"));
        assert!(blanks.set_text(&SlotRef::new("a", 1), "second"));
        assert_eq!(blanks.text(&SlotRef::first("a")), Some(""));
        assert_eq!(blanks.text(&SlotRef::new("a", 1)), Some("second"));
        assert!(!blanks.set_text(&SlotRef::new("a", 1), "second"));
    }

    #[test]
    fn unknown_blank_is_ignored() {
        let mut blanks = FillBlank::new(&parse("no blanks"));
        assert!(!blanks.set_text(&SlotRef::first("x"), "typed"));
        assert_eq!(blanks.texts().count(), 0);
    }

    #[test]
    fn clear_all_empties() {
        let mut blanks = FillBlank::new(&parse("[[pos_1]]"));
        blanks.set_text(&SlotRef::first("1"), "x");
        blanks.clear_all();
        assert_eq!(blanks.text(&SlotRef::first("1")), Some(""));
    }
}
