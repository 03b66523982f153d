// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Opaque display text that may contain inline markup.

use std::borrow::Cow;
use std::fmt;

/// Display text as supplied by the question author.
///
/// The value may contain inline markup (`<b>`, `<sup>`, entities). It is never
/// interpreted here. Hosts with a sanitizing renderer take [`RichText::as_raw`];
/// everything else should use [`RichText::escaped`], which neutralizes markup
/// so it shows up as literal characters.
///
/// ```rust
/// use understory_template::RichText;
///
/// let text = RichText::new("H<sub>2</sub>O & co");
/// assert_eq!(text.as_raw(), "H<sub>2</sub>O & co");
/// assert_eq!(text.escaped(), "H&lt;sub&gt;2&lt;/sub&gt;O &amp; co");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RichText(String);

impl RichText {
    /// Wraps author-supplied text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The text exactly as supplied, markup included.
    #[must_use]
    pub fn as_raw(&self) -> &str {
        &self.0
    }

    /// The text with `<`, `>`, `&`, `'` and `"` escaped.
    ///
    /// Borrows when there is nothing to escape.
    #[must_use]
    pub fn escaped(&self) -> Cow<'_, str> {
        quick_xml::escape::escape(self.0.as_str())
    }

    /// Returns `true` if the text is empty or only whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Consumes the wrapper.
    #[must_use]
    pub fn into_raw(self) -> String {
        self.0
    }
}

impl fmt::Display for RichText {
    /// Writes the escaped form; use [`RichText::as_raw`] for the markup.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.escaped())
    }
}

impl From<&str> for RichText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for RichText {
    fn from(text: String) -> Self {
        Self(text)
    }
}
