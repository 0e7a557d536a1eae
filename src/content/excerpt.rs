//! # Excerpt: one unit of broadcastable content.
//!
//! An [`Excerpt`] is an immutable rendered text block, either a bare passage
//! or a `(quote, attribution)` pair rendered as `"{quote}\n\n— {attribution}"`.
//! [`ExcerptSet`] is the ordered collection loaded once at startup.
//!
//! ## Rules
//! - The rendered form is never empty (the loader skips empty entries).
//! - Excerpts are never mutated after creation; transport limits are applied
//!   to a copy at send time via [`Excerpt::transport_text`].
//! - Clones are cheap (`Arc<str>` payload) — the cycler's permutation and
//!   every draw hold clones of the same allocation.

use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

/// Maximum number of characters a single outbound message may carry.
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Marker appended when an excerpt is cut down to the transport limit.
pub const TRUNCATION_MARKER: &str = "...";

/// Fixed text returned by a draw when no content exists.
pub const SENTINEL_TEXT: &str = "No excerpts available!";

/// Immutable block of broadcastable text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Excerpt {
    text: Arc<str>,
}

impl Excerpt {
    /// Creates a bare excerpt from already-trimmed text.
    pub fn bare(text: impl AsRef<str>) -> Self {
        Self {
            text: Arc::from(text.as_ref()),
        }
    }

    /// Creates an attributed excerpt rendered as `"{quote}\n\n— {attribution}"`.
    pub fn attributed(quote: &str, attribution: &str) -> Self {
        Self {
            text: Arc::from(format!("{quote}\n\n— {attribution}").as_str()),
        }
    }

    /// Returns the fixed fallback excerpt used when no content exists.
    pub fn sentinel() -> Self {
        Self::bare(SENTINEL_TEXT)
    }

    /// Returns the placeholder excerpt substituted when the content source
    /// at `path` is missing or unreadable.
    pub fn placeholder(path: &Path) -> Self {
        Self::bare(format!(
            "No content found! Add a text file at {}.",
            path.display()
        ))
    }

    /// Returns the stored text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Renders the excerpt for the transport.
    ///
    /// Text within [`MAX_MESSAGE_CHARS`] characters is returned borrowed and
    /// unchanged. Longer text is cut to exactly [`MAX_MESSAGE_CHARS`]
    /// characters, the last three replaced by [`TRUNCATION_MARKER`].
    /// The stored excerpt is untouched either way.
    pub fn transport_text(&self) -> Cow<'_, str> {
        if self.text.chars().count() <= MAX_MESSAGE_CHARS {
            return Cow::Borrowed(&self.text);
        }
        let keep = MAX_MESSAGE_CHARS - TRUNCATION_MARKER.chars().count();
        let mut out: String = self.text.chars().take(keep).collect();
        out.push_str(TRUNCATION_MARKER);
        Cow::Owned(out)
    }
}

impl std::fmt::Display for Excerpt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Ordered sequence of excerpts, immutable after load.
///
/// An empty set is valid: every draw against it yields the sentinel.
#[derive(Clone, Debug, Default)]
pub struct ExcerptSet {
    excerpts: Vec<Excerpt>,
}

impl ExcerptSet {
    /// Creates a set from already-rendered excerpts.
    pub fn new(excerpts: Vec<Excerpt>) -> Self {
        Self { excerpts }
    }

    /// Number of excerpts in the set.
    pub fn len(&self) -> usize {
        self.excerpts.len()
    }

    /// Whether the set holds no excerpts.
    pub fn is_empty(&self) -> bool {
        self.excerpts.is_empty()
    }

    /// Iterates over the excerpts in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Excerpt> {
        self.excerpts.iter()
    }

    /// Consumes the set, returning the underlying excerpts in load order.
    pub fn into_vec(self) -> Vec<Excerpt> {
        self.excerpts
    }
}

impl FromIterator<Excerpt> for ExcerptSet {
    fn from_iter<I: IntoIterator<Item = Excerpt>>(iter: I) -> Self {
        Self {
            excerpts: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributed_rendering() {
        let ex = Excerpt::attributed("The owl flew.", "A. Author");
        assert_eq!(ex.as_str(), "The owl flew.\n\n— A. Author");
    }

    #[test]
    fn test_short_text_passes_through_unchanged() {
        let ex = Excerpt::bare("short");
        assert!(matches!(ex.transport_text(), Cow::Borrowed("short")));
    }

    #[test]
    fn test_exact_limit_is_not_truncated() {
        let ex = Excerpt::bare("x".repeat(MAX_MESSAGE_CHARS));
        let sent = ex.transport_text();
        assert_eq!(sent.chars().count(), MAX_MESSAGE_CHARS);
        assert!(!sent.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn test_over_limit_truncates_to_exact_length_with_marker() {
        let ex = Excerpt::bare("y".repeat(MAX_MESSAGE_CHARS + 500));
        let sent = ex.transport_text();
        assert_eq!(sent.chars().count(), MAX_MESSAGE_CHARS);
        assert!(sent.ends_with(TRUNCATION_MARKER));
        // The stored excerpt stays intact.
        assert_eq!(ex.as_str().chars().count(), MAX_MESSAGE_CHARS + 500);
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        let ex = Excerpt::bare("é".repeat(MAX_MESSAGE_CHARS + 1));
        let sent = ex.transport_text();
        assert_eq!(sent.chars().count(), MAX_MESSAGE_CHARS);
        assert!(sent.ends_with(TRUNCATION_MARKER));
    }
}
