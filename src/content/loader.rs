//! # Content loading and parsing.
//!
//! Turns a flat text source into an [`ExcerptSet`]. Entries are separated by
//! a blank line; inside an entry a two-part split on [`ATTRIBUTION_DELIMITER`]
//! marks a `(quote, attribution)` pair, anything else is kept as a bare
//! excerpt.
//!
//! ## Rules
//! - Entries that trim to nothing are skipped — an empty source parses to an
//!   empty set, never to an empty excerpt.
//! - [`load`] fails softly: a missing or unreadable source yields a
//!   single-element set carrying a placeholder excerpt, so the system stays
//!   operable with zero real content.

use std::path::Path;

use super::excerpt::{Excerpt, ExcerptSet};

/// Literal token separating a quote from its attribution inside one entry.
pub const ATTRIBUTION_DELIMITER: &str = "|||>";

/// Parses a raw text blob into an [`ExcerptSet`].
///
/// Splits on blank lines into entries, then on [`ATTRIBUTION_DELIMITER`]
/// within each entry. Exactly two parts become an attributed excerpt; any
/// other count keeps the trimmed entry as-is.
pub fn parse(raw: &str) -> ExcerptSet {
    raw.trim()
        .split("\n\n")
        .filter_map(|entry| {
            let entry = entry.trim();
            if entry.is_empty() {
                return None;
            }
            let parts: Vec<&str> = entry.split(ATTRIBUTION_DELIMITER).collect();
            Some(match parts.as_slice() {
                [quote, attribution] => Excerpt::attributed(quote.trim(), attribution.trim()),
                _ => Excerpt::bare(entry),
            })
        })
        .collect()
}

/// Reads and parses the content source at `path`.
///
/// Never fails: if the file cannot be read, returns a single-element set
/// containing [`Excerpt::placeholder`] for that path.
pub async fn load(path: impl AsRef<Path>) -> ExcerptSet {
    let path = path.as_ref();
    match tokio::fs::read_to_string(path).await {
        Ok(raw) => parse(&raw),
        Err(_) => ExcerptSet::new(vec![Excerpt::placeholder(path)]),
    }
}
