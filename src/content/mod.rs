//! Content model: excerpt types and the flat-text loader.
//!
//! - [`excerpt`]: the [`Excerpt`]/[`ExcerptSet`] types and transport rendering;
//! - [`loader`]: blank-line/delimiter parsing and fail-soft file loading.

mod excerpt;
mod loader;

pub use excerpt::{Excerpt, ExcerptSet, MAX_MESSAGE_CHARS, SENTINEL_TEXT, TRUNCATION_MARKER};
pub use loader::{load, parse, ATTRIBUTION_DELIMITER};
