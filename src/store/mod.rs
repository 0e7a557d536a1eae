//! Subscriber membership: identity types, the storage seam, and the
//! file-backed default implementation.
//!
//! - [`subscriber`]: [`SubscriberId`] and the persisted [`SubscriberSet`];
//! - [`store`]: the [`SubscriberStore`] capability trait;
//! - [`json`]: [`JsonFileStore`], whole-file JSON persistence.

mod json;
mod store;
mod subscriber;

pub use json::JsonFileStore;
pub use store::SubscriberStore;
pub use subscriber::{SubscriberId, SubscriberSet};
