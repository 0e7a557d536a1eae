//! # Storage seam for subscriber membership.
//!
//! [`SubscriberStore`] is the capability boundary between the broadcast
//! runtime and whatever holds the membership durably. The built-in backend is
//! [`JsonFileStore`](crate::JsonFileStore); a key-value or relational backend
//! can be swapped in without touching the scheduler or the command router.
//!
//! ## Contract
//! - `add`/`remove` are read-modify-persist-write as one logical unit; a
//!   mutation is only real once persistence succeeded. Concurrent mutations
//!   must be serialized by the implementation (no lost updates).
//! - `list` is a fail-soft snapshot: absent or unreadable state reads as the
//!   empty set and never fails the caller. A subscriber added concurrently
//!   with a tick may or may not see that tick's message.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::store::subscriber::{SubscriberId, SubscriberSet};

/// Durable membership storage for broadcast subscribers.
#[async_trait]
pub trait SubscriberStore: Send + Sync + 'static {
    /// Adds `id` to the membership.
    ///
    /// Returns `Ok(true)` if newly added, `Ok(false)` if already present.
    /// On `Err` the membership is unchanged.
    async fn add(&self, id: &SubscriberId) -> Result<bool, StoreError>;

    /// Removes `id` from the membership.
    ///
    /// Returns `Ok(true)` if removed, `Ok(false)` if it was not a member.
    /// On `Err` the membership is unchanged.
    async fn remove(&self, id: &SubscriberId) -> Result<bool, StoreError>;

    /// Returns a snapshot of the current membership.
    ///
    /// Never fails: missing or unreadable state reads as empty.
    async fn list(&self) -> SubscriberSet;
}
