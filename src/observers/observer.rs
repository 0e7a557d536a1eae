//! # Core observer trait.
//!
//! `Observer` is the extension point for plugging custom event handlers into
//! the runtime — structured logging, metrics, alerting. Each observer is
//! driven by a dedicated worker loop fed by a bounded queue owned by the
//! [`ObserverSet`](crate::ObserverSet).
//!
//! (Note the vocabulary split: an *observer* watches runtime events; a
//! *subscriber* is a chat recipient of broadcast excerpts.)
//!
//! ## Contract
//! - Implementations may be slow (I/O, batching, retries) — they do **not**
//!   block the publisher nor other observers.
//! - Each observer **declares** its preferred queue capacity via
//!   [`Observer::queue_capacity`]. If a queue overflows, events for that
//!   observer are **dropped** and an `ObserverOverflow` is published.

use async_trait::async_trait;

use crate::events::Event;

/// Contract for event observers.
///
/// Called from an observer-dedicated worker task. Implementations should
/// avoid blocking the async runtime (prefer async I/O and cooperative waits).
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use quotecast::{Event, EventKind, Observer};
///
/// struct FailureCounter;
///
/// #[async_trait]
/// impl Observer for FailureCounter {
///     async fn on_event(&self, event: &Event) {
///         if event.kind == EventKind::SendFailed {
///             // increment a counter...
///         }
///     }
///
///     fn name(&self) -> &'static str {
///         "failure-counter"
///     }
/// }
/// ```
#[async_trait]
pub trait Observer: Send + Sync + 'static {
    /// Handles a single event for this observer.
    async fn on_event(&self, event: &Event);

    /// Human-readable name (for logs/metrics).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Preferred capacity of this observer's queue.
    ///
    /// On overflow, events for this observer are **dropped**.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
