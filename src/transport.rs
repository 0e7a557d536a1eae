//! # Transport abstraction for outbound delivery.
//!
//! This module defines the [`Transport`] trait, the seam between the
//! broadcast core and the actual push-messaging backend. The core calls
//! [`Transport::send`] once per subscriber per tick, fire-and-forget; the
//! scheduler wraps each call in the configured per-send timeout, so
//! implementations only report their own failure modes.

use async_trait::async_trait;

use crate::error::SendError;
use crate::store::SubscriberId;

/// # Outbound message channel supplied by the integration layer.
///
/// Implementations deliver one message to one recipient. They should not
/// retry internally — a failed recipient is retried naturally on the next
/// tick while they remain subscribed — and should avoid blocking the async
/// runtime.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use quotecast::{SendError, SubscriberId, Transport};
///
/// struct Stdout;
///
/// #[async_trait]
/// impl Transport for Stdout {
///     async fn send(&self, to: &SubscriberId, text: &str) -> Result<(), SendError> {
///         println!("[{to}] {text}");
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Delivers `text` to the recipient `to`.
    ///
    /// The text is already rendered and truncated to the transport-safe
    /// limit; implementations forward it verbatim.
    async fn send(&self, to: &SubscriberId, text: &str) -> Result<(), SendError>;
}
