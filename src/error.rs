//! Error types used by the quotecast runtime and its collaborators.
//!
//! This module defines three error enums:
//!
//! - [`RuntimeError`] — errors raised by the broadcast runtime itself.
//! - [`StoreError`] — persistence failures surfaced by subscriber mutations.
//! - [`SendError`] — per-recipient delivery failures reported by a transport.
//!
//! All types provide `as_label()` for logs/metrics; [`SendError`] additionally
//! exposes [`SendError::is_permanent`] so callers can tell a refusing
//! recipient from a transient transport hiccup.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by the broadcast runtime.
///
/// These represent failures of the orchestration layer, not of any single
/// delivery attempt.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Shutdown grace period elapsed while a broadcast tick was still draining.
    #[error("shutdown grace {grace:?} exceeded while a tick was in flight; forcing termination")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::GraceExceeded { .. } => "grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::GraceExceeded { grace } => {
                format!("grace exceeded after {grace:?}")
            }
        }
    }
}

/// # Errors produced by subscriber persistence.
///
/// Surfaced by [`SubscriberStore::add`](crate::SubscriberStore::add) and
/// [`SubscriberStore::remove`](crate::SubscriberStore::remove). A failed
/// mutation leaves the backing store untouched — the caller must not assume
/// the change happened.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed (disk full, permission).
    #[error("subscriber store i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// The subscriber set could not be serialized.
    #[error("subscriber store serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            StoreError::Io(_) => "store_io",
            StoreError::Serialize(_) => "store_serialize",
        }
    }
}

/// # Errors produced by a single delivery attempt.
///
/// Each send is independent; one failing recipient never affects siblings.
/// The scheduler maps an elapsed per-send timeout to [`SendError::Timeout`]
/// itself, so transports only report their own failure modes.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SendError {
    /// The send did not complete within the configured per-send timeout.
    #[error("send timed out after {timeout:?}")]
    Timeout {
        /// The timeout that elapsed.
        timeout: Duration,
    },

    /// The recipient refused delivery (blocked the sender, invalid identity).
    ///
    /// Permanent for this recipient; retrying next tick is unlikely to help
    /// until the subscriber acts.
    #[error("recipient rejected delivery: {reason}")]
    Rejected {
        /// Transport-provided rejection detail.
        reason: String,
    },

    /// The transport failed transiently (network, backend outage).
    #[error("send failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },
}

impl SendError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            SendError::Timeout { .. } => "send_timeout",
            SendError::Rejected { .. } => "send_rejected",
            SendError::Failed { .. } => "send_failed",
        }
    }

    /// Whether the failure is permanent for this recipient.
    ///
    /// Returns `true` for [`SendError::Rejected`], `false` for timeouts and
    /// transient failures (those recipients are naturally retried on the
    /// next tick while they remain subscribed).
    pub fn is_permanent(&self) -> bool {
        matches!(self, SendError::Rejected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        let grace = RuntimeError::GraceExceeded {
            grace: Duration::from_secs(5),
        };
        assert_eq!(grace.as_label(), "grace_exceeded");

        let timeout = SendError::Timeout {
            timeout: Duration::from_secs(1),
        };
        assert_eq!(timeout.as_label(), "send_timeout");
    }

    #[test]
    fn test_only_rejection_is_permanent() {
        let rejected = SendError::Rejected {
            reason: "blocked".into(),
        };
        let failed = SendError::Failed {
            error: "offline".into(),
        };
        let timeout = SendError::Timeout {
            timeout: Duration::from_secs(1),
        };
        assert!(rejected.is_permanent());
        assert!(!failed.is_permanent());
        assert!(!timeout.is_permanent());
    }
}
