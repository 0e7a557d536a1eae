//! # Simple logging observer for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//!
//! ## Output format
//! ```text
//! [tick-started] subscribers=3
//! [sent] subscriber=42
//! [send-failed] subscriber=42 err="recipient rejected delivery: blocked"
//! [send-timeout] subscriber=42 timeout=10000ms
//! [tick-completed] attempted=3
//! [subscribed] subscriber=42
//! [unsubscribed] subscriber=42
//! [store-write-failed] subscriber=42 err="..."
//! [shutdown-requested]
//! [drained-within-grace]
//! [grace-exceeded]
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::observers::Observer;

/// Simple stdout logging observer.
///
/// Enabled via the `logging` feature. Prints human-readable event
/// descriptions for debugging and demonstration purposes.
///
/// Not intended for production use - implement a custom [`Observer`] for
/// structured logging or metrics collection.
pub struct LogWriter;

#[async_trait]
impl Observer for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::TickStarted => {
                println!("[tick-started] subscribers={}", e.count.unwrap_or(0));
            }
            EventKind::MessageSent => {
                println!(
                    "[sent] subscriber={}",
                    e.subscriber.as_deref().unwrap_or("<unknown>")
                );
            }
            EventKind::SendFailed => {
                println!(
                    "[send-failed] subscriber={} err={:?}",
                    e.subscriber.as_deref().unwrap_or("<unknown>"),
                    e.reason.as_deref().unwrap_or("<none>")
                );
            }
            EventKind::SendTimedOut => {
                println!(
                    "[send-timeout] subscriber={} timeout={}ms",
                    e.subscriber.as_deref().unwrap_or("<unknown>"),
                    e.timeout_ms.unwrap_or(0)
                );
            }
            EventKind::TickCompleted => {
                println!("[tick-completed] attempted={}", e.count.unwrap_or(0));
            }
            EventKind::SubscriberAdded => {
                println!(
                    "[subscribed] subscriber={}",
                    e.subscriber.as_deref().unwrap_or("<unknown>")
                );
            }
            EventKind::SubscriberRemoved => {
                println!(
                    "[unsubscribed] subscriber={}",
                    e.subscriber.as_deref().unwrap_or("<unknown>")
                );
            }
            EventKind::StoreWriteFailed => {
                println!(
                    "[store-write-failed] subscriber={} err={:?}",
                    e.subscriber.as_deref().unwrap_or("<unknown>"),
                    e.reason.as_deref().unwrap_or("<none>")
                );
            }
            EventKind::ShutdownRequested => {
                println!("[shutdown-requested]");
            }
            EventKind::DrainedWithinGrace => {
                println!("[drained-within-grace]");
            }
            EventKind::GraceExceeded => {
                println!("[grace-exceeded]");
            }
            EventKind::ObserverPanicked | EventKind::ObserverOverflow => {
                println!(
                    "[observer-incident] reason={:?}",
                    e.reason.as_deref().unwrap_or("<none>")
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "log-writer"
    }
}
