//! # Runtime events emitted by the broadcaster.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Tick lifecycle**: one broadcast cycle from draw to last send attempt.
//! - **Membership**: subscribe/unsubscribe outcomes and persistence failures.
//! - **Runtime**: shutdown progress and observer-plumbing incidents.
//!
//! The [`Event`] struct carries optional metadata such as the recipient,
//! failure reasons, recipient counts, and timeouts.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Tick lifecycle ===
    /// A broadcast tick began: the excerpt is drawn and the recipient
    /// snapshot taken.
    ///
    /// Sets:
    /// - `count`: number of recipients in this tick's snapshot
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    TickStarted,

    /// One recipient received this tick's message.
    ///
    /// Sets:
    /// - `subscriber`: recipient id
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    MessageSent,

    /// Delivery to one recipient failed; sibling sends continue.
    ///
    /// Sets:
    /// - `subscriber`: recipient id
    /// - `reason`: transport failure message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SendFailed,

    /// Delivery to one recipient exceeded the per-send timeout.
    ///
    /// Sets:
    /// - `subscriber`: recipient id
    /// - `timeout_ms`: configured per-send timeout (ms)
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SendTimedOut,

    /// All sends of the tick were attempted; the scheduler is idle again.
    ///
    /// Sets:
    /// - `count`: number of recipients attempted
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    TickCompleted,

    // === Membership ===
    /// A new subscriber was added and persisted.
    ///
    /// Sets:
    /// - `subscriber`: the added id
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SubscriberAdded,

    /// A subscriber was removed and the removal persisted.
    ///
    /// Sets:
    /// - `subscriber`: the removed id
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SubscriberRemoved,

    /// A membership mutation could not be persisted; membership unchanged.
    ///
    /// Sets:
    /// - `subscriber`: the id whose mutation failed
    /// - `reason`: store error message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    StoreWriteFailed,

    // === Runtime ===
    /// Shutdown requested (OS signal or explicit trigger).
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ShutdownRequested,

    /// The scheduler drained its in-flight tick within the grace period.
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    DrainedWithinGrace,

    /// Grace period exceeded; the scheduler task was abandoned mid-drain.
    ///
    /// Sets:
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    GraceExceeded,

    /// An observer panicked while processing an event.
    ///
    /// Sets:
    /// - `reason`: panic info/message (prefixed with the observer name)
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ObserverPanicked,

    /// An observer dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `reason`: reason string (e.g., "full", "closed"), with observer name
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ObserverOverflow,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Recipient id, if the event concerns one subscriber.
    pub subscriber: Option<Arc<str>>,
    /// Human-readable reason (send errors, store errors, panics).
    pub reason: Option<Arc<str>>,
    /// Recipient count for tick-level events.
    pub count: Option<usize>,
    /// Per-send timeout in milliseconds (compact).
    pub timeout_ms: Option<u32>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            subscriber: None,
            reason: None,
            count: None,
            timeout_ms: None,
        }
    }

    /// Attaches the recipient id.
    #[inline]
    pub fn with_subscriber(mut self, id: impl Into<Arc<str>>) -> Self {
        self.subscriber = Some(id.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a recipient count.
    #[inline]
    pub fn with_count(mut self, n: usize) -> Self {
        self.count = Some(n);
        self
    }

    /// Attaches a timeout duration (stored as milliseconds).
    #[inline]
    pub fn with_timeout(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.timeout_ms = Some(ms);
        self
    }

    /// Creates an observer overflow event.
    #[inline]
    pub fn observer_overflow(observer: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::ObserverOverflow)
            .with_reason(format!("observer={observer} reason={reason}"))
    }

    /// Creates an observer panic event.
    #[inline]
    pub fn observer_panicked(observer: &'static str, info: String) -> Self {
        Event::new(EventKind::ObserverPanicked)
            .with_reason(format!("observer={observer} panic={info}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_numbers_increase() {
        let a = Event::new(EventKind::TickStarted);
        let b = Event::new(EventKind::TickCompleted);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_builder_sets_metadata() {
        let ev = Event::new(EventKind::SendTimedOut)
            .with_subscriber("42")
            .with_timeout(Duration::from_secs(2));
        assert_eq!(ev.subscriber.as_deref(), Some("42"));
        assert_eq!(ev.timeout_ms, Some(2000));
    }
}
