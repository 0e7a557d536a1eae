//! # Non-blocking event fan-out to multiple observers.
//!
//! Provides [`ObserverSet`] — distributes events to multiple observers
//! concurrently without blocking the publisher.
//!
//! ## Architecture
//! ```text
//! emit(event)
//!     │
//!     ├──► [queue 1] ──► worker 1 ──► observer1.on_event()
//!     │    (bounded)         └──────► panic → ObserverPanicked
//!     ├──► [queue 2] ──► worker 2 ──► observer2.on_event()
//!     │    (bounded)
//!     └──► [queue N] ──► worker N ──► observerN.on_event()
//!          (bounded)
//! ```
//!
//! ## Rules
//! - **No cross-observer ordering**: observer A may process event N while B
//!   processes N+5.
//! - **Overflow**: event dropped for that observer only, `ObserverOverflow`
//!   published.
//! - **Non-blocking**: `emit()` returns immediately (uses `try_send`).
//! - **Isolation**: a slow or panicking observer doesn't affect others.
//! - **Per-observer FIFO**: each observer sees events in order.
//!
//! ## Panic handling
//! Worker tasks use `catch_unwind` to isolate panics: the panic is converted
//! to an `ObserverPanicked` event and the worker continues with the next
//! event. `AssertUnwindSafe` is used, which can leave shared state
//! inconsistent if an observer panics while holding a lock.

use std::sync::Arc;

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::events::{Bus, Event};
use crate::observers::Observer;

/// Per-observer channel metadata.
struct ObserverChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<Event>>,
}

/// Fan-out coordinator for multiple event observers.
///
/// Manages per-observer queues and worker tasks, providing:
/// - **Concurrent delivery**: events offered to all observers at once
/// - **Isolation**: each observer has a dedicated queue and worker
/// - **Panic safety**: panics caught and reported, don't crash the runtime
/// - **Overflow handling**: dropped events reported via `ObserverOverflow`
pub struct ObserverSet {
    channels: Vec<ObserverChannel>,
    workers: Vec<JoinHandle<()>>,
    bus: Bus,
}

impl ObserverSet {
    /// Creates a new set and spawns one worker task per observer.
    ///
    /// ### Per-observer setup
    /// - Bounded mpsc queue (capacity from [`Observer::queue_capacity`], min 1)
    /// - Dedicated worker task (runs until the queue closes)
    /// - Panic isolation via `catch_unwind`
    #[must_use]
    pub fn new(observers: Vec<Arc<dyn Observer>>, bus: Bus) -> Self {
        let mut channels = Vec::with_capacity(observers.len());
        let mut workers = Vec::with_capacity(observers.len());

        for obs in observers {
            let cap = obs.queue_capacity().max(1);
            let name = obs.name();
            let (tx, mut rx) = mpsc::channel::<Arc<Event>>(cap);
            let o = Arc::clone(&obs);
            let bus_for_worker = bus.clone();

            let handle = tokio::spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let fut = o.on_event(ev.as_ref());
                    if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                        let info = {
                            let any = &*panic_err;
                            if let Some(msg) = any.downcast_ref::<&'static str>() {
                                (*msg).to_string()
                            } else if let Some(msg) = any.downcast_ref::<String>() {
                                msg.clone()
                            } else {
                                "unknown panic".to_string()
                            }
                        };
                        bus_for_worker.publish(Event::observer_panicked(o.name(), info));
                    }
                }
            });
            channels.push(ObserverChannel { name, sender: tx });
            workers.push(handle);
        }
        Self {
            channels,
            workers,
            bus,
        }
    }

    /// Fans out one event to all observers (non-blocking).
    ///
    /// If an observer's queue is **full** or **closed**, the event is dropped
    /// for it and an `ObserverOverflow` is published with the observer's name.
    /// Overflow events themselves are never re-reported on overflow, so a
    /// saturated queue cannot feed itself.
    pub fn emit(&self, event: &Event) {
        let ev = Arc::new(event.clone());
        for channel in &self.channels {
            match channel.sender.try_send(Arc::clone(&ev)) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    self.report_drop(event, channel.name, "full");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    self.report_drop(event, channel.name, "closed");
                }
            }
        }
    }

    /// Number of observers in the set.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether the set has no observers.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    fn report_drop(&self, event: &Event, observer: &'static str, reason: &'static str) {
        if event.kind == crate::events::EventKind::ObserverOverflow {
            return;
        }
        self.bus.publish(Event::observer_overflow(observer, reason));
    }
}

impl Drop for ObserverSet {
    fn drop(&mut self) {
        for w in &self.workers {
            w.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct Counting {
        seen: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl Observer for Counting {
        async fn on_event(&self, _event: &Event) {
            self.seen.fetch_add(1, Ordering::SeqCst);
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    struct Panicking;

    #[async_trait::async_trait]
    impl Observer for Panicking {
        async fn on_event(&self, _event: &Event) {
            panic!("observer boom");
        }

        fn name(&self) -> &'static str {
            "panicking"
        }
    }

    #[tokio::test]
    async fn test_emit_reaches_every_observer() {
        let bus = Bus::new(16);
        let seen = Arc::new(AtomicUsize::new(0));
        let set = ObserverSet::new(
            vec![Arc::new(Counting { seen: seen.clone() })],
            bus.clone(),
        );

        for _ in 0..3 {
            set.emit(&Event::new(EventKind::TickStarted));
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(seen.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_panicking_observer_is_isolated_and_reported() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let seen = Arc::new(AtomicUsize::new(0));
        let set = ObserverSet::new(
            vec![
                Arc::new(Panicking),
                Arc::new(Counting { seen: seen.clone() }),
            ],
            bus.clone(),
        );

        set.emit(&Event::new(EventKind::TickStarted));
        tokio::time::sleep(Duration::from_millis(50)).await;

        // The healthy observer still processed the event.
        assert_eq!(seen.load(Ordering::SeqCst), 1);

        // The panic surfaced on the bus.
        let ev = rx.recv().await.expect("recv");
        assert_eq!(ev.kind, EventKind::ObserverPanicked);
        assert!(ev.reason.as_deref().unwrap_or_default().contains("boom"));
    }
}
