//! # BroadcastScheduler: the periodic delivery tick.
//!
//! Alternates between two states: **Idle** (waiting for the ticker) and
//! **Broadcasting** (one tick in progress). Each tick draws one excerpt,
//! snapshots the subscriber set, and fans the rendered text out to every
//! recipient.
//!
//! ## Tick flow
//! ```text
//! Idle ──(interval elapses)──► Broadcasting
//!   ├─► cycler.next()                     (one draw, totally ordered)
//!   ├─► store.list()                      (independent snapshot)
//!   ├─► publish TickStarted{count}
//!   ├─► for each recipient:
//!   │     timeout(send_timeout, transport.send(id, text))
//!   │       ├─ Ok(Ok)      → publish MessageSent
//!   │       ├─ Ok(Err(e))  → publish SendFailed      (continue)
//!   │       └─ Err(elapsed)→ publish SendTimedOut    (continue)
//!   └─► publish TickCompleted{count} ──► Idle
//! ```
//!
//! ## Rules
//! - The excerpt draw happens-before the recipient snapshot happens-before
//!   any send; the two reads need not be mutually consistent (a subscriber
//!   added mid-tick may or may not receive that tick's message).
//! - Per-recipient failures are isolated: a failed or timed-out send never
//!   aborts the remaining sends, and no retry happens within the tick.
//! - Cancellation is checked **between** ticks only — an in-flight tick
//!   always finishes its subscriber loop (best-effort drain), bounded by
//!   `recipients × send_timeout`.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::cycle::QuoteCycler;
use crate::error::SendError;
use crate::events::{Bus, Event, EventKind};
use crate::store::{SubscriberId, SubscriberStore};
use crate::transport::Transport;

/// Timing parameters for a scheduler.
///
/// Extracted from [`Config`](crate::Config) by the
/// [`Broadcaster`](crate::Broadcaster) when wiring the runtime.
#[derive(Clone, Copy, Debug)]
pub struct SchedulerParams {
    /// Fixed period between ticks.
    pub interval: Duration,
    /// Optional per-send timeout (`None` = unbounded).
    pub send_timeout: Option<Duration>,
}

/// Drives one broadcast tick per interval against shared state.
///
/// ### Responsibilities
/// - **Cadence**: one tick per interval, first tick one interval after start
/// - **Drawing**: exactly one [`QuoteCycler::next`] call per tick
/// - **Fan-out**: one bounded send attempt per recipient per tick
/// - **Event publishing**: reports the tick lifecycle to the bus
pub struct BroadcastScheduler {
    cycler: QuoteCycler,
    store: Arc<dyn SubscriberStore>,
    transport: Arc<dyn Transport>,
    params: SchedulerParams,
    bus: Bus,
}

impl BroadcastScheduler {
    /// Creates a scheduler over the given collaborators.
    pub fn new(
        cycler: QuoteCycler,
        store: Arc<dyn SubscriberStore>,
        transport: Arc<dyn Transport>,
        params: SchedulerParams,
        bus: Bus,
    ) -> Self {
        Self {
            cycler,
            store,
            transport,
            params,
            bus,
        }
    }

    /// Runs ticks until `token` is cancelled.
    ///
    /// The first tick fires one full interval after this call; missed ticks
    /// are delayed rather than bursted. Cancellation observed while Idle
    /// stops immediately; cancellation during a tick lets the current
    /// subscriber loop finish first.
    pub async fn run(&self, token: CancellationToken) {
        let mut ticker = time::interval_at(Instant::now() + self.params.interval, self.params.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = ticker.tick() => {}
            }
            self.tick().await;
        }
    }

    /// Executes one broadcast tick: draw, snapshot, fan-out.
    ///
    /// Public so integrations and tests can drive ticks manually without a
    /// timer.
    pub async fn tick(&self) {
        let excerpt = self.cycler.next();
        let recipients = self.store.list().await;

        self.bus
            .publish(Event::new(EventKind::TickStarted).with_count(recipients.len()));

        let text: Cow<'_, str> = excerpt.transport_text();
        let attempted = recipients.len();
        for id in recipients.iter() {
            self.send_one(id, &text).await;
        }

        self.bus
            .publish(Event::new(EventKind::TickCompleted).with_count(attempted));
    }

    /// Attempts delivery to a single recipient, reporting the outcome.
    ///
    /// Failures are published and swallowed; the caller moves on to the next
    /// recipient unconditionally.
    async fn send_one(&self, id: &SubscriberId, text: &str) {
        let outcome = match self.params.send_timeout {
            Some(dur) => match time::timeout(dur, self.transport.send(id, text)).await {
                Ok(res) => res,
                Err(_elapsed) => Err(SendError::Timeout { timeout: dur }),
            },
            None => self.transport.send(id, text).await,
        };

        match outcome {
            Ok(()) => {
                self.bus
                    .publish(Event::new(EventKind::MessageSent).with_subscriber(id.as_str()));
            }
            Err(SendError::Timeout { timeout }) => {
                self.bus.publish(
                    Event::new(EventKind::SendTimedOut)
                        .with_subscriber(id.as_str())
                        .with_timeout(timeout),
                );
            }
            Err(err) => {
                self.bus.publish(
                    Event::new(EventKind::SendFailed)
                        .with_subscriber(id.as_str())
                        .with_reason(err.to_string()),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Excerpt, ExcerptSet, MAX_MESSAGE_CHARS, SENTINEL_TEXT, TRUNCATION_MARKER};
    use crate::error::StoreError;
    use crate::store::SubscriberSet;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Store stub with a fixed membership.
    struct FixedStore {
        set: SubscriberSet,
    }

    impl FixedStore {
        fn of(ids: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                set: ids.iter().copied().map(SubscriberId::from).collect(),
            })
        }
    }

    #[async_trait]
    impl SubscriberStore for FixedStore {
        async fn add(&self, _id: &SubscriberId) -> Result<bool, StoreError> {
            unimplemented!("not used by scheduler tests")
        }

        async fn remove(&self, _id: &SubscriberId) -> Result<bool, StoreError> {
            unimplemented!("not used by scheduler tests")
        }

        async fn list(&self) -> SubscriberSet {
            self.set.clone()
        }
    }

    /// Transport that records deliveries and fails for chosen recipients.
    #[derive(Default)]
    struct RecordingTransport {
        delivered: Mutex<Vec<(String, String)>>,
        fail_for: Vec<String>,
        hang_for: Vec<String>,
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(&self, to: &SubscriberId, text: &str) -> Result<(), SendError> {
            if self.hang_for.iter().any(|id| id == to.as_str()) {
                time::sleep(Duration::from_secs(3600)).await;
            }
            if self.fail_for.iter().any(|id| id == to.as_str()) {
                return Err(SendError::Rejected {
                    reason: "blocked".into(),
                });
            }
            self.delivered
                .lock()
                .expect("lock")
                .push((to.as_str().to_string(), text.to_string()));
            Ok(())
        }
    }

    fn scheduler_with(
        texts: &[&str],
        store: Arc<dyn SubscriberStore>,
        transport: Arc<RecordingTransport>,
        send_timeout: Option<Duration>,
    ) -> (BroadcastScheduler, Bus) {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let set: ExcerptSet = texts.iter().map(Excerpt::bare).collect();
        let cycler = QuoteCycler::with_rng(set, StdRng::seed_from_u64(11));
        let bus = Bus::new(64);
        let params = SchedulerParams {
            interval: Duration::from_millis(20),
            send_timeout,
        };
        (
            BroadcastScheduler::new(cycler, store, transport, params, bus.clone()),
            bus,
        )
    }

    #[tokio::test]
    async fn test_tick_sends_one_excerpt_to_every_subscriber() {
        let transport = Arc::new(RecordingTransport::default());
        let (scheduler, _bus) = scheduler_with(
            &["hello"],
            FixedStore::of(&["a", "b", "c"]),
            transport.clone(),
            None,
        );

        scheduler.tick().await;

        let delivered = transport.delivered.lock().expect("lock");
        assert_eq!(delivered.len(), 3);
        assert!(delivered.iter().all(|(_, text)| text == "hello"));
    }

    #[tokio::test]
    async fn test_failing_recipient_does_not_abort_siblings() {
        let transport = Arc::new(RecordingTransport {
            fail_for: vec!["b".into()],
            ..Default::default()
        });
        let (scheduler, bus) = scheduler_with(
            &["x"],
            FixedStore::of(&["a", "b", "c"]),
            transport.clone(),
            None,
        );
        let mut rx = bus.subscribe();

        scheduler.tick().await;

        let delivered = transport.delivered.lock().expect("lock");
        let who: Vec<&str> = delivered.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(who, vec!["a", "c"]);
        drop(delivered);

        // TickStarted, Sent(a), SendFailed(b), Sent(c), TickCompleted.
        let mut kinds = Vec::new();
        for _ in 0..5 {
            kinds.push(rx.recv().await.expect("recv").kind);
        }
        assert_eq!(
            kinds,
            vec![
                EventKind::TickStarted,
                EventKind::MessageSent,
                EventKind::SendFailed,
                EventKind::MessageSent,
                EventKind::TickCompleted,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_recipient_times_out_and_siblings_proceed() {
        let transport = Arc::new(RecordingTransport {
            hang_for: vec!["a".into()],
            ..Default::default()
        });
        let (scheduler, bus) = scheduler_with(
            &["x"],
            FixedStore::of(&["a", "b"]),
            transport.clone(),
            Some(Duration::from_secs(1)),
        );
        let mut rx = bus.subscribe();

        scheduler.tick().await;

        assert_eq!(rx.recv().await.expect("recv").kind, EventKind::TickStarted);
        let timed_out = rx.recv().await.expect("recv");
        assert_eq!(timed_out.kind, EventKind::SendTimedOut);
        assert_eq!(timed_out.subscriber.as_deref(), Some("a"));
        assert_eq!(timed_out.timeout_ms, Some(1000));
        assert_eq!(rx.recv().await.expect("recv").kind, EventKind::MessageSent);
    }

    #[tokio::test]
    async fn test_oversized_excerpt_is_truncated_at_send_time() {
        let long = "z".repeat(MAX_MESSAGE_CHARS + 10);
        let transport = Arc::new(RecordingTransport::default());
        let (scheduler, _bus) =
            scheduler_with(&[&long], FixedStore::of(&["a"]), transport.clone(), None);

        scheduler.tick().await;

        let delivered = transport.delivered.lock().expect("lock");
        let (_, text) = &delivered[0];
        assert_eq!(text.chars().count(), MAX_MESSAGE_CHARS);
        assert!(text.ends_with(TRUNCATION_MARKER));
    }

    #[tokio::test]
    async fn test_empty_content_broadcasts_sentinel() {
        let transport = Arc::new(RecordingTransport::default());
        let (scheduler, _bus) =
            scheduler_with(&[], FixedStore::of(&["a"]), transport.clone(), None);

        scheduler.tick().await;

        let delivered = transport.delivered.lock().expect("lock");
        assert_eq!(delivered[0].1, SENTINEL_TEXT);
    }

    #[tokio::test]
    async fn test_run_stops_on_cancellation() {
        let transport = Arc::new(RecordingTransport::default());
        let (scheduler, _bus) =
            scheduler_with(&["x"], FixedStore::of(&["a"]), transport.clone(), None);
        let scheduler = Arc::new(scheduler);

        let token = CancellationToken::new();
        let handle = {
            let scheduler = Arc::clone(&scheduler);
            let token = token.clone();
            tokio::spawn(async move { scheduler.run(token).await })
        };

        // Let at least one tick happen, then cancel.
        time::sleep(Duration::from_millis(70)).await;
        token.cancel();
        handle.await.expect("join");

        assert!(!transport.delivered.lock().expect("lock").is_empty());
    }
}
