//! # Demo: custom_observer
//!
//! Demonstrates how to build and attach a custom event observer.
//!
//! Shows how to:
//! - Implement the [`Observer`] trait.
//! - Inspect [`Event`] / [`EventKind`] for delivery metrics.
//! - Drive [`BroadcastScheduler::tick`] manually (no timer, no signals).
//!
//! ## Run
//! ```bash
//! cargo run --example custom_observer
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use quotecast::{
    BroadcastScheduler, Bus, Event, EventKind, JsonFileStore, Observer, ObserverSet, QuoteCycler,
    SchedulerParams, SendError, SubscriberId, SubscriberStore, Transport,
};

/// Counts delivery outcomes. In real life, you could export metrics, ship
/// logs, or trigger alerts.
#[derive(Default)]
struct DeliveryMeter {
    sent: AtomicUsize,
    failed: AtomicUsize,
}

#[async_trait]
impl Observer for DeliveryMeter {
    async fn on_event(&self, ev: &Event) {
        match ev.kind {
            EventKind::MessageSent => {
                self.sent.fetch_add(1, Ordering::Relaxed);
            }
            EventKind::SendFailed | EventKind::SendTimedOut => {
                self.failed.fetch_add(1, Ordering::Relaxed);
            }
            EventKind::TickCompleted => {
                println!(
                    "[meter] tick done: sent={} failed={}",
                    self.sent.load(Ordering::Relaxed),
                    self.failed.load(Ordering::Relaxed)
                );
            }
            _ => {}
        }
    }

    fn name(&self) -> &'static str {
        "delivery-meter"
    }
}

/// Transport where every second recipient is unreachable.
struct FlakyTransport;

#[async_trait]
impl Transport for FlakyTransport {
    async fn send(&self, to: &SubscriberId, text: &str) -> Result<(), SendError> {
        if to.as_str().len() % 2 == 0 {
            return Err(SendError::Failed {
                error: "recipient offline".into(),
            });
        }
        println!("--> [{to}] {text}");
        Ok(())
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let bus = Bus::new(256);
    let meter = Arc::new(DeliveryMeter::default());
    let observers = Arc::new(ObserverSet::new(
        vec![meter.clone() as Arc<dyn Observer>],
        bus.clone(),
    ));

    let store = Arc::new(JsonFileStore::new(
        std::env::temp_dir().join("quotecast-observer-demo.json"),
    ));
    for id in ["ada", "bob", "carol", "dee"] {
        store.add(&id.into()).await?;
    }

    let scheduler = BroadcastScheduler::new(
        QuoteCycler::new(quotecast::content::parse("One.\n\nTwo.\n\nThree.")),
        store,
        Arc::new(FlakyTransport),
        SchedulerParams {
            interval: Duration::from_secs(1),
            send_timeout: Some(Duration::from_secs(2)),
        },
        bus.clone(),
    );

    // Forward bus events to the observer set, then drive three ticks by hand.
    let mut rx = bus.subscribe();
    let forward = {
        let observers = Arc::clone(&observers);
        tokio::spawn(async move {
            while let Ok(ev) = rx.recv().await {
                observers.emit(&ev);
            }
        })
    };

    for _ in 0..3 {
        scheduler.tick().await;
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    forward.abort();
    Ok(())
}
