//! # Broadcaster: wires the runtime together and drives its lifecycle.
//!
//! The [`Broadcaster`] owns the event bus, the [`ObserverSet`], and the
//! [`BroadcastScheduler`]. It spawns the scheduler task, fans runtime events
//! out to observers, handles OS termination signals, and performs graceful
//! shutdown with a configurable [`Config::grace`].
//!
//! ## High-level architecture
//! ```text
//! Construction:
//!   Config + QuoteCycler + SubscriberStore + Transport + observers
//!        └──► Broadcaster::new()
//!                ├─ Bus::new(cfg.bus_capacity)
//!                ├─ ObserverSet::new(observers, bus)
//!                └─ BroadcastScheduler::new(cycler, store, transport, ...)
//!
//! run():
//!   observer_listener(): Bus.subscribe() ─► ObserverSet::emit(&Event)
//!   spawn: scheduler.run(child_token)
//!
//! Event flow:
//!   Scheduler/Router ── publish(Event) ──► Bus ──► listener ──► ObserverSet
//!                                                          ┌──────┼──────┐
//!                                                          ▼      ▼      ▼
//!                                                    observer workers (queued)
//!
//! Shutdown path:
//!   signal | trigger_shutdown()
//!        └─► Bus.publish(ShutdownRequested)
//!        └─► token.cancel()      → scheduler stops after in-flight tick
//!        └─► timeout(grace, join):
//!               ├─ Ok      → Bus.publish(DrainedWithinGrace)
//!               └─ Elapsed → Bus.publish(GraceExceeded) + RuntimeError
//! ```
//!
//! Inbound commands run beside all of this: hand
//! [`Broadcaster::router`] to the transport layer and call its entry points
//! from whatever event loop the chat backend provides.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::commands::CommandRouter;
use crate::core::scheduler::{BroadcastScheduler, SchedulerParams};
use crate::core::{shutdown, Config};
use crate::cycle::QuoteCycler;
use crate::error::RuntimeError;
use crate::events::{Bus, Event, EventKind};
use crate::observers::{Observer, ObserverSet};
use crate::store::SubscriberStore;
use crate::transport::Transport;

/// Coordinates the scheduler, event delivery, and graceful shutdown.
pub struct Broadcaster {
    cfg: Config,
    bus: Bus,
    observers: Arc<ObserverSet>,
    scheduler: Arc<BroadcastScheduler>,
    store: Arc<dyn SubscriberStore>,
    token: CancellationToken,
}

impl Broadcaster {
    /// Creates a broadcaster over the given collaborators.
    ///
    /// Nothing runs until [`Broadcaster::run`] is called.
    pub fn new(
        cfg: Config,
        cycler: QuoteCycler,
        store: Arc<dyn SubscriberStore>,
        transport: Arc<dyn Transport>,
        observers: Vec<Arc<dyn Observer>>,
    ) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        let observers = Arc::new(ObserverSet::new(observers, bus.clone()));
        let params = SchedulerParams {
            interval: cfg.interval,
            send_timeout: cfg.send_timeout(),
        };
        let scheduler = Arc::new(BroadcastScheduler::new(
            cycler,
            Arc::clone(&store),
            transport,
            params,
            bus.clone(),
        ));
        Self {
            cfg,
            bus,
            observers,
            scheduler,
            store,
            token: CancellationToken::new(),
        }
    }

    /// The runtime's event bus.
    ///
    /// Useful for integrations that publish their own events or attach
    /// ad-hoc receivers.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Builds a [`CommandRouter`] wired to this broadcaster's store and bus.
    ///
    /// The router is cheap to clone and safe to call concurrently with
    /// broadcast ticks.
    pub fn router(&self) -> CommandRouter {
        CommandRouter::new(Arc::clone(&self.store), self.bus.clone())
    }

    /// Requests shutdown without an OS signal.
    ///
    /// Idempotent; [`Broadcaster::run`] returns once the in-flight tick (if
    /// any) has drained or the grace period elapsed.
    pub fn trigger_shutdown(&self) {
        self.token.cancel();
    }

    /// Runs the broadcast loop until a termination signal or
    /// [`Broadcaster::trigger_shutdown`].
    ///
    /// Returns `Ok(())` after a clean drain, or
    /// [`RuntimeError::GraceExceeded`] if the in-flight tick outlived
    /// [`Config::grace`].
    pub async fn run(&self) -> Result<(), RuntimeError> {
        self.observer_listener();

        let scheduler = Arc::clone(&self.scheduler);
        let sched_token = self.token.child_token();
        let handle = tokio::spawn(async move { scheduler.run(sched_token).await });

        tokio::select! {
            // A failed listener registration counts as a shutdown request: a
            // process that cannot hear signals cannot be stopped cleanly later.
            _ = shutdown::wait_for_shutdown_signal() => {}
            _ = self.token.cancelled() => {}
        }

        self.bus.publish(Event::new(EventKind::ShutdownRequested));
        self.token.cancel();
        self.wait_drain(handle).await
    }

    /// Subscribes to the bus and forwards events to the observer set
    /// (fire-and-forget).
    fn observer_listener(&self) {
        let mut rx = self.bus.subscribe();
        let observers = Arc::clone(&self.observers);
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(ev) => observers.emit(&ev),
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }

    /// Waits for the scheduler task to drain within the grace period.
    ///
    /// Publishes [`EventKind::DrainedWithinGrace`] on success, or
    /// [`EventKind::GraceExceeded`] on timeout and returns
    /// [`RuntimeError::GraceExceeded`].
    async fn wait_drain(&self, handle: JoinHandle<()>) -> Result<(), RuntimeError> {
        let grace = self.cfg.grace;
        match time::timeout(grace, handle).await {
            Ok(_) => {
                self.bus.publish(Event::new(EventKind::DrainedWithinGrace));
                Ok(())
            }
            Err(_elapsed) => {
                self.bus.publish(Event::new(EventKind::GraceExceeded));
                Err(RuntimeError::GraceExceeded { grace })
            }
        }
    }
}
