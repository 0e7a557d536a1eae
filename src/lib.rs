//! # quotecast
//!
//! **quotecast** is an excerpt rotation engine with a periodic subscriber
//! broadcast cycle.
//!
//! It maintains a rotating sequence of text excerpts and pushes the next one
//! to a dynamic set of subscribers on a fixed interval, while inbound
//! subscribe/unsubscribe commands mutate the membership concurrently. The
//! actual chat backend stays outside the crate behind the [`Transport`]
//! trait; delivery is best-effort, fire-and-forget per subscriber.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  book.txt ──► content::load() ──► ExcerptSet ──► QuoteCycler
//!                                                   (shuffled deck,
//!                                                    exclusive cursor)
//!                                                        │ next() per tick
//!                                                        ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Broadcaster (runtime)                                            │
//! │  - Bus (broadcast events)                                         │
//! │  - ObserverSet (fans events out to observers)                     │
//! │  - BroadcastScheduler (one tick per interval)                     │
//! └───────┬──────────────────────────────┬────────────────────────────┘
//!         │ tick: list() snapshot        │ Transport::send per recipient
//!         ▼                              ▼
//!   SubscriberStore ◄───────────── chat backend
//!   (JSON file, atomic          (implements Transport,
//!    rewrites)                   feeds CommandRouter)
//!         ▲
//!         │ add/remove
//!   CommandRouter (/start, /subscribe, /unsubscribe → reply text)
//! ```
//!
//! ### Tick lifecycle
//! ```text
//! Idle ──(interval)──► Broadcasting
//!   ├─► QuoteCycler::next()      one draw; deck reshuffles at the cycle
//!   │                            boundary, after the last excerpt is read
//!   ├─► SubscriberStore::list()  membership snapshot
//!   └─► per recipient: bounded Transport::send
//!         ├─ ok      → MessageSent
//!         ├─ error   → SendFailed   (siblings unaffected)
//!         └─ timeout → SendTimedOut (siblings unaffected)
//! Broadcasting ──(all attempts done)──► Idle
//! ```
//!
//! ## Features
//! | Area              | Description                                                | Key types / traits                      |
//! |-------------------|------------------------------------------------------------|-----------------------------------------|
//! | **Content**       | Parse flat text into excerpts; transport-safe rendering.   | [`Excerpt`], [`ExcerptSet`]             |
//! | **Rotation**      | Full-cycle-no-repeat draws over a shuffled permutation.    | [`QuoteCycler`]                         |
//! | **Membership**    | Durable subscriber set behind a storage seam.              | [`SubscriberStore`], [`JsonFileStore`]  |
//! | **Broadcast**     | Periodic fan-out with per-send timeouts and isolation.     | [`Broadcaster`], [`BroadcastScheduler`] |
//! | **Commands**      | Reply-building entry points for the transport layer.       | [`CommandRouter`], [`Command`]          |
//! | **Observability** | Runtime events fanned out to pluggable observers.          | [`Event`], [`Observer`]                 |
//! | **Errors**        | Typed errors for runtime, persistence, and delivery.       | [`RuntimeError`], [`StoreError`], [`SendError`] |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use async_trait::async_trait;
//! use quotecast::{
//!     Broadcaster, Config, JsonFileStore, QuoteCycler, SendError, SubscriberId, Transport,
//! };
//!
//! struct StdoutTransport;
//!
//! #[async_trait]
//! impl Transport for StdoutTransport {
//!     async fn send(&self, to: &SubscriberId, text: &str) -> Result<(), SendError> {
//!         println!("to {to}: {text}");
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut cfg = Config::default();
//!     cfg.interval = Duration::from_secs(60);
//!
//!     let excerpts = quotecast::content::load("book.txt").await;
//!     let caster = Broadcaster::new(
//!         cfg,
//!         QuoteCycler::new(excerpts),
//!         Arc::new(JsonFileStore::new("subscribers.json")),
//!         Arc::new(StdoutTransport),
//!         Vec::new(),
//!     );
//!
//!     // Hand `caster.router()` to the chat backend for /subscribe handling,
//!     // then run until SIGINT/SIGTERM.
//!     caster.run().await?;
//!     Ok(())
//! }
//! ```

pub mod content;

mod commands;
mod core;
mod cycle;
mod error;
mod events;
mod observers;
mod store;
mod transport;

// ---- Public re-exports ----

pub use commands::{Command, CommandRouter};
pub use core::{BroadcastScheduler, Broadcaster, Config, SchedulerParams};
pub use cycle::QuoteCycler;
pub use error::{RuntimeError, SendError, StoreError};
pub use events::{Bus, Event, EventKind};
pub use observers::{Observer, ObserverSet};
pub use store::{JsonFileStore, SubscriberId, SubscriberSet, SubscriberStore};
pub use transport::Transport;

pub use content::{Excerpt, ExcerptSet};

// Optional: expose the simple built-in logging observer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use observers::LogWriter;
