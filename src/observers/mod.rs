//! # Event observers for the quotecast runtime.
//!
//! This module provides the [`Observer`] trait and the [`ObserverSet`]
//! fan-out used to deliver runtime events broadcast through the
//! [`Bus`](crate::events::Bus).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Scheduler/Router ── publish(Event) ──► Bus ──► observer_listener
//!                                                      │
//!                                                      ▼
//!                                               ObserverSet::emit()
//!                                            ┌────────┼────────┐
//!                                            ▼        ▼        ▼
//!                                        LogWriter  Metrics  Custom ...
//! ```
//!
//! Observers watch the runtime; *subscribers* (chat recipients) are a
//! different concept and live in [`crate::store`].

mod log;
mod observer;
mod set;

pub use log::LogWriter;
pub use observer::Observer;
pub use set::ObserverSet;
