//! # Global runtime configuration.
//!
//! Provides [`Config`], centralized settings for the broadcast runtime.
//!
//! The credential/token for the actual chat backend never appears here; it
//! belongs to the transport layer. The core only needs timing and plumbing
//! knobs.
//!
//! ## Sentinel values
//! - `send_timeout = 0s` → no per-send bound (treated as `None`)
//! - `bus_capacity` is clamped to a minimum of 1 by the bus

use std::time::Duration;

/// Global configuration for the broadcast runtime.
///
/// Defines:
/// - **Cadence**: the interval between broadcast ticks
/// - **Delivery bounds**: per-send timeout so one unresponsive recipient
///   cannot stall a tick indefinitely
/// - **Shutdown behavior**: grace period for draining an in-flight tick
/// - **Event system**: bus capacity for event delivery
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to
/// avoid sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug)]
pub struct Config {
    /// Fixed period between broadcast ticks.
    ///
    /// The first tick fires one full interval after the scheduler starts.
    pub interval: Duration,

    /// Maximum time one delivery attempt may take.
    ///
    /// - `Duration::ZERO` = unbounded (not recommended; a hung recipient
    ///   then delays the rest of the tick)
    /// - `> 0` = each send is wrapped in this timeout and reported as
    ///   [`SendError::Timeout`](crate::SendError::Timeout) when it elapses
    pub send_timeout: Duration,

    /// Maximum time to wait for an in-flight tick to drain at shutdown.
    ///
    /// When shutdown is requested:
    /// - The scheduler stops scheduling further ticks
    /// - The runtime waits up to `grace` for the current tick's subscriber
    ///   loop to finish
    /// - On timeout, [`RuntimeError::GraceExceeded`](crate::RuntimeError::GraceExceeded)
    ///   is returned
    pub grace: Duration,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Observers that lag behind more than `bus_capacity` events will skip
    /// older items. Minimum value is 1 (enforced by the bus).
    pub bus_capacity: usize,
}

impl Config {
    /// Returns the per-send timeout as an `Option`.
    ///
    /// - `None` → unbounded sends
    /// - `Some(d)` → timeout applied per delivery attempt
    #[inline]
    pub fn send_timeout(&self) -> Option<Duration> {
        if self.send_timeout == Duration::ZERO {
            None
        } else {
            Some(self.send_timeout)
        }
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `interval = 10s` (one excerpt every ten seconds)
    /// - `send_timeout = 10s` (bounded per-recipient delivery)
    /// - `grace = 30s` (ample time to drain one subscriber loop)
    /// - `bus_capacity = 1024` (good baseline)
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            send_timeout: Duration::from_secs(10),
            grace: Duration::from_secs(30),
            bus_capacity: 1024,
        }
    }
}
