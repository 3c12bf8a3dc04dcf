//! # Global simulation configuration.
//!
//! [`Config`] defines the shape and timing of a simulation: worker count,
//! weight pool capacity, workout/rest durations, quit-poll granularity,
//! event bus capacity, and the optional rest jitter.
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use gymvisor::{Config, JitterPolicy};
//!
//! let mut cfg = Config::default();
//! cfg.workers = 4;
//! cfg.capacity = 2;
//! cfg.rest = Duration::from_millis(250);
//! cfg.rest_jitter = JitterPolicy::Equal;
//!
//! assert_eq!(cfg.workers, 4);
//! ```

use std::time::Duration;

use crate::policies::JitterPolicy;

/// Global configuration for a simulation run.
///
/// Controls worker count, pool capacity, state durations, termination
/// latency, and event fan-out.
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of philosopher workers (threads) to spawn.
    pub workers: usize,
    /// Number of interchangeable weight units in the pool.
    pub capacity: usize,
    /// Time a worker spends in WORKOUT while holding a weight unit.
    pub workout: Duration,
    /// Time a worker spends in REST between cycles.
    pub rest: Duration,
    /// Poll granularity inside workout/rest: an issued quit is observed
    /// within at most one tick. Zero is clamped to one millisecond.
    pub tick: Duration,
    /// Capacity of each observer's event queue.
    pub bus_capacity: usize,
    /// Jitter applied to the rest duration, de-synchronizing cycle
    /// boundaries across workers. `None` keeps rests exactly fixed.
    pub rest_jitter: JitterPolicy,
}

impl Default for Config {
    /// Provides a default configuration:
    /// - `workers = 5`
    /// - `capacity = 3`
    /// - `workout = 500ms`
    /// - `rest = 1s`
    /// - `tick = 10ms`
    /// - `bus_capacity = 1024`
    /// - `rest_jitter = JitterPolicy::None`
    fn default() -> Self {
        Self {
            workers: 5,
            capacity: 3,
            workout: Duration::from_millis(500),
            rest: Duration::from_secs(1),
            tick: Duration::from_millis(10),
            bus_capacity: 1024,
            rest_jitter: JitterPolicy::None,
        }
    }
}

impl Config {
    /// The effective quit-poll granularity (never zero).
    pub(crate) fn effective_tick(&self) -> Duration {
        self.tick.max(Duration::from_millis(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shape() {
        let cfg = Config::default();
        assert_eq!(cfg.workers, 5);
        assert_eq!(cfg.capacity, 3);
        assert_eq!(cfg.rest_jitter, JitterPolicy::None);
    }

    #[test]
    fn test_zero_tick_is_clamped() {
        let mut cfg = Config::default();
        cfg.tick = Duration::ZERO;
        assert_eq!(cfg.effective_tick(), Duration::from_millis(1));
    }
}
