//! # Jitter policy for rest durations.
//!
//! [`JitterPolicy`] adds randomness to the REST duration to prevent
//! thundering-herd effects: workers that start in lockstep otherwise hit
//! the weight pool at the same cycle boundaries forever.
//!
//! - [`JitterPolicy::None`] — no randomization, exactly fixed rests
//! - [`JitterPolicy::Full`] — random rest in [0, rest] (most aggressive)
//! - [`JitterPolicy::Equal`] — rest = rest/2 + random[0, rest/2] (balanced)

use rand::Rng;
use std::time::Duration;

/// Policy controlling randomization of rest durations.
///
/// ## Trade-offs
/// - **None**: Predictable, but risks lockstep contention on the pool
/// - **Full**: Maximum randomness, aggressive load spreading
/// - **Equal**: Balanced (recommended when jitter is wanted at all)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JitterPolicy {
    /// No jitter: rest for exactly the configured duration.
    None,
    /// Full jitter: random rest in [0, rest].
    Full,
    /// Equal jitter: rest = rest/2 + random[0, rest/2].
    ///
    /// Preserves ~75% of the configured rest on average.
    Equal,
}

impl Default for JitterPolicy {
    /// Returns [`JitterPolicy::None`]: the simulation's timing stays
    /// fixed unless jitter is opted into.
    fn default() -> Self {
        JitterPolicy::None
    }
}

impl JitterPolicy {
    /// Applies jitter to the given duration.
    pub fn apply(&self, rest: Duration) -> Duration {
        match self {
            JitterPolicy::None => rest,
            JitterPolicy::Full => self.full_jitter(rest),
            JitterPolicy::Equal => self.equal_jitter(rest),
        }
    }

    /// Full jitter: random[0, rest]
    fn full_jitter(&self, rest: Duration) -> Duration {
        let mut rng = rand::rng();
        let ms = rest.as_millis() as u64;
        if ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rng.random_range(0..=ms))
    }

    /// Equal jitter: rest/2 + random[0, rest/2]
    fn equal_jitter(&self, rest: Duration) -> Duration {
        let mut rng = rand::rng();
        let ms = rest.as_millis() as u64;
        if ms == 0 {
            return Duration::ZERO;
        }
        let half = ms / 2;
        let jitter = if half == 0 {
            0
        } else {
            rng.random_range(0..=half)
        };
        Duration::from_millis(half + jitter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_identity() {
        let rest = Duration::from_millis(750);
        assert_eq!(JitterPolicy::None.apply(rest), rest);
    }

    #[test]
    fn test_full_jitter_bounds() {
        let rest = Duration::from_millis(1000);
        for _ in 0..50 {
            assert!(JitterPolicy::Full.apply(rest) <= rest);
        }
    }

    #[test]
    fn test_equal_jitter_bounds() {
        let rest = Duration::from_millis(1000);
        for _ in 0..50 {
            let jittered = JitterPolicy::Equal.apply(rest);
            assert!(jittered >= Duration::from_millis(500));
            assert!(jittered <= rest);
        }
    }

    #[test]
    fn test_zero_rest_stays_zero() {
        assert_eq!(JitterPolicy::Full.apply(Duration::ZERO), Duration::ZERO);
        assert_eq!(JitterPolicy::Equal.apply(Duration::ZERO), Duration::ZERO);
    }
}
