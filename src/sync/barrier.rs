//! # Reusable startup barrier.
//!
//! [`StartBarrier`] releases all waiting parties simultaneously once a
//! fixed number have arrived. A generation counter makes the barrier
//! reusable without races between consecutive uses, and absorbs spurious
//! wakeups: a waiter only returns once its own generation has been
//! released (or the barrier was cancelled).
//!
//! Cancellation exists for one reason: when a mid-startup thread spawn
//! fails, already-spawned workers are parked on a rendezvous that can no
//! longer complete. [`StartBarrier::cancel`] releases them with
//! [`BarrierWait::Canceled`] so construction can tear down cleanly.

use std::sync::{Condvar, Mutex, PoisonError};

/// Outcome of [`StartBarrier::wait`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierWait {
    /// All parties arrived and were released together.
    Released {
        /// True for exactly one waiter per generation (the last arrival).
        leader: bool,
    },
    /// The barrier was cancelled; the rendezvous will never complete.
    Canceled,
}

struct BarrierInner {
    arrived: usize,
    generation: u64,
    canceled: bool,
}

/// Rendezvous point releasing all `threshold` parties at once.
pub struct StartBarrier {
    threshold: usize,
    inner: Mutex<BarrierInner>,
    cv: Condvar,
}

impl StartBarrier {
    /// Creates a barrier for exactly `threshold` parties.
    ///
    /// A threshold of zero is treated as one, so the first waiter always
    /// releases itself rather than deadlocking.
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold: threshold.max(1),
            inner: Mutex::new(BarrierInner {
                arrived: 0,
                generation: 0,
                canceled: false,
            }),
            cv: Condvar::new(),
        }
    }

    /// Blocks until `threshold` parties have called `wait` since the last
    /// release, then releases all of them and resets for reuse.
    pub fn wait(&self) -> BarrierWait {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if inner.canceled {
            return BarrierWait::Canceled;
        }

        let generation = inner.generation;
        inner.arrived += 1;

        if inner.arrived == self.threshold {
            inner.arrived = 0;
            inner.generation = inner.generation.wrapping_add(1);
            self.cv.notify_all();
            return BarrierWait::Released { leader: true };
        }

        while inner.generation == generation && !inner.canceled {
            inner = self.cv.wait(inner).unwrap_or_else(PoisonError::into_inner);
        }
        if inner.generation == generation {
            BarrierWait::Canceled
        } else {
            BarrierWait::Released { leader: false }
        }
    }

    /// Releases all current and future waiters with
    /// [`BarrierWait::Canceled`]. Irreversible.
    pub fn cancel(&self) {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        inner.canceled = true;
        self.cv.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_single_party_never_blocks() {
        let barrier = StartBarrier::new(1);
        assert_eq!(barrier.wait(), BarrierWait::Released { leader: true });
        assert_eq!(barrier.wait(), BarrierWait::Released { leader: true });
    }

    #[test]
    fn test_no_waiter_released_early() {
        let barrier = Arc::new(StartBarrier::new(4));
        let before_release = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..3 {
            let b = Arc::clone(&barrier);
            let n = Arc::clone(&before_release);
            handles.push(thread::spawn(move || {
                n.fetch_add(1, Ordering::SeqCst);
                b.wait()
            }));
        }

        // Nobody can be past the barrier while the fourth party is absent.
        thread::sleep(Duration::from_millis(50));
        assert_eq!(before_release.load(Ordering::SeqCst), 3);

        assert_eq!(barrier.wait(), BarrierWait::Released { leader: true });
        for h in handles {
            assert_eq!(h.join().unwrap(), BarrierWait::Released { leader: false });
        }
    }

    #[test]
    fn test_barrier_is_reusable_across_generations() {
        let barrier = Arc::new(StartBarrier::new(2));
        for _ in 0..3 {
            let b = Arc::clone(&barrier);
            let h = thread::spawn(move || b.wait());
            assert!(matches!(barrier.wait(), BarrierWait::Released { .. }));
            assert!(matches!(h.join().unwrap(), BarrierWait::Released { .. }));
        }
    }

    #[test]
    fn test_cancel_releases_waiters() {
        let barrier = Arc::new(StartBarrier::new(3));
        let b = Arc::clone(&barrier);
        let h = thread::spawn(move || b.wait());

        thread::sleep(Duration::from_millis(20));
        barrier.cancel();

        assert_eq!(h.join().unwrap(), BarrierWait::Canceled);
        // Late arrivals observe cancellation immediately.
        assert_eq!(barrier.wait(), BarrierWait::Canceled);
    }
}
