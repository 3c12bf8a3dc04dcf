//! # Bounded pool of interchangeable weight units.
//!
//! [`WeightPool`] gates how many workers can hold a weight unit at once.
//! `available` stays within `[0, capacity]` at all times, enforced under a
//! single mutex; acquisition hands out a [`WeightPermit`] RAII guard so a
//! unit can never leak, not even on a panicking or quitting worker.
//!
//! Blocked acquirers must stay responsive to the control gate. This pool
//! takes the interrupt-signal approach: the supervisor calls
//! [`WeightPool::nudge`] (on pause) or [`WeightPool::close`] (on quit)
//! after setting the command, and every wakeup re-reads the gate before
//! going back to sleep. `acquire` therefore returns [`Interrupt::Pause`]
//! or [`Interrupt::Quit`] instead of blocking through a control command.
//!
//! Wakeup order is whatever the condvar delivers: eventual progress under
//! bounded contention, no FIFO guarantee.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use crate::control::{Command, ControlGate};

/// Why an [`WeightPool::acquire`] call returned without a permit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// A pause is pending; park at the gate, then retry.
    Pause,
    /// The pool is closed or quit is pending; leave the state loop.
    Quit,
}

struct PoolInner {
    available: usize,
    closed: bool,
}

/// Bounded-concurrency pool of `capacity` identical weight units.
pub struct WeightPool {
    capacity: usize,
    inner: Mutex<PoolInner>,
    cv: Condvar,
}

impl WeightPool {
    /// Creates a pool with all `capacity` units available.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(PoolInner {
                available: capacity,
                closed: false,
            }),
            cv: Condvar::new(),
        }
    }

    /// Total number of units the pool was created with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Units currently available. Snapshot; may be stale by the time the
    /// caller acts on it.
    pub fn available(&self) -> usize {
        self.lock().available
    }

    fn lock(&self) -> MutexGuard<'_, PoolInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Blocks until a unit is available, re-checking `gate` on every
    /// wakeup.
    ///
    /// Returns a permit owning exactly one unit, or an [`Interrupt`] when
    /// the gate commands a pause/quit or the pool is closed. The permit
    /// returns its unit on drop.
    pub fn acquire(&self, gate: &ControlGate) -> Result<WeightPermit<'_>, Interrupt> {
        let mut inner = self.lock();
        loop {
            if inner.closed || gate.command() == Command::Quit {
                return Err(Interrupt::Quit);
            }
            if gate.command() == Command::Block {
                return Err(Interrupt::Pause);
            }
            if inner.available > 0 {
                inner.available -= 1;
                return Ok(WeightPermit {
                    pool: self,
                    released: false,
                });
            }
            inner = self.cv.wait(inner).unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn release_unit(&self) {
        let mut inner = self.lock();
        debug_assert!(
            inner.available < self.capacity,
            "more units released than the pool capacity"
        );
        inner.available = (inner.available + 1).min(self.capacity);
        // One unit frees exactly one acquirer.
        self.cv.notify_one();
    }

    /// Wakes every blocked acquirer so it re-reads the control gate.
    ///
    /// Called by the supervisor after setting `Block`. Taking the lock
    /// before notifying closes the window where a sleeper has read the
    /// old command but not yet started waiting.
    pub(crate) fn nudge(&self) {
        let _inner = self.lock();
        self.cv.notify_all();
    }

    /// Closes the pool: every current and future `acquire` returns
    /// [`Interrupt::Quit`]. Units already handed out can still be
    /// returned. Irreversible.
    pub(crate) fn close(&self) {
        let mut inner = self.lock();
        inner.closed = true;
        self.cv.notify_all();
    }
}

/// RAII ownership of one weight unit.
///
/// The unit goes back to the pool on [`WeightPermit::release`] or, at the
/// latest, on drop.
#[must_use = "dropping the permit returns the unit immediately"]
pub struct WeightPermit<'a> {
    pool: &'a WeightPool,
    released: bool,
}

impl WeightPermit<'_> {
    /// Returns the unit to the pool, waking one blocked acquirer.
    pub fn release(mut self) {
        self.released = true;
        self.pool.release_unit();
    }
}

impl Drop for WeightPermit<'_> {
    fn drop(&mut self) {
        if !self.released {
            self.pool.release_unit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn open_gate() -> ControlGate {
        ControlGate::new()
    }

    #[test]
    fn test_acquire_decrements_release_restores() {
        let pool = WeightPool::new(2);
        let gate = open_gate();

        let a = pool.acquire(&gate).unwrap();
        let b = pool.acquire(&gate).unwrap();
        assert_eq!(pool.available(), 0);

        a.release();
        assert_eq!(pool.available(), 1);
        drop(b);
        assert_eq!(pool.available(), 2);
    }

    #[test]
    fn test_drop_returns_unit() {
        let pool = WeightPool::new(1);
        let gate = open_gate();
        {
            let _permit = pool.acquire(&gate).unwrap();
            assert_eq!(pool.available(), 0);
        }
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn test_blocked_acquirer_wakes_on_release() {
        let pool = Arc::new(WeightPool::new(1));
        let permit = pool.acquire(&open_gate()).unwrap();

        let p = Arc::clone(&pool);
        let waiter = thread::spawn(move || {
            let gate = ControlGate::new();
            let permit = p.acquire(&gate).unwrap();
            permit.release();
        });

        thread::sleep(Duration::from_millis(20));
        permit.release();
        waiter.join().unwrap();
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn test_close_interrupts_blocked_acquirer() {
        let pool = Arc::new(WeightPool::new(1));
        let gate = open_gate();
        let _held = pool.acquire(&gate).unwrap();

        let p = Arc::clone(&pool);
        let waiter = thread::spawn(move || {
            let gate = ControlGate::new();
            p.acquire(&gate).err()
        });

        thread::sleep(Duration::from_millis(20));
        pool.close();
        assert_eq!(waiter.join().unwrap(), Some(Interrupt::Quit));
    }

    #[test]
    fn test_pending_block_interrupts_blocked_acquirer() {
        let pool = Arc::new(WeightPool::new(1));
        let gate = Arc::new(ControlGate::new());
        let held = pool.acquire(&gate).unwrap();

        let p = Arc::clone(&pool);
        let g = Arc::clone(&gate);
        let waiter = thread::spawn(move || p.acquire(&g).err());

        thread::sleep(Duration::from_millis(20));
        gate.begin_block().unwrap();
        pool.nudge();
        assert_eq!(waiter.join().unwrap(), Some(Interrupt::Pause));
        held.release();
    }

    #[test]
    fn test_acquire_after_close_fails_immediately() {
        let pool = WeightPool::new(3);
        pool.close();
        assert_eq!(pool.acquire(&open_gate()).err(), Some(Interrupt::Quit));
        assert_eq!(pool.available(), 3);
    }
}
