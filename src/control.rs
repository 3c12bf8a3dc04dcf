//! # Broadcast control channel: pause, resume, terminate.
//!
//! [`ControlGate`] is the single command value the supervisor sets and every
//! worker observes cooperatively at its checkpoints. Parked workers sleep
//! on a condition variable with an explicit predicate (`command == Block`);
//! there is no spin-wait anywhere in the gate.
//!
//! ## Rendezvous
//! ```text
//! supervisor                         workers
//! ──────────                         ───────
//! begin_block()  ─► command = Block
//! (pool nudge)                       checkpoint sees Block
//! wait_all_parked()                  park(): parked += 1 ──► notify
//!        ▲                           wait while command == Block
//!        └────── parked == live ◄────┘
//! proceed()      ─► command = Normal, wake all parked
//! quit()         ─► command = Quit (terminal), wake all parked
//! ```
//!
//! ## Rules
//! - Workers only park while holding no weight unit.
//! - `parked` never exceeds `live`; exiting workers re-notify the
//!   rendezvous so a concurrent `wait_all_parked` cannot deadlock.
//! - `Quit` is terminal: later `begin_block`/`proceed` calls fail with
//!   [`RuntimeError::Terminated`].

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use crate::error::RuntimeError;

/// The command currently broadcast to all workers.
///
/// Resuming needs no transient value of its own: [`ControlGate::proceed`]
/// sets `Normal` and wakes all parked workers in one step.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// No special command; run the state loop normally.
    Normal = 0,
    /// Park at the next safe checkpoint and wait.
    Block = 1,
    /// Leave the state loop at the next checkpoint. Terminal.
    Quit = 2,
}

/// Outcome of a worker parking at the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Parked {
    /// The supervisor issued `proceed`; resume the state loop.
    Resumed,
    /// The supervisor issued `quit` while parked; exit the loop.
    Quit,
}

struct GateInner {
    command: Command,
    /// Workers currently waiting inside [`ControlGate::park`].
    parked: usize,
    /// Spawned workers that have not yet exited their loop.
    live: usize,
}

/// Shared pause/resume/quit gate between one supervisor and N workers.
pub struct ControlGate {
    inner: Mutex<GateInner>,
    /// Workers wait here while the command is `Block`.
    resume: Condvar,
    /// `wait_all_parked` callers wait here for `parked == live`.
    rendezvous: Condvar,
    /// Mirror of `command` for lock-free checkpoint polling; updated
    /// under the lock.
    hint: AtomicU8,
}

impl ControlGate {
    /// Creates a gate with no registered workers.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(GateInner {
                command: Command::Normal,
                parked: 0,
                live: 0,
            }),
            resume: Condvar::new(),
            rendezvous: Condvar::new(),
            hint: AtomicU8::new(Command::Normal as u8),
        }
    }

    /// Current command, readable without taking the lock.
    ///
    /// This is the fast checkpoint read used inside workout/rest tick
    /// loops.
    pub fn command(&self) -> Command {
        match self.hint.load(Ordering::Acquire) {
            1 => Command::Block,
            2 => Command::Quit,
            _ => Command::Normal,
        }
    }

    fn lock(&self) -> MutexGuard<'_, GateInner> {
        // Gate state is a trio of counters with invariants re-checked on
        // every wakeup, so a poisoned lock carries no torn state.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_command(&self, inner: &mut GateInner, command: Command) {
        inner.command = command;
        self.hint.store(command as u8, Ordering::Release);
    }

    /// Registers one worker as live. Called by the supervisor for each
    /// successfully spawned thread, before that thread can exit.
    pub(crate) fn register_worker(&self) {
        let mut inner = self.lock();
        inner.live += 1;
    }

    /// Marks one worker as exited and re-checks the rendezvous.
    pub(crate) fn worker_exited(&self) {
        let mut inner = self.lock();
        debug_assert!(inner.live > 0, "more exits than registered workers");
        inner.live = inner.live.saturating_sub(1);
        self.rendezvous.notify_all();
    }

    /// Sets the command to `Block`.
    ///
    /// Idempotent while blocked. Fails with [`RuntimeError::Terminated`]
    /// after `quit`.
    pub(crate) fn begin_block(&self) -> Result<(), RuntimeError> {
        let mut inner = self.lock();
        match inner.command {
            Command::Quit => Err(RuntimeError::Terminated),
            Command::Block => Ok(()),
            Command::Normal => {
                self.set_command(&mut inner, Command::Block);
                Ok(())
            }
        }
    }

    /// Blocks the caller until every live worker is parked.
    ///
    /// Returns immediately once `parked == live`, including the degenerate
    /// case where all workers have already exited.
    pub(crate) fn wait_all_parked(&self) {
        let mut inner = self.lock();
        while inner.command == Command::Block && inner.parked < inner.live {
            inner = self
                .rendezvous
                .wait(inner)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Sets the command back to `Normal` and wakes all parked workers.
    ///
    /// A no-op if nothing is blocked. Fails with
    /// [`RuntimeError::Terminated`] after `quit`.
    pub(crate) fn proceed(&self) -> Result<(), RuntimeError> {
        let mut inner = self.lock();
        match inner.command {
            Command::Quit => Err(RuntimeError::Terminated),
            Command::Normal => Ok(()),
            Command::Block => {
                self.set_command(&mut inner, Command::Normal);
                self.resume.notify_all();
                Ok(())
            }
        }
    }

    /// Sets the terminal `Quit` command and wakes all parked workers.
    ///
    /// Idempotent.
    pub(crate) fn quit(&self) {
        let mut inner = self.lock();
        if inner.command != Command::Quit {
            self.set_command(&mut inner, Command::Quit);
        }
        self.resume.notify_all();
    }

    /// Worker-side: park at the gate until `proceed` or `quit`.
    ///
    /// Increments the idled count (waking any rendezvous waiter) for the
    /// duration of the wait. Spurious wakeups re-check the predicate.
    pub(crate) fn park(&self) -> Parked {
        let mut inner = self.lock();
        if inner.command == Command::Quit {
            return Parked::Quit;
        }
        inner.parked += 1;
        debug_assert!(inner.parked <= inner.live, "parked count exceeds live workers");
        self.rendezvous.notify_all();
        while inner.command == Command::Block {
            inner = self
                .resume
                .wait(inner)
                .unwrap_or_else(PoisonError::into_inner);
        }
        inner.parked -= 1;
        match inner.command {
            Command::Quit => Parked::Quit,
            _ => Parked::Resumed,
        }
    }

    #[cfg(test)]
    pub(crate) fn parked_count(&self) -> usize {
        self.lock().parked
    }
}

impl Default for ControlGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_commands_are_visible_through_hint() {
        let gate = ControlGate::new();
        assert_eq!(gate.command(), Command::Normal);
        gate.begin_block().unwrap();
        assert_eq!(gate.command(), Command::Block);
        gate.proceed().unwrap();
        assert_eq!(gate.command(), Command::Normal);
        gate.quit();
        assert_eq!(gate.command(), Command::Quit);
    }

    #[test]
    fn test_proceed_without_block_is_noop() {
        let gate = ControlGate::new();
        assert!(gate.proceed().is_ok());
        assert_eq!(gate.command(), Command::Normal);
    }

    #[test]
    fn test_block_and_proceed_after_quit_fail() {
        let gate = ControlGate::new();
        gate.quit();
        assert!(matches!(gate.begin_block(), Err(RuntimeError::Terminated)));
        assert!(matches!(gate.proceed(), Err(RuntimeError::Terminated)));
    }

    #[test]
    fn test_rendezvous_waits_for_every_worker() {
        let gate = Arc::new(ControlGate::new());
        for _ in 0..3 {
            gate.register_worker();
        }
        gate.begin_block().unwrap();

        let mut handles = Vec::new();
        for _ in 0..3 {
            let g = Arc::clone(&gate);
            handles.push(thread::spawn(move || g.park()));
        }

        gate.wait_all_parked();
        assert_eq!(gate.parked_count(), 3);

        gate.proceed().unwrap();
        for h in handles {
            assert_eq!(h.join().unwrap(), Parked::Resumed);
        }
        assert_eq!(gate.parked_count(), 0);
    }

    #[test]
    fn test_quit_releases_parked_workers() {
        let gate = Arc::new(ControlGate::new());
        gate.register_worker();
        gate.begin_block().unwrap();

        let g = Arc::clone(&gate);
        let h = thread::spawn(move || g.park());

        gate.wait_all_parked();
        gate.quit();
        assert_eq!(h.join().unwrap(), Parked::Quit);
    }

    #[test]
    fn test_exiting_workers_unstick_rendezvous() {
        let gate = Arc::new(ControlGate::new());
        gate.register_worker();
        gate.register_worker();
        gate.begin_block().unwrap();

        // One worker parks, the other exits instead of parking.
        let g1 = Arc::clone(&gate);
        let parked = thread::spawn(move || g1.park());
        let g2 = Arc::clone(&gate);
        let exiting = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            g2.worker_exited();
        });

        gate.wait_all_parked();
        exiting.join().unwrap();
        gate.quit();
        parked.join().unwrap();
    }
}
