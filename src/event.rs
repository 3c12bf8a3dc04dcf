//! # Runtime events emitted by the supervisor and worker actors.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Lifecycle events**: worker flow (registered, parked, resumed, stopped)
//! - **Resource events**: weight units moving between pool and workers
//! - **Control events**: the supervisor's pause/resume/quit surface
//!
//! The [`Event`] struct carries additional metadata such as a wall-clock
//! timestamp, the worker id, the worker's state at emission time, and the
//! pool availability observed alongside the event.
//!
//! Observers consume events strictly off the worker threads' hot path:
//! publication never blocks, so a slow or wedged observer can delay its own
//! log lines but never a worker's progress.
//!
//! ## Example
//! ```rust
//! use gymvisor::{Event, EventKind, PhiloState};
//!
//! let ev = Event::now(EventKind::WeightsAcquired)
//!     .with_worker(2)
//!     .with_state(PhiloState::Workout)
//!     .with_available(1);
//!
//! assert_eq!(ev.kind, EventKind::WeightsAcquired);
//! assert_eq!(ev.worker, Some(2));
//! assert_eq!(ev.available, Some(1));
//! ```

use std::time::SystemTime;

use crate::state::{PhiloState, WorkerId};

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Lifecycle events ===
    /// A worker thread reached the startup barrier.
    WorkerRegistered,
    /// The startup barrier released; all workers are entering their loop.
    SimulationStarted,
    /// A worker parked at a safe checkpoint in response to a pause.
    WorkerParked,
    /// A previously parked worker resumed its state loop.
    WorkerResumed,
    /// A worker thread left its state loop and is about to exit.
    WorkerStopped,

    // === Resource events ===
    /// A worker acquired one weight unit from the pool.
    WeightsAcquired,
    /// A worker returned its weight unit to the pool.
    WeightsReturned,

    // === Control events ===
    /// The supervisor requested a pause; rendezvous in progress.
    PauseRequested,
    /// Every live worker reached a parked checkpoint.
    PauseReached,
    /// The supervisor requested that parked workers resume.
    ResumeRequested,
    /// The supervisor requested termination.
    QuitRequested,
}

/// A single runtime event with optional metadata.
#[derive(Debug, Clone)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// Wall-clock timestamp taken at construction.
    pub at: SystemTime,
    /// Worker the event concerns, if any.
    pub worker: Option<WorkerId>,
    /// The worker's state at emission time, if relevant.
    pub state: Option<PhiloState>,
    /// Pool availability observed alongside the event, if relevant.
    pub available: Option<usize>,
}

impl Event {
    /// Creates an event of the given kind, timestamped now.
    pub fn now(kind: EventKind) -> Self {
        Self {
            kind,
            at: SystemTime::now(),
            worker: None,
            state: None,
            available: None,
        }
    }

    /// Attaches the worker id.
    pub fn with_worker(mut self, id: WorkerId) -> Self {
        self.worker = Some(id);
        self
    }

    /// Attaches the worker's state at emission time.
    pub fn with_state(mut self, state: PhiloState) -> Self {
        self.state = Some(state);
        self
    }

    /// Attaches the observed pool availability.
    pub fn with_available(mut self, available: usize) -> Self {
        self.available = Some(available);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let ev = Event::now(EventKind::WorkerParked)
            .with_worker(7)
            .with_state(PhiloState::Rest);
        assert_eq!(ev.kind, EventKind::WorkerParked);
        assert_eq!(ev.worker, Some(7));
        assert_eq!(ev.state, Some(PhiloState::Rest));
        assert_eq!(ev.available, None);
    }
}
