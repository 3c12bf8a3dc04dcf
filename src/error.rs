//! Error types used by the gymvisor runtime.
//!
//! This module defines two main error enums:
//!
//! - [`SpawnError`] — errors raised while constructing a simulation.
//! - [`RuntimeError`] — errors raised by the control surface of a running
//!   simulation.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for
//! logging/metrics.
//!
//! Internal invariant violations (a negative weight count, a startup
//! barrier overrun) are not represented here: they signal a broken
//! synchronization invariant rather than a recoverable runtime condition
//! and are treated as panics.

use std::io;
use thiserror::Error;

use crate::state::WorkerId;

/// # Errors produced while starting a simulation.
///
/// Construction either succeeds completely or fails with one of these;
/// on failure any partially spawned workers are torn down before the
/// error is returned.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SpawnError {
    /// The configuration requested zero workers.
    #[error("worker count must be at least 1")]
    ZeroWorkers,

    /// The configuration requested a weight pool of capacity zero.
    #[error("weight pool capacity must be at least 1")]
    ZeroCapacity,

    /// The OS refused to create a worker thread.
    #[error("failed to spawn thread for worker {worker}: {source}")]
    Thread {
        /// Id of the worker whose thread could not be created.
        worker: WorkerId,
        /// The underlying OS error.
        source: io::Error,
    },
}

impl SpawnError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use gymvisor::SpawnError;
    ///
    /// assert_eq!(SpawnError::ZeroWorkers.as_label(), "spawn_zero_workers");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SpawnError::ZeroWorkers => "spawn_zero_workers",
            SpawnError::ZeroCapacity => "spawn_zero_capacity",
            SpawnError::Thread { .. } => "spawn_thread_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SpawnError::ZeroWorkers => "zero workers requested".to_string(),
            SpawnError::ZeroCapacity => "zero pool capacity requested".to_string(),
            SpawnError::Thread { worker, source } => {
                format!("thread spawn failed for worker {worker}: {source}")
            }
        }
    }
}

/// # Errors produced by the control surface of a running simulation.
///
/// Benign command sequences (a `proceed` with nothing blocked, a repeated
/// `block`) are no-ops, not errors. Only genuinely invalid or degraded
/// outcomes surface here.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// `block` or `proceed` was called after `quit`; the simulation is
    /// terminal and accepts no further control commands.
    #[error("simulation already terminated")]
    Terminated,

    /// One or more worker threads panicked before they could be joined.
    #[error("worker threads panicked: {workers:?}")]
    WorkerPanic {
        /// Ids of the workers whose threads panicked.
        workers: Vec<WorkerId>,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use gymvisor::RuntimeError;
    ///
    /// assert_eq!(RuntimeError::Terminated.as_label(), "runtime_terminated");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::Terminated => "runtime_terminated",
            RuntimeError::WorkerPanic { .. } => "runtime_worker_panic",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::Terminated => "control command after quit".to_string(),
            RuntimeError::WorkerPanic { workers } => {
                format!("panicked workers={workers:?}")
            }
        }
    }
}
