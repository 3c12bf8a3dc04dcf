//! # Supervisor: owns the shared structures and the control surface.
//!
//! The [`Supervisor`] is one explicit context object with no global
//! state: it creates the gate, pool, and barrier, hands each worker
//! thread its references at spawn time, and exposes
//! `block`/`proceed`/`quit` plus a non-blocking state snapshot. Multiple
//! independent simulations can run in one process.
//!
//! ## Startup sequencing
//! ```text
//! Supervisor::start(cfg, observers)
//!   ├─► validate cfg (zero workers / zero capacity rejected)
//!   ├─► spawn one listener thread per observer
//!   ├─► spawn N worker threads ("worker-{id}")
//!   │     └─ on failure: cancel barrier, join the partial set, Err
//!   └─► arrive at the StartBarrier (sized N + 1, supervisor included)
//!         └─ nobody enters GET_WEIGHTS before the barrier releases
//! ```
//!
//! ## Shutdown
//! `quit` is terminal and idempotent: it broadcasts Quit, closes the pool
//! (interrupting blocked acquirers), joins every worker thread, then
//! closes the bus and joins the listeners. It always completes — there is
//! no wait a worker can be stuck in that does not observe Quit within one
//! tick.

use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use crate::bus::Bus;
use crate::config::Config;
use crate::control::ControlGate;
use crate::error::{RuntimeError, SpawnError};
use crate::event::{Event, EventKind};
use crate::observers::Observer;
use crate::state::{PhiloState, StateCell, WorkerId};
use crate::sync::{StartBarrier, WeightPool};
use crate::worker::{Timing, WorkerActor};

/// Handle to a running simulation.
///
/// Dropping the supervisor quits the simulation and joins all threads.
pub struct Supervisor {
    bus: Bus,
    gate: Arc<ControlGate>,
    pool: Arc<WeightPool>,
    states: Vec<(WorkerId, Arc<StateCell>)>,
    joins: Mutex<Vec<(WorkerId, JoinHandle<()>)>>,
    listeners: Mutex<Vec<JoinHandle<()>>>,
}

impl Supervisor {
    /// Spawns `cfg.workers` worker threads and releases them together.
    ///
    /// Fails if the config is invalid or a thread cannot be created; any
    /// partially spawned workers are torn down before the error returns.
    /// Does not return before every worker has registered at the startup
    /// barrier, so no worker is mid-cycle while others are still
    /// spawning.
    pub fn start(
        cfg: Config,
        observers: Vec<Arc<dyn Observer>>,
    ) -> Result<Self, SpawnError> {
        if cfg.workers == 0 {
            return Err(SpawnError::ZeroWorkers);
        }
        if cfg.capacity == 0 {
            return Err(SpawnError::ZeroCapacity);
        }

        let bus = Bus::new(cfg.bus_capacity);
        let listeners: Vec<JoinHandle<()>> = observers
            .into_iter()
            .map(|obs| {
                let rx = bus.subscribe();
                thread::spawn(move || {
                    while let Ok(ev) = rx.recv() {
                        obs.on_event(&ev);
                    }
                })
            })
            .collect();

        let gate = Arc::new(ControlGate::new());
        let pool = Arc::new(WeightPool::new(cfg.capacity));
        // Workers plus the supervisor itself: start() arriving last is
        // what guarantees it cannot return before all threads are ready.
        let barrier = Arc::new(StartBarrier::new(cfg.workers + 1));

        let timing = Timing {
            workout: cfg.workout,
            rest: cfg.rest,
            tick: cfg.effective_tick(),
            rest_jitter: cfg.rest_jitter,
        };

        let mut states = Vec::with_capacity(cfg.workers);
        let mut joins = Vec::with_capacity(cfg.workers);
        for id in 0..cfg.workers {
            let cell = Arc::new(StateCell::new());
            let actor = WorkerActor {
                id,
                state: Arc::clone(&cell),
                gate: Arc::clone(&gate),
                pool: Arc::clone(&pool),
                barrier: Arc::clone(&barrier),
                bus: bus.clone(),
                timing,
            };

            gate.register_worker();
            let spawned = thread::Builder::new()
                .name(format!("worker-{id}"))
                .spawn(move || actor.run());
            match spawned {
                Ok(handle) => {
                    states.push((id, cell));
                    joins.push((id, handle));
                }
                Err(source) => {
                    gate.worker_exited();
                    Self::teardown_partial(&barrier, &bus, joins, listeners);
                    return Err(SpawnError::Thread { worker: id, source });
                }
            }
        }

        barrier.wait();
        bus.publish(Event::now(EventKind::SimulationStarted));

        Ok(Self {
            bus,
            gate,
            pool,
            states,
            joins: Mutex::new(joins),
            listeners: Mutex::new(listeners),
        })
    }

    /// Pauses the simulation: broadcasts Block and returns only after
    /// every live worker is parked at a safe checkpoint.
    ///
    /// Idempotent while already blocked. After `quit` this fails with
    /// [`RuntimeError::Terminated`].
    pub fn block(&self) -> Result<(), RuntimeError> {
        self.gate.begin_block()?;
        self.bus.publish(Event::now(EventKind::PauseRequested));
        // Wake acquire-blocked workers so they can observe Block and park.
        self.pool.nudge();
        self.gate.wait_all_parked();
        self.bus.publish(Event::now(EventKind::PauseReached));
        Ok(())
    }

    /// Resumes all parked workers. A no-op when nothing is blocked; fails
    /// with [`RuntimeError::Terminated`] after `quit`.
    pub fn proceed(&self) -> Result<(), RuntimeError> {
        self.gate.proceed()?;
        self.bus.publish(Event::now(EventKind::ResumeRequested));
        Ok(())
    }

    /// Terminates the simulation and joins every worker thread.
    ///
    /// Terminal and idempotent: the first call blocks until all workers
    /// have exited, later calls return `Ok` immediately. Reports workers
    /// whose threads panicked via [`RuntimeError::WorkerPanic`].
    pub fn quit(&self) -> Result<(), RuntimeError> {
        self.bus.publish(Event::now(EventKind::QuitRequested));
        self.gate.quit();
        self.pool.close();

        let joins: Vec<_> = {
            let mut joins = self
                .joins
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            joins.drain(..).collect()
        };
        let mut panicked = Vec::new();
        for (id, handle) in joins {
            if handle.join().is_err() {
                panicked.push(id);
            }
        }

        self.bus.close();
        let listeners: Vec<_> = {
            let mut listeners = self
                .listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            listeners.drain(..).collect()
        };
        for handle in listeners {
            let _ = handle.join();
        }

        if panicked.is_empty() {
            Ok(())
        } else {
            Err(RuntimeError::WorkerPanic { workers: panicked })
        }
    }

    /// Read-only snapshot of every worker's state, ordered by id.
    ///
    /// Atomic loads only: this never takes a lock a worker could hold,
    /// so a status display can never stall the simulation.
    pub fn snapshot_states(&self) -> Vec<(WorkerId, PhiloState)> {
        self.states
            .iter()
            .map(|(id, cell)| (*id, cell.load()))
            .collect()
    }

    /// Weight units currently in the pool (snapshot).
    pub fn available_weights(&self) -> usize {
        self.pool.available()
    }

    /// Total weight units the pool was created with.
    pub fn weight_capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Releases workers already parked on a startup barrier that can no
    /// longer complete, then joins everything spawned so far.
    fn teardown_partial(
        barrier: &StartBarrier,
        bus: &Bus,
        joins: Vec<(WorkerId, JoinHandle<()>)>,
        listeners: Vec<JoinHandle<()>>,
    ) {
        barrier.cancel();
        for (_, handle) in joins {
            let _ = handle.join();
        }
        bus.close();
        for handle in listeners {
            let _ = handle.join();
        }
    }
}

impl Drop for Supervisor {
    fn drop(&mut self) {
        let _ = self.quit();
    }
}
