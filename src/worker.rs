//! Worker actor: one philosopher, one OS thread, one state machine.
//!
//! ```text
//! UNDEFINED ──(barrier releases)──► GET_WEIGHTS
//! GET_WEIGHTS ──(acquire succeeds)──► WORKOUT
//! WORKOUT ──(duration elapses)──► RETURN_WEIGHTS
//! RETURN_WEIGHTS ──(release)──► REST
//! REST ──(duration elapses)──► GET_WEIGHTS
//! any state ──(Quit at checkpoint)──► thread exits
//! ```
//!
//! Checkpoint discipline: the gate is read at the top of every cycle, once
//! immediately before `acquire`, and again on entering REST. A pause is
//! honored only at those points and never while the worker holds a weight
//! unit. Inside workout/rest only Quit is polled, once per tick, which
//! bounds termination latency without making the simulated work
//! interruptible.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::bus::Bus;
use crate::control::{Command, ControlGate, Parked};
use crate::event::{Event, EventKind};
use crate::policies::JitterPolicy;
use crate::state::{PhiloState, StateCell, WorkerId};
use crate::sync::{BarrierWait, Interrupt, StartBarrier, WeightPool};

/// Timing knobs handed to each worker, derived from the config.
#[derive(Clone, Copy)]
pub(crate) struct Timing {
    pub(crate) workout: Duration,
    pub(crate) rest: Duration,
    pub(crate) tick: Duration,
    pub(crate) rest_jitter: JitterPolicy,
}

/// Whether the state loop keeps running after a checkpoint.
#[derive(PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Outcome of a timed idle phase.
#[derive(PartialEq, Eq)]
enum Idle {
    Elapsed,
    Quit,
}

pub(crate) struct WorkerActor {
    pub(crate) id: WorkerId,
    pub(crate) state: Arc<StateCell>,
    pub(crate) gate: Arc<ControlGate>,
    pub(crate) pool: Arc<WeightPool>,
    pub(crate) barrier: Arc<StartBarrier>,
    pub(crate) bus: Bus,
    pub(crate) timing: Timing,
}

impl WorkerActor {
    /// Thread body. Consumes the actor; runs until Quit or a cancelled
    /// startup.
    pub(crate) fn run(self) {
        self.emit(EventKind::WorkerRegistered);
        if self.barrier.wait() == BarrierWait::Canceled {
            self.finish();
            return;
        }

        'cycle: loop {
            if self.checkpoint() == Flow::Stop {
                break;
            }

            self.state.store(PhiloState::GetWeights);
            let permit = loop {
                match self.pool.acquire(&self.gate) {
                    Ok(permit) => break permit,
                    Err(Interrupt::Quit) => break 'cycle,
                    Err(Interrupt::Pause) => {
                        if self.pause_here() == Flow::Stop {
                            break 'cycle;
                        }
                    }
                }
            };
            self.bus.publish(
                Event::now(EventKind::WeightsAcquired)
                    .with_worker(self.id)
                    .with_available(self.pool.available()),
            );

            self.state.store(PhiloState::Workout);
            if self.idle(self.timing.workout) == Idle::Quit {
                // Quit observed mid-workout: the permit must still go back.
                drop(permit);
                break;
            }

            self.state.store(PhiloState::ReturnWeights);
            permit.release();
            self.bus.publish(
                Event::now(EventKind::WeightsReturned)
                    .with_worker(self.id)
                    .with_available(self.pool.available()),
            );

            if self.checkpoint() == Flow::Stop {
                break;
            }
            self.state.store(PhiloState::Rest);
            let rest = self.timing.rest_jitter.apply(self.timing.rest);
            if self.idle(rest) == Idle::Quit {
                break;
            }
        }

        self.finish();
    }

    /// Reads the gate at a safe point (no unit held): exits on Quit,
    /// parks on Block.
    fn checkpoint(&self) -> Flow {
        match self.gate.command() {
            Command::Quit => Flow::Stop,
            Command::Block => self.pause_here(),
            Command::Normal => Flow::Continue,
        }
    }

    /// Parks at the gate and reports how the pause ended.
    fn pause_here(&self) -> Flow {
        self.bus.publish(
            Event::now(EventKind::WorkerParked)
                .with_worker(self.id)
                .with_state(self.state.load()),
        );
        match self.gate.park() {
            Parked::Quit => Flow::Stop,
            Parked::Resumed => {
                self.bus.publish(
                    Event::now(EventKind::WorkerResumed)
                        .with_worker(self.id)
                        .with_state(self.state.load()),
                );
                Flow::Continue
            }
        }
    }

    /// Sleeps for `total` in tick-sized slices, polling only for Quit.
    fn idle(&self, total: Duration) -> Idle {
        let deadline = Instant::now() + total;
        loop {
            if self.gate.command() == Command::Quit {
                return Idle::Quit;
            }
            let now = Instant::now();
            if now >= deadline {
                return Idle::Elapsed;
            }
            thread::sleep(self.timing.tick.min(deadline - now));
        }
    }

    fn finish(&self) {
        self.gate.worker_exited();
        self.emit(EventKind::WorkerStopped);
    }

    fn emit(&self, kind: EventKind) {
        self.bus.publish(Event::now(kind).with_worker(self.id));
    }
}
