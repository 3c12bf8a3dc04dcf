//! # gymvisor
//!
//! **Gymvisor** simulates a fixed pool of philosopher workers sharing a
//! bounded set of gym weights, supervised by a pause/resume/quit control
//! surface. It is a small but real concurrency-coordination exercise:
//! every worker is one OS thread, and all coordination happens through
//! three sync primitives owned by the [`Supervisor`].
//!
//! ## Architecture
//! ```text
//!                 ┌────────────────────────────────────────────┐
//!                 │  Supervisor                                │
//!                 │  - StartBarrier (simultaneous release)     │
//!                 │  - WeightPool   (bounded weight units)     │
//!                 │  - ControlGate  (block / proceed / quit)   │
//!                 │  - Bus          (lifecycle events)         │
//!                 └──────┬──────────────┬──────────────┬───────┘
//!                        ▼              ▼              ▼
//!                 ┌────────────┐ ┌────────────┐ ┌────────────┐
//!                 │ WorkerActor│ │ WorkerActor│ │ WorkerActor│
//!                 │ (thread 0) │ │ (thread 1) │ │ (thread N) │
//!                 └──────┬─────┘ └──────┬─────┘ └──────┬─────┘
//!                        │              │              │
//!                        ▼              ▼              ▼
//!    loop {  GET_WEIGHTS ─► WORKOUT ─► RETURN_WEIGHTS ─► REST  }
//!              │                                          │
//!              └── pool.acquire() ◄──── pool (K units) ◄──┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! Supervisor::start(cfg, observers)
//!   ├─► spawn N worker threads
//!   ├─► every thread + supervisor arrive at the StartBarrier
//!   └─► simultaneous release; workers enter their state loop
//!
//! worker loop {
//!   ├─► checkpoint: Quit ─► exit, Block ─► park until proceed()/quit()
//!   ├─► GET_WEIGHTS: acquire one unit (interruptible by block()/quit())
//!   ├─► WORKOUT: fixed duration, quit polled per tick
//!   ├─► RETURN_WEIGHTS: release the unit
//!   └─► REST: fixed duration (optional jitter), quit polled per tick
//! }
//!
//! Supervisor::block()   ─► returns once every worker is parked (rendezvous)
//! Supervisor::proceed() ─► wakes all parked workers
//! Supervisor::quit()    ─► terminal; joins every worker thread
//! ```
//!
//! ## Guarantees
//! - At most `capacity` workers hold a weight unit at any instant.
//! - No worker leaves the `Undefined` state before the startup barrier
//!   releases.
//! - [`Supervisor::block`] is a strict rendezvous: it returns only after
//!   every live worker is parked at a safe checkpoint, never while one
//!   holds a unit.
//! - [`Supervisor::quit`] always completes, even against workers blocked
//!   inside `acquire`, and leaks no weight units.
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use gymvisor::{Config, PhiloState, Supervisor};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut cfg = Config::default();
//!     cfg.workers = 3;
//!     cfg.capacity = 2;
//!     cfg.workout = Duration::from_millis(20);
//!     cfg.rest = Duration::from_millis(20);
//!
//!     let sup = Supervisor::start(cfg, Vec::new())?;
//!
//!     let snapshot = sup.snapshot_states();
//!     assert_eq!(snapshot.len(), 3);
//!
//!     sup.block()?;
//!     assert!(sup
//!         .snapshot_states()
//!         .iter()
//!         .all(|(_, s)| *s != PhiloState::Workout));
//!     sup.proceed()?;
//!
//!     sup.quit()?;
//!     Ok(())
//! }
//! ```

pub mod bus;
pub mod config;
pub mod control;
pub mod error;
pub mod event;
pub mod observers;
pub mod policies;
pub mod state;
pub mod supervisor;
pub mod sync;

mod worker;

pub use bus::Bus;
pub use config::Config;
pub use control::{Command, ControlGate};
pub use error::{RuntimeError, SpawnError};
pub use event::{Event, EventKind};
pub use observers::Observer;
pub use policies::JitterPolicy;
pub use state::{PhiloState, WorkerId};
pub use supervisor::Supervisor;
pub use sync::{BarrierWait, Interrupt, StartBarrier, WeightPermit, WeightPool};

#[cfg(feature = "logging")]
pub use observers::LogWriter;
