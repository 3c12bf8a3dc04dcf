//! # Observer: user-facing event handlers
//!
//! The [`Observer`] trait is the main **extension point** for end users.
//! All runtime [`Event`]s flow through the bus and into observers.
//!
//! Implementing your own observer allows you to plug in:
//! - a status display over [`snapshot_states`](crate::Supervisor::snapshot_states);
//! - metrics export;
//! - structured logging.
//!
//! # High-level architecture:
//! ```text
//! Event flow:
//!   WorkerActor ── publish(Event) ──► Bus ──► listener thread (one per observer)
//!                                                └─► Observer::on_event(&Event)
//! ```
//!
//! Each observer gets its own bounded queue and listener thread, so a slow
//! observer delays only itself — workers publish without blocking and a
//! full queue drops events for that observer alone.
//!
//! #### Note:
//! A simple [`LogWriter`](crate::LogWriter) is available (enabled via the
//! `logging` feature), useful for debug and testing.
//!
//! # Example: custom observer
//! ```no_run
//! use gymvisor::{Observer, Event, EventKind};
//!
//! struct ParkCounter;
//!
//! impl Observer for ParkCounter {
//!     fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::WorkerParked {
//!             println!("[parked] worker={:?}", event.worker);
//!         }
//!     }
//! }
//! ```

use crate::event::Event;

/// # Trait for receiving runtime events from the bus.
///
/// Called on a dedicated listener thread, never on a worker thread.
/// Observers read event snapshots only; nothing they do can influence
/// synchronization.
pub trait Observer: Send + Sync {
    /// Called for every emitted [`Event`] (minus any dropped on overflow).
    fn on_event(&self, event: &Event);
}
