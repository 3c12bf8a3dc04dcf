use crate::event::{Event, EventKind};
use crate::observers::Observer;

/// Base observer that logs events to stdout.
///
/// Enabled via the `logging` feature. Useful for demos and debugging.
pub struct LogWriter;

impl Observer for LogWriter {
    fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::WorkerRegistered => {
                println!("[registered] worker={:?}", e.worker);
            }
            EventKind::SimulationStarted => {
                println!("[started]");
            }
            EventKind::WeightsAcquired => {
                println!(
                    "[acquired] worker={:?} available={:?}",
                    e.worker, e.available
                );
            }
            EventKind::WeightsReturned => {
                println!(
                    "[returned] worker={:?} available={:?}",
                    e.worker, e.available
                );
            }
            EventKind::WorkerParked => {
                println!("[parked] worker={:?} state={:?}", e.worker, e.state);
            }
            EventKind::WorkerResumed => {
                println!("[resumed] worker={:?} state={:?}", e.worker, e.state);
            }
            EventKind::WorkerStopped => {
                println!("[stopped] worker={:?}", e.worker);
            }
            EventKind::PauseRequested => {
                println!("[pause-requested]");
            }
            EventKind::PauseReached => {
                println!("[pause-reached]");
            }
            EventKind::ResumeRequested => {
                println!("[resume-requested]");
            }
            EventKind::QuitRequested => {
                println!("[quit-requested]");
            }
        }
    }
}
