//! Worker identity and observable state.
//!
//! A worker's state is written only by its owning thread and read by the
//! supervisor's snapshot accessor, so it lives in a [`StateCell`] (a thin
//! atomic wrapper) rather than behind a lock. Display mapping (state names,
//! single-letter tables) deliberately stays out of the core; consumers map
//! [`PhiloState`] variants themselves.

use std::sync::atomic::{AtomicU8, Ordering};

/// Stable integer identity of a worker, assigned at spawn time.
pub type WorkerId = usize;

/// The five observable states of a philosopher worker.
///
/// `Undefined` is only ever observed before the worker's first transition,
/// i.e. before the startup barrier has released.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhiloState {
    /// Waiting for (or in the middle of) acquiring a weight unit.
    GetWeights = 0,
    /// Holding a weight unit and working out.
    Workout = 1,
    /// Returning the weight unit to the pool.
    ReturnWeights = 2,
    /// Resting before the next cycle.
    Rest = 3,
    /// Not yet started; never re-entered after the first transition.
    Undefined = 4,
}

impl PhiloState {
    fn from_u8(v: u8) -> PhiloState {
        match v {
            0 => PhiloState::GetWeights,
            1 => PhiloState::Workout,
            2 => PhiloState::ReturnWeights,
            3 => PhiloState::Rest,
            _ => PhiloState::Undefined,
        }
    }
}

/// Data-race-free holder for a worker's current [`PhiloState`].
///
/// Written only by the owning worker thread; read by anyone.
#[derive(Debug)]
pub(crate) struct StateCell(AtomicU8);

impl StateCell {
    pub(crate) fn new() -> Self {
        StateCell(AtomicU8::new(PhiloState::Undefined as u8))
    }

    pub(crate) fn store(&self, state: PhiloState) {
        self.0.store(state as u8, Ordering::Release);
    }

    pub(crate) fn load(&self) -> PhiloState {
        PhiloState::from_u8(self.0.load(Ordering::Acquire))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_starts_undefined() {
        let cell = StateCell::new();
        assert_eq!(cell.load(), PhiloState::Undefined);
    }

    #[test]
    fn test_cell_round_trips_every_state() {
        let cell = StateCell::new();
        for state in [
            PhiloState::GetWeights,
            PhiloState::Workout,
            PhiloState::ReturnWeights,
            PhiloState::Rest,
            PhiloState::Undefined,
        ] {
            cell.store(state);
            assert_eq!(cell.load(), state);
        }
    }
}
