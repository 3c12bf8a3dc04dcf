//! Synchronization primitives: the startup barrier and the weight pool.

pub mod barrier;
pub mod pool;

pub use barrier::{BarrierWait, StartBarrier};
pub use pool::{Interrupt, WeightPermit, WeightPool};
