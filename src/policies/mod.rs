//! Tunable policies applied to the worker state loop.

pub mod jitter;

pub use jitter::JitterPolicy;
