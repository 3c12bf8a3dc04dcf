//! Observer API for consuming runtime events off the worker threads.

mod observer;

#[cfg(feature = "logging")]
mod log;

pub use observer::Observer;

#[cfg(feature = "logging")]
pub use log::LogWriter;
