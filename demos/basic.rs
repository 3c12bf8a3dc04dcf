//! # Basic Run Example
//!
//! Starts a default simulation with the built-in `LogWriter` observer,
//! lets it churn for a few seconds, pauses it once, then shuts down.
//!
//! ## Run
//! ```bash
//! cargo run --example basic --features logging
//! ```

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use gymvisor::{Config, LogWriter, Observer, Supervisor};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut cfg = Config::default();
    cfg.workers = 4;
    cfg.capacity = 2;

    let observers: Vec<Arc<dyn Observer>> = vec![Arc::new(LogWriter)];
    let sup = Supervisor::start(cfg, observers)?;
    thread::sleep(Duration::from_secs(3));

    println!(" ─► Pausing...");
    sup.block()?;
    println!(" ─► All workers parked: {:?}", sup.snapshot_states());
    thread::sleep(Duration::from_secs(1));

    println!(" ─► Resuming...");
    sup.proceed()?;
    thread::sleep(Duration::from_secs(2));

    println!(" ─► Shutting down...");
    sup.quit()?;
    Ok(())
}
