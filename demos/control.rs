//! # Interactive Control Example
//!
//! Drives a simulation from stdin, one command per line:
//!
//! - `b` — block: park every worker (prints when the rendezvous completes)
//! - `p` — proceed: resume parked workers
//! - `s` — print a status line
//! - `q` — quit and exit
//!
//! The status line shows one letter per worker (G = getting weights,
//! W = workout, P = putting weights back, R = rest, U = undefined) and
//! appends the free units in the gym pool.
//!
//! ## Run
//! ```bash
//! cargo run --example control
//! ```

use std::io::{self, BufRead};

use gymvisor::{Config, PhiloState, Supervisor};

fn state_letter(state: PhiloState) -> char {
    match state {
        PhiloState::GetWeights => 'G',
        PhiloState::Workout => 'W',
        PhiloState::ReturnWeights => 'P',
        PhiloState::Rest => 'R',
        PhiloState::Undefined => 'U',
    }
}

fn print_status(sup: &Supervisor) {
    let line: Vec<String> = sup
        .snapshot_states()
        .iter()
        .map(|(id, state)| format!("{id}:{}", state_letter(*state)))
        .collect();
    println!(
        "{} Gym: [{}/{}]",
        line.join(" "),
        sup.available_weights(),
        sup.weight_capacity()
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sup = Supervisor::start(Config::default(), Vec::new())?;
    println!("commands: b=block p=proceed s=status q=quit");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            "b" => {
                sup.block()?;
                println!(" ─► all workers parked");
                print_status(&sup);
            }
            "p" => {
                sup.proceed()?;
                println!(" ─► resumed");
            }
            "s" => print_status(&sup),
            "q" | "Q" => break,
            "" => {}
            other => println!("unknown command {other:?} (b/p/s/q)"),
        }
    }

    sup.quit()?;
    println!(" ─► all workers joined");
    Ok(())
}
