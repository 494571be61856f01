//! # LogWriter Example
//!
//! Attaches the built-in `LogWriter` sink and prints every change through `tracing`.
//!
//! ## Run
//! ```bash
//! cargo run --example log_writer --features logging
//! ```

use statecast::{EventSource, LogWriter};

#[derive(Clone, Debug, Default, PartialEq)]
enum Phase {
    #[default]
    Pending,
    Deploying { replicas: u32 },
    Ready,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_target(false).init();

    let source = EventSource::<Phase>::new();
    source.subscribe(LogWriter::new("deployment"));

    source.store(Phase::Deploying { replicas: 1 })?;
    source.store(Phase::Deploying { replicas: 3 })?;
    source.compare_and_swap(&Phase::Deploying { replicas: 3 }, Phase::Ready)?;
    source.close();
    Ok(())
}
