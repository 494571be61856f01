//! # Catch-up Example
//!
//! Shows the subscribe-then-load pattern: a watcher joins after the source
//! already holds a value, reads it, then follows every later change.
//!
//! The watcher runs until either:
//! - the source is closed (end-of-stream), or
//! - its cancellation token fires.
//!
//! ## Run
//! ```bash
//! cargo run --example catch_up
//! ```

use std::{sync::Arc, time::Duration};

use statecast::{Config, EventSource};
use tokio_util::sync::CancellationToken;

#[derive(Clone, Debug, Default, PartialEq)]
struct RuntimeConfig {
    revision: u32,
    min_replicas: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let source = Arc::new(EventSource::with_config(
        RuntimeConfig::default(),
        Config::named("runtime-config"),
    ));
    source.store(RuntimeConfig {
        revision: 1,
        min_replicas: 1,
    })?;

    let token = CancellationToken::new();
    let mailbox = source.mailbox();
    let (id, current) = source.catch_up(mailbox.clone());
    println!("[watcher] {id} caught up at {current:?}");

    let watcher = {
        let token = token.clone();
        tokio::spawn(async move {
            let mut seen = 0u32;
            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        println!("[watcher] cancelled");
                        break;
                    }
                    next = mailbox.recv() => match next {
                        Some(cfg) => {
                            seen += 1;
                            println!("[watcher] change: {cfg:?}");
                        }
                        None => {
                            println!("[watcher] end-of-stream");
                            break;
                        }
                    }
                }
            }
            seen
        })
    };

    for revision in 2..=4 {
        tokio::time::sleep(Duration::from_millis(50)).await;
        source.store(RuntimeConfig {
            revision,
            min_replicas: revision,
        })?;
    }

    let prev = source.swap(RuntimeConfig {
        revision: 5,
        min_replicas: 2,
    })?;
    println!("[producer] swapped out {prev:?}");

    let expected = source.load();
    let won = source.compare_and_swap(
        &expected,
        RuntimeConfig {
            revision: 6,
            ..expected.clone()
        },
    )?;
    println!("[producer] compare_and_swap won={won}");

    source.close();
    let seen = watcher.await?;
    println!();
    println!("Summary:");
    println!(" ├─► Changes seen: {seen}");
    println!(" ├─► Published:    {}", source.published());
    println!(" └─► Final value:  {:?}", source.load());
    Ok(())
}
