//! # Fan-out Example
//!
//! Shows one source feeding several consumers with different queue sizes and
//! overflow policies, and a consumer leaving early.
//!
//! Consumers:
//! - `fast`: large mailbox, drains continuously
//! - `slow`: tiny drop-oldest mailbox, drains late (keeps the newest values)
//! - `head`: tiny drop-newest mailbox, drains late (keeps the first values)
//! - `leaver`: unsubscribes halfway through
//!
//! ## Run
//! ```bash
//! cargo run --example fan_out
//! ```

use std::sync::Arc;

use futures::StreamExt;
use statecast::{EventSource, Mailbox, OverflowPolicy};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let source = Arc::new(EventSource::<u64>::new());

    let fast = Mailbox::new(1024);
    let slow = Mailbox::with_policy(4, OverflowPolicy::DropOldest);
    let head = Mailbox::with_policy(4, OverflowPolicy::DropNewest);
    let leaver = Mailbox::new(1024);

    source.subscribe(fast.clone());
    source.subscribe(slow.clone());
    source.subscribe(head.clone());
    let leaver_id = source.subscribe(leaver.clone());

    let fast_task = tokio::spawn(fast.clone().into_stream().collect::<Vec<_>>());

    for v in 1..=20 {
        source.store(v)?;
        if v == 10 {
            source.unsubscribe(leaver_id);
        }
        tokio::task::yield_now().await;
    }
    source.close();

    let fast_seen = fast_task.await?;
    let slow_seen: Vec<_> = slow.clone().into_stream().collect().await;
    let head_seen: Vec<_> = head.clone().into_stream().collect().await;
    let leaver_seen: Vec<_> = leaver.into_stream().collect().await;

    println!("Deliveries:");
    println!(" ├─► fast:   {fast_seen:?}");
    println!(" ├─► slow:   {slow_seen:?} (dropped {})", slow.dropped());
    println!(" ├─► head:   {head_seen:?} (dropped {})", head.dropped());
    println!(" └─► leaver: {leaver_seen:?}");
    Ok(())
}
