//! # statecast
//!
//! **Statecast** is a typed, threadsafe value cell that is simultaneously a
//! publish/subscribe topic.
//!
//! It distributes state changes (config, schema, deployment state) to many
//! observers while keeping a current-value view for late joiners. The crate is
//! designed as a building block for higher-level runtimes and control planes.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  producer #1 │   │  producer #2 │   │  producer #3 │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ store / swap / compare_and_swap     │
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  EventSource<T>                                                   │
//! │  - writer lock (serializes cell write + publish)                  │
//! │  - cell: RwLock<T>   ◄──────────────── load() (any thread)        │
//! │  - Topic<T>                                                       │
//! └──────────────────────────────┬────────────────────────────────────┘
//!                                ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Topic<T>                                                         │
//! │  - subscriber table (SubscriptionId → Box<dyn Sink<T>>)           │
//! │  - open / closed flag                                             │
//! └───────┬──────────────────────┬──────────────────────┬─────────────┘
//!         ▼ offer(v)             ▼ offer(v)             ▼ offer(v)
//!    ┌──────────┐           ┌──────────┐           ┌──────────┐
//!    │ Mailbox  │           │ Mailbox  │           │ custom   │
//!    │ (bounded)│           │ (bounded)│           │ Sink     │
//!    └────┬─────┘           └────┬─────┘           └──────────┘
//!         ▼                      ▼
//!    consumer task          consumer task
//!    recv().await           try_recv()
//! ```
//!
//! ### Lifecycle
//! ```text
//! EventSource::new() ──► live ──── close() ────► closed
//!                          │                        │
//!   store/swap/cas ── Ok ──┤                        ├── store/swap/cas ── Err(Closed)
//!   load ─────────── Ok ───┘                        └── load ──────────── Ok (last value)
//!
//! Topic sinks:
//!   subscribe ──► attached ──┬── unsubscribe ──► end-of-stream (once)
//!                            └── close ────────► end-of-stream (once)
//! ```
//!
//! ## Features
//! | Area              | Description                                                     | Key types / traits               |
//! |-------------------|-----------------------------------------------------------------|----------------------------------|
//! | **Source**        | Atomic current value + change broadcast.                        | [`EventSource`]                  |
//! | **Topic**         | Fan-out to consumer-owned sinks, total publish order.           | [`Topic`], [`SubscriptionId`]    |
//! | **Sinks**         | Bounded consumer queues and the sink extension point.           | [`Sink`], [`Mailbox`], [`Offer`] |
//! | **Policies**      | What a full sink loses (oldest or newest).                      | [`OverflowPolicy`]               |
//! | **Errors**        | Typed errors for writes on closed components.                   | [`TopicError`], [`SourceError`]  |
//! | **Configuration** | Names and mailbox defaults.                                     | [`Config`]                       |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in `LogWriter` sink _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use statecast::{EventSource, Mailbox};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = EventSource::<u32>::new();
//!     source.store(1)?;
//!
//!     // Subscribe first, then load: no change can slip between the two.
//!     let mailbox = Mailbox::new(16);
//!     let (_id, current) = source.catch_up(mailbox.clone());
//!     assert_eq!(current, 1);
//!
//!     source.store(2)?;
//!     source.close();
//!
//!     assert_eq!(mailbox.recv().await, Some(2));
//!     assert_eq!(mailbox.recv().await, None); // end-of-stream
//!     assert_eq!(source.load(), 2);
//!     Ok(())
//! }
//! ```
mod config;
mod error;
mod policies;
mod sinks;
mod source;
mod topic;

// ---- Public re-exports ----

pub use config::Config;
pub use error::{SourceError, TopicError};
pub use policies::OverflowPolicy;
pub use sinks::{Mailbox, Offer, Sink, TryRecvError};
pub use source::EventSource;
pub use topic::{SubscriptionId, Topic};

// Optional: expose a simple built-in logging sink (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use sinks::LogWriter;
