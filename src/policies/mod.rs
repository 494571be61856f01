//! Delivery policies.
//!
//! This module groups the knobs that control **what a slow sink loses** when it
//! cannot keep up with the publisher.
//!
//! ## Contents
//! - [`OverflowPolicy`] what a full sink does with a new value (drop oldest / drop newest)
//!
//! ## Quick wiring
//! ```text
//! Config { overflow: OverflowPolicy, mailbox_capacity }
//!      └─► Mailbox::from_config uses:
//!           - mailbox_capacity to bound the queue
//!           - overflow to decide evict-vs-reject on a full queue
//! ```
//!
//! ## Defaults
//! - `OverflowPolicy::DropOldest` (latest values win).

mod overflow;

pub use overflow::OverflowPolicy;
