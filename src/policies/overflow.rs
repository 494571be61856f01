//! # Overflow policies for bounded sinks.
//!
//! [`OverflowPolicy`] decides what a full [`Mailbox`](crate::Mailbox) does with a newly
//! published value. It is chosen by the consumer, per sink; the publisher is never blocked.
//!
//! - [`OverflowPolicy::DropOldest`] evicts the oldest undelivered value, then enqueues (default).
//! - [`OverflowPolicy::DropNewest`] discards the incoming value for that sink only.
//!
//! ## Choosing the right policy
//!
//! **State followers** (only the latest values matter):
//! ```text
//! OverflowPolicy::DropOldest   → queue always holds the newest `capacity` values
//! ```
//!
//! **Prefix consumers** (gap at the tail is acceptable, order of the head is not):
//! ```text
//! OverflowPolicy::DropNewest   → queue keeps the values it already has
//! ```
//!
//! Either way a gap is silent to the publisher and visible to the consumer through
//! [`Mailbox::dropped`](crate::Mailbox::dropped). Consumers that cannot tolerate gaps must size
//! their mailbox generously or consume promptly.

/// Policy applied by a bounded sink when it is offered a value while full.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Evict the oldest queued value and enqueue the new one (default).
    #[default]
    DropOldest,
    /// Keep the queue as is and discard the new value.
    DropNewest,
}

impl OverflowPolicy {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            OverflowPolicy::DropOldest => "drop_oldest",
            OverflowPolicy::DropNewest => "drop_newest",
        }
    }
}
