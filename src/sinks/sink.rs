//! # Core sink trait
//!
//! `Sink` is the extension point through which consumers attach to a
//! [`Topic`](crate::Topic). The consumer owns the sink and chooses its capacity and
//! overflow tolerance; the topic only holds a shared reference while subscribed.
//!
//! ## Contract
//! - [`Sink::offer`] is a **non-blocking** try-enqueue. It is called with the topic lock
//!   held, so it must never wait for consumer progress.
//! - [`Sink::close`] is the end-of-stream signal. The topic calls it **at most once per
//!   subscription**: on unsubscribe, on topic close, or when subscribing to a closed topic.
//! - Values offered to one sink arrive in publish order.
//!
//! ## Example (skeleton)
//! ```rust
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use statecast::{Offer, Sink};
//!
//! #[derive(Default)]
//! struct Counter(AtomicU64);
//!
//! impl Sink<u64> for Counter {
//!     fn offer(&self, _value: u64) -> Offer {
//!         self.0.fetch_add(1, Ordering::Relaxed);
//!         Offer::Accepted
//!     }
//!     fn close(&self) {}
//!     fn name(&self) -> &'static str { "counter" }
//! }
//! ```

/// Outcome of offering one value to a sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Offer {
    /// The value was enqueued.
    Accepted,
    /// The sink was full: the oldest queued value was evicted and the value enqueued.
    Evicted,
    /// The sink was full: the value was discarded.
    Rejected,
    /// The sink already signaled end-of-stream; the topic detaches it.
    Closed,
}

impl Offer {
    /// Returns true if the offered value ended up in the sink.
    #[inline]
    pub fn is_delivered(&self) -> bool {
        matches!(self, Offer::Accepted | Offer::Evicted)
    }

    /// Returns true if the sink lost a value (evicted or rejected).
    #[inline]
    pub fn is_overflow(&self) -> bool {
        matches!(self, Offer::Evicted | Offer::Rejected)
    }
}

/// Contract for consumer-supplied sinks.
///
/// Implementations are shared between the consumer and the topic, hence `Send + Sync`.
pub trait Sink<T>: Send + Sync + 'static {
    /// Attempts to enqueue `value` without blocking.
    ///
    /// Runs with the topic lock held (and, for an [`EventSource`](crate::EventSource), its
    /// writer lock). Neither is reentrant: calling back into the same topic or source from
    /// here (`publish`, `store`, `subscribe`, `unsubscribe`, `close`, `subscriber_count`,
    /// `is_closed`, `Debug`) deadlocks. Only [`EventSource::load`](crate::EventSource::load)
    /// is safe.
    fn offer(&self, value: T) -> Offer;

    /// Signals end-of-stream. No further values are offered after this call.
    fn close(&self);

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<T, S> Sink<T> for std::sync::Arc<S>
where
    S: Sink<T> + ?Sized,
{
    fn offer(&self, value: T) -> Offer {
        (**self).offer(value)
    }

    fn close(&self) {
        (**self).close()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
