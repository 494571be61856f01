//! # Bounded consumer queue.
//!
//! [`Mailbox`] is the built-in [`Sink`]: a bounded FIFO owned by one consumer, filled by
//! the topic without ever blocking the publisher.
//!
//! ## Architecture
//! ```text
//! Topic::publish(v)
//!     │ offer(v)             (non-blocking, under the topic lock)
//!     ▼
//! ┌───────────────────────────────┐
//! │ Mailbox                       │
//! │  VecDeque<T> (≤ capacity)     │──► full? ─► OverflowPolicy (evict oldest / reject new)
//! │  closed flag                  │
//! └──────────────┬────────────────┘
//!                │ Notify
//!                ▼
//!   consumer: recv().await / try_recv() / into_stream()
//! ```
//!
//! ## Rules
//! - **Per-sink FIFO**: values come out in the order they were offered.
//! - **Non-blocking offer**: a full mailbox applies its [`OverflowPolicy`]; losses are counted
//!   in [`Mailbox::dropped`].
//! - **End-of-stream**: after [`Mailbox::close`], buffered values are still drained, then
//!   `recv` yields `None` and `try_recv` yields [`TryRecvError::Closed`].
//! - **Cloneable**: clones share the same queue (consumer keeps one, the topic holds one).

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::Stream;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::config::Config;
use crate::policies::OverflowPolicy;
use crate::sinks::sink::{Offer, Sink};

/// Error returned by [`Mailbox::try_recv`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TryRecvError {
    /// Nothing buffered right now; more values may arrive.
    Empty,
    /// The mailbox is drained and end-of-stream was signaled.
    Closed,
}

struct State<T> {
    queue: VecDeque<T>,
    closed: bool,
}

struct Shared<T> {
    state: Mutex<State<T>>,
    notify: Notify,
    dropped: AtomicU64,
    capacity: usize,
    policy: OverflowPolicy,
}

/// Bounded, ordered, consumer-owned sink.
///
/// ### Properties
/// - **Bounded**: holds at most `capacity` values (min 1, clamped).
/// - **Lossy under overflow**: never blocks the producer; see [`OverflowPolicy`].
/// - **Cloneable**: cheap to clone (internally `Arc`-backed).
pub struct Mailbox<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Mailbox<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> Mailbox<T> {
    /// Creates a mailbox with the given capacity and [`OverflowPolicy::DropOldest`].
    ///
    /// The minimum capacity is 1 (clamped).
    pub fn new(capacity: usize) -> Self {
        Self::with_policy(capacity, OverflowPolicy::DropOldest)
    }

    /// Creates a mailbox with the given capacity and overflow policy.
    pub fn with_policy(capacity: usize, policy: OverflowPolicy) -> Self {
        let capacity = capacity.max(1);
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    queue: VecDeque::with_capacity(capacity.min(1024)),
                    closed: false,
                }),
                notify: Notify::new(),
                dropped: AtomicU64::new(0),
                capacity,
                policy,
            }),
        }
    }

    /// Creates a mailbox sized and configured by `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::with_policy(config.mailbox_capacity_clamped(), config.overflow)
    }

    /// Enqueues `value`, applying the overflow policy when full.
    pub fn offer(&self, value: T) -> Offer {
        let outcome = {
            let mut state = self.shared.state.lock();
            if state.closed {
                return Offer::Closed;
            }
            if state.queue.len() < self.shared.capacity {
                state.queue.push_back(value);
                Offer::Accepted
            } else {
                self.shared.dropped.fetch_add(1, Ordering::Relaxed);
                match self.shared.policy {
                    OverflowPolicy::DropOldest => {
                        state.queue.pop_front();
                        state.queue.push_back(value);
                        Offer::Evicted
                    }
                    OverflowPolicy::DropNewest => Offer::Rejected,
                }
            }
        };
        if outcome.is_delivered() {
            self.shared.notify.notify_one();
        }
        outcome
    }

    /// Signals end-of-stream and wakes every pending receiver.
    ///
    /// Returns `true` only for the call that actually closed the mailbox.
    pub fn close(&self) -> bool {
        {
            let mut state = self.shared.state.lock();
            if state.closed {
                return false;
            }
            state.closed = true;
        }
        self.shared.notify.notify_waiters();
        true
    }

    /// Takes the oldest buffered value without waiting.
    pub fn try_recv(&self) -> Result<T, TryRecvError> {
        let mut state = self.shared.state.lock();
        match state.queue.pop_front() {
            Some(value) => Ok(value),
            None if state.closed => Err(TryRecvError::Closed),
            None => Err(TryRecvError::Empty),
        }
    }

    /// Waits for the next value.
    ///
    /// Returns `None` once the mailbox is closed **and** drained (end-of-stream).
    /// Cancel-safe: dropping the future never loses a value.
    pub async fn recv(&self) -> Option<T> {
        loop {
            let notified = self.shared.notify.notified();
            let mut notified = std::pin::pin!(notified);
            // Register before checking so a concurrent offer/close cannot slip through.
            notified.as_mut().enable();

            match self.try_recv() {
                Ok(value) => return Some(value),
                Err(TryRecvError::Closed) => return None,
                Err(TryRecvError::Empty) => notified.await,
            }
        }
    }

    /// Converts the mailbox into a stream that ends at end-of-stream.
    pub fn into_stream(self) -> impl Stream<Item = T> {
        futures::stream::unfold(self, |mailbox| async move {
            let value = mailbox.recv().await?;
            Some((value, mailbox))
        })
    }

    /// Number of values lost to overflow (evicted or rejected).
    pub fn dropped(&self) -> u64 {
        self.shared.dropped.load(Ordering::Relaxed)
    }

    /// Number of values currently buffered.
    pub fn len(&self) -> usize {
        self.shared.state.lock().queue.len()
    }

    /// Returns true if nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true once end-of-stream was signaled (values may still be buffered).
    pub fn is_closed(&self) -> bool {
        self.shared.state.lock().closed
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    #[inline]
    pub fn policy(&self) -> OverflowPolicy {
        self.shared.policy
    }
}

impl<T: Send + 'static> Sink<T> for Mailbox<T> {
    fn offer(&self, value: T) -> Offer {
        Mailbox::offer(self, value)
    }

    fn close(&self) {
        Mailbox::close(self);
    }

    fn name(&self) -> &'static str {
        "mailbox"
    }
}

impl<T> fmt::Debug for Mailbox<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("Mailbox")
            .field("len", &state.queue.len())
            .field("capacity", &self.shared.capacity)
            .field("policy", &self.shared.policy)
            .field("closed", &state.closed)
            .field("dropped", &self.dropped())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::time::Duration;

    #[test]
    fn test_fifo_order() {
        let mb = Mailbox::new(4);
        for v in 1..=3 {
            assert_eq!(mb.offer(v), Offer::Accepted);
        }
        assert_eq!(mb.try_recv(), Ok(1));
        assert_eq!(mb.try_recv(), Ok(2));
        assert_eq!(mb.try_recv(), Ok(3));
        assert_eq!(mb.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mb = Mailbox::<u8>::new(0);
        assert_eq!(mb.capacity(), 1);
    }

    #[test]
    fn test_drop_oldest_evicts_head() {
        let mb = Mailbox::new(2);
        assert_eq!(mb.offer(1), Offer::Accepted);
        assert_eq!(mb.offer(2), Offer::Accepted);
        assert_eq!(mb.offer(3), Offer::Evicted);
        assert_eq!(mb.offer(4), Offer::Evicted);

        assert_eq!(mb.dropped(), 2);
        assert_eq!(mb.try_recv(), Ok(3));
        assert_eq!(mb.try_recv(), Ok(4));
    }

    #[test]
    fn test_drop_newest_keeps_head() {
        let mb = Mailbox::with_policy(2, OverflowPolicy::DropNewest);
        mb.offer(1);
        mb.offer(2);
        assert_eq!(mb.offer(3), Offer::Rejected);

        assert_eq!(mb.dropped(), 1);
        assert_eq!(mb.try_recv(), Ok(1));
        assert_eq!(mb.try_recv(), Ok(2));
        assert_eq!(mb.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn test_close_drains_then_ends() {
        let mb = Mailbox::new(4);
        mb.offer("a");
        assert!(mb.close());
        assert!(!mb.close());

        assert_eq!(mb.offer("b"), Offer::Closed);
        assert_eq!(mb.try_recv(), Ok("a"));
        assert_eq!(mb.try_recv(), Err(TryRecvError::Closed));
    }

    #[test]
    fn test_from_config() {
        let cfg = Config {
            mailbox_capacity: 7,
            overflow: OverflowPolicy::DropNewest,
            ..Config::default()
        };
        let mb = Mailbox::<u32>::from_config(&cfg);
        assert_eq!(mb.capacity(), 7);
        assert_eq!(mb.policy(), OverflowPolicy::DropNewest);
    }

    #[tokio::test]
    async fn test_recv_wakes_on_offer() {
        let mb = Mailbox::new(1);
        let producer = mb.clone();

        let handle = tokio::spawn(async move { mb.recv().await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        producer.offer(42);

        assert_eq!(handle.await.unwrap(), Some(42));
    }

    #[tokio::test]
    async fn test_recv_wakes_on_close() {
        let mb = Mailbox::<u32>::new(1);
        let a = mb.clone();
        let b = mb.clone();

        let ha = tokio::spawn(async move { a.recv().await });
        let hb = tokio::spawn(async move { b.recv().await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        mb.close();

        assert_eq!(ha.await.unwrap(), None);
        assert_eq!(hb.await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_into_stream_ends_at_end_of_stream() {
        let mb = Mailbox::new(8);
        for v in 0..5 {
            mb.offer(v);
        }
        mb.close();

        let got: Vec<_> = mb.into_stream().collect().await;
        assert_eq!(got, vec![0, 1, 2, 3, 4]);
    }
}
