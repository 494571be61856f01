//! # In-process broadcast topic.
//!
//! [`Topic`] delivers every published value to each sink attached at the moment of the
//! publish, and manages the subscriber lifecycle (attach, detach, end-of-stream).
//!
//! ## Architecture
//! ```text
//! Publishers (many):                   Sinks (consumer-owned):
//!   producer 1 ──┐                   ┌──► [sink 1] ──► consumer 1
//!   producer 2 ──┼──► Topic (lock) ──┼──► [sink 2] ──► consumer 2
//!   producer N ──┘                   └──► [sink N] ──► consumer N
//! ```
//!
//! ## Rules
//! - **Total order**: publishes serialize on the topic lock; every sink sees them in that order.
//! - **Non-blocking publish**: each sink gets a `try`-style [`Sink::offer`]; a full sink applies
//!   its own overflow policy and the publisher moves on.
//! - **No replay**: a sink attached after a publish never sees that value.
//! - **End-of-stream once**: each subscription is closed exactly once, by `unsubscribe`,
//!   by `close`, or immediately when subscribing to a closed topic.
//! - **Terminal close**: after [`Topic::close`], `publish` fails with [`TopicError::Closed`].

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::TopicError;
use crate::sinks::{Mailbox, Offer, Sink};
use crate::topic::subscription::SubscriptionId;

/// Subscriber table and lifecycle flag, guarded by one lock.
struct State<T: 'static> {
    sinks: HashMap<SubscriptionId, Box<dyn Sink<T>>>,
    closed: bool,
}

/// Broadcast channel with consumer-owned sinks.
///
/// ### Properties
/// - **Threadsafe**: share it behind an `Arc` (or embed it) and call from any thread.
/// - **Synchronous**: no method awaits; `publish` holds the lock only for non-blocking offers.
/// - **Closes on drop**: dropping an open topic end-of-streams every attached sink.
pub struct Topic<T: 'static> {
    config: Config,
    state: Mutex<State<T>>,
    next_id: AtomicU64,
    published: AtomicU64,
}

impl<T: 'static> Topic<T> {
    /// Creates an open topic with the default [`Config`].
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an open topic with the given config.
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            state: Mutex::new(State {
                sinks: HashMap::new(),
                closed: false,
            }),
            next_id: AtomicU64::new(1),
            published: AtomicU64::new(0),
        }
    }

    /// Creates an open topic labelled `name` in logs.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self::with_config(Config::named(name))
    }

    /// Detaches a subscription and signals end-of-stream on its sink.
    ///
    /// Idempotent: unknown or already-detached handles are a no-op returning `false`.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let sink = self.state.lock().sinks.remove(&id);
        match sink {
            Some(sink) => {
                sink.close();
                debug!(topic = %self.config.name, subscription = %id, sink = sink.name(), "unsubscribed");
                true
            }
            None => false,
        }
    }

    /// Closes the topic and signals end-of-stream on every attached sink.
    ///
    /// Returns `true` for the call that performed the open→closed transition;
    /// later calls are no-ops returning `false`.
    pub fn close(&self) -> bool {
        let sinks = {
            let mut state = self.state.lock();
            if state.closed {
                return false;
            }
            state.closed = true;
            std::mem::take(&mut state.sinks)
        };

        let count = sinks.len();
        for sink in sinks.into_values() {
            sink.close();
        }
        debug!(topic = %self.config.name, subscribers = count, "topic closed");
        true
    }

    /// Returns true once the topic has been closed.
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Number of currently attached sinks.
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().sinks.len()
    }

    /// Number of publishes accepted so far.
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Acquire)
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<T: Send + 'static> Topic<T> {
    /// Attaches a consumer-supplied sink and returns its handle.
    ///
    /// On a closed topic the sink is end-of-streamed immediately and never attached
    /// (no error). A subscribe racing with a publish may or may not see that publish;
    /// it sees every later one.
    pub fn subscribe(&self, sink: impl Sink<T>) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut state = self.state.lock();
        if state.closed {
            drop(state);
            sink.close();
            debug!(topic = %self.config.name, subscription = %id, sink = sink.name(), "subscribed to closed topic");
            return id;
        }
        debug!(topic = %self.config.name, subscription = %id, sink = sink.name(), "subscribed");
        state.sinks.insert(id, Box::new(sink));
        id
    }

    /// Creates a [`Mailbox`] sized by this topic's config (not yet subscribed).
    pub fn mailbox(&self) -> Mailbox<T> {
        Mailbox::from_config(&self.config)
    }
}

impl<T: Clone + Send + 'static> Topic<T> {
    /// Offers `value` to every attached sink, in the global publish order.
    ///
    /// Never waits on consumers: full sinks apply their overflow policy. Sinks that
    /// report [`Offer::Closed`] (closed by their consumer) are detached.
    ///
    /// # Errors
    /// [`TopicError::Closed`] once the topic is closed.
    pub fn publish(&self, value: T) -> Result<(), TopicError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(TopicError::Closed);
        }

        let mut detached = Vec::new();
        for (id, sink) in &state.sinks {
            match sink.offer(value.clone()) {
                Offer::Accepted => {}
                outcome @ (Offer::Evicted | Offer::Rejected) => {
                    trace!(topic = %self.config.name, subscription = %id, sink = sink.name(), ?outcome, "sink overflow");
                }
                Offer::Closed => detached.push(*id),
            }
        }
        for id in detached {
            state.sinks.remove(&id);
            trace!(topic = %self.config.name, subscription = %id, "detached sink closed by consumer");
        }

        self.published.fetch_add(1, Ordering::Release);
        Ok(())
    }
}

impl<T: 'static> Default for Topic<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Drop for Topic<T> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<T: 'static> fmt::Debug for Topic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Topic")
            .field("name", &self.config.name)
            .field("closed", &state.closed)
            .field("subscribers", &state.sinks.len())
            .field("published", &self.published())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::TryRecvError;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;
    use std::thread;

    /// Records offered values and counts end-of-stream signals.
    #[derive(Default)]
    struct Probe {
        values: parking_lot::Mutex<Vec<u32>>,
        closes: AtomicUsize,
    }

    impl Sink<u32> for Probe {
        fn offer(&self, value: u32) -> Offer {
            self.values.lock().push(value);
            Offer::Accepted
        }

        fn close(&self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn drain<T>(mb: &Mailbox<T>) -> Vec<T> {
        let mut out = Vec::new();
        while let Ok(v) = mb.try_recv() {
            out.push(v);
        }
        out
    }

    #[test]
    fn test_publish_reaches_every_sink_in_order() {
        let topic = Topic::new();
        let a = Mailbox::new(8);
        let b = Mailbox::new(8);
        topic.subscribe(a.clone());
        topic.subscribe(b.clone());

        for v in 1..=3 {
            topic.publish(v).unwrap();
        }

        assert_eq!(drain(&a), vec![1, 2, 3]);
        assert_eq!(drain(&b), vec![1, 2, 3]);
        assert_eq!(topic.published(), 3);
    }

    #[test]
    fn test_late_subscriber_sees_only_later_values() {
        let topic = Topic::new();
        topic.publish(1).unwrap();

        let mb = Mailbox::new(4);
        topic.subscribe(mb.clone());
        assert_eq!(mb.try_recv(), Err(TryRecvError::Empty));

        topic.publish(2).unwrap();
        assert_eq!(drain(&mb), vec![2]);
    }

    #[test]
    fn test_publish_without_subscribers_is_ok() {
        let topic = Topic::new();
        assert!(topic.publish("nobody").is_ok());
        assert_eq!(topic.published(), 1);
    }

    #[test]
    fn test_unsubscribe_is_idempotent_and_ends_stream_once() {
        let topic = Topic::new();
        let probe = Arc::new(Probe::default());
        let id = topic.subscribe(Arc::clone(&probe));

        topic.publish(1).unwrap();
        assert!(topic.unsubscribe(id));
        assert!(!topic.unsubscribe(id));
        topic.publish(2).unwrap();

        assert_eq!(*probe.values.lock(), vec![1]);
        assert_eq!(probe.closes.load(Ordering::SeqCst), 1);
        assert_eq!(topic.subscriber_count(), 0);

        topic.close();
        assert_eq!(probe.closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_close_ends_every_stream_exactly_once() {
        let topic = Topic::<u32>::new();
        let probes: Vec<_> = (0..3).map(|_| Arc::new(Probe::default())).collect();
        for p in &probes {
            topic.subscribe(Arc::clone(p));
        }

        assert!(topic.close());
        assert!(!topic.close());
        drop(topic);

        for p in &probes {
            assert_eq!(p.closes.load(Ordering::SeqCst), 1);
        }
    }

    #[test]
    fn test_publish_after_close_fails() {
        let topic = Topic::new();
        topic.close();

        assert_eq!(topic.publish(7), Err(TopicError::Closed));
        assert_eq!(topic.published(), 0);
    }

    #[test]
    fn test_subscribe_to_closed_topic_ends_stream_immediately() {
        let topic = Topic::<u32>::new();
        topic.close();

        let mb = Mailbox::new(4);
        let probe = Arc::new(Probe::default());
        topic.subscribe(mb.clone());
        let id = topic.subscribe(Arc::clone(&probe));

        assert_eq!(mb.try_recv(), Err(TryRecvError::Closed));
        assert_eq!(probe.closes.load(Ordering::SeqCst), 1);
        assert_eq!(topic.subscriber_count(), 0);
        assert!(!topic.unsubscribe(id));
    }

    #[test]
    fn test_consumer_closed_sink_is_detached() {
        let topic = Topic::new();
        let mb = Mailbox::new(4);
        topic.subscribe(mb.clone());

        mb.close();
        topic.publish(1).unwrap();

        assert_eq!(topic.subscriber_count(), 0);
        assert_eq!(mb.try_recv(), Err(TryRecvError::Closed));
    }

    #[test]
    fn test_drop_closes_topic() {
        let mb = Mailbox::<u32>::new(4);
        {
            let topic = Topic::new();
            topic.subscribe(mb.clone());
            topic.publish(5).unwrap();
        }
        assert_eq!(mb.try_recv(), Ok(5));
        assert_eq!(mb.try_recv(), Err(TryRecvError::Closed));
    }

    #[test]
    fn test_slow_sink_does_not_affect_others() {
        let topic = Topic::new();
        let slow = Mailbox::new(1);
        let fast = Mailbox::new(16);
        topic.subscribe(slow.clone());
        topic.subscribe(fast.clone());

        for v in 0..10 {
            topic.publish(v).unwrap();
        }

        assert_eq!(drain(&slow), vec![9]);
        assert_eq!(slow.dropped(), 9);
        assert_eq!(drain(&fast), (0..10).collect::<Vec<_>>());
        assert_eq!(fast.dropped(), 0);
    }

    #[test]
    fn test_concurrent_publishers_share_one_total_order() {
        let topic = Arc::new(Topic::new());
        let a = Mailbox::new(4096);
        let b = Mailbox::new(4096);
        topic.subscribe(a.clone());
        topic.subscribe(b.clone());

        let workers: Vec<_> = (0..4u32)
            .map(|w| {
                let topic = Arc::clone(&topic);
                thread::spawn(move || {
                    for i in 0..250 {
                        topic.publish(w * 1000 + i).unwrap();
                    }
                })
            })
            .collect();
        for h in workers {
            h.join().unwrap();
        }

        let seen_a = drain(&a);
        let seen_b = drain(&b);
        assert_eq!(seen_a.len(), 1000);
        assert_eq!(seen_a, seen_b);

        // Each producer's own values keep their relative order.
        for w in 0..4u32 {
            let mine: Vec<_> = seen_a.iter().filter(|v| **v / 1000 == w).collect();
            assert!(mine.windows(2).all(|p| p[0] < p[1]));
        }
    }

    #[test]
    fn test_named_topic_and_mailbox_defaults() {
        let cfg = Config {
            mailbox_capacity: 3,
            ..Config::named("schema")
        };
        let topic = Topic::<u8>::with_config(cfg);
        assert_eq!(topic.name(), "schema");
        assert_eq!(topic.mailbox().capacity(), 3);
    }

    #[test]
    fn test_lifecycle_works_for_non_clone_values() {
        #[allow(dead_code)]
        struct Token(Box<u32>);

        fn shut_down<T: 'static>(topic: &Topic<T>, id: SubscriptionId) -> usize {
            topic.unsubscribe(id);
            topic.close();
            topic.subscriber_count()
        }

        let topic = Topic::<Token>::named("tokens");
        let closes = Arc::new(AtomicUsize::new(0));

        struct Counting(Arc<AtomicUsize>);
        impl Sink<Token> for Counting {
            fn offer(&self, _value: Token) -> Offer {
                Offer::Accepted
            }
            fn close(&self) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let first = topic.subscribe(Counting(Arc::clone(&closes)));
        topic.subscribe(Counting(Arc::clone(&closes)));

        assert_eq!(shut_down(&topic, first), 0);
        assert_eq!(closes.load(Ordering::SeqCst), 2);
        assert!(topic.is_closed());
    }
}
