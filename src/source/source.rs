//! # Event source: an atomic value cell that is also a topic.
//!
//! [`EventSource`] keeps the **current value** for late joiners and broadcasts every
//! **change** to subscribers. It is the primitive for distributing state such as
//! configuration, schema or deployment status to many observers.
//!
//! ## Architecture
//! ```text
//! producer ── store(v) ──► [writer lock]
//!                              ├─► cell := v           (1) visible to load()
//!                              └─► topic.publish(v)    (2) offered to every sink
//!
//! reader:  load() ──────────────► cell
//!          subscribe(sink) ─────► topic
//! ```
//!
//! ## Rules
//! - **Write before publish**: the cell is updated before the value is offered, both inside
//!   one writer critical region. A subscriber that received `v` and then calls
//!   [`load`](EventSource::load) sees `v` or a later value, never an earlier one.
//! - **One publish per transition**: `store`, `swap` and a successful `compare_and_swap`
//!   publish exactly once; a failed `compare_and_swap` touches neither cell nor topic.
//! - **Catch-up**: subscribe first, then load. [`EventSource::catch_up`] does both in that
//!   order. The reverse order races with concurrent writers.
//! - **Closed is terminal for writers only**: after [`close`](EventSource::close) every
//!   write fails with [`SourceError::Closed`]; `load` keeps returning the last value.
//!
//! Sinks must not call back into the same source from [`Sink::offer`] (other than `load`):
//! the writer lock and the topic lock are held for the whole publish.
//!
//! ## Example
//! ```rust
//! use statecast::{EventSource, Mailbox};
//!
//! let source = EventSource::<u32>::new();
//! source.store(1).unwrap();
//!
//! let mailbox = Mailbox::new(4);
//! let (_id, current) = source.catch_up(mailbox.clone());
//! assert_eq!(current, 1);
//!
//! source.store(2).unwrap();
//! assert_eq!(mailbox.try_recv(), Ok(2));
//! ```

use std::fmt;

use parking_lot::{Mutex, RwLock, RwLockUpgradableReadGuard};

use crate::config::Config;
use crate::error::SourceError;
use crate::sinks::{Mailbox, Sink};
use crate::topic::{SubscriptionId, Topic};

/// Threadsafe value cell with publish/subscribe change notification.
///
/// ### Properties
/// - **Initial value**: `T::default()` via [`EventSource::new`], or explicit via
///   [`EventSource::with_value`].
/// - **Serialized writers**: all writes go through one critical region, so the cell and the
///   published sequence always agree.
/// - **Cheap reads**: [`load`](Self::load) takes a shared lock only for the clone. Writers hold
///   the exclusive lock just to move the new value in; cloning, dropping and comparing `T`
///   happen outside it, so `load` never waits on them, on publishing, or on consumers.
pub struct EventSource<T: 'static> {
    cell: RwLock<T>,
    writer: Mutex<()>,
    topic: Topic<T>,
}

impl<T: Default + 'static> EventSource<T> {
    /// Creates a live source holding `T::default()`.
    pub fn new() -> Self {
        Self::with_value(T::default())
    }
}

impl<T: 'static> EventSource<T> {
    /// Creates a live source holding `value`.
    pub fn with_value(value: T) -> Self {
        Self::with_config(value, Config::default())
    }

    /// Creates a live source holding `value`; `config` applies to the embedded topic.
    pub fn with_config(value: T, config: Config) -> Self {
        Self {
            cell: RwLock::new(value),
            writer: Mutex::new(()),
            topic: Topic::with_config(config),
        }
    }

    /// Detaches a subscription (see [`Topic::unsubscribe`]).
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.topic.unsubscribe(id)
    }

    /// Closes the source: writes start failing and every sink is end-of-streamed.
    ///
    /// Idempotent; returns `true` only for the call that closed it. The cell stays readable.
    pub fn close(&self) -> bool {
        let _guard = self.writer.lock();
        self.topic.close()
    }

    pub fn is_closed(&self) -> bool {
        self.topic.is_closed()
    }

    pub fn subscriber_count(&self) -> usize {
        self.topic.subscriber_count()
    }

    /// Number of values published so far (equals the number of cell transitions).
    pub fn published(&self) -> u64 {
        self.topic.published()
    }

    pub fn name(&self) -> &str {
        self.topic.name()
    }
}

impl<T: Clone + 'static> EventSource<T> {
    /// Returns a copy of the current value. Safe to call concurrently with writers.
    pub fn load(&self) -> T {
        self.cell.read().clone()
    }
}

impl<T: Send + 'static> EventSource<T> {
    /// Attaches a sink to the embedded topic (see [`Topic::subscribe`]).
    ///
    /// The current value is **not** delivered; use [`catch_up`](Self::catch_up) for that.
    pub fn subscribe(&self, sink: impl Sink<T>) -> SubscriptionId {
        self.topic.subscribe(sink)
    }

    /// Creates a [`Mailbox`] sized by this source's config (not yet subscribed).
    pub fn mailbox(&self) -> Mailbox<T> {
        self.topic.mailbox()
    }
}

impl<T: Clone + Send + 'static> EventSource<T> {
    /// Writes `value` into the cell, then publishes it.
    ///
    /// # Errors
    /// [`SourceError::Closed`] once the source is closed; the cell is left untouched.
    pub fn store(&self, value: T) -> Result<(), SourceError> {
        let _guard = self.writer.lock();
        self.ensure_live()?;

        let prev = self.replace(value.clone());
        self.topic.publish(value)?;
        drop(prev);
        Ok(())
    }

    /// Replaces the cell with `value`, publishes it, and returns the previous value.
    ///
    /// # Errors
    /// [`SourceError::Closed`] once the source is closed.
    pub fn swap(&self, value: T) -> Result<T, SourceError> {
        let _guard = self.writer.lock();
        self.ensure_live()?;

        let prev = self.replace(value.clone());
        self.topic.publish(value)?;
        Ok(prev)
    }

    /// Subscribes `sink`, then loads the current value.
    ///
    /// Every change after the returned value reaches `sink`. A write racing with this call
    /// may be both returned here and delivered as the first value, so consumers should
    /// treat re-applying the current value as harmless.
    pub fn catch_up(&self, sink: impl Sink<T>) -> (SubscriptionId, T) {
        let id = self.subscribe(sink);
        (id, self.load())
    }

    /// Puts `next` into the cell and hands back the previous value.
    ///
    /// The exclusive lock covers only the move; cloning and dropping `T` happen outside it.
    fn replace(&self, next: T) -> T {
        let mut cell = self.cell.write();
        std::mem::replace(&mut *cell, next)
    }

    fn ensure_live(&self) -> Result<(), SourceError> {
        if self.topic.is_closed() {
            return Err(SourceError::Closed);
        }
        Ok(())
    }
}

impl<T: Clone + PartialEq + Send + 'static> EventSource<T> {
    /// Replaces the cell with `new` if it currently equals `current`.
    ///
    /// Publishes `new` and returns `true` on success. On mismatch nothing changes,
    /// nothing is published, and `false` is returned. Equality is `T`'s `PartialEq`.
    ///
    /// # Errors
    /// [`SourceError::Closed`] once the source is closed, whether or not the values match.
    pub fn compare_and_swap(&self, current: &T, new: T) -> Result<bool, SourceError> {
        let _guard = self.writer.lock();
        self.ensure_live()?;

        // Readers keep going while the comparison runs.
        let cell = self.cell.upgradable_read();
        if *cell != *current {
            return Ok(false);
        }
        let next = new.clone();
        let prev = {
            let mut cell = RwLockUpgradableReadGuard::upgrade(cell);
            std::mem::replace(&mut *cell, next)
        };
        self.topic.publish(new)?;
        drop(prev);
        Ok(true)
    }
}

impl<T: Default + 'static> Default for EventSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for EventSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSource")
            .field("value", &*self.cell.read())
            .field("topic", &self.topic)
            .finish()
    }
}
