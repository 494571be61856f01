//! # Topic and source configuration.
//!
//! Provides [`Config`] centralized settings for a [`Topic`](crate::Topic) or an
//! [`EventSource`](crate::EventSource).
//!
//! Config is used in two ways:
//! 1. **Construction**: `Topic::with_config(config)` / `EventSource::with_config(value, config)`
//! 2. **Mailbox defaults**: `Mailbox::from_config(&config)` / `source.mailbox()`
//!
//! ## Sentinel values
//! - `mailbox_capacity = 0` → clamped to 1 (a sink always holds at least one value)

use std::borrow::Cow;

use crate::policies::OverflowPolicy;

/// Configuration shared by a topic and the mailboxes created through it.
///
/// ## Field semantics
/// - `name`: Label attached to log events (`topic = <name>`)
/// - `mailbox_capacity`: Default capacity of mailboxes built from this config (min 1)
/// - `overflow`: Default overflow policy of mailboxes built from this config
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to avoid
/// sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug)]
pub struct Config {
    /// Label used in log fields.
    pub name: Cow<'static, str>,

    /// Capacity of mailboxes created from this config.
    ///
    /// Consumers that fall behind by more than this many values lose some of them,
    /// according to `overflow`. Minimum value is 1 (enforced by `Mailbox`).
    pub mailbox_capacity: usize,

    /// Overflow policy of mailboxes created from this config.
    pub overflow: OverflowPolicy,
}

impl Config {
    /// Creates the default config with a custom name.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns a mailbox capacity clamped to a minimum of 1.
    #[inline]
    pub fn mailbox_capacity_clamped(&self) -> usize {
        self.mailbox_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `name = "topic"`
    /// - `mailbox_capacity = 1024` (good baseline)
    /// - `overflow = OverflowPolicy::DropOldest`
    fn default() -> Self {
        Self {
            name: Cow::Borrowed("topic"),
            mailbox_capacity: 1024,
            overflow: OverflowPolicy::default(),
        }
    }
}
