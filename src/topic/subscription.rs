//! Opaque subscription handles.

use std::fmt;

/// Handle returned by [`Topic::subscribe`](crate::Topic::subscribe).
///
/// Unique within the topic that issued it. Holds no reference to the topic, so it
/// never keeps the topic alive; using it after the topic is gone is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value (for logs).
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}
