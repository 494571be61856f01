//! # LogWriter: simple value logger
//!
//! A minimal sink that emits every offered value as a `tracing` event.
//! It never fills, so it never loses values. Use it for tests or demos.
//!
//! ## Example output (with `tracing_subscriber::fmt`)
//! ```text
//! INFO statecast::sinks::log: [value] value=Deployment { replicas: 3 } sink="deployments"
//! INFO statecast::sinks::log: [end-of-stream] sink="deployments"
//! ```

use std::fmt::Debug;

use crate::sinks::sink::{Offer, Sink};

/// Value logging sink.
#[derive(Debug, Clone, Copy)]
pub struct LogWriter {
    label: &'static str,
}

impl LogWriter {
    /// Construct a new [`LogWriter`] labelled `label` in log fields.
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }
}

impl Default for LogWriter {
    fn default() -> Self {
        Self::new("LogWriter")
    }
}

impl<T: Debug> Sink<T> for LogWriter {
    fn offer(&self, value: T) -> Offer {
        tracing::info!(value = ?value, sink = self.label, "[value]");
        Offer::Accepted
    }

    fn close(&self) {
        tracing::info!(sink = self.label, "[end-of-stream]");
    }

    fn name(&self) -> &'static str {
        self.label
    }
}
