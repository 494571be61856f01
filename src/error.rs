//! Error types returned by mutating operations on a closed topic or source.
//!
//! This module defines two enums:
//!
//! - [`TopicError`] is raised by [`Topic`](crate::Topic) once it has been closed.
//! - [`SourceError`] is raised by [`EventSource`](crate::EventSource) once it has been closed.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logs.
//! End-of-stream is **not** an error: it is a normal sink signal.

use thiserror::Error;

/// # Errors produced by a [`Topic`](crate::Topic).
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicError {
    /// The topic was closed; no further values are accepted.
    #[error("topic is closed")]
    Closed,
}

impl TopicError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use statecast::TopicError;
    ///
    /// assert_eq!(TopicError::Closed.as_label(), "topic_closed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TopicError::Closed => "topic_closed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TopicError::Closed => "publish rejected: topic closed".to_string(),
        }
    }
}

/// # Errors produced by an [`EventSource`](crate::EventSource).
///
/// Non-recoverable at the call site: the caller treats the source as terminated.
/// The cell stays readable through [`EventSource::load`](crate::EventSource::load).
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceError {
    /// The source was closed; `store`, `swap` and `compare_and_swap` are rejected.
    #[error("event source is closed")]
    Closed,
}

impl SourceError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use statecast::SourceError;
    ///
    /// assert_eq!(SourceError::Closed.as_label(), "source_closed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SourceError::Closed => "source_closed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SourceError::Closed => "write rejected: event source closed".to_string(),
        }
    }
}

impl From<TopicError> for SourceError {
    fn from(err: TopicError) -> Self {
        match err {
            TopicError::Closed => SourceError::Closed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(TopicError::Closed.as_label(), "topic_closed");
        assert_eq!(SourceError::Closed.as_label(), "source_closed");
    }

    #[test]
    fn test_topic_error_converts_to_source_error() {
        let err: SourceError = TopicError::Closed.into();
        assert_eq!(err, SourceError::Closed);
        assert_eq!(err.to_string(), "event source is closed");
    }
}
