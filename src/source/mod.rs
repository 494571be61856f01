//! Event source: current-value cell plus change topic.
//!
//! ## Contents
//! - [`EventSource`] load / store / swap / compare-and-swap with change broadcast
//!
//! ## Quick reference
//! - **Writers**: `store`, `swap`, `compare_and_swap` (fail with `SourceError::Closed` after close)
//! - **Readers**: `load` for the current value, `subscribe` for changes, `catch_up` for both

mod source;

pub use source::EventSource;
