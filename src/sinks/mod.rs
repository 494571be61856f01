//! # Sinks: where published values land.
//!
//! This module provides the [`Sink`] trait and the built-in implementations a
//! [`Topic`](crate::Topic) delivers into.
//!
//! ## Architecture
//! ```text
//! Value flow:
//!   producer ── publish(v) ──► Topic ──► offer(v) to every attached sink
//!                                           │
//!                                  ┌────────┼──────────┬──────────┐
//!                                  ▼        ▼          ▼          ▼
//!                               Mailbox  Mailbox   LogWriter   Custom
//!                                  │        │
//!                              consumer  consumer
//! ```
//!
//! ## Sink types
//! - **Queueing sinks** - buffer values for a consumer task ([`Mailbox`])
//! - **Immediate sinks** - act on the value inside `offer` (`LogWriter`, counters)
//!
//! ## Implementing custom sinks
//! `offer` runs under the topic lock: keep it short and never wait on consumers.

#[cfg(feature = "logging")]
mod log;
mod mailbox;
mod sink;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use mailbox::{Mailbox, TryRecvError};
pub use sink::{Offer, Sink};
