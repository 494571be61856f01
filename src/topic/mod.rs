//! Broadcast topic: the publish/subscribe primitive.
//!
//! ## Contents
//! - [`Topic`] synchronous fan-out to consumer-owned sinks
//! - [`SubscriptionId`] opaque handle returned by `subscribe`
//!
//! See [`Sink`](crate::Sink) for the sink side of the contract.

mod subscription;
mod topic;

pub use subscription::SubscriptionId;
pub use topic::Topic;
