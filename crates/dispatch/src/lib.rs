//! Job-completion dispatch for the inferd serving frontend.
//!
//! A job's result reaches its caller through exactly one of two delivery
//! channels: a live connection held by the transport layer, or a deferred
//! handle awaited by an internal caller. This crate formats the outcome
//! (inference pass-through vs. JSON model description), hands it to the
//! channel, and records latency metrics — exactly once per job.

pub mod channel;
pub mod config;
pub mod dispatcher;
pub mod response;

pub use channel::{DeferredHandle, DeferredResult, DeliveryChannel, DispatchError, LiveSender};
pub use dispatcher::CompletionDispatcher;
pub use response::FormattedResponse;
