//! Domain types shared across the inferd serving frontend.
//!
//! This crate has zero internal dependencies so it can be used by the
//! dispatch layer, the metrics layer, and any future worker or CLI tooling.

pub mod error;
pub mod job;
pub mod model;
pub mod types;
