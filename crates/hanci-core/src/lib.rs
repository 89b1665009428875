//! hanci-core — Word store, scheduler, and review-session engine.
//!
//! This crate defines the fundamental data model, the on-disk word
//! database format, interval scheduling, and the interactive review
//! state machine that the hanci binary drives.

pub mod config;
pub mod dict;
pub mod error;
pub mod model;
pub mod scheduler;
pub mod session;
pub mod store;
