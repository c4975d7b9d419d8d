//! # compass-observability
//!
//! Structured tracing setup with per-operation span macros and named event
//! helpers, plus a tracker for soft failures the engine degraded through.

pub mod degradation;
pub mod tracing_setup;

pub use degradation::{DegradationEvent, DegradationTracker};
pub use tracing_setup::{init_tracing, init_tracing_with_filter};
