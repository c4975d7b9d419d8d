//! # compass-engine
//!
//! The Compass service. [`CompassEngine`] owns all state as one injected
//! instance with lifecycle `init → serve → shutdown`:
//!
//! - reads (`get_recommendations`, `optimize_loading`, `implementation_order`)
//!   work on an `Arc` snapshot taken at request start;
//! - ingestion (`record_*`) appends to an inbox drained by the next cycle;
//! - writes (`learn_from_feedback`, adaptation cycles, catalog seeding) go
//!   through a single-writer gate and commit by swapping the snapshot.

pub mod engine;
mod inbox;
mod memo;
pub mod scheduler;
mod state_cell;

pub use engine::CompassEngine;
pub use scheduler::SchedulerHandle;

pub use compass_adaptation::CycleReport;
pub use compass_graph::{CatalogEntry, FeedbackOutcome, FeedbackResult};
