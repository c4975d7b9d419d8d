//! # compass-adaptation
//!
//! The adaptation loop. Each cycle mines the history, folds patterns into the
//! graph, applies queued feedback and high-impact insights through the
//! [`ActionRegistry`], recomputes loading priors, maintains the cache, and
//! persists the result.
//!
//! A cycle works on an owned [`AdaptiveState`]; callers commit it by swapping
//! their snapshot afterwards.

pub mod actions;
pub mod engine;
pub mod pipeline;
pub mod report;
pub mod scheduling;
pub mod state;

pub use actions::{ActionContext, ActionHandler, ActionRegistry};
pub use engine::AdaptationEngine;
pub use report::CycleReport;
pub use scheduling::{evaluate_triggers, TriggerReason, TriggerSignals};
pub use state::{AdaptiveState, LoadReport};
