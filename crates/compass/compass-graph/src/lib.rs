//! # compass-graph
//!
//! The entity store and the read path built on it.
//!
//! ## Scoring
//!
//! ```text
//! score(anchor, edge?, target) = anchor.success_rate
//!                              × (edge.strength or 1.0)
//!                              × priorityWeight(target.priority)
//!
//! rank = 0.4×confidence + 0.3×priorityWeight + 0.2×effortWeight + 0.1×ROI
//! ```
//!
//! Duplicate candidates keep the higher confidence and union their reasoning.

pub mod catalog;
pub mod feedback;
pub mod ordering;
pub mod recommender;
pub mod relevance;
pub mod scoring;
pub mod store;
pub mod traversal;

pub use catalog::{CatalogEntry, build_from_catalog};
pub use feedback::{learn_from_feedback, FeedbackOutcome, FeedbackResult};
pub use ordering::implementation_order;
pub use recommender::Recommender;
pub use relevance::{find_relevant, RelevantNode};
pub use store::EntityStore;
pub use traversal::{expand, Expansion};
