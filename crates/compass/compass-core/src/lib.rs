//! # compass-core
//!
//! Foundation crate for the Compass recommendation engine.
//! Defines the graph model, event records, loading types, traits, errors,
//! config, and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod graph;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::CompassConfig;
pub use errors::{CompassError, CompassResult};
pub use graph::{Effort, GraphEdge, GraphNode, NodeType, Rate, Relationship};
pub use models::{
    CacheEntry, ExperienceLevel, FeedbackRecord, Insight, Interaction, LoadingContext,
    LoadingStrategy, PerformanceMetric, Recommendation, RecommendationContext, UsagePattern,
};
