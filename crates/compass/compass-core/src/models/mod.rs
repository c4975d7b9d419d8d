//! Data contracts shared across subsystems.

mod cache;
mod context;
mod documents;
mod events;
mod insight;
mod pattern;
mod priors;
mod recommendation;
mod strategy;

pub use cache::{CacheEntry, CacheOp};
pub use context::{
    Bandwidth, LoadingContext, LoadingPreferences, LoadingSpeed, PerformanceConstraints, Phase,
    ProjectContext, RecommendationContext, UserProfile,
};
pub use documents::{CacheDocument, GraphDocument, GraphMetadata, HistoryDocument};
pub use events::{ExperienceLevel, FeedbackRecord, Interaction, PerformanceMetric, Sentiment};
pub use insight::{Impact, Insight, InsightType, RecommendedAction};
pub use pattern::{PatternCondition, PatternOutcome, PatternType, UsagePattern};
pub use priors::LoadingPriors;
pub use recommendation::{CandidateSource, Recommendation};
pub use strategy::{Adjustment, LoadingOptimization, LoadingStrategy, PreloadCandidate};
