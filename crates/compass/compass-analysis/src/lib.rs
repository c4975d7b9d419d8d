//! # compass-analysis
//!
//! Turns raw interaction, feedback, and metric history into mined
//! [`UsagePattern`]s and scored [`Insight`]s.
//!
//! Everything here is a pure function of its input slice: re-running on the
//! same history yields identical output.
//!
//! [`UsagePattern`]: compass_core::models::UsagePattern
//! [`Insight`]: compass_core::models::Insight

pub mod patterns;
pub mod signals;

pub use patterns::{follow_probabilities, merge_patterns, MergeStats, PatternMiner};
pub use signals::{
    BehaviorAnalyzer, FeedbackAnalyzer, PerformanceAnalyzer, SignalAnalyzers,
};

/// Action names emitted by the analyzers and understood by the adaptation
/// loop's action registry.
pub mod actions {
    pub const BOOST_CACHE_PRIORITY: &str = "boost_cache_priority";
    pub const TIGHTEN_COMPRESSION: &str = "tighten_compression";
    pub const LIMIT_PRELOAD: &str = "limit_preload";
    pub const SIMPLIFY_FOR_LEVEL: &str = "simplify_for_level";
    pub const DEMOTE_TASK_STANDARDS: &str = "demote_task_standards";
    pub const DEMOTE_NEGATIVE_FEEDBACK_TARGETS: &str = "demote_negative_feedback_targets";
    pub const FLAG_ERROR_INVESTIGATION: &str = "flag_error_investigation";
}
