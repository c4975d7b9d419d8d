//! Span definitions per operation: recommendation, loading, adaptation, mining, persistence.

/// Create a recommendation span.
#[macro_export]
macro_rules! recommendation_span {
    ($project_type:expr, $level:expr) => {
        tracing::info_span!(
            "compass.recommendation",
            project_type = ?$project_type,
            experience_level = %$level
        )
    };
}

/// Create a loading optimization span.
#[macro_export]
macro_rules! loading_span {
    ($requested:expr) => {
        tracing::info_span!("compass.loading", requested = $requested)
    };
}

/// Create an adaptation cycle span.
#[macro_export]
macro_rules! adaptation_span {
    ($cycle:expr) => {
        tracing::info_span!("compass.adaptation", cycle = $cycle)
    };
}

/// Create a pattern mining span.
#[macro_export]
macro_rules! mining_span {
    ($interactions:expr) => {
        tracing::debug_span!("compass.mining", interactions = $interactions)
    };
}

/// Create a persistence span.
#[macro_export]
macro_rules! persistence_span {
    ($document:expr) => {
        tracing::debug_span!("compass.persistence", document = %$document)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RECOMMENDATION: &str = "compass.recommendation";
    pub const LOADING: &str = "compass.loading";
    pub const ADAPTATION: &str = "compass.adaptation";
    pub const MINING: &str = "compass.mining";
    pub const PERSISTENCE: &str = "compass.persistence";
}
