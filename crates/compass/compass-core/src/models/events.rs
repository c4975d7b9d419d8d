use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::graph::Rate;

/// User experience level. Unknown values deserialize as `Intermediate`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum ExperienceLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl ExperienceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Advanced => "advanced",
            ExperienceLevel::Expert => "expert",
        }
    }
}

impl From<String> for ExperienceLevel {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "beginner" | "novice" => ExperienceLevel::Beginner,
            "advanced" => ExperienceLevel::Advanced,
            "expert" => ExperienceLevel::Expert,
            _ => ExperienceLevel::Intermediate,
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded user interaction. Ingested append-only; consumed by the next
/// adaptation cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Assigned by the history log on ingestion.
    #[serde(default)]
    pub sequence: u64,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub user_id: String,
    /// e.g. "query", "load", "generate".
    pub interaction_type: String,
    #[serde(default)]
    pub project_type: Option<String>,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub task_type: Option<String>,
    /// Standards loaded or referenced during the interaction.
    #[serde(default)]
    pub standards: Vec<String>,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub satisfaction: Option<Rate>,
    #[serde(default)]
    pub duration_ms: u64,
}

impl Interaction {
    pub fn new(interaction_type: impl Into<String>) -> Self {
        Self {
            sequence: 0,
            timestamp: Utc::now(),
            session_id: String::new(),
            user_id: String::new(),
            interaction_type: interaction_type.into(),
            project_type: None,
            experience_level: ExperienceLevel::default(),
            task_type: None,
            standards: Vec::new(),
            success: false,
            satisfaction: None,
            duration_ms: 0,
        }
    }
}

/// Sentiment carried by explicit feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// Explicit user feedback, optionally about one graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    #[serde(default)]
    pub sequence: u64,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub target: Option<String>,
    pub sentiment: Sentiment,
    #[serde(default)]
    pub comment: Option<String>,
}

impl FeedbackRecord {
    pub fn new(target: Option<String>, sentiment: Sentiment) -> Self {
        Self {
            sequence: 0,
            timestamp: Utc::now(),
            user_id: String::new(),
            target,
            sentiment,
            comment: None,
        }
    }
}

/// One performance sample of the loading path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetric {
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub response_time_ms: f64,
    /// Fraction of failed requests, 0–1.
    #[serde(default)]
    pub error_rate: f64,
    /// Fraction of the memory budget in use, 0–1.
    #[serde(default)]
    pub memory_usage: f64,
    #[serde(default)]
    pub cache_hit_rate: f64,
    #[serde(default)]
    pub tokens_used: u64,
}

impl PerformanceMetric {
    pub fn new(response_time_ms: f64, error_rate: f64, memory_usage: f64) -> Self {
        Self {
            timestamp: Utc::now(),
            response_time_ms,
            error_rate,
            memory_usage,
            cache_hit_rate: 0.0,
            tokens_used: 0,
        }
    }
}
