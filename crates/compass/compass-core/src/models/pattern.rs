use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ExperienceLevel;
use crate::graph::Rate;

/// Kind of mined usage pattern.
///
/// `Collaborative` is part of the persisted vocabulary but no miner emits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    Sequential,
    Contextual,
    Temporal,
    Collaborative,
}

impl PatternType {
    pub fn as_str(self) -> &'static str {
        match self {
            PatternType::Sequential => "sequential",
            PatternType::Contextual => "contextual",
            PatternType::Temporal => "temporal",
            PatternType::Collaborative => "collaborative",
        }
    }

    fn id_prefix(self) -> &'static str {
        match self {
            PatternType::Sequential => "seq",
            PatternType::Contextual => "ctx",
            PatternType::Temporal => "tmp",
            PatternType::Collaborative => "col",
        }
    }
}

/// Typed predicate describing when a pattern applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PatternCondition {
    Sequence { steps: Vec<String> },
    ProjectType { value: String },
    ExperienceLevel { value: ExperienceLevel },
    HourOfDay { hour: u32 },
}

/// A scored effect observed when the pattern holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternOutcome {
    pub effect: String,
    /// Item the effect refers to, e.g. a standard id.
    #[serde(default)]
    pub target: Option<String>,
    pub score: f64,
}

impl PatternOutcome {
    pub fn new(effect: impl Into<String>, score: f64) -> Self {
        Self {
            effect: effect.into(),
            target: None,
            score,
        }
    }

    pub fn targeting(effect: impl Into<String>, target: impl Into<String>, score: f64) -> Self {
        Self {
            effect: effect.into(),
            target: Some(target.into()),
            score,
        }
    }
}

/// A recurring, quantified regularity mined from interaction history.
///
/// Later mining runs may emit an updated pattern with the same `pattern_id`;
/// consumers replace rather than duplicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsagePattern {
    pub pattern_id: String,
    pub pattern_type: PatternType,
    pub frequency: u64,
    pub success_rate: Rate,
    #[serde(default)]
    pub conditions: Vec<PatternCondition>,
    #[serde(default)]
    pub outcomes: Vec<PatternOutcome>,
    /// Timestamp of the latest interaction that matched.
    pub last_seen: DateTime<Utc>,
}

impl UsagePattern {
    /// Deterministic id from the pattern type and its defining key.
    pub fn derive_id(pattern_type: PatternType, key: &str) -> String {
        let material = format!("{}:{}", pattern_type.as_str(), key);
        let hash = blake3::hash(material.as_bytes()).to_hex();
        format!("{}_{}", pattern_type.id_prefix(), &hash[..16])
    }

    /// Standards referenced by `standard_used` outcomes.
    pub fn standard_targets(&self) -> impl Iterator<Item = (&str, f64)> {
        self.outcomes
            .iter()
            .filter(|o| o.effect == "standard_used")
            .filter_map(|o| o.target.as_deref().map(|t| (t, o.score)))
    }
}
