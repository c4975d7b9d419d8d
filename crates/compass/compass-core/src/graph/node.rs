use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Rate;
use crate::constants::MAX_PRIORITY;

/// Kind of graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Standard,
    Pattern,
    Technology,
    Practice,
}

impl NodeType {
    /// Whether nodes of this type can be handed to a caller as a recommendation.
    pub fn is_recommendable(self) -> bool {
        matches!(self, NodeType::Standard | NodeType::Practice)
    }
}

/// Implementation effort of adopting a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effort {
    Low,
    #[default]
    Medium,
    High,
}

/// A node in the recommendation knowledge graph.
///
/// Nodes are never deleted during normal operation; stale nodes decay through
/// `success_rate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub node_type: NodeType,
    #[serde(default)]
    pub title: String,
    /// Lowercased on construction and load.
    #[serde(default, deserialize_with = "deserialize_category")]
    pub category: Option<String>,
    /// 0–10, clamped on construction and load.
    #[serde(default = "default_priority", deserialize_with = "deserialize_priority")]
    pub priority: u8,
    #[serde(default)]
    pub usage_frequency: u64,
    #[serde(default)]
    pub success_rate: Rate,
    #[serde(default)]
    pub dependencies: BTreeSet<String>,
    #[serde(default)]
    pub conflicts: BTreeSet<String>,
    /// Lowercased on construction and load.
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub effort: Effort,
}

fn default_priority() -> u8 {
    5
}

fn deserialize_priority<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(0, MAX_PRIORITY as i64) as u8)
}

fn deserialize_category<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.map(|c| c.to_lowercase()))
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|t| t.to_lowercase()).collect())
}

impl GraphNode {
    /// Create a node with neutral defaults.
    pub fn new(id: impl Into<String>, node_type: NodeType) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            node_type,
            category: None,
            priority: default_priority(),
            usage_frequency: 0,
            success_rate: Rate::default(),
            dependencies: BTreeSet::new(),
            conflicts: BTreeSet::new(),
            tags: BTreeSet::new(),
            effort: Effort::default(),
        }
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority.min(MAX_PRIORITY);
        self
    }

    pub fn with_success_rate(mut self, rate: f64) -> Self {
        self.success_rate = Rate::new(rate);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(|t| t.into().to_lowercase()));
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into().to_lowercase());
        self
    }

    pub fn with_effort(mut self, effort: Effort) -> Self {
        self.effort = effort;
        self
    }

    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies.extend(deps.into_iter().map(Into::into));
        self
    }

    pub fn with_conflicts<I, S>(mut self, conflicts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conflicts.extend(conflicts.into_iter().map(Into::into));
        self
    }

    /// True if the node's tags or category contain any of `values`
    /// (case-insensitive).
    pub fn matches_any(&self, values: &[String]) -> bool {
        values.iter().any(|v| {
            let v = v.to_lowercase();
            self.tags.contains(&v) || self.category.as_deref() == Some(v.as_str())
        })
    }
}
