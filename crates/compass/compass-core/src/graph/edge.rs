use serde::{Deserialize, Serialize};
use std::fmt;

use super::Rate;

/// Relationship carried by a directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Requires,
    Enhances,
    Conflicts,
    Similar,
    Implements,
    Supports,
}

impl Relationship {
    pub fn as_str(self) -> &'static str {
        match self {
            Relationship::Requires => "requires",
            Relationship::Enhances => "enhances",
            Relationship::Conflicts => "conflicts",
            Relationship::Similar => "similar",
            Relationship::Implements => "implements",
            Relationship::Supports => "supports",
        }
    }

    /// Relationships followed when expanding from a relevant node.
    pub const EXPANSION: [Relationship; 4] = [
        Relationship::Requires,
        Relationship::Enhances,
        Relationship::Implements,
        Relationship::Supports,
    ];
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed, weighted edge. `strength` is clamped to [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub relationship: Relationship,
    pub strength: Rate,
}

impl GraphEdge {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        relationship: Relationship,
        strength: f64,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            relationship,
            strength: Rate::new(strength),
        }
    }
}
