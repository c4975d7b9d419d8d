//! Closed, versioned request contexts validated at the engine boundary.
//!
//! Unknown fields are ignored; missing fields take the documented defaults.

use serde::{Deserialize, Serialize};

use super::ExperienceLevel;
use crate::config::defaults;
use crate::constants::CONTEXT_VERSION;

/// Lowercase, trim, drop empties and duplicates, keep first-seen order.
fn normalize_list(values: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for v in values {
        let v = v.trim().to_lowercase();
        if !v.is_empty() && !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

fn normalize_opt(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}

/// Context for `get_recommendations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationContext {
    pub version: u32,
    pub user_id: Option<String>,
    pub project_type: Option<String>,
    pub experience_level: ExperienceLevel,
    pub languages: Vec<String>,
    pub frameworks: Vec<String>,
    /// Standards the project already follows.
    pub existing_standards: Vec<String>,
    pub security_requirements: Vec<String>,
    pub performance_requirements: Vec<String>,
}

impl Default for RecommendationContext {
    fn default() -> Self {
        Self {
            version: CONTEXT_VERSION,
            user_id: None,
            project_type: None,
            experience_level: ExperienceLevel::default(),
            languages: Vec::new(),
            frameworks: Vec::new(),
            existing_standards: Vec::new(),
            security_requirements: Vec::new(),
            performance_requirements: Vec::new(),
        }
    }
}

impl RecommendationContext {
    /// Canonical form used for matching and memoization. Standard ids keep
    /// their case; everything else is lowercased.
    pub fn normalized(&self) -> Self {
        let mut existing: Vec<String> = Vec::new();
        for s in &self.existing_standards {
            let s = s.trim().to_string();
            if !s.is_empty() && !existing.contains(&s) {
                existing.push(s);
            }
        }
        Self {
            version: self.version,
            user_id: self.user_id.clone(),
            project_type: normalize_opt(&self.project_type),
            experience_level: self.experience_level,
            languages: normalize_list(&self.languages),
            frameworks: normalize_list(&self.frameworks),
            existing_standards: existing,
            security_requirements: normalize_list(&self.security_requirements),
            performance_requirements: normalize_list(&self.performance_requirements),
        }
    }

    /// Whether this context was written against a newer schema than ours.
    pub fn is_from_newer_schema(&self) -> bool {
        self.version > CONTEXT_VERSION
    }
}

/// Project lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Planning,
    Development,
    Testing,
    Deployment,
    Maintenance,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Planning => "planning",
            Phase::Development => "development",
            Phase::Testing => "testing",
            Phase::Deployment => "deployment",
            Phase::Maintenance => "maintenance",
        }
    }
}

/// Preferred trade-off between load latency and completeness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadingSpeed {
    Fast,
    #[default]
    Balanced,
    Thorough,
}

/// Network bandwidth available to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bandwidth {
    Low,
    #[default]
    Normal,
    High,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub user_id: Option<String>,
    pub experience_level: ExperienceLevel,
    pub loading_speed: LoadingSpeed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectContext {
    pub project_type: Option<String>,
    pub phase: Option<Phase>,
    /// Task domain, e.g. "security", "frontend". Keys into the domain table.
    pub task_domain: Option<String>,
}

/// Hard limits the loading plan must respect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConstraints {
    pub max_tokens: usize,
    pub max_load_time_ms: u64,
    pub memory_limit_mb: f64,
    pub concurrent_limit: usize,
    pub bandwidth: Bandwidth,
}

impl Default for PerformanceConstraints {
    fn default() -> Self {
        Self {
            max_tokens: defaults::DEFAULT_MAX_TOKENS,
            max_load_time_ms: defaults::DEFAULT_MAX_LOAD_TIME_MS,
            memory_limit_mb: defaults::DEFAULT_MEMORY_LIMIT_MB,
            concurrent_limit: defaults::DEFAULT_CONCURRENT_LIMIT,
            bandwidth: Bandwidth::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingPreferences {
    pub enable_preload: bool,
    pub compression_level: Option<u8>,
    pub cache_duration_secs: Option<u64>,
}

impl Default for LoadingPreferences {
    fn default() -> Self {
        Self {
            enable_preload: true,
            compression_level: None,
            cache_duration_secs: None,
        }
    }
}

/// Context for `optimize_loading`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingContext {
    pub version: u32,
    pub user_profile: UserProfile,
    pub project: ProjectContext,
    pub constraints: PerformanceConstraints,
    pub preferences: LoadingPreferences,
}

impl Default for LoadingContext {
    fn default() -> Self {
        Self {
            version: CONTEXT_VERSION,
            user_profile: UserProfile::default(),
            project: ProjectContext::default(),
            constraints: PerformanceConstraints::default(),
            preferences: LoadingPreferences::default(),
        }
    }
}

impl LoadingContext {
    /// Repair values that cannot be honored: zero limits become 1, task
    /// domain is lowercased.
    pub fn normalized(&self) -> Self {
        let mut ctx = self.clone();
        ctx.constraints.concurrent_limit = ctx.constraints.concurrent_limit.max(1);
        ctx.constraints.max_tokens = ctx.constraints.max_tokens.max(1);
        if !ctx.constraints.memory_limit_mb.is_finite() || ctx.constraints.memory_limit_mb < 0.0 {
            ctx.constraints.memory_limit_mb = 0.0;
        }
        ctx.project.task_domain = normalize_opt(&ctx.project.task_domain);
        ctx.project.project_type = normalize_opt(&ctx.project.project_type);
        ctx
    }
}
