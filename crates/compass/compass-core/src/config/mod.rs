//! Configuration for every Compass subsystem.
//!
//! All sub-configs use `#[serde(default)]` so a partial TOML file only needs
//! to name the values it overrides. Defaults live in [`defaults`].

pub mod adaptation_config;
pub mod analysis_config;
pub mod cache_config;
pub mod defaults;
pub mod graph_config;
pub mod loading_config;
pub mod mining_config;
pub mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use adaptation_config::AdaptationConfig;
pub use analysis_config::AnalysisConfig;
pub use cache_config::CacheConfig;
pub use graph_config::{EffortWeights, GraphConfig, PriorityBand, RankWeights, RelevanceWeights};
pub use loading_config::LoadingConfig;
pub use mining_config::MiningConfig;
pub use storage_config::StorageConfig;

use crate::errors::{CompassResult, ConfigError};

/// Top-level configuration aggregating every subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompassConfig {
    pub graph: GraphConfig,
    pub mining: MiningConfig,
    pub analysis: AnalysisConfig,
    pub loading: LoadingConfig,
    pub cache: CacheConfig,
    pub adaptation: AdaptationConfig,
    pub storage: StorageConfig,
    /// Default tracing filter when `COMPASS_LOG` is unset.
    pub log_level: String,
}

impl Default for CompassConfig {
    fn default() -> Self {
        Self {
            graph: GraphConfig::default(),
            mining: MiningConfig::default(),
            analysis: AnalysisConfig::default(),
            loading: LoadingConfig::default(),
            cache: CacheConfig::default(),
            adaptation: AdaptationConfig::default(),
            storage: StorageConfig::default(),
            log_level: defaults::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl CompassConfig {
    /// Parse a TOML document. Missing sections and keys take their defaults.
    pub fn from_toml_str(raw: &str) -> CompassResult<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file, falling back to defaults when the file is
    /// missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "config file unreadable, using defaults");
                return Self::default();
            }
        };
        match Self::from_toml_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                Self::default()
            }
        }
    }

    /// Reject values that would break invariants downstream.
    pub fn validate(&self) -> CompassResult<()> {
        let unit_checks = [
            ("graph.relevance_threshold", self.graph.relevance_threshold),
            ("graph.feedback_delta", self.graph.feedback_delta),
            ("mining.temporal_confidence", self.mining.temporal_confidence),
            ("cache.preload_probability", self.cache.preload_probability),
            ("cache.preload_memory_share", self.cache.preload_memory_share),
            ("cache.preload_time_share", self.cache.preload_time_share),
            ("loading.token_chunk_shrink", self.loading.token_chunk_shrink),
            ("loading.token_item_trim", self.loading.token_item_trim),
        ];
        for (key, value) in unit_checks {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    key: key.to_string(),
                    value,
                }
                .into());
            }
        }
        if self.mining.window == 0 {
            return Err(ConfigError::OutOfRange {
                key: "mining.window".to_string(),
                value: 0.0,
            }
            .into());
        }
        if self.loading.chunk_size == 0 {
            return Err(ConfigError::OutOfRange {
                key: "loading.chunk_size".to_string(),
                value: 0.0,
            }
            .into());
        }
        Ok(())
    }
}
