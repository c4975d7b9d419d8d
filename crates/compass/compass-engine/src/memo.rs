//! Recommendation memo keyed by state version and normalized context.

use std::sync::Arc;

use moka::sync::Cache;

use compass_core::models::{Recommendation, RecommendationContext};

pub(crate) struct RecommendationMemo {
    cache: Cache<String, Arc<Vec<Recommendation>>>,
}

impl RecommendationMemo {
    pub(crate) fn new(max_entries: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(max_entries).build(),
        }
    }

    /// blake3 over the version and the canonical JSON of the context.
    /// `None` if the context cannot be serialized.
    pub(crate) fn key(version: u64, context: &RecommendationContext) -> Option<String> {
        let json = serde_json::to_vec(context).ok()?;
        let mut hasher = blake3::Hasher::new();
        hasher.update(&version.to_le_bytes());
        hasher.update(&json);
        Some(hasher.finalize().to_hex().to_string())
    }

    pub(crate) fn get(&self, key: &str) -> Option<Arc<Vec<Recommendation>>> {
        self.cache.get(key)
    }

    pub(crate) fn insert(&self, key: String, recommendations: Arc<Vec<Recommendation>>) {
        self.cache.insert(key, recommendations);
    }

    /// Drop everything; entries for older versions can never hit again.
    pub(crate) fn clear(&self) {
        self.cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_depends_on_version_and_context() {
        let ctx = RecommendationContext::default();
        let other = RecommendationContext {
            languages: vec!["rust".into()],
            ..Default::default()
        };
        let a = RecommendationMemo::key(1, &ctx).unwrap();
        assert_eq!(a, RecommendationMemo::key(1, &ctx).unwrap());
        assert_ne!(a, RecommendationMemo::key(2, &ctx).unwrap());
        assert_ne!(a, RecommendationMemo::key(1, &other).unwrap());
    }

    #[test]
    fn insert_then_get() {
        let memo = RecommendationMemo::new(8);
        memo.insert("k".into(), Arc::new(Vec::new()));
        assert!(memo.get("k").is_some());
        assert!(memo.get("missing").is_none());
    }
}
