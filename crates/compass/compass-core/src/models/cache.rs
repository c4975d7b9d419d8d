use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One cached item. Owned by the smart cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    /// Size in bytes.
    pub size: u64,
    /// 0–10.
    pub priority: u8,
    pub usage_count: u64,
    pub last_accessed: DateTime<Utc>,
    pub expiry: DateTime<Utc>,
}

impl CacheEntry {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry <= now
    }
}

/// A cache mutation queued by the read path and applied by the adaptation
/// loop's maintenance phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CacheOp {
    Access {
        key: String,
        at: DateTime<Utc>,
    },
    Preload {
        key: String,
        size: u64,
        priority: u8,
        ttl_secs: u64,
        at: DateTime<Utc>,
    },
}
