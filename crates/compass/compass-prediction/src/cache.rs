//! Smart cache: entries, utilization, queued-op replay, and maintenance.
//!
//! The read path never mutates the cache; accesses and preloads are queued
//! as [`CacheOp`]s and replayed by the adaptation loop.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use compass_core::config::CacheConfig;
use compass_core::constants::MAX_PRIORITY;
use compass_core::models::{CacheEntry, CacheOp};

/// What one maintenance pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaintenanceReport {
    pub promoted: usize,
    pub demoted: usize,
    pub expired: usize,
    pub evicted: usize,
}

#[derive(Debug, Clone)]
pub struct SmartCache {
    entries: BTreeMap<String, CacheEntry>,
    config: CacheConfig,
}

impl SmartCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: BTreeMap::new(),
            config,
        }
    }

    pub fn from_entries(config: CacheConfig, entries: Vec<CacheEntry>) -> Self {
        let mut cache = Self::new(config);
        for mut entry in entries {
            entry.priority = entry.priority.min(MAX_PRIORITY);
            cache.entries.insert(entry.key.clone(), entry);
        }
        cache
    }

    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Present and not expired.
    pub fn is_cached(&self, key: &str, now: DateTime<Utc>) -> bool {
        self.entries.get(key).is_some_and(|e| !e.is_expired(now))
    }

    /// Share of `items` currently cached. Zero for no items.
    pub fn analyze_utilization(&self, items: &[String], now: DateTime<Utc>) -> f64 {
        if items.is_empty() {
            return 0.0;
        }
        let cached = items.iter().filter(|i| self.is_cached(i, now)).count();
        cached as f64 / items.len() as f64
    }

    /// Insert or refresh an entry. Refreshing keeps the usage count and the
    /// higher of the two priorities.
    pub fn preload(&mut self, key: &str, size: u64, priority: u8, ttl_secs: u64, now: DateTime<Utc>) {
        let expiry = expiry_after(now, ttl_secs);
        let priority = priority.min(MAX_PRIORITY);
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.size = size;
                entry.priority = entry.priority.max(priority);
                entry.expiry = entry.expiry.max(expiry);
                entry.last_accessed = entry.last_accessed.max(now);
            }
            None => {
                self.entries.insert(
                    key.to_string(),
                    CacheEntry {
                        key: key.to_string(),
                        size,
                        priority,
                        usage_count: 0,
                        last_accessed: now,
                        expiry,
                    },
                );
            }
        }
    }

    /// Count one access. Unknown keys are ignored.
    pub fn record_access(&mut self, key: &str, at: DateTime<Utc>) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.usage_count = entry.usage_count.saturating_add(1);
                entry.last_accessed = entry.last_accessed.max(at);
                true
            }
            None => false,
        }
    }

    /// Replay queued operations in order.
    pub fn apply_ops(&mut self, ops: &[CacheOp]) {
        for op in ops {
            match op {
                CacheOp::Access { key, at } => {
                    self.record_access(key, *at);
                }
                CacheOp::Preload {
                    key,
                    size,
                    priority,
                    ttl_secs,
                    at,
                } => self.preload(key, *size, *priority, *ttl_secs, *at),
            }
        }
    }

    /// Shift every entry's priority by `delta`, clamped to 0..=10.
    pub fn shift_priorities(&mut self, delta: i8) {
        for entry in self.entries.values_mut() {
            entry.priority = shifted(entry.priority, delta);
        }
    }

    /// Re-rank, drop expired entries, then evict down to capacity.
    pub fn maintain(&mut self, now: DateTime<Utc>) -> MaintenanceReport {
        let mut report = MaintenanceReport::default();
        let window = Duration::try_seconds(self.config.session_window_secs.max(0))
            .unwrap_or_else(Duration::zero);

        let mut by_usage: Vec<(&String, u64)> = self
            .entries
            .iter()
            .filter(|(_, e)| e.usage_count > 0)
            .map(|(k, e)| (k, e.usage_count))
            .collect();
        by_usage.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        let quartile = self.entries.len().div_ceil(4);
        let top: Vec<String> = by_usage
            .into_iter()
            .take(quartile)
            .map(|(k, _)| k.clone())
            .collect();

        for (key, entry) in self.entries.iter_mut() {
            if top.contains(key) {
                let before = entry.priority;
                entry.priority = shifted(entry.priority, 1);
                report.promoted += usize::from(entry.priority != before);
            } else if entry.usage_count == 0 && now - entry.last_accessed > window {
                let before = entry.priority;
                entry.priority = shifted(entry.priority, -1);
                report.demoted += usize::from(entry.priority != before);
            }
        }

        let before = self.entries.len();
        self.entries.retain(|_, e| !e.is_expired(now));
        report.expired = before - self.entries.len();

        report.evicted = self.evict(now, window);
        tracing::debug!(
            promoted = report.promoted,
            demoted = report.demoted,
            expired = report.expired,
            evicted = report.evicted,
            entries = self.entries.len(),
            "cache maintenance finished"
        );
        report
    }

    fn evict(&mut self, now: DateTime<Utc>, window: Duration) -> usize {
        let mut victims: Vec<(u8, DateTime<Utc>, String)> = self
            .entries
            .values()
            .filter(|e| now - e.last_accessed >= window)
            .map(|e| (e.priority, e.last_accessed, e.key.clone()))
            .collect();
        victims.sort();

        let mut evicted = 0;
        for (_, _, key) in victims {
            if !self.over_capacity() {
                break;
            }
            if self.entries.remove(&key).is_some() {
                evicted += 1;
            }
        }
        if self.over_capacity() {
            tracing::warn!(
                entries = self.entries.len(),
                bytes = self.total_bytes(),
                "cache over capacity; remaining entries are in the session window"
            );
        }
        evicted
    }

    fn over_capacity(&self) -> bool {
        self.entries.len() > self.config.max_entries || self.total_bytes() > self.config.max_bytes
    }

    pub fn total_bytes(&self) -> u64 {
        self.entries.values().map(|e| e.size).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by key.
    pub fn entries(&self) -> Vec<CacheEntry> {
        self.entries.values().cloned().collect()
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }
}

/// `now + ttl`, saturating at the latest representable instant.
fn expiry_after(now: DateTime<Utc>, ttl_secs: u64) -> DateTime<Utc> {
    i64::try_from(ttl_secs)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

fn shifted(priority: u8, delta: i8) -> u8 {
    (i16::from(priority) + i16::from(delta)).clamp(0, i16::from(MAX_PRIORITY)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        test_fixtures::base_time()
    }

    fn config(max_entries: usize) -> CacheConfig {
        CacheConfig {
            max_entries,
            ..Default::default()
        }
    }

    #[test]
    fn utilization_is_share_of_cached_items() {
        let mut cache = SmartCache::new(CacheConfig::default());
        cache.preload("a", 10, 5, 60, now());
        let items = vec!["a".to_string(), "b".to_string()];
        assert_eq!(cache.analyze_utilization(&items, now()), 0.5);
        assert_eq!(cache.analyze_utilization(&[], now()), 0.0);
        assert_eq!(
            cache.analyze_utilization(&items, now() + Duration::seconds(61)),
            0.0
        );
    }

    #[test]
    fn replayed_ops_count_usage_and_refresh() {
        let mut cache = SmartCache::new(CacheConfig::default());
        cache.apply_ops(&[
            CacheOp::Preload {
                key: "a".into(),
                size: 10,
                priority: 3,
                ttl_secs: 60,
                at: now(),
            },
            CacheOp::Access { key: "a".into(), at: now() },
            CacheOp::Access { key: "ghost".into(), at: now() },
            CacheOp::Preload {
                key: "a".into(),
                size: 12,
                priority: 7,
                ttl_secs: 60,
                at: now(),
            },
        ]);
        let a = cache.get("a").unwrap();
        assert_eq!(a.usage_count, 1);
        assert_eq!(a.priority, 7);
        assert_eq!(a.size, 12);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn eviction_prefers_low_priority_then_oldest() {
        let mut cache = SmartCache::new(config(2));
        let old = now() - Duration::hours(5);
        cache.preload("low-old", 1, 2, 86_400, old);
        cache.preload("low-newer", 1, 2, 86_400, old + Duration::minutes(1));
        cache.preload("high", 1, 9, 86_400, old);

        let report = cache.maintain(now());
        assert_eq!(report.evicted, 1);
        assert!(cache.get("low-old").is_none());
        assert!(cache.get("low-newer").is_some());
        assert!(cache.get("high").is_some());
    }

    #[test]
    fn session_window_entries_are_never_evicted() {
        let mut cache = SmartCache::new(config(1));
        cache.preload("a", 1, 0, 86_400, now() - Duration::minutes(5));
        cache.preload("b", 1, 0, 86_400, now() - Duration::minutes(10));
        let report = cache.maintain(now());
        assert_eq!(report.evicted, 0);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn expired_entries_are_dropped() {
        let mut cache = SmartCache::new(CacheConfig::default());
        cache.preload("a", 1, 5, 10, now() - Duration::minutes(1));
        let report = cache.maintain(now());
        assert_eq!(report.expired, 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn rerank_promotes_busy_and_demotes_idle() {
        let mut cache = SmartCache::new(CacheConfig::default());
        let old = now() - Duration::hours(2);
        for key in ["a", "b", "c", "d"] {
            cache.preload(key, 1, 5, 86_400, old);
        }
        cache.record_access("a", old);
        cache.record_access("a", old);
        cache.record_access("b", old);

        let report = cache.maintain(now());
        assert_eq!(report.promoted, 1);
        assert_eq!(report.demoted, 2);
        assert_eq!(cache.get("a").unwrap().priority, 6);
        assert_eq!(cache.get("b").unwrap().priority, 5);
        assert_eq!(cache.get("c").unwrap().priority, 4);
    }

    #[test]
    fn priority_shift_is_clamped() {
        let mut cache = SmartCache::new(CacheConfig::default());
        cache.preload("a", 1, 10, 60, now());
        cache.preload("b", 1, 0, 60, now());
        cache.shift_priorities(1);
        assert_eq!(cache.get("a").unwrap().priority, 10);
        cache.shift_priorities(-1);
        assert_eq!(cache.get("b").unwrap().priority, 0);
    }
}
