//! The mutable world one adaptation cycle works on.

use chrono::{DateTime, Utc};

use compass_core::config::CompassConfig;
use compass_core::constants::DOCUMENT_VERSION;
use compass_core::models::{CacheDocument, GraphDocument, HistoryDocument, Insight, LoadingPriors};
use compass_core::traits::IStateStore;
use compass_graph::EntityStore;
use compass_prediction::SmartCache;
use compass_storage::{HistoryLimits, HistoryLog};

/// Graph, history, cache, and priors plus the insights of the latest cycle.
///
/// `version` increases on every committed mutation; readers key memoized
/// results on it.
#[derive(Debug, Clone)]
pub struct AdaptiveState {
    pub version: u64,
    pub graph: EntityStore,
    pub history: HistoryLog,
    pub cache: SmartCache,
    pub priors: LoadingPriors,
    pub insights: Vec<Insight>,
    pub cycles: u64,
    pub last_cycle: Option<DateTime<Utc>>,
}

/// What happened while loading persisted state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub graph_loaded: bool,
    pub history_loaded: bool,
    pub cache_loaded: bool,
    pub skipped_edges: usize,
    /// Documents that failed to load and were replaced by empty state.
    pub failures: Vec<String>,
}

impl AdaptiveState {
    pub fn empty(config: &CompassConfig) -> Self {
        Self {
            version: 0,
            graph: EntityStore::new(),
            history: HistoryLog::new(HistoryLimits::from(&config.storage)),
            cache: SmartCache::new(config.cache.clone()),
            priors: LoadingPriors::default(),
            insights: Vec::new(),
            cycles: 0,
            last_cycle: None,
        }
    }

    /// Build state from persisted documents.
    pub fn from_documents(
        config: &CompassConfig,
        graph: Option<GraphDocument>,
        history: Option<HistoryDocument>,
        cache: Option<CacheDocument>,
    ) -> (Self, usize) {
        let mut state = Self::empty(config);
        let mut skipped = 0;
        if let Some(doc) = graph {
            let (store, dropped) = EntityStore::from_document(&doc);
            state.graph = store;
            skipped = dropped;
        }
        if let Some(doc) = history {
            state.history = HistoryLog::from_document(doc, HistoryLimits::from(&config.storage));
        }
        if let Some(doc) = cache {
            state.last_cycle = doc.last_updated;
            state.priors = doc.priors;
            state.cache = SmartCache::from_entries(config.cache.clone(), doc.entries);
        }
        (state, skipped)
    }

    /// Load every document from `store`. Read failures degrade to empty
    /// state for that document and are listed in the report.
    pub fn load(config: &CompassConfig, store: &dyn IStateStore) -> (Self, LoadReport) {
        let mut report = LoadReport::default();
        let graph = match store.load_graph() {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(error = %e, "graph unreadable, starting empty");
                report.failures.push(format!("graph: {e}"));
                None
            }
        };
        let history = match store.load_history() {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(error = %e, "history unreadable, starting empty");
                report.failures.push(format!("history: {e}"));
                None
            }
        };
        let cache = match store.load_cache() {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(error = %e, "cache unreadable, starting empty");
                report.failures.push(format!("cache: {e}"));
                None
            }
        };
        report.graph_loaded = graph.is_some();
        report.history_loaded = history.is_some();
        report.cache_loaded = cache.is_some();

        let (state, skipped) = Self::from_documents(config, graph, history, cache);
        report.skipped_edges = skipped;
        (state, report)
    }

    pub fn graph_document(&self, now: DateTime<Utc>) -> GraphDocument {
        self.graph.to_document(now)
    }

    pub fn history_document(&self) -> HistoryDocument {
        self.history.to_document()
    }

    pub fn cache_document(&self, now: DateTime<Utc>) -> CacheDocument {
        CacheDocument {
            version: DOCUMENT_VERSION,
            entries: self.cache.entries(),
            priors: self.priors.clone(),
            last_updated: Some(now),
        }
    }

    /// Mark the state as changed.
    pub fn bump(&mut self) -> u64 {
        self.version += 1;
        self.version
    }
}
