//! In-memory [`IStateStore`] for tests and ephemeral engines.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use compass_core::errors::{CompassResult, StorageError};
use compass_core::models::{CacheDocument, GraphDocument, HistoryDocument};
use compass_core::traits::IStateStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    graph: Mutex<Option<GraphDocument>>,
    history: Mutex<Option<HistoryDocument>>,
    cache: Mutex<Option<CacheDocument>>,
    fail_writes: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated with a graph document.
    pub fn with_graph(doc: GraphDocument) -> Self {
        let store = Self::new();
        if let Ok(mut slot) = store.graph.lock() {
            *slot = Some(doc);
        }
        store
    }

    /// Make every subsequent save fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves across all documents.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn load<T: Clone>(slot: &Mutex<Option<T>>, name: &str) -> CompassResult<Option<T>> {
        let guard = slot.lock().map_err(|_| poisoned(name))?;
        Ok(guard.clone())
    }

    fn save<T: Clone>(&self, slot: &Mutex<Option<T>>, name: &str, doc: &T) -> CompassResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io {
                path: format!("memory://{name}"),
                reason: "writes disabled".to_string(),
            }
            .into());
        }
        let mut guard = slot.lock().map_err(|_| poisoned(name))?;
        *guard = Some(doc.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn poisoned(name: &str) -> StorageError {
    StorageError::Io {
        path: format!("memory://{name}"),
        reason: "lock poisoned".to_string(),
    }
}

impl IStateStore for MemoryStore {
    fn load_graph(&self) -> CompassResult<Option<GraphDocument>> {
        Self::load(&self.graph, "graph")
    }

    fn save_graph(&self, doc: &GraphDocument) -> CompassResult<()> {
        self.save(&self.graph, "graph", doc)
    }

    fn load_history(&self) -> CompassResult<Option<HistoryDocument>> {
        Self::load(&self.history, "history")
    }

    fn save_history(&self, doc: &HistoryDocument) -> CompassResult<()> {
        self.save(&self.history, "history", doc)
    }

    fn load_cache(&self) -> CompassResult<Option<CacheDocument>> {
        Self::load(&self.cache, "cache")
    }

    fn save_cache(&self, doc: &CacheDocument) -> CompassResult<()> {
        self.save(&self.cache, "cache", doc)
    }
}
