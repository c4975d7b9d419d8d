use crate::errors::CompassResult;
use crate::models::{CacheDocument, GraphDocument, HistoryDocument};

/// Persistence for the three logical stores.
///
/// `load_*` returns `Ok(None)` when nothing has been persisted yet.
pub trait IStateStore: Send + Sync {
    fn load_graph(&self) -> CompassResult<Option<GraphDocument>>;
    fn save_graph(&self, doc: &GraphDocument) -> CompassResult<()>;

    fn load_history(&self) -> CompassResult<Option<HistoryDocument>>;
    fn save_history(&self, doc: &HistoryDocument) -> CompassResult<()>;

    fn load_cache(&self) -> CompassResult<Option<CacheDocument>>;
    fn save_cache(&self, doc: &CacheDocument) -> CompassResult<()>;
}
