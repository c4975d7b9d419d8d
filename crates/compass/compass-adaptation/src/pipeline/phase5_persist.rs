//! Phase 5: write all three documents.

use chrono::{DateTime, Utc};

use compass_core::errors::CompassResult;
use compass_core::traits::IStateStore;

use crate::state::AdaptiveState;

/// Save graph, history, and cache. Stops at the first failure; the next
/// cycle rewrites everything.
pub fn persist(state: &AdaptiveState, store: &dyn IStateStore, now: DateTime<Utc>) -> CompassResult<()> {
    {
        let _span = compass_observability::persistence_span!("graph").entered();
        store.save_graph(&state.graph_document(now))?;
    }
    {
        let _span = compass_observability::persistence_span!("history").entered();
        store.save_history(&state.history_document())?;
    }
    let _span = compass_observability::persistence_span!("cache").entered();
    store.save_cache(&state.cache_document(now))?;
    Ok(())
}
