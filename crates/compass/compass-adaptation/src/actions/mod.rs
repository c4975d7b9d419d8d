//! Registered insight actions.
//!
//! Analyzers name their recommended actions; the registry maps each name to
//! a handler. Unknown names are reported, never silently dropped.

mod handlers;

use std::collections::BTreeMap;

use compass_analysis::actions as names;
use compass_core::config::CompassConfig;
use compass_core::errors::{CompassError, CompassResult};
use compass_core::models::{Interaction, LoadingPriors, RecommendedAction};
use compass_graph::EntityStore;
use compass_prediction::SmartCache;

/// Mutable view of the state an action may touch.
pub struct ActionContext<'a> {
    pub graph: &'a mut EntityStore,
    pub priors: &'a mut LoadingPriors,
    pub cache: &'a mut SmartCache,
    pub interactions: &'a [Interaction],
    pub config: &'a CompassConfig,
}

/// Applies one action. Returns the number of state changes made.
pub type ActionHandler =
    Box<dyn Fn(&mut ActionContext<'_>, &RecommendedAction) -> CompassResult<usize> + Send + Sync>;

/// Name → handler map.
pub struct ActionRegistry {
    handlers: BTreeMap<String, ActionHandler>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Registry with a handler for every action the built-in analyzers emit.
    pub fn standard() -> Self {
        Self::new()
            .with(names::BOOST_CACHE_PRIORITY, handlers::boost_cache_priority)
            .with(names::TIGHTEN_COMPRESSION, handlers::tighten_compression)
            .with(names::LIMIT_PRELOAD, handlers::limit_preload)
            .with(names::SIMPLIFY_FOR_LEVEL, handlers::simplify_for_level)
            .with(names::DEMOTE_TASK_STANDARDS, handlers::demote_task_standards)
            .with(
                names::DEMOTE_NEGATIVE_FEEDBACK_TARGETS,
                handlers::demote_negative_feedback_target,
            )
            .with(names::FLAG_ERROR_INVESTIGATION, handlers::flag_error_investigation)
    }

    pub fn with<F>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(&mut ActionContext<'_>, &RecommendedAction) -> CompassResult<usize>
            + Send
            + Sync
            + 'static,
    {
        self.register(name, handler);
        self
    }

    /// Register or replace the handler for `name`.
    pub fn register<F>(&mut self, name: &str, handler: F)
    where
        F: Fn(&mut ActionContext<'_>, &RecommendedAction) -> CompassResult<usize>
            + Send
            + Sync
            + 'static,
    {
        self.handlers.insert(name.to_string(), Box::new(handler));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub fn dispatch(
        &self,
        ctx: &mut ActionContext<'_>,
        action: &RecommendedAction,
    ) -> CompassResult<usize> {
        let handler = self
            .handlers
            .get(&action.action)
            .ok_or_else(|| CompassError::UnknownAction {
                name: action.action.clone(),
            })?;
        handler(ctx, action)
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
