//! CompassEngine: the injected service instance behind every public
//! operation.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use tokio::sync::Notify;

use compass_adaptation::{AdaptationEngine, AdaptiveState, CycleReport};
use compass_core::config::CompassConfig;
use compass_core::errors::{CompassError, CompassResult, GraphError};
use compass_core::models::{
    CacheOp, FeedbackRecord, Interaction, LoadingContext, LoadingOptimization, PerformanceMetric,
    Recommendation, RecommendationContext,
};
use compass_core::traits::IStateStore;
use compass_graph::{
    build_from_catalog, implementation_order, learn_from_feedback, CatalogEntry, FeedbackOutcome,
    FeedbackResult, Recommender,
};
use compass_observability::tracing_setup::events;
use compass_observability::{DegradationEvent, DegradationTracker};
use compass_prediction::LoadingPlanner;
use compass_storage::{HistoryLimits, JsonFileStore, MemoryStore};

use crate::inbox::Inbox;
use crate::memo::RecommendationMemo;
use crate::state_cell::StateCell;

const COMPONENT_LOAD: &str = "state_load";
const COMPONENT_PERSIST: &str = "persistence";
const COMPONENT_STORE: &str = "state_store";

pub struct CompassEngine {
    config: CompassConfig,
    limits: HistoryLimits,
    store: Arc<dyn IStateStore>,
    state: StateCell,
    inbox: Mutex<Inbox>,
    adaptation: AdaptationEngine,
    memo: RecommendationMemo,
    degradation: Mutex<DegradationTracker>,
    wake: Arc<Notify>,
    shut_down: AtomicBool,
}

impl CompassEngine {
    /// Validate the config and load persisted state from `store`. Documents
    /// that fail to load degrade to empty state.
    pub fn init(config: CompassConfig, store: Arc<dyn IStateStore>) -> CompassResult<Self> {
        config.validate()?;
        let (state, report) = AdaptiveState::load(&config, store.as_ref());

        let mut degradation = DegradationTracker::new();
        for failure in &report.failures {
            degradation.record(COMPONENT_LOAD, failure, "empty state");
        }
        tracing::info!(
            nodes = state.graph.node_count(),
            edges = state.graph.edge_count(),
            patterns = state.history.patterns().len(),
            skipped_edges = report.skipped_edges,
            cycles = state.cycles,
            "compass engine initialized"
        );

        Ok(Self {
            limits: HistoryLimits::from(&config.storage),
            memo: RecommendationMemo::new(config.cache.memo_capacity),
            adaptation: AdaptationEngine::new(config.clone()),
            config,
            store,
            state: StateCell::new(state),
            inbox: Mutex::new(Inbox::default()),
            degradation: Mutex::new(degradation),
            wake: Arc::new(Notify::new()),
            shut_down: AtomicBool::new(false),
        })
    }

    /// Engine over JSON documents in `config.storage.state_dir`, falling
    /// back to in-memory state if the directory cannot be opened.
    pub fn open(config: CompassConfig) -> CompassResult<Self> {
        let dir = config.storage.state_dir.clone();
        match JsonFileStore::open(&dir) {
            Ok(store) => Self::init(config, Arc::new(store)),
            Err(e) => {
                let engine = Self::init(config, Arc::new(MemoryStore::new()))?;
                engine.degrade(COMPONENT_STORE, &e.to_string(), "in-memory state");
                Ok(engine)
            }
        }
    }

    /// [`open`](Self::open) with configuration read from a TOML file
    /// (defaults if missing or invalid).
    pub fn open_with_config_file(path: &Path) -> CompassResult<Self> {
        Self::open(CompassConfig::load_or_default(path))
    }

    pub fn config(&self) -> &CompassConfig {
        &self.config
    }

    /// The committed state. Holding it never blocks writers.
    pub fn snapshot(&self) -> Arc<AdaptiveState> {
        self.state.snapshot()
    }

    pub fn state_version(&self) -> u64 {
        self.state.snapshot().version
    }

    pub fn degradations(&self) -> Vec<DegradationEvent> {
        self.degradation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .events()
            .to_vec()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }

    pub(crate) fn wake_handle(&self) -> Arc<Notify> {
        Arc::clone(&self.wake)
    }

    fn degrade(&self, component: &str, failure: &str, fallback: &str) {
        self.degradation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(component, failure, fallback);
    }

    fn recover(&self, component: &str) {
        self.degradation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .mark_recovered(component);
    }

    fn with_inbox<R>(&self, f: impl FnOnce(&mut Inbox) -> R) -> R {
        let mut inbox = self.inbox.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut inbox)
    }

    // ─── Read path ───────────────────────────────────────────────────────────

    /// Ranked recommendations for `context`, memoized per committed state.
    pub fn get_recommendations(&self, context: &RecommendationContext) -> Vec<Recommendation> {
        let snapshot = self.state.snapshot();
        self.recommend_on(&snapshot, context).as_ref().clone()
    }

    fn recommend_on(
        &self,
        snapshot: &AdaptiveState,
        context: &RecommendationContext,
    ) -> Arc<Vec<Recommendation>> {
        let ctx = context.normalized();
        let _span = compass_observability::recommendation_span!(
            ctx.project_type.as_deref(),
            ctx.experience_level
        )
        .entered();
        if ctx.is_from_newer_schema() {
            tracing::warn!(version = ctx.version, "context from a newer schema, unknown fields ignored");
        }

        let key = RecommendationMemo::key(snapshot.version, &ctx);
        if let Some(hit) = key.as_deref().and_then(|k| self.memo.get(k)) {
            events::recommendations_served(hit.len(), true, snapshot.version);
            return hit;
        }

        let recommendations = Arc::new(
            Recommender::new(&snapshot.graph, &self.config.graph)
                .with_patterns(snapshot.history.patterns())
                .with_insights(&snapshot.insights)
                .recommend(&ctx),
        );
        if let Some(key) = key {
            self.memo.insert(key, Arc::clone(&recommendations));
        }
        events::recommendations_served(recommendations.len(), false, snapshot.version);
        recommendations
    }

    /// Recommended ids for `context` ordered so prerequisites come first.
    pub fn implementation_order(&self, context: &RecommendationContext) -> Vec<String> {
        let snapshot = self.state.snapshot();
        let recommendations = self.recommend_on(&snapshot, context);
        implementation_order(&snapshot.graph, &recommendations)
    }

    /// Plan how to load `requested`. Cache accesses and chosen preloads are
    /// queued for the next maintenance pass once the plan is complete.
    pub fn optimize_loading(
        &self,
        requested: &[String],
        context: &LoadingContext,
    ) -> LoadingOptimization {
        let now = Utc::now();
        let snapshot = self.state.snapshot();
        let _span = compass_observability::loading_span!(requested.len()).entered();

        let plan = LoadingPlanner {
            store: &snapshot.graph,
            loading_config: &self.config.loading,
            cache_config: &self.config.cache,
            priors: &snapshot.priors,
            cache: &snapshot.cache,
        }
        .plan(requested, context, now);

        if !plan.constraints_satisfied {
            events::constraints_unsatisfied(
                plan.estimated_tokens,
                context.constraints.max_tokens,
                plan.estimated_time_ms,
            );
        }

        let accessed: Vec<&String> = plan
            .strategy
            .priority_items
            .iter()
            .filter(|item| snapshot.cache.is_cached(item, now))
            .collect();
        self.with_inbox(|inbox| {
            for key in accessed {
                inbox.push_cache_op(
                    CacheOp::Access {
                        key: key.clone(),
                        at: now,
                    },
                    &self.limits,
                );
            }
            for candidate in &plan.preload {
                inbox.push_cache_op(
                    CacheOp::Preload {
                        key: candidate.item.clone(),
                        size: candidate.estimated_bytes,
                        priority: self.config.cache.preload_priority,
                        ttl_secs: plan.strategy.cache_duration_secs,
                        at: now,
                    },
                    &self.limits,
                );
            }
        });
        plan
    }

    // ─── Ingestion ───────────────────────────────────────────────────────────

    /// Queue an interaction for the next cycle. Returns `false` if it was
    /// rejected at the boundary.
    pub fn record_interaction(&self, interaction: Interaction) -> bool {
        if self.rejecting("interaction") {
            return false;
        }
        if interaction.interaction_type.trim().is_empty() {
            tracing::warn!("interaction without a type rejected");
            return false;
        }
        self.with_inbox(|inbox| inbox.push_interaction(interaction, &self.limits));
        true
    }

    /// Queue feedback for the next cycle. Wakes the scheduler once queued
    /// feedback reaches the configured trigger.
    pub fn record_feedback(&self, record: FeedbackRecord) -> bool {
        if self.rejecting("feedback") {
            return false;
        }
        let queued = self.with_inbox(|inbox| {
            inbox.push_feedback(record, &self.limits);
            inbox.pending_feedback()
        });
        let trigger = self.config.adaptation.feedback_trigger;
        if trigger > 0 && queued >= trigger {
            tracing::debug!(queued, "feedback trigger reached, waking scheduler");
            self.wake.notify_one();
        }
        true
    }

    pub fn record_metric(&self, metric: PerformanceMetric) -> bool {
        if self.rejecting("metric") {
            return false;
        }
        let values = [metric.response_time_ms, metric.error_rate, metric.memory_usage];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            tracing::warn!("metric with non-finite or negative values rejected");
            return false;
        }
        self.with_inbox(|inbox| inbox.push_metric(metric, &self.limits));
        true
    }

    fn rejecting(&self, kind: &str) -> bool {
        let closed = self.is_shut_down();
        if closed {
            tracing::warn!(kind, "engine shut down, event dropped");
        }
        closed
    }

    /// Queued events not yet drained into the history.
    pub fn queued_feedback(&self) -> usize {
        self.with_inbox(|inbox| inbox.pending_feedback())
    }

    // ─── Writes ──────────────────────────────────────────────────────────────

    /// Apply feedback to one node immediately through the writer gate.
    /// Unknown ids are a logged no-op returning `None`.
    pub fn learn_from_feedback(
        &self,
        node_id: &str,
        outcome: FeedbackOutcome,
    ) -> Option<FeedbackResult> {
        let delta = self.config.graph.feedback_delta;
        let result = self.state.write(|state| {
            let result = learn_from_feedback(&mut state.graph, node_id, outcome, delta);
            if result.is_some() {
                state.bump();
            }
            result
        });
        if let Some(applied) = &result {
            events::feedback_applied(
                &applied.node_id,
                applied.success_rate.value(),
                applied.edges_adjusted,
            );
            self.memo.clear();
        }
        result
    }

    /// Add catalog nodes and edges that are not in the graph yet. Existing
    /// nodes and edge strengths keep their learned values. Returns the number
    /// of nodes added.
    pub fn seed_catalog(&self, entries: &[CatalogEntry]) -> usize {
        let (catalog, skipped) = build_from_catalog(entries);
        if skipped > 0 {
            tracing::warn!(skipped, "catalog edges skipped");
        }
        let (added, added_edges) = self.state.write(|state| {
            let mut added = 0;
            for node in catalog.nodes() {
                if !state.graph.contains(&node.id) {
                    state.graph.upsert_node(node.clone());
                    added += 1;
                }
            }
            let mut edges = 0;
            for edge in catalog.edges() {
                match state.graph.add_edge(edge) {
                    Ok(()) => edges += 1,
                    // Existing triples keep their learned strength.
                    Err(CompassError::Graph(GraphError::DuplicateEdge { from, to, .. })) => {
                        tracing::debug!(%from, %to, "catalog edge already present");
                    }
                    Err(e) => tracing::warn!(error = %e, "catalog edge skipped"),
                }
            }
            state.bump();
            (added, edges)
        });
        self.memo.clear();
        tracing::info!(added, edges = added_edges, "catalog seeded");
        added
    }

    /// Drain the inbox and run one adaptation cycle, committing the result by
    /// a single snapshot swap. Readers keep serving the previous snapshot
    /// until then.
    pub fn run_adaptation_cycle(&self) -> CompassResult<CycleReport> {
        let gate = self.state.gate();
        let mut next = (*self.state.snapshot()).clone();
        self.with_inbox(|inbox| inbox.drain_into(&mut next.history));

        let result = self
            .adaptation
            .run_cycle(&mut next, self.store.as_ref(), Utc::now());
        if result.is_err() {
            next.bump();
        }
        self.state.swap(&gate, next);
        drop(gate);
        let report = result?;
        self.memo.clear();

        match &report.persistence_error {
            Some(error) => self.degrade(COMPONENT_PERSIST, error, "retry next cycle"),
            None => self.recover(COMPONENT_PERSIST),
        }
        Ok(report)
    }

    /// Whether a cycle is due now.
    pub fn cycle_due(&self) -> bool {
        let snapshot = self.state.snapshot();
        !self
            .adaptation
            .due(&snapshot, self.queued_feedback(), Utc::now())
            .is_empty()
    }

    /// Stop accepting events, fold the inbox into the history, and persist
    /// every document. Idempotent.
    pub fn shutdown(&self) -> CompassResult<()> {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.wake.notify_one();

        let gate = self.state.gate();
        let mut next = (*self.state.snapshot()).clone();
        let moved = self.with_inbox(|inbox| inbox.drain_into(&mut next.history));
        if moved > 0 {
            next.bump();
        }
        let now = Utc::now();
        let persisted = compass_adaptation::pipeline::phase5_persist::persist(
            &next,
            self.store.as_ref(),
            now,
        );
        self.state.swap(&gate, next);
        drop(gate);

        match persisted {
            Ok(()) => {
                tracing::info!(drained = moved, "compass engine shut down");
                Ok(())
            }
            Err(e) => {
                self.degrade(COMPONENT_PERSIST, &e.to_string(), "state lost on exit");
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for CompassEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompassEngine")
            .field("version", &self.state_version())
            .field("shut_down", &self.is_shut_down())
            .finish_non_exhaustive()
    }
}
