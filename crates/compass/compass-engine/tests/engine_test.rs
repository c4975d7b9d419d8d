//! Engine lifecycle, read path, ingestion, and snapshot isolation.

use std::sync::Arc;

use compass_core::config::CompassConfig;
use compass_core::models::{
    ExperienceLevel, FeedbackRecord, Interaction, LoadingContext, PerformanceMetric,
    RecommendationContext, Sentiment,
};
use compass_core::traits::IStateStore;
use compass_engine::{CatalogEntry, CompassEngine, FeedbackOutcome};
use compass_storage::{JsonFileStore, MemoryStore};

fn catalog() -> Vec<CatalogEntry> {
    test_fixtures::load_fixture("catalog/standards.json")
}

fn engine_with(store: Arc<dyn IStateStore>) -> CompassEngine {
    let engine = CompassEngine::init(CompassConfig::default(), store).unwrap();
    engine.seed_catalog(&catalog());
    engine
}

fn engine() -> CompassEngine {
    engine_with(Arc::new(MemoryStore::new()))
}

fn rust_backend() -> RecommendationContext {
    RecommendationContext {
        languages: vec!["Rust".into()],
        project_type: Some("backend".into()),
        ..Default::default()
    }
}

// ─── Lifecycle ───────────────────────────────────────────────────────────────

#[test]
fn invalid_config_is_rejected_at_init() {
    let mut config = CompassConfig::default();
    config.graph.feedback_delta = 2.0;
    assert!(CompassEngine::init(config, Arc::new(MemoryStore::new())).is_err());
}

#[test]
fn reseeding_adds_nothing_and_keeps_learned_weights() {
    let engine = engine();
    let nodes = engine.snapshot().graph.node_count();
    engine
        .learn_from_feedback("error-handling", FeedbackOutcome::Positive)
        .unwrap();
    let learned = engine.snapshot();

    assert_eq!(engine.seed_catalog(&catalog()), 0);
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.graph.node_count(), nodes);
    assert_eq!(
        snapshot.graph.node("error-handling").unwrap().success_rate,
        learned.graph.node("error-handling").unwrap().success_rate
    );
    assert_eq!(snapshot.graph.edges(), learned.graph.edges());
}

#[test]
fn shutdown_persists_and_reinit_restores() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn IStateStore> = Arc::new(JsonFileStore::open(dir.path()).unwrap());
    let engine = engine_with(Arc::clone(&store));
    engine.record_interaction(Interaction::new("query"));
    engine
        .learn_from_feedback("rust-api-design", FeedbackOutcome::Negative)
        .unwrap();
    engine.shutdown().unwrap();
    assert!(!engine.record_interaction(Interaction::new("late")));

    let restored = CompassEngine::init(CompassConfig::default(), store).unwrap();
    let snapshot = restored.snapshot();
    assert_eq!(snapshot.graph.node_count(), engine.snapshot().graph.node_count());
    assert_eq!(snapshot.history.interactions().len(), 1);
    let rate = snapshot.graph.node("rust-api-design").unwrap().success_rate.value();
    assert!(rate < 0.5);
}

#[test]
fn corrupt_graph_degrades_to_empty_state() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("graph.json"), "{ not json").unwrap();
    let store = Arc::new(JsonFileStore::open(dir.path()).unwrap());

    let engine = CompassEngine::init(CompassConfig::default(), store).unwrap();
    assert_eq!(engine.snapshot().graph.node_count(), 0);
    let degradations = engine.degradations();
    assert_eq!(degradations.len(), 1);
    assert_eq!(degradations[0].component, "state_load");
    assert!(engine.get_recommendations(&rust_backend()).is_empty());
}

// ─── Read path ───────────────────────────────────────────────────────────────

#[test]
fn recommendations_are_memoized_per_state_version() {
    let engine = engine();
    let first = engine.get_recommendations(&rust_backend());
    assert!(!first.is_empty());
    assert_eq!(engine.get_recommendations(&rust_backend()), first);

    let version = engine.state_version();
    engine
        .learn_from_feedback(&first[0].standard_id, FeedbackOutcome::Negative)
        .unwrap();
    assert!(engine.state_version() > version);
    let after = engine.get_recommendations(&rust_backend());
    let before_conf = first[0].confidence.value();
    let after_conf = after
        .iter()
        .find(|r| r.standard_id == first[0].standard_id)
        .map(|r| r.confidence.value())
        .unwrap_or(0.0);
    assert!(after_conf <= before_conf);
}

#[test]
fn implementation_order_covers_every_recommendation() {
    let engine = engine();
    let recs = engine.get_recommendations(&rust_backend());
    let order = engine.implementation_order(&rust_backend());
    assert_eq!(order.len(), recs.len());
    let pos = |id: &str| order.iter().position(|o| o == id).unwrap();
    assert!(pos("error-handling") < pos("rust-api-design"));
}

#[test]
fn unknown_feedback_target_is_a_no_op() {
    let engine = engine();
    let version = engine.state_version();
    assert!(engine
        .learn_from_feedback("does-not-exist", FeedbackOutcome::Positive)
        .is_none());
    assert_eq!(engine.state_version(), version);
}

#[test]
fn reads_keep_their_snapshot_across_a_cycle() {
    let engine = engine();
    let held = engine.snapshot();
    for i in test_fixtures::with_standards(
        test_fixtures::cohort(6, "web", ExperienceLevel::Beginner, 0.3, true),
        &["rust-api-design"],
    ) {
        engine.record_interaction(i);
    }
    engine.run_adaptation_cycle().unwrap();
    assert_eq!(held.cycles, 0);
    assert!(held.history.interactions().is_empty());
    assert_eq!(engine.snapshot().cycles, 1);
    assert_eq!(engine.snapshot().history.interactions().len(), 6);
}

// ─── Ingestion & adaptation ──────────────────────────────────────────────────

#[test]
fn queued_feedback_waits_for_the_cycle() {
    let engine = engine();
    let before = engine.snapshot().graph.node("error-handling").unwrap().success_rate;
    for _ in 0..3 {
        engine.record_feedback(FeedbackRecord::new(
            Some("error-handling".into()),
            Sentiment::Negative,
        ));
    }
    assert_eq!(engine.queued_feedback(), 3);
    assert_eq!(
        engine.snapshot().graph.node("error-handling").unwrap().success_rate,
        before
    );

    let report = engine.run_adaptation_cycle().unwrap();
    assert_eq!(report.feedback_applied, 3);
    assert_eq!(engine.queued_feedback(), 0);
    assert!(engine.snapshot().graph.node("error-handling").unwrap().success_rate < before);
}

#[test]
fn boundary_rejects_malformed_events() {
    let engine = engine();
    assert!(!engine.record_interaction(Interaction::new("  ")));
    assert!(!engine.record_metric(PerformanceMetric::new(f64::NAN, 0.0, 0.1)));
    assert!(engine.record_metric(PerformanceMetric::new(120.0, 0.01, 0.4)));
}

#[test]
fn loading_plans_feed_the_cache_through_the_cycle() {
    let engine = engine();
    let ctx = LoadingContext::default();

    let plan = engine.optimize_loading(&["rust-api-design".to_string()], &ctx);
    assert!(plan.strategy.priority_items.contains(&"rust-api-design".to_string()));
    let preloaded: Vec<&str> = plan.preload.iter().map(|c| c.item.as_str()).collect();
    assert_eq!(preloaded, vec!["error-handling"]);
    assert!(engine.snapshot().cache.is_empty(), "reads never mutate the cache");

    let report = engine.run_adaptation_cycle().unwrap();
    assert_eq!(report.cache_ops_replayed, 1);
    let snapshot = engine.snapshot();
    let entry = snapshot.cache.get("error-handling").unwrap();
    assert_eq!(entry.usage_count, 0);

    engine.optimize_loading(&["error-handling".to_string()], &ctx);
    engine.run_adaptation_cycle().unwrap();
    assert_eq!(
        engine.snapshot().cache.get("error-handling").unwrap().usage_count,
        1
    );
}

#[test]
fn concurrent_readers_see_consistent_snapshots() {
    let engine = Arc::new(engine());
    std::thread::scope(|scope| {
        for _ in 0..4 {
            let engine = Arc::clone(&engine);
            scope.spawn(move || {
                for _ in 0..50 {
                    let snapshot = engine.snapshot();
                    let recs = engine.get_recommendations(&rust_backend());
                    assert!(!recs.is_empty());
                    assert_eq!(snapshot.graph.node_count(), snapshot.graph.nodes().len());
                }
            });
        }
        let writer = Arc::clone(&engine);
        scope.spawn(move || {
            for i in 0..5 {
                writer.record_interaction(Interaction::new(format!("step-{i}")));
                writer
                    .learn_from_feedback("error-handling", FeedbackOutcome::Positive)
                    .unwrap();
                writer.run_adaptation_cycle().unwrap();
            }
        });
    });
    assert_eq!(engine.snapshot().cycles, 5);
}
