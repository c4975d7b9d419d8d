//! End-to-end read path over the fixture catalog and the score fixture.

use compass_core::config::GraphConfig;
use compass_core::models::{CandidateSource, RecommendationContext};
use compass_graph::scoring::{deduplicate, rank, score};
use compass_graph::{build_from_catalog, implementation_order, CatalogEntry, EntityStore, Recommender};

fn catalog_store() -> EntityStore {
    let entries: Vec<CatalogEntry> = test_fixtures::load_fixture("catalog/standards.json");
    let (store, skipped) = build_from_catalog(&entries);
    assert_eq!(skipped, 0);
    store
}

fn rust_backend() -> RecommendationContext {
    RecommendationContext {
        languages: vec!["rust".into()],
        project_type: Some("backend".into()),
        ..Default::default()
    }
}

// ─── Score fixture ───────────────────────────────────────────────────────────

#[test]
fn requires_edge_score_is_anchor_rate_times_strength_times_priority_weight() {
    let (store, _) = EntityStore::from_document(&test_fixtures::requires_pair());
    let config = GraphConfig::default();
    let a = store.node("A").unwrap();
    let b = store.node("B").unwrap();
    let edge = store.outgoing("A").remove(0);

    let s = score(a, Some(edge.strength), b, &config);
    assert!((s - 0.8 * 0.9 * config.priority_weight(b.priority)).abs() < 1e-12);
}

#[test]
fn requires_pair_recommends_b_through_a() {
    let (store, _) = EntityStore::from_document(&test_fixtures::requires_pair());
    let config = GraphConfig::default();
    let context = RecommendationContext {
        languages: vec!["rust".into()],
        frameworks: vec!["axum".into()],
        ..Default::default()
    };
    let recs = Recommender::new(&store, &config).recommend(&context);
    let b = recs.iter().find(|r| r.standard_id == "B").unwrap();
    assert!((b.confidence.value() - 0.8 * 0.9 * 0.8).abs() < 1e-12);
}

// ─── Catalog scenario ────────────────────────────────────────────────────────

#[test]
fn rust_backend_gets_api_design_and_its_neighbours() {
    let store = catalog_store();
    let config = GraphConfig::default();
    let recs = Recommender::new(&store, &config).recommend(&rust_backend());
    let ids: Vec<&str> = recs.iter().map(|r| r.standard_id.as_str()).collect();

    assert!(ids.contains(&"rust-api-design"));
    assert!(ids.contains(&"error-handling"));
    assert!(ids.contains(&"api-documentation"));
    assert!(!ids.contains(&"axum"), "technology nodes are anchors only");

    let api = recs.iter().find(|r| r.standard_id == "rust-api-design").unwrap();
    assert!(api.sources.contains(&CandidateSource::Relevance));
    assert!(api.sources.contains(&CandidateSource::Expansion));
    assert_eq!(api.dependencies, vec!["error-handling".to_string()]);
}

#[test]
fn implementation_order_puts_requirements_first() {
    let store = catalog_store();
    let config = GraphConfig::default();
    let recs = Recommender::new(&store, &config).recommend(&rust_backend());
    let order = implementation_order(&store, &recs);

    let pos = |id: &str| order.iter().position(|o| o == id).unwrap();
    assert!(pos("error-handling") < pos("rust-api-design"));
    assert_eq!(order.len(), recs.len());
}

#[test]
fn existing_conflicting_standard_blocks_recommendation() {
    let store = catalog_store();
    let config = GraphConfig::default();
    let context = RecommendationContext {
        security_requirements: vec!["authentication".into()],
        project_type: Some("backend".into()),
        existing_standards: vec!["session-cookies-legacy".into()],
        ..Default::default()
    };
    let recs = Recommender::new(&store, &config).recommend(&context);
    assert!(recs.iter().all(|r| r.standard_id != "auth-hardening"));
}

#[test]
fn recommending_twice_is_deterministic() {
    let store = catalog_store();
    let config = GraphConfig::default();
    let recommender = Recommender::new(&store, &config);
    assert_eq!(
        recommender.recommend(&rust_backend()),
        recommender.recommend(&rust_backend())
    );
}

// ─── Dedup + rank ────────────────────────────────────────────────────────────

#[test]
fn dedup_keeps_point_nine_over_point_six() {
    let store = catalog_store();
    let config = GraphConfig::default();
    let mut recs = Recommender::new(&store, &config).recommend(&rust_backend());
    let mut low = recs[0].clone();
    low.confidence = 0.6.into();
    low.reasoning = vec!["weak signal".into()];
    recs[0].confidence = 0.9.into();

    let merged = deduplicate(vec![low, recs[0].clone()]);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].confidence.value(), 0.9);
    assert!(merged[0].reasoning.contains(&"weak signal".to_string()));

    let before = recs.clone();
    let _ = rank(&recs, &config);
    assert_eq!(recs, before);
}

// ─── Hand-written graphs ─────────────────────────────────────────────────────

#[test]
fn mixed_case_tags_in_a_loaded_graph_still_match() {
    let raw = r#"{
        "nodes": [
            {"id": "auth", "node_type": "standard", "category": "Security",
             "tags": ["Rust", "Authentication"], "priority": 9}
        ],
        "edges": [],
        "metadata": {"last_updated": "2024-03-04T09:00:00Z", "total_nodes": 1, "total_edges": 0}
    }"#;
    let doc: compass_core::models::GraphDocument = serde_json::from_str(raw).unwrap();
    let (store, _) = EntityStore::from_document(&doc);
    let context = RecommendationContext {
        languages: vec!["rust".into()],
        security_requirements: vec!["authentication".into()],
        ..Default::default()
    };

    let relevant = compass_graph::find_relevant(&store, &context, &GraphConfig::default());
    assert_eq!(relevant.len(), 1);
    let reasons = &relevant[0].reasons;
    assert!(reasons.iter().any(|r| r == "matches project language"));
    assert!(reasons.iter().any(|r| r == "addresses security requirements"));

    let reloaded = EntityStore::from_document(&store.to_document(test_fixtures::base_time())).0;
    assert_eq!(reloaded.node("auth").unwrap().category.as_deref(), Some("security"));
}
