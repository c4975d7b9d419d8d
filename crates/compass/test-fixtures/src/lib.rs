//! Shared fixtures for Compass tests: JSON fixture loading plus builders for
//! interaction histories, feedback, metrics, and small graphs.

use std::path::PathBuf;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::de::DeserializeOwned;

use compass_core::constants::DOCUMENT_VERSION;
use compass_core::graph::{GraphEdge, GraphNode, NodeType, Rate, Relationship};
use compass_core::models::{
    ExperienceLevel, FeedbackRecord, GraphDocument, GraphMetadata, Interaction, PerformanceMetric,
    Sentiment,
};

/// Root directory of the fixture data.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Fixed reference instant so time-bucketed tests are deterministic.
/// 2024-03-04 09:00:00 UTC.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// One interaction per type, one minute apart, all successful, one session.
pub fn interaction_stream(types: &[&str]) -> Vec<Interaction> {
    types
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let mut interaction = Interaction::new(*kind);
            interaction.sequence = i as u64 + 1;
            interaction.timestamp = base_time() + Duration::minutes(i as i64);
            interaction.session_id = "s1".to_string();
            interaction.user_id = "u1".to_string();
            interaction.success = true;
            interaction
        })
        .collect()
}

/// `count` interactions of one project type and level with fixed
/// satisfaction and success.
pub fn cohort(
    count: usize,
    project_type: &str,
    level: ExperienceLevel,
    satisfaction: f64,
    success: bool,
) -> Vec<Interaction> {
    (0..count)
        .map(|i| {
            let mut interaction = Interaction::new("load");
            interaction.sequence = i as u64 + 1;
            interaction.timestamp = base_time() + Duration::minutes(i as i64);
            interaction.session_id = format!("s{i}");
            interaction.user_id = format!("u{i}");
            interaction.project_type = Some(project_type.to_string());
            interaction.experience_level = level;
            interaction.satisfaction = Some(Rate::new(satisfaction));
            interaction.success = success;
            interaction
        })
        .collect()
}

/// Give every interaction the same standards list.
pub fn with_standards(mut interactions: Vec<Interaction>, standards: &[&str]) -> Vec<Interaction> {
    for interaction in &mut interactions {
        interaction.standards = standards.iter().map(|s| s.to_string()).collect();
    }
    interactions
}

/// `positive` positive records followed by `negative` negative ones.
pub fn feedback_mix(target: Option<&str>, positive: usize, negative: usize) -> Vec<FeedbackRecord> {
    let sentiments = std::iter::repeat(Sentiment::Positive)
        .take(positive)
        .chain(std::iter::repeat(Sentiment::Negative).take(negative));
    sentiments
        .enumerate()
        .map(|(i, sentiment)| {
            let mut record = FeedbackRecord::new(target.map(str::to_string), sentiment);
            record.sequence = i as u64 + 1;
            record.timestamp = base_time() + Duration::minutes(i as i64);
            record
        })
        .collect()
}

/// `count` identical metric samples, one second apart.
pub fn metric_series(
    count: usize,
    response_time_ms: f64,
    error_rate: f64,
    memory_usage: f64,
) -> Vec<PerformanceMetric> {
    (0..count)
        .map(|i| {
            let mut metric = PerformanceMetric::new(response_time_ms, error_rate, memory_usage);
            metric.timestamp = base_time() + Duration::seconds(i as i64);
            metric
        })
        .collect()
}

/// Assemble a graph document from nodes and edges.
pub fn graph_document(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> GraphDocument {
    GraphDocument {
        metadata: GraphMetadata {
            last_updated: base_time(),
            total_nodes: nodes.len(),
            total_edges: edges.len(),
            version: DOCUMENT_VERSION,
        },
        nodes,
        edges,
    }
}

/// `A (success 0.8, tags rust+axum) -[requires 0.9]-> B (priority 7)`.
pub fn requires_pair() -> GraphDocument {
    graph_document(
        vec![
            GraphNode::new("A", NodeType::Standard)
                .with_success_rate(0.8)
                .with_priority(9)
                .with_tags(["rust", "axum"]),
            GraphNode::new("B", NodeType::Standard)
                .with_success_rate(0.6)
                .with_priority(7),
        ],
        vec![GraphEdge::new("A", "B", Relationship::Requires, 0.9)],
    )
}
