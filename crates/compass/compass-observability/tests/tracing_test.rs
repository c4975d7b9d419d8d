//! Span macros and event helpers under a live subscriber.

use compass_observability::tracing_setup::spans::names;
use compass_observability::{init_tracing, init_tracing_with_filter, DegradationTracker};

#[test]
fn spans_carry_their_names() {
    init_tracing_with_filter("info");
    let level = "beginner";
    let span = compass_observability::recommendation_span!(Some("web"), level);
    assert_eq!(span.metadata().map(|m| m.name()), Some(names::RECOMMENDATION));
    let span = compass_observability::adaptation_span!(3u64);
    assert_eq!(span.metadata().map(|m| m.name()), Some(names::ADAPTATION));
    let span = compass_observability::loading_span!(12usize);
    assert_eq!(span.metadata().map(|m| m.name()), Some(names::LOADING));
}

#[test]
fn repeated_init_is_harmless() {
    init_tracing("info");
    init_tracing("debug");
    assert!(!init_tracing_with_filter("not a [valid filter"));
}

#[test]
fn degradation_events_serialize() {
    let mut tracker = DegradationTracker::new();
    tracker.record("persistence", "permission denied", "retry next cycle");
    let json = serde_json::to_value(tracker.events()).unwrap();
    assert_eq!(json[0]["fallback_used"], "retry next cycle");
    assert!(json[0]["recovered_at"].is_null());
}
