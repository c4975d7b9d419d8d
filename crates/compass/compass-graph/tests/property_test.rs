//! Property tests for weight bounds and feedback monotonicity.

use proptest::prelude::*;

use compass_core::graph::{GraphEdge, GraphNode, NodeType, Relationship};
use compass_graph::{learn_from_feedback, EntityStore, FeedbackOutcome};

fn outcome() -> impl Strategy<Value = FeedbackOutcome> {
    prop_oneof![Just(FeedbackOutcome::Positive), Just(FeedbackOutcome::Negative)]
}

fn pair(rate: f64, strength: f64) -> EntityStore {
    let mut store = EntityStore::new();
    store.upsert_node(GraphNode::new("a", NodeType::Standard));
    store.upsert_node(GraphNode::new("b", NodeType::Standard).with_success_rate(rate));
    store
        .add_edge(GraphEdge::new("a", "b", Relationship::Requires, strength))
        .unwrap();
    store
}

proptest! {
    #[test]
    fn rates_and_strengths_stay_in_unit_interval(
        rate in 0.0f64..=1.0,
        strength in 0.0f64..=1.0,
        outcomes in proptest::collection::vec(outcome(), 0..60),
        delta in 0.0f64..0.5,
    ) {
        let mut store = pair(rate, strength);
        for o in outcomes {
            learn_from_feedback(&mut store, "b", o, delta);
        }
        let b = store.node("b").unwrap();
        prop_assert!((0.0..=1.0).contains(&b.success_rate.value()));
        for e in store.edges() {
            prop_assert!((0.0..=1.0).contains(&e.strength.value()));
        }
    }

    #[test]
    fn positive_feedback_never_lowers_rate(rate in 0.0f64..=1.0) {
        let mut store = pair(rate, 0.5);
        let before = store.node("b").unwrap().success_rate;
        let after = learn_from_feedback(&mut store, "b", FeedbackOutcome::Positive, 0.05)
            .unwrap()
            .success_rate;
        prop_assert!(after >= before);
    }

    #[test]
    fn negative_feedback_never_raises_rate(rate in 0.0f64..=1.0) {
        let mut store = pair(rate, 0.5);
        let before = store.node("b").unwrap().success_rate;
        let after = learn_from_feedback(&mut store, "b", FeedbackOutcome::Negative, 0.05)
            .unwrap()
            .success_rate;
        prop_assert!(after <= before);
    }

    #[test]
    fn usage_frequency_is_monotone(outcomes in proptest::collection::vec(outcome(), 0..40)) {
        let mut store = pair(0.5, 0.5);
        let mut last = 0;
        for o in outcomes {
            learn_from_feedback(&mut store, "b", o, 0.05);
            let now = store.node("b").unwrap().usage_frequency;
            prop_assert!(now >= last);
            last = now;
        }
    }
}
