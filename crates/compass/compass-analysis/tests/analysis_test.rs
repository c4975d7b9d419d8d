//! Mining and analysis scenarios over fixture histories.

use proptest::prelude::*;

use compass_analysis::{merge_patterns, PatternMiner, SignalAnalyzers};
use compass_core::config::{AnalysisConfig, MiningConfig};
use compass_core::models::{ExperienceLevel, Impact, InsightType, Interaction, PatternType};
use compass_core::traits::AnalysisInput;

fn miner() -> PatternMiner {
    PatternMiner::new(MiningConfig::default(), 0.5)
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn nine_interactions_yield_one_sequential_pattern_of_frequency_three() {
    let history = test_fixtures::interaction_stream(&[
        "query", "load", "generate", "query", "load", "generate", "query", "load", "generate",
    ]);
    let sequential: Vec<_> = miner()
        .mine(&history)
        .into_iter()
        .filter(|p| p.pattern_type == PatternType::Sequential)
        .collect();
    assert_eq!(sequential.len(), 1);
    assert_eq!(sequential[0].frequency, 3);
}

#[test]
fn unhappy_beginner_cohort_yields_high_impact_behavior_insight() {
    let history = test_fixtures::cohort(5, "web", ExperienceLevel::Beginner, 0.4, true);
    let insights = SignalAnalyzers::standard(&AnalysisConfig::default()).run(&AnalysisInput {
        interactions: &history,
        ..Default::default()
    });
    let behavior: Vec<_> = insights
        .iter()
        .filter(|i| i.insight_type == InsightType::UserBehavior)
        .collect();
    assert_eq!(behavior.len(), 1);
    assert_eq!(behavior[0].impact_potential, Impact::High);
    assert_eq!(behavior[0].confidence.value(), 0.8);
}

#[test]
fn analyzers_combine_all_signal_kinds() {
    let history = test_fixtures::cohort(5, "web", ExperienceLevel::Beginner, 0.4, true);
    let feedback = test_fixtures::feedback_mix(Some("auth"), 1, 5);
    let mut metrics = test_fixtures::metric_series(20, 100.0, 0.0, 0.1);
    metrics.extend(test_fixtures::metric_series(10, 100.0, 0.3, 0.1));

    let insights = SignalAnalyzers::default().run(&AnalysisInput {
        interactions: &history,
        feedback: &feedback,
        metrics: &metrics,
    });
    let kinds: Vec<InsightType> = insights.iter().map(|i| i.insight_type).collect();
    assert_eq!(
        kinds,
        vec![
            InsightType::PerformanceTrend,
            InsightType::UserBehavior,
            InsightType::FeedbackSentiment
        ]
    );
}

#[test]
fn contextual_pattern_records_common_standards() {
    let history = test_fixtures::with_standards(
        test_fixtures::cohort(6, "api", ExperienceLevel::Advanced, 0.9, true),
        &["error-handling", "rust-api-design"],
    );
    let contextual = miner()
        .mine(&history)
        .into_iter()
        .find(|p| p.pattern_type == PatternType::Contextual)
        .unwrap();
    let targets: Vec<&str> = contextual.standard_targets().map(|(t, _)| t).collect();
    assert_eq!(targets, vec!["error-handling", "rust-api-design"]);
}

// ─── Determinism ─────────────────────────────────────────────────────────────

fn arbitrary_history() -> impl Strategy<Value = Vec<Interaction>> {
    proptest::collection::vec(
        (
            prop_oneof![Just("query"), Just("load"), Just("generate"), Just("validate")],
            prop_oneof![Just("web"), Just("api"), Just("cli")],
            any::<bool>(),
            0u8..4,
        ),
        0..80,
    )
    .prop_map(|rows| {
        let mut history = test_fixtures::interaction_stream(
            &rows.iter().map(|r| r.0).collect::<Vec<_>>(),
        );
        for (interaction, (_, project, success, level)) in history.iter_mut().zip(rows) {
            interaction.project_type = Some(project.to_string());
            interaction.success = success;
            interaction.experience_level = match level {
                0 => ExperienceLevel::Beginner,
                1 => ExperienceLevel::Intermediate,
                2 => ExperienceLevel::Advanced,
                _ => ExperienceLevel::Expert,
            };
        }
        history
    })
}

proptest! {
    #[test]
    fn re_mining_is_deterministic(history in arbitrary_history()) {
        let a = miner().mine(&history);
        let b = miner().mine(&history);
        prop_assert_eq!(&a, &b);

        let mut book = Vec::new();
        merge_patterns(&mut book, a.clone());
        merge_patterns(&mut book, b);
        prop_assert_eq!(book, a);
    }

    #[test]
    fn mined_rates_are_bounded(history in arbitrary_history()) {
        for p in miner().mine(&history) {
            prop_assert!(p.frequency >= 1);
            prop_assert!((0.0..=1.0).contains(&p.success_rate.value()));
        }
    }
}
