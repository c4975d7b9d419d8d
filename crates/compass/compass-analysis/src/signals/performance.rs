use compass_core::config::AnalysisConfig;
use compass_core::models::{Impact, Insight, InsightType, RecommendedAction};
use compass_core::traits::{AnalysisInput, ISignalAnalyzer};

use super::mean;
use crate::actions;

/// Compares the most recent metrics with the all-time baseline.
///
/// Three independent checks, each producing a high-impact insight: response
/// time degradation, error rate, and memory pressure. Needs at least
/// `performance_recent_window` samples.
pub struct PerformanceAnalyzer {
    config: AnalysisConfig,
}

impl PerformanceAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }
}

impl ISignalAnalyzer for PerformanceAnalyzer {
    fn name(&self) -> &'static str {
        "performance"
    }

    fn analyze(&self, input: &AnalysisInput<'_>) -> Vec<Insight> {
        let k = self.config.performance_recent_window.max(1);
        let metrics = input.metrics;
        if metrics.len() < k {
            return Vec::new();
        }
        let recent = &metrics[metrics.len() - k..];
        let mut insights = Vec::new();

        let baseline = mean(metrics.iter().map(|m| m.response_time_ms)).unwrap_or(0.0);
        let recent_rt = mean(recent.iter().map(|m| m.response_time_ms)).unwrap_or(0.0);
        let limit = baseline * (1.0 + self.config.response_degradation_ratio);
        if baseline > 0.0 && recent_rt > limit {
            insights.push(
                Insight::new(
                    InsightType::PerformanceTrend,
                    format!(
                        "response time degraded: recent mean {recent_rt:.0} ms vs baseline {baseline:.0} ms"
                    ),
                    0.8,
                    Impact::High,
                )
                .with_action(RecommendedAction::new(actions::BOOST_CACHE_PRIORITY))
                .with_action(RecommendedAction::new(actions::TIGHTEN_COMPRESSION))
                .with_data("recent_response_ms", recent_rt)
                .with_data("baseline_response_ms", baseline),
            );
        }

        let error_rate = mean(recent.iter().map(|m| m.error_rate)).unwrap_or(0.0);
        if error_rate > self.config.error_rate_threshold {
            insights.push(
                Insight::new(
                    InsightType::PerformanceTrend,
                    format!("error rate {:.1}% above threshold", error_rate * 100.0),
                    0.9,
                    Impact::High,
                )
                .with_action(RecommendedAction::new(actions::FLAG_ERROR_INVESTIGATION))
                .with_data("recent_error_rate", error_rate),
            );
        }

        let memory = mean(recent.iter().map(|m| m.memory_usage)).unwrap_or(0.0);
        if memory > self.config.memory_usage_threshold {
            insights.push(
                Insight::new(
                    InsightType::PerformanceTrend,
                    format!("memory usage at {:.0}% of budget", memory * 100.0),
                    0.85,
                    Impact::High,
                )
                .with_action(RecommendedAction::new(actions::LIMIT_PRELOAD))
                .with_action(RecommendedAction::new(actions::TIGHTEN_COMPRESSION))
                .with_data("recent_memory_usage", memory),
            );
        }

        insights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(metrics: &[compass_core::models::PerformanceMetric]) -> Vec<Insight> {
        PerformanceAnalyzer::new(AnalysisConfig::default()).analyze(&AnalysisInput {
            metrics,
            ..Default::default()
        })
    }

    #[test]
    fn below_minimum_sample_is_silent() {
        assert!(analyze(&test_fixtures::metric_series(9, 900.0, 0.5, 0.99)).is_empty());
    }

    #[test]
    fn degraded_recent_window_is_flagged() {
        let mut metrics = test_fixtures::metric_series(40, 100.0, 0.0, 0.2);
        metrics.extend(test_fixtures::metric_series(10, 400.0, 0.0, 0.2));
        let insights = analyze(&metrics);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].impact_potential, Impact::High);
        assert_eq!(
            insights[0].recommended_actions[0].action,
            actions::BOOST_CACHE_PRIORITY
        );
    }

    #[test]
    fn checks_are_independent() {
        let mut metrics = test_fixtures::metric_series(20, 100.0, 0.0, 0.1);
        metrics.extend(test_fixtures::metric_series(10, 500.0, 0.2, 0.95));
        let insights = analyze(&metrics);
        assert_eq!(insights.len(), 3);
        assert!(insights.iter().all(|i| i.insight_type == InsightType::PerformanceTrend));
    }

    #[test]
    fn stable_metrics_produce_nothing() {
        assert!(analyze(&test_fixtures::metric_series(30, 120.0, 0.01, 0.4)).is_empty());
    }
}
