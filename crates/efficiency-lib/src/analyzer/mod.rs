//! Efficiency analysis
//!
//! Counts idle and over-provisioned minutes plus auto-scaling actions in a
//! dataset, then evaluates the recommendation rules against those counters.
//! Analysis is a pure function of the dataset and thresholds.

mod rules;

pub use rules::{evaluate, Counters, Recommendation};

use crate::error::{EngineError, Result};
use crate::models::{Dataset, EfficiencySummary};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// CPU percentage below which a minute counts as idle
pub const IDLE_CPU_THRESHOLD: f64 = 10.0;

/// Memory percentage below which a minute counts as over-provisioned
pub const OVER_PROVISIONED_MEMORY_THRESHOLD: f64 = 30.0;

pub const IDLE_MINUTES_LIMIT: usize = 60;
pub const OVER_PROVISIONED_MINUTES_LIMIT: usize = 60;
pub const AUTO_SCALING_EVENTS_LIMIT: usize = 20;

/// Thresholds used by the analyzer
///
/// Sample thresholds are strict lower bounds (`value < threshold`); the
/// rule limits must be strictly exceeded (`count > limit`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub idle_cpu_threshold: f64,
    pub over_provisioned_memory_threshold: f64,
    pub idle_minutes_limit: usize,
    pub over_provisioned_minutes_limit: usize,
    pub auto_scaling_events_limit: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            idle_cpu_threshold: IDLE_CPU_THRESHOLD,
            over_provisioned_memory_threshold: OVER_PROVISIONED_MEMORY_THRESHOLD,
            idle_minutes_limit: IDLE_MINUTES_LIMIT,
            over_provisioned_minutes_limit: OVER_PROVISIONED_MINUTES_LIMIT,
            auto_scaling_events_limit: AUTO_SCALING_EVENTS_LIMIT,
        }
    }
}

impl AnalyzerConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, threshold) in [
            ("idle_cpu_threshold", self.idle_cpu_threshold),
            (
                "over_provisioned_memory_threshold",
                self.over_provisioned_memory_threshold,
            ),
        ] {
            if !threshold.is_finite() {
                return Err(EngineError::invalid_input(format!(
                    "{} must be finite, got {}",
                    name, threshold
                )));
            }
        }
        Ok(())
    }
}

/// Computes efficiency summaries from datasets
#[derive(Debug, Clone, Default)]
pub struct EfficiencyAnalyzer {
    config: AnalyzerConfig,
}

impl EfficiencyAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Summarize a dataset
    ///
    /// # Errors
    /// * `InvalidInput` if the dataset is empty
    pub fn analyze(&self, dataset: &Dataset) -> Result<EfficiencySummary> {
        if dataset.is_empty() {
            return Err(EngineError::invalid_input(
                "cannot analyze an empty dataset",
            ));
        }

        let counters = self.count(dataset);
        let recommendations = evaluate(&counters, &self.config);

        debug!(
            samples = dataset.len(),
            idle_minutes = counters.idle_minutes,
            over_provisioned_minutes = counters.over_provisioned_minutes,
            auto_scaling_event_count = counters.auto_scaling_event_count,
            recommendations = recommendations.len(),
            "Analyzed dataset"
        );

        Ok(EfficiencySummary {
            idle_minutes: counters.idle_minutes,
            over_provisioned_minutes: counters.over_provisioned_minutes,
            auto_scaling_event_count: counters.auto_scaling_event_count,
            recommendations: recommendations
                .iter()
                .map(|r| r.message().to_string())
                .collect(),
        })
    }

    /// Count the minutes each rule looks at
    pub fn count(&self, dataset: &Dataset) -> Counters {
        dataset.iter().fold(Counters::default(), |mut acc, sample| {
            if sample.cpu_usage < self.config.idle_cpu_threshold {
                acc.idle_minutes += 1;
            }
            if sample.memory_usage < self.config.over_provisioned_memory_threshold {
                acc.over_provisioned_minutes += 1;
            }
            if sample.auto_scaling_event {
                acc.auto_scaling_event_count += 1;
            }
            acc
        })
    }
}

/// Summarize a dataset with the default thresholds
pub fn analyze(dataset: &Dataset) -> Result<EfficiencySummary> {
    EfficiencyAnalyzer::new().analyze(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sample;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn at(minute: usize) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap() + Duration::minutes(minute as i64)
    }

    /// Build a dataset from (cpu, memory, event) triples
    fn dataset(values: impl IntoIterator<Item = (f64, f64, bool)>) -> Dataset {
        let samples = values
            .into_iter()
            .enumerate()
            .map(|(i, (cpu, memory, event))| Sample::new(at(i), cpu, memory, event))
            .collect();
        Dataset::from_samples(samples).unwrap()
    }

    #[test]
    fn test_idle_scenario() {
        // 70 idle minutes out of 100, memory healthy, no scaling
        let data = dataset((0..100).map(|i| if i < 70 { (5.0, 50.0, false) } else { (50.0, 50.0, false) }));
        let summary = analyze(&data).unwrap();

        assert_eq!(
            summary,
            EfficiencySummary {
                idle_minutes: 70,
                over_provisioned_minutes: 0,
                auto_scaling_event_count: 0,
                recommendations: vec![
                    "Consider reducing active hours or consolidating workloads to minimize idle time."
                        .to_string()
                ],
            }
        );
    }

    #[test]
    fn test_auto_scaling_scenario() {
        let data = dataset((0..200).map(|i| (50.0, 50.0, i < 21)));
        let summary = analyze(&data).unwrap();

        assert_eq!(summary.auto_scaling_event_count, 21);
        assert_eq!(
            summary.recommendations,
            vec!["Optimize auto-scaling policies to reduce unnecessary scaling events.".to_string()]
        );
    }

    #[test]
    fn test_no_thresholds_exceeded() {
        let data = dataset((0..500).map(|i| (if i < 60 { 1.0 } else { 80.0 }, 90.0, i < 20)));
        let summary = analyze(&data).unwrap();

        assert_eq!(summary.idle_minutes, 60);
        assert_eq!(summary.auto_scaling_event_count, 20);
        assert!(summary.recommendations.is_empty());
        assert!(!summary.has_recommendations());
    }

    #[test]
    fn test_all_rules_fire_in_evaluation_order() {
        let data = dataset((0..100).map(|i| (2.0, 10.0, i < 30)));
        let summary = analyze(&data).unwrap();

        assert_eq!(summary.idle_minutes, 100);
        assert_eq!(summary.over_provisioned_minutes, 100);
        assert_eq!(summary.recommendations.len(), 3);
        assert_eq!(summary.recommendations[0], Recommendation::IdleTime.message());
        assert_eq!(summary.recommendations[1], Recommendation::OverProvisioned.message());
        assert_eq!(summary.recommendations[2], Recommendation::AutoScaling.message());
    }

    #[test]
    fn test_thresholds_are_strict() {
        // Exactly at the sample thresholds does not count
        let data = dataset((0..100).map(|_| (10.0, 30.0, false)));
        let summary = analyze(&data).unwrap();

        assert_eq!(summary.idle_minutes, 0);
        assert_eq!(summary.over_provisioned_minutes, 0);
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let err = analyze(&Dataset::default()).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let data = dataset((0..300).map(|i| ((i % 17) as f64 * 6.0, (i % 13) as f64 * 8.0, i % 11 == 0)));
        let first = analyze(&data).unwrap();
        let second = analyze(&data).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_counts_within_dataset_length() {
        let data = dataset((0..50).map(|i| (i as f64, i as f64 * 2.0, i % 2 == 0)));
        let summary = analyze(&data).unwrap();

        assert!(summary.idle_minutes <= data.len());
        assert!(summary.over_provisioned_minutes <= data.len());
        assert_eq!(summary.idle_minutes, 10);
        assert_eq!(summary.over_provisioned_minutes, 15);
        assert_eq!(summary.auto_scaling_event_count, 25);
    }

    #[test]
    fn test_custom_thresholds() {
        let config = AnalyzerConfig {
            idle_cpu_threshold: 20.0,
            idle_minutes_limit: 5,
            ..AnalyzerConfig::default()
        };
        let analyzer = EfficiencyAnalyzer::with_config(config).unwrap();
        let data = dataset((0..10).map(|_| (15.0, 50.0, false)));
        let summary = analyzer.analyze(&data).unwrap();

        assert_eq!(summary.idle_minutes, 10);
        assert_eq!(summary.recommendations, vec![Recommendation::IdleTime.to_string()]);
    }

    #[test]
    fn test_non_finite_threshold_rejected() {
        let config = AnalyzerConfig {
            over_provisioned_memory_threshold: f64::NAN,
            ..AnalyzerConfig::default()
        };
        assert!(EfficiencyAnalyzer::with_config(config).is_err());
    }
}
