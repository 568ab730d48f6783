//! Renderer-facing view of an analysis run
//!
//! Packages the dataset series and the efficiency summary in the shape a
//! chart front end consumes. Values are copied through unchanged.

use crate::models::{Dataset, EfficiencySummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One point of a utilization time series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl From<(DateTime<Utc>, f64)> for SeriesPoint {
    fn from((timestamp, value): (DateTime<Utc>, f64)) -> Self {
        Self { timestamp, value }
    }
}

/// Everything a dashboard needs to draw one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub generated_at: DateTime<Utc>,
    pub window_minutes: usize,
    pub cpu_series: Vec<SeriesPoint>,
    pub memory_series: Vec<SeriesPoint>,
    /// Timestamps of minutes with an auto-scaling action
    pub auto_scaling_events: Vec<DateTime<Utc>>,
    pub summary: EfficiencySummary,
}

impl DashboardData {
    pub fn new(dataset: &Dataset, summary: EfficiencySummary) -> Self {
        Self {
            generated_at: Utc::now(),
            window_minutes: dataset.len(),
            cpu_series: dataset.cpu_series().into_iter().map(SeriesPoint::from).collect(),
            memory_series: dataset
                .memory_series()
                .into_iter()
                .map(SeriesPoint::from)
                .collect(),
            auto_scaling_events: dataset
                .auto_scaling_events()
                .into_iter()
                .map(|s| s.timestamp)
                .collect(),
            summary,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::models::Sample;
    use chrono::{Duration, TimeZone};

    fn sample_dataset() -> Dataset {
        let start = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap();
        let samples = (0..6)
            .map(|i| {
                Sample::new(
                    start + Duration::minutes(i),
                    5.0 * i as f64,
                    20.0 + i as f64,
                    i == 4,
                )
            })
            .collect();
        Dataset::from_samples(samples).unwrap()
    }

    #[test]
    fn test_series_copied_unchanged() {
        let dataset = sample_dataset();
        let summary = analyze(&dataset).unwrap();
        let data = DashboardData::new(&dataset, summary.clone());

        assert_eq!(data.window_minutes, 6);
        assert_eq!(data.cpu_series.len(), 6);
        assert_eq!(data.cpu_series[3].value, 15.0);
        assert_eq!(data.memory_series[5].value, 25.0);
        assert_eq!(data.auto_scaling_events, vec![dataset.samples()[4].timestamp]);
        assert_eq!(data.summary, summary);
    }

    #[test]
    fn test_json_shape() {
        let dataset = sample_dataset();
        let summary = analyze(&dataset).unwrap();
        let json = DashboardData::new(&dataset, summary).to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value["cpu_series"].is_array());
        assert!(value["memory_series"][0]["timestamp"].is_string());
        assert_eq!(value["summary"]["idle_minutes"], 2);
        assert_eq!(value["summary"]["auto_scaling_event_count"], 1);
        assert!(value["summary"]["recommendations"].as_array().unwrap().is_empty());
    }
}
