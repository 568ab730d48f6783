//! Core data models for the efficiency engine

use crate::error::{EngineError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lower bound of a utilization percentage
pub const MIN_PERCENT: f64 = 0.0;

/// Upper bound of a utilization percentage
pub const MAX_PERCENT: f64 = 100.0;

/// One minute of warehouse resource utilization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    /// CPU utilization percentage, 0-100
    pub cpu_usage: f64,
    /// Memory utilization percentage, 0-100
    pub memory_usage: f64,
    /// Whether an auto-scaling action was recorded during this minute
    pub auto_scaling_event: bool,
}

impl Sample {
    /// Create a sample, clamping both percentages into [0, 100]
    pub fn new(
        timestamp: DateTime<Utc>,
        cpu_usage: f64,
        memory_usage: f64,
        auto_scaling_event: bool,
    ) -> Self {
        Self {
            timestamp,
            cpu_usage: clamp_percent(cpu_usage),
            memory_usage: clamp_percent(memory_usage),
            auto_scaling_event,
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [("cpu_usage", self.cpu_usage), ("memory_usage", self.memory_usage)] {
            if !value.is_finite() || !(MIN_PERCENT..=MAX_PERCENT).contains(&value) {
                return Err(EngineError::invalid_input(format!(
                    "{} must be a percentage in [0, 100], got {} at {}",
                    name, value, self.timestamp
                )));
            }
        }
        Ok(())
    }
}

/// Clamp a utilization value into the percentage range
pub fn clamp_percent(value: f64) -> f64 {
    value.clamp(MIN_PERCENT, MAX_PERCENT)
}

/// Ordered, immutable sequence of per-minute samples
///
/// Timestamps are strictly increasing. The dataset may be empty; the
/// analyzer rejects empty input explicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Sample>", into = "Vec<Sample>")]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    /// Build a dataset from caller-supplied samples
    ///
    /// Fails with `InvalidInput` if timestamps are not strictly increasing or
    /// a percentage is outside [0, 100].
    pub fn from_samples(samples: Vec<Sample>) -> Result<Self> {
        for sample in &samples {
            sample.validate()?;
        }

        if let Some(pair) = samples
            .windows(2)
            .find(|pair| pair[1].timestamp <= pair[0].timestamp)
        {
            return Err(EngineError::invalid_input(format!(
                "timestamps must be strictly increasing: {} is not after {}",
                pair[1].timestamp, pair[0].timestamp
            )));
        }

        Ok(Self { samples })
    }

    /// Build a dataset from samples the generator has already ordered
    pub(crate) fn from_ordered(samples: Vec<Sample>) -> Self {
        debug_assert!(samples.windows(2).all(|p| p[0].timestamp < p[1].timestamp));
        Self { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first_timestamp(&self) -> Option<DateTime<Utc>> {
        self.samples.first().map(|s| s.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.samples.last().map(|s| s.timestamp)
    }

    /// CPU utilization over time
    pub fn cpu_series(&self) -> Vec<(DateTime<Utc>, f64)> {
        self.samples.iter().map(|s| (s.timestamp, s.cpu_usage)).collect()
    }

    /// Memory utilization over time
    pub fn memory_series(&self) -> Vec<(DateTime<Utc>, f64)> {
        self.samples
            .iter()
            .map(|s| (s.timestamp, s.memory_usage))
            .collect()
    }

    /// Samples during which an auto-scaling action was recorded
    pub fn auto_scaling_events(&self) -> Vec<&Sample> {
        self.samples.iter().filter(|s| s.auto_scaling_event).collect()
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }
}

impl TryFrom<Vec<Sample>> for Dataset {
    type Error = EngineError;

    fn try_from(samples: Vec<Sample>) -> Result<Self> {
        Self::from_samples(samples)
    }
}

impl From<Dataset> for Vec<Sample> {
    fn from(dataset: Dataset) -> Self {
        dataset.samples
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Derived efficiency metrics and advisories for one dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EfficiencySummary {
    pub idle_minutes: usize,
    pub over_provisioned_minutes: usize,
    pub auto_scaling_event_count: usize,
    /// Advisories in rule evaluation order
    pub recommendations: Vec<String>,
}

impl EfficiencySummary {
    pub fn has_recommendations(&self) -> bool {
        !self.recommendations.is_empty()
    }
}
