//! Synthetic sample generation
//!
//! Produces a window of per-minute samples ending at a given instant. CPU and
//! memory utilization are drawn from normal distributions and clamped to
//! percentages; each minute independently records an auto-scaling action with
//! a small fixed probability.
//!
//! Randomness is always supplied by the caller, so a seeded RNG yields a
//! reproducible dataset.


use crate::error::{EngineError, Result};
use crate::models::{clamp_percent, Dataset, Sample};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Bernoulli, Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One day of minutes
pub const DEFAULT_WINDOW_MINUTES: usize = 1440;

pub const DEFAULT_CPU_MEAN: f64 = 50.0;
pub const DEFAULT_CPU_STD_DEV: f64 = 20.0;
pub const DEFAULT_MEMORY_MEAN: f64 = 60.0;
pub const DEFAULT_MEMORY_STD_DEV: f64 = 25.0;

/// Probability that a given minute records an auto-scaling action
pub const DEFAULT_AUTO_SCALING_PROBABILITY: f64 = 0.01;

/// Distribution parameters for generated samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub cpu_mean: f64,
    pub cpu_std_dev: f64,
    pub memory_mean: f64,
    pub memory_std_dev: f64,
    pub auto_scaling_probability: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            cpu_mean: DEFAULT_CPU_MEAN,
            cpu_std_dev: DEFAULT_CPU_STD_DEV,
            memory_mean: DEFAULT_MEMORY_MEAN,
            memory_std_dev: DEFAULT_MEMORY_STD_DEV,
            auto_scaling_probability: DEFAULT_AUTO_SCALING_PROBABILITY,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, mean) in [("cpu_mean", self.cpu_mean), ("memory_mean", self.memory_mean)] {
            if !mean.is_finite() {
                return Err(EngineError::invalid_input(format!(
                    "{} must be finite, got {}",
                    name, mean
                )));
            }
        }

        for (name, std_dev) in [
            ("cpu_std_dev", self.cpu_std_dev),
            ("memory_std_dev", self.memory_std_dev),
        ] {
            if !std_dev.is_finite() || std_dev < 0.0 {
                return Err(EngineError::invalid_input(format!(
                    "{} must be a non-negative finite number, got {}",
                    name, std_dev
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.auto_scaling_probability) {
            return Err(EngineError::invalid_input(format!(
                "auto_scaling_probability must be in [0, 1], got {}",
                self.auto_scaling_probability
            )));
        }

        Ok(())
    }
}

/// Generates synthetic warehouse utilization datasets
#[derive(Debug, Clone, Default)]
pub struct SampleGenerator {
    config: GeneratorConfig,
}

impl SampleGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate `window_minutes` samples ending now
    pub fn generate<R: Rng + ?Sized>(&self, window_minutes: usize, rng: &mut R) -> Result<Dataset> {
        self.generate_ending_at(window_minutes, Utc::now(), rng)
    }

    /// Generate `window_minutes` samples, the newest stamped exactly `end`
    ///
    /// The oldest sample is `window_minutes - 1` minutes before `end`.
    pub fn generate_ending_at<R: Rng + ?Sized>(
        &self,
        window_minutes: usize,
        end: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Dataset> {
        if window_minutes == 0 {
            return Err(EngineError::invalid_input(
                "window_minutes must be a positive number of minutes",
            ));
        }

        let mut samples: Vec<Sample> = Vec::new();
        samples.try_reserve_exact(window_minutes).map_err(|e| {
            EngineError::invalid_input(format!(
                "window of {} minutes does not fit in memory: {}",
                window_minutes, e
            ))
        })?;

        let start = window_start(window_minutes, end)?;

        let cpu = Normal::new(self.config.cpu_mean, self.config.cpu_std_dev)
            .map_err(|e| EngineError::invalid_input(format!("cpu distribution: {}", e)))?;
        let memory = Normal::new(self.config.memory_mean, self.config.memory_std_dev)
            .map_err(|e| EngineError::invalid_input(format!("memory distribution: {}", e)))?;
        let scaling = Bernoulli::new(self.config.auto_scaling_probability).map_err(|e| {
            EngineError::invalid_input(format!("auto-scaling distribution: {}", e))
        })?;

        samples.extend((0..window_minutes).map(|minute| Sample {
            timestamp: start + Duration::minutes(minute as i64),
            cpu_usage: clamp_percent(cpu.sample(rng)),
            memory_usage: clamp_percent(memory.sample(rng)),
            auto_scaling_event: scaling.sample(rng),
        }));

        debug!(
            window_minutes = window_minutes,
            start = %start,
            end = %end,
            "Generated synthetic samples"
        );

        Ok(Dataset::from_ordered(samples))
    }
}

/// Timestamp of the oldest sample in a window ending at `end`
fn window_start(window_minutes: usize, end: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let span = i64::try_from(window_minutes - 1)
        .ok()
        .and_then(Duration::try_minutes)
        .ok_or_else(|| {
            EngineError::invalid_input(format!("window of {} minutes is too large", window_minutes))
        })?;

    end.checked_sub_signed(span).ok_or_else(|| {
        EngineError::invalid_input(format!(
            "window of {} minutes reaches before the earliest representable time",
            window_minutes
        ))
    })
}

/// Generate a default-distribution dataset ending now
pub fn generate<R: Rng + ?Sized>(window_minutes: usize, rng: &mut R) -> Result<Dataset> {
    SampleGenerator::new().generate(window_minutes, rng)
}

/// Seeded RNG when a seed is given, entropy-backed otherwise
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
