//! Structured logging for engine runs
//!
//! Emits `tracing` events with a stable `event` field so JSON log output
//! can be filtered per run stage.

use crate::models::{Dataset, EfficiencySummary};
use tracing::{debug, info, warn};

/// Structured logger for generation and analysis events
#[derive(Clone)]
pub struct StructuredLogger {
    warehouse: String,
}

impl StructuredLogger {
    pub fn new(warehouse: impl Into<String>) -> Self {
        Self {
            warehouse: warehouse.into(),
        }
    }

    pub fn warehouse(&self) -> &str {
        &self.warehouse
    }

    /// Log tool startup
    pub fn log_startup(&self, version: &str, command: &str) {
        info!(
            event = "cli_started",
            warehouse = %self.warehouse,
            version = %version,
            command = %command,
            "Warehouse efficiency run started"
        );
    }

    /// Log a generated dataset
    pub fn log_dataset_generated(&self, dataset: &Dataset, seed: Option<u64>) {
        info!(
            event = "dataset_generated",
            warehouse = %self.warehouse,
            samples = dataset.len(),
            first_timestamp = ?dataset.first_timestamp(),
            last_timestamp = ?dataset.last_timestamp(),
            seed = ?seed,
            auto_scaling_events = dataset.auto_scaling_events().len(),
            "Generated synthetic dataset"
        );
    }

    /// Log a completed analysis and each advisory it produced
    pub fn log_analysis(&self, summary: &EfficiencySummary, samples: usize) {
        info!(
            event = "analysis_completed",
            warehouse = %self.warehouse,
            samples = samples,
            idle_minutes = summary.idle_minutes,
            over_provisioned_minutes = summary.over_provisioned_minutes,
            auto_scaling_event_count = summary.auto_scaling_event_count,
            recommendations = summary.recommendations.len(),
            "Efficiency analysis completed"
        );

        for (position, recommendation) in summary.recommendations.iter().enumerate() {
            info!(
                event = "recommendation_emitted",
                warehouse = %self.warehouse,
                position = position,
                recommendation = %recommendation,
                "Efficiency recommendation"
            );
        }

        if summary.recommendations.is_empty() {
            debug!(
                event = "analysis_clean",
                warehouse = %self.warehouse,
                "No efficiency thresholds exceeded"
            );
        }
    }

    /// Log a rejected run
    pub fn log_failure(&self, stage: &str, error: &dyn std::error::Error) {
        warn!(
            event = "run_failed",
            warehouse = %self.warehouse,
            stage = %stage,
            error = %error,
            "Warehouse efficiency run failed"
        );
    }
}
