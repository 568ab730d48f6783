//! Recommendation rules
//!
//! Each rule compares one summary counter against a fixed limit. Rules are
//! independent; every rule whose limit is exceeded contributes its advisory.

use super::AnalyzerConfig;
use serde::{Deserialize, Serialize};

/// Advisory produced when a summary counter exceeds its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Too many minutes with near-zero CPU
    IdleTime,
    /// Too many minutes with low memory utilization
    OverProvisioned,
    /// Too many auto-scaling actions
    AutoScaling,
}

impl Recommendation {
    /// Rules in evaluation order
    pub const ALL: [Recommendation; 3] = [
        Recommendation::IdleTime,
        Recommendation::OverProvisioned,
        Recommendation::AutoScaling,
    ];

    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::IdleTime => {
                "Consider reducing active hours or consolidating workloads to minimize idle time."
            }
            Recommendation::OverProvisioned => {
                "Review memory allocation and consider right-sizing resources."
            }
            Recommendation::AutoScaling => {
                "Optimize auto-scaling policies to reduce unnecessary scaling events."
            }
        }
    }

    /// Whether this rule fires for the given counters
    pub fn applies(&self, counters: &Counters, config: &AnalyzerConfig) -> bool {
        match self {
            Recommendation::IdleTime => counters.idle_minutes > config.idle_minutes_limit,
            Recommendation::OverProvisioned => {
                counters.over_provisioned_minutes > config.over_provisioned_minutes_limit
            }
            Recommendation::AutoScaling => {
                counters.auto_scaling_event_count > config.auto_scaling_events_limit
            }
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Raw counters the rules are evaluated against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub idle_minutes: usize,
    pub over_provisioned_minutes: usize,
    pub auto_scaling_event_count: usize,
}

/// Every rule that fires, in evaluation order
pub fn evaluate(counters: &Counters, config: &AnalyzerConfig) -> Vec<Recommendation> {
    Recommendation::ALL
        .iter()
        .copied()
        .filter(|rule| rule.applies(counters, config))
        .collect()
}
