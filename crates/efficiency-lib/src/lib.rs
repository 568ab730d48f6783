//! Warehouse efficiency engine
//!
//! This crate provides the core functionality for:
//! - Synthetic per-minute resource sample generation
//! - Efficiency analysis (idle time, over-provisioning, auto-scaling churn)
//! - Rule-based recommendations
//! - Renderer-facing dashboard data

pub mod analyzer;
pub mod dashboard;
pub mod error;
pub mod generator;
pub mod models;
pub mod observability;

pub use analyzer::{analyze, AnalyzerConfig, EfficiencyAnalyzer, Recommendation};
pub use dashboard::{DashboardData, SeriesPoint};
pub use error::{EngineError, Result};
pub use generator::{generate, seeded_rng, GeneratorConfig, SampleGenerator, DEFAULT_WINDOW_MINUTES};
pub use models::*;
pub use observability::StructuredLogger;
