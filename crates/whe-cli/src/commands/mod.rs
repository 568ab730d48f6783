//! CLI command implementations

pub mod analyze;
pub mod events;
pub mod generate;
pub mod report;

use crate::config::EngineConfig;
use anyhow::{Context, Result};
use efficiency_lib::{
    seeded_rng, Dataset, EfficiencyAnalyzer, EfficiencySummary, SampleGenerator,
    StructuredLogger,
};

/// Generate the synthetic dataset described by the configuration
pub fn generate_dataset(config: &EngineConfig, logger: &StructuredLogger) -> Result<Dataset> {
    let generator = SampleGenerator::with_config(config.generator.clone())
        .context("Invalid generator configuration")?;
    let mut rng = seeded_rng(config.seed);

    let dataset = generator
        .generate(config.window_minutes, &mut rng)
        .map_err(|e| {
            logger.log_failure("generate", &e);
            e
        })
        .context("Failed to generate samples")?;

    logger.log_dataset_generated(&dataset, config.seed);
    Ok(dataset)
}

/// Analyze a dataset with the configured thresholds
pub fn analyze_dataset(
    dataset: &Dataset,
    config: &EngineConfig,
    logger: &StructuredLogger,
) -> Result<EfficiencySummary> {
    let analyzer = EfficiencyAnalyzer::with_config(config.analyzer.clone())
        .context("Invalid analyzer configuration")?;

    let summary = analyzer
        .analyze(dataset)
        .map_err(|e| {
            logger.log_failure("analyze", &e);
            e
        })
        .context("Failed to analyze samples")?;

    logger.log_analysis(&summary, dataset.len());
    Ok(summary)
}
