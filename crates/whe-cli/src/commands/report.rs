//! Dashboard report export command

use anyhow::{Context, Result};
use efficiency_lib::{DashboardData, Dataset, EfficiencySummary};
use std::path::Path;

use crate::output::print_success;

/// Write the renderer payload as pretty JSON to a file or stdout
pub fn write_report(
    dataset: &Dataset,
    summary: EfficiencySummary,
    output: Option<&Path>,
) -> Result<()> {
    let data = DashboardData::new(dataset, summary);
    let json = data
        .to_json_pretty()
        .context("Failed to serialize dashboard data")?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            print_success(&format!(
                "Wrote report for {} minutes to {}",
                data.window_minutes,
                path.display()
            ));
        }
        None => println!("{}", json),
    }

    Ok(())
}
