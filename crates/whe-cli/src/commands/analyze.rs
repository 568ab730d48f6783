//! Efficiency summary command

use anyhow::Result;
use efficiency_lib::{AnalyzerConfig, Dataset, EfficiencySummary};
use tabled::Tabled;

use crate::output::{
    color_count, format_share, format_timestamp, print_info, print_json, print_success,
    print_table, print_warning, OutputFormat,
};

/// Row for the metrics panel
#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Count")]
    count: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Share")]
    share: String,
}

/// Print the metrics and recommendations panel
pub fn show_summary(
    dataset: &Dataset,
    summary: &EfficiencySummary,
    thresholds: &AnalyzerConfig,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(summary)?,
        OutputFormat::Table => {
            if let (Some(first), Some(last)) = (dataset.first_timestamp(), dataset.last_timestamp()) {
                print_info(&format!(
                    "Analyzed {} minutes from {} to {}",
                    dataset.len(),
                    format_timestamp(&first),
                    format_timestamp(&last)
                ));
            }

            print_table(metric_rows(summary, thresholds, dataset.len()));

            if summary.recommendations.is_empty() {
                print_success("No recommendations, all efficiency thresholds met");
            } else {
                println!("\nRecommendations:");
                for recommendation in &summary.recommendations {
                    print_warning(recommendation);
                }
            }
        }
    }

    Ok(())
}

fn metric_rows(
    summary: &EfficiencySummary,
    thresholds: &AnalyzerConfig,
    total: usize,
) -> Vec<MetricRow> {
    vec![
        MetricRow {
            metric: format!("Idle minutes (CPU < {}%)", thresholds.idle_cpu_threshold),
            count: color_count(summary.idle_minutes, thresholds.idle_minutes_limit),
            limit: thresholds.idle_minutes_limit.to_string(),
            share: format_share(summary.idle_minutes, total),
        },
        MetricRow {
            metric: format!(
                "Over-provisioned minutes (memory < {}%)",
                thresholds.over_provisioned_memory_threshold
            ),
            count: color_count(
                summary.over_provisioned_minutes,
                thresholds.over_provisioned_minutes_limit,
            ),
            limit: thresholds.over_provisioned_minutes_limit.to_string(),
            share: format_share(summary.over_provisioned_minutes, total),
        },
        MetricRow {
            metric: "Auto-scaling events".to_string(),
            count: color_count(
                summary.auto_scaling_event_count,
                thresholds.auto_scaling_events_limit,
            ),
            limit: thresholds.auto_scaling_events_limit.to_string(),
            share: format_share(summary.auto_scaling_event_count, total),
        },
    ]
}
