//! Sample listing command

use anyhow::Result;
use efficiency_lib::{Dataset, Sample};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{format_flag, format_percent, format_timestamp, print_json, print_table, OutputFormat};

/// Row for samples table
#[derive(Tabled)]
struct SampleRow {
    #[tabled(rename = "Timestamp")]
    timestamp: String,
    #[tabled(rename = "CPU")]
    cpu_usage: String,
    #[tabled(rename = "Memory")]
    memory_usage: String,
    #[tabled(rename = "Scaling")]
    auto_scaling_event: String,
}

impl From<&Sample> for SampleRow {
    fn from(sample: &Sample) -> Self {
        Self {
            timestamp: format_timestamp(&sample.timestamp),
            cpu_usage: format_percent(sample.cpu_usage),
            memory_usage: format_percent(sample.memory_usage),
            auto_scaling_event: format_flag(sample.auto_scaling_event),
        }
    }
}

#[derive(Serialize)]
struct SampleListing<'a> {
    total: usize,
    samples: &'a [Sample],
}

/// Print the generated samples, optionally only the most recent `limit`
pub fn show_samples(dataset: &Dataset, limit: Option<usize>, format: OutputFormat) -> Result<()> {
    let samples = most_recent(dataset.samples(), limit);

    match format {
        OutputFormat::Json => {
            print_json(&SampleListing {
                total: dataset.len(),
                samples,
            })?;
        }
        OutputFormat::Table => {
            print_table(samples.iter().map(SampleRow::from).collect());
            println!("\nShowing {} of {} samples", samples.len(), dataset.len());
        }
    }

    Ok(())
}

fn most_recent(samples: &[Sample], limit: Option<usize>) -> &[Sample] {
    match limit {
        Some(limit) if limit < samples.len() => &samples[samples.len() - limit..],
        _ => samples,
    }
}
