//! Auto-scaling event listing command

use anyhow::Result;
use efficiency_lib::{Dataset, Sample};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{
    format_percent, format_timestamp, print_json, print_success, print_table, OutputFormat,
};

/// Row for auto-scaling events table
#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "Timestamp")]
    timestamp: String,
    #[tabled(rename = "CPU")]
    cpu_usage: String,
    #[tabled(rename = "Memory")]
    memory_usage: String,
}

#[derive(Serialize)]
struct EventListing<'a> {
    window_minutes: usize,
    event_count: usize,
    events: Vec<&'a Sample>,
}

/// Print the minutes that recorded an auto-scaling action
pub fn show_events(dataset: &Dataset, format: OutputFormat) -> Result<()> {
    let events = dataset.auto_scaling_events();

    match format {
        OutputFormat::Json => {
            print_json(&EventListing {
                window_minutes: dataset.len(),
                event_count: events.len(),
                events,
            })?;
        }
        OutputFormat::Table => {
            if events.is_empty() {
                print_success("No auto-scaling events recorded");
                return Ok(());
            }

            let rows: Vec<EventRow> = events
                .iter()
                .map(|s| EventRow {
                    timestamp: format_timestamp(&s.timestamp),
                    cpu_usage: format_percent(s.cpu_usage),
                    memory_usage: format_percent(s.memory_usage),
                })
                .collect();

            print_table(rows);
            println!(
                "\nTotal: {} auto-scaling events in {} minutes",
                events.len(),
                dataset.len()
            );
        }
    }

    Ok(())
}
