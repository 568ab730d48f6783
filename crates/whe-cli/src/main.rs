//! Warehouse Efficiency CLI
//!
//! Generates a synthetic window of per-minute warehouse utilization,
//! analyzes it for idle time, over-provisioning and auto-scaling churn,
//! and prints the results or exports them for a dashboard.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{analyze, events, generate, report};
use efficiency_lib::StructuredLogger;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Warehouse Efficiency CLI
#[derive(Parser)]
#[command(name = "whe")]
#[command(author, version, about = "CLI for Warehouse Efficiency analysis", long_about = None)]
pub struct Cli {
    /// Path to a config file (TOML, JSON or YAML)
    #[arg(long, env = "WAREHOUSE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    /// Number of one-minute samples to generate (overrides config)
    #[arg(long, short, allow_negative_numbers = true)]
    pub window: Option<i64>,

    /// Seed for reproducible sample generation (overrides config)
    #[arg(long, short)]
    pub seed: Option<u64>,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List generated samples
    Generate {
        /// Show only the most recent N samples
        #[arg(long, short)]
        limit: Option<usize>,
    },

    /// Show efficiency metrics and recommendations
    Analyze,

    /// List minutes with an auto-scaling event
    Events,

    /// Export series and summary as dashboard JSON
    Report {
        /// Output file path (stdout if not specified)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Generate { .. } => "generate",
            Commands::Analyze => "analyze",
            Commands::Events => "events",
            Commands::Report { .. } => "report",
        }
    }
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let registry = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)));

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::EngineConfig::load(cli.config.as_deref())?
        .with_overrides(cli.window, cli.seed)?;
    debug!(?config, "Configuration loaded");

    let logger = StructuredLogger::new(&config.warehouse);
    logger.log_startup(CLI_VERSION, cli.command.name());

    let dataset = commands::generate_dataset(&config, &logger)?;

    match cli.command {
        Commands::Generate { limit } => {
            generate::show_samples(&dataset, limit, cli.format)?;
        }
        Commands::Analyze => {
            let summary = commands::analyze_dataset(&dataset, &config, &logger)?;
            analyze::show_summary(&dataset, &summary, &config.analyzer, cli.format)?;
        }
        Commands::Events => {
            events::show_events(&dataset, cli.format)?;
        }
        Commands::Report { output } => {
            let summary = commands::analyze_dataset(&dataset, &config, &logger)?;
            report::write_report(&dataset, summary, output.as_deref())?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    if let Err(e) = run(cli) {
        output::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
