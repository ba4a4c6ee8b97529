//! Pulseboard CLI
//!
//! Command-line interface for the business dashboard:
//! - Show counters and growth indicators
//! - Keep the dashboard refreshing on an interval
//! - Manage the metric store (seed, clear, set)
//! - Summarise chart data

use anyhow::Context;
use clap::{Parser, Subcommand};
use pulseboard::analytics::counter::FRAME_INTERVAL;
use pulseboard::analytics::{format_amount, format_sales_thousands, CounterAnimation};
use pulseboard::charts::{
    load_update, LeadSourceUpdate, LeadSources, RevenueSeries, RevenueUpdate,
};
use pulseboard::config::{generate_default_config, Config, LoggingConfig};
use pulseboard::dashboard::{Dashboard, TerminalRenderer};
use pulseboard::scheduler::RefreshScheduler;
use pulseboard::store::{FileStore, MetricStore, SampleData};
use pulseboard::{Metric, Period};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pulseboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Business dashboard analytics for earnings, bookings, customers and leads")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Metric store file, overrides the config
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show counters and growth indicators once
    Show {
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
        /// Count the totals up before printing the table
        #[arg(long)]
        animate: bool,
    },

    /// Refresh the dashboard on an interval until interrupted
    Watch {
        /// Seconds between refreshes, overrides the config
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Load the sample data into the store
    Seed,

    /// Remove all dashboard keys from the store
    Clear,

    /// Set one metric value
    Set {
        /// Metric (earnings, bookings, customers, leads)
        metric: Metric,
        /// Period (alltime, thismonth, lastmonth, current, previous)
        period: Period,
        /// Value
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },

    /// Show growth statistics of the sample data
    Stats,

    /// Summarise the financial-year revenue chart
    Revenue {
        #[arg(long)]
        json: bool,
        /// JSON file with figures to merge into the chart data
        #[arg(short, long)]
        data: Option<PathBuf>,
    },

    /// Show the lead-source breakdown
    Sources {
        #[arg(long)]
        json: bool,
        /// JSON file with labels and/or values replacing the chart data
        #[arg(short, long)]
        data: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    init_logging(&config.logging);

    tracing::debug!("Pulseboard v{}", env!("CARGO_PKG_VERSION"));

    let store_path = cli
        .store
        .clone()
        .unwrap_or_else(|| config.store.resolved_path());

    match cli.command {
        Commands::Show { json, animate } => {
            let store = open_store(&store_path)?;
            let dashboard = Dashboard::new(store, config.dashboard);

            if json {
                let snapshot = dashboard.snapshot();
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                if animate {
                    animate_totals(&dashboard).await?;
                }
                dashboard.refresh(&mut TerminalRenderer::stdout());
            }
        }

        Commands::Watch { interval } => {
            let mut schedule = config.refresh;
            if let Some(secs) = interval {
                schedule.interval_secs = secs;
            }

            let store = open_store(&store_path)?;
            let dashboard = Dashboard::new(store, config.dashboard);
            let mut renderer = TerminalRenderer::stdout();

            let scheduler = Arc::new(RefreshScheduler::new(schedule)?);
            let handle = scheduler
                .clone()
                .start(move || {
                    // Store reload and terminal output block.
                    tokio::task::block_in_place(|| {
                        dashboard.refresh(&mut renderer);
                    });
                })
                .await?;

            tokio::signal::ctrl_c().await?;
            tracing::info!("Shutting down...");
            scheduler.stop().await;
            // Only idle between ticks now; nothing is cut short.
            handle.abort();
        }

        Commands::Seed => {
            let store = open_store(&store_path)?;
            let sample = SampleData::default();
            sample.initialize(&store)?;
            println!("Sample data initialized in {}", store.path().display());
            print_growth_stats(&sample);
        }

        Commands::Clear => {
            let store = open_store(&store_path)?;
            SampleData::clear(&store)?;
            println!("All analytics data cleared from {}", store.path().display());
        }

        Commands::Set {
            metric,
            period,
            value,
        } => {
            let store = open_store(&store_path)?;
            SampleData::update(&store, metric, period, value)?;
            println!("Updated {}_{} to {}", period, metric, value);
        }

        Commands::Stats => {
            print_growth_stats(&SampleData::default());
        }

        Commands::Revenue { json, data } => {
            let mut series = RevenueSeries::sample();
            if let Some(path) = data {
                let update: RevenueUpdate = load_update(&path)
                    .with_context(|| format!("reading chart data {}", path.display()))?;
                series.apply(update)?;
            }
            let summary = series.summary();

            if json {
                let body = serde_json::json!({
                    "year": series.year.to_string(),
                    "months": series.year.months(),
                    "series": series,
                    "summary": summary,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                match (series.year.start(), series.year.end()) {
                    (Some(start), Some(end)) => println!("{} ({} to {})", series.year, start, end),
                    _ => println!("{}", series.year),
                }
                println!("{:<5} {:>9} {:>10} {:>6}", "MONTH", "BOOKINGS", "SALES", "LEADS");
                for (i, month) in series.year.months().iter().enumerate() {
                    println!(
                        "{:<5} {:>9} {:>10} {:>6}",
                        month,
                        series.bookings[i],
                        format_sales_thousands(series.sales[i]),
                        series.leads[i]
                    );
                }
                println!();
                println!("Bookings:   {}", format_amount(summary.total_bookings));
                println!("Sales:      {}", format_sales_thousands(summary.total_sales));
                println!("Leads:      {}", format_amount(summary.total_leads));
                println!("Conversion: {:.2}%", summary.conversion_rate);
            }
        }

        Commands::Sources { json, data } => {
            let mut sources = LeadSources::sample();
            if let Some(path) = data {
                let update: LeadSourceUpdate = load_update(&path)
                    .with_context(|| format!("reading chart data {}", path.display()))?;
                sources.apply(update);
            }
            let shares = sources.shares();

            if json {
                println!("{}", serde_json::to_string_pretty(&shares)?);
            } else {
                for share in &shares {
                    println!("{:<14} {:>5} {:>7.2}%", share.label, share.value, share.percent);
                }
                println!("{:<14} {:>5}", "Total", sources.total());
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("pulseboard={}", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        "pretty" => registry
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init(),
        _ => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

fn open_store(path: &Path) -> anyhow::Result<FileStore> {
    FileStore::open(path).with_context(|| format!("opening metric store {}", path.display()))
}

async fn animate_totals<S: MetricStore>(dashboard: &Dashboard<S>) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout();
    for summary in dashboard.snapshot().metrics {
        for frame in CounterAnimation::with_default_steps(summary.total) {
            write!(stdout, "\r{:<12} {:>16}", summary.metric.to_string(), format_amount(frame))?;
            stdout.flush()?;
            tokio::time::sleep(FRAME_INTERVAL).await;
        }
        writeln!(stdout)?;
    }
    writeln!(stdout)?;
    Ok(())
}

fn print_growth_stats(sample: &SampleData) {
    println!("Growth Statistics (This Month vs Last Month):");
    for stat in sample.growth_stats() {
        println!("  {:<10} {}%", stat.metric.to_string(), stat.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_accepts_negative_value() {
        let cli = Cli::try_parse_from(["pulseboard", "set", "earnings", "thismonth", "-500"])
            .unwrap();
        match cli.command {
            Commands::Set {
                metric,
                period,
                value,
            } => {
                assert_eq!(metric, Metric::Earnings);
                assert_eq!(period, Period::ThisMonth);
                assert_eq!(value, -500.0);
            }
            _ => panic!("expected set"),
        }
    }

    #[test]
    fn test_chart_data_option() {
        let cli = Cli::try_parse_from(["pulseboard", "sources", "--data", "sources.json"]).unwrap();
        match cli.command {
            Commands::Sources { json, data } => {
                assert!(!json);
                assert_eq!(data, Some(PathBuf::from("sources.json")));
            }
            _ => panic!("expected sources"),
        }
    }
}
