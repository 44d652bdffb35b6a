use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::Table;
use configuration::{ChainId, Settings};
use core_types::FeeReport;
use engine::METHODOLOGY;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The main entry point for the Azuro fee reporter.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if there is one
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let settings = configuration::load_config(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    let _log_guard = configuration::init_tracing(&settings.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Report(args) => handle_report(args, &settings).await,
        Commands::Backfill(args) => handle_backfill(args, &settings).await,
        Commands::Chains => {
            print_chains(&settings);
            Ok(())
        }
        Commands::Methodology => {
            println!("Fees: {}", METHODOLOGY.fees);
            println!("Revenue: {}", METHODOLOGY.revenue);
            Ok(())
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Daily and cumulative pool-profit fee reports for the Azuro betting protocol.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. A missing file falls back to built-in defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build fee reports for one or more chains as of a timestamp.
    Report(ReportArgs),
    /// Build one report per UTC day for a chain over a date range.
    Backfill(BackfillArgs),
    /// List the configured chains.
    Chains,
    /// Print how fees and revenue are defined.
    Methodology,
}

#[derive(Parser)]
struct ReportArgs {
    /// Chain to report on. Repeat for several; all configured chains when omitted.
    #[arg(long = "chain", value_enum)]
    chains: Vec<ChainId>,

    /// As-of unix timestamp in seconds. Defaults to now.
    #[arg(long)]
    timestamp: Option<i64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Parser)]
struct BackfillArgs {
    #[arg(long, value_enum)]
    chain: ChainId,

    /// The first report day (format: YYYY-MM-DD).
    #[arg(long)]
    from: NaiveDate,

    /// The last report day, inclusive (format: YYYY-MM-DD).
    #[arg(long)]
    to: NaiveDate,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_report(args: ReportArgs, settings: &Settings) -> anyhow::Result<()> {
    let timestamp = args.timestamp.unwrap_or_else(|| Utc::now().timestamp());
    let results = if args.chains.is_empty() {
        engine::run_all_chains(settings, timestamp).await
    } else {
        engine::run_chains(settings, &args.chains, timestamp).await
    };
    let requested = results.len();

    let mut reports = BTreeMap::new();
    let mut failed = 0usize;
    for (chain, result) in results {
        match result {
            Ok(report) => {
                reports.insert(chain.to_string(), report);
            }
            Err(e) => {
                tracing::error!(%chain, error = %e, "Fee report failed.");
                failed += 1;
            }
        }
    }

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Table => println!("{}", reports_table(&reports)),
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {requested} chain reports failed");
    }
    Ok(())
}

/// Produces one report per day, oldest first. Days are independent, so a
/// failed day is logged and the run carries on.
async fn handle_backfill(args: BackfillArgs, settings: &Settings) -> anyhow::Result<()> {
    if args.from > args.to {
        anyhow::bail!("--from ({}) is after --to ({})", args.from, args.to);
    }

    tracing::info!(chain = %args.chain, from = %args.from, to = %args.to, "Starting backfill.");

    let mut failed = 0usize;
    for day in args.from.iter_days().take_while(|day| *day <= args.to) {
        let timestamp = day
            .and_hms_opt(0, 0, 0)
            .context("midnight is always a valid time")?
            .and_utc()
            .timestamp();

        match engine::run_chain(settings, args.chain, timestamp).await {
            Ok(report) => println!("{}", serde_json::to_string(&report)?),
            Err(e) => {
                tracing::error!(%day, error = %e, "Backfill day failed.");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} backfill days failed for {}", args.chain);
    }
    Ok(())
}

fn reports_table(reports: &BTreeMap<String, FeeReport>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Chain",
        "Timestamp",
        "Daily fees",
        "Daily revenue",
        "Total fees",
        "Total revenue",
    ]);
    for (chain, report) in reports {
        table.add_row(vec![
            chain.clone(),
            report.timestamp.to_string(),
            report.daily_fees.clone(),
            report.daily_revenue.clone(),
            report.total_fees.clone(),
            report.total_revenue.clone(),
        ]);
    }
    table
}

fn print_chains(settings: &Settings) {
    let mut table = Table::new();
    table.set_header(vec!["Chain", "Endpoint", "Start timestamp", "Start date"]);
    for (chain, config) in &settings.chains {
        let start_date = DateTime::from_timestamp(config.start_timestamp, 0)
            .map(|dt| dt.date_naive().to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            chain.to_string(),
            config.endpoint.clone(),
            config.start_timestamp.to_string(),
            start_date,
        ]);
    }
    println!("{table}");
}
