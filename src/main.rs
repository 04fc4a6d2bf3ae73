use analytics::{BatchReport, LagScanner, ScanEngine, SeriesAligner, TargetOutcome};
use anyhow::{Context, bail};
use batch::PipelineResult;
use clap::{Parser, Subcommand};
use configuration::{Config, OutputFormat};
use datasource::SeriesRepository;
use render::InventoryRow;
use std::path::PathBuf;
use std::sync::Arc;

mod batch;
mod render;
mod telemetry;

/// The main entry point for the Agriscan correlation scanner.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load RUST_LOG and AGRISCAN__* overrides from a .env file, if there is one
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let _log_guard = telemetry::init(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Scan(args) => handle_scan(args, config).await,
        Commands::Check => handle_check(&config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Finds which macro or market indicator best tracks each commodity's price, and at what lead.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (defaults to ./config.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Align every target with the reference universe and rank lagged correlations.
    Scan(ScanArgs),
    /// List the configured series and how much data each one has.
    Check,
}

#[derive(Parser)]
struct ScanArgs {
    /// Only scan these targets (matched by name or code). May be repeated.
    #[arg(long = "target")]
    targets: Vec<String>,

    /// Override the minimum number of aligned rows required to scan a target.
    #[arg(long, value_parser = clap::value_parser!(u64).range(2..))]
    min_rows: Option<u64>,

    /// Output format for the combined report.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Only print the N strongest rows of the combined report, across all targets.
    #[arg(long)]
    top: Option<usize>,
}

// ==============================================================================
// Scan Command Logic
// ==============================================================================

/// Loads inputs, runs every target's pipeline and prints the combined report.
async fn handle_scan(args: ScanArgs, config: Config) -> anyhow::Result<()> {
    let today = chrono::Local::now().date_naive();
    let repository = SeriesRepository::new(config.data.clone(), today);
    let window = repository.window();

    let mut targets = repository.load_targets()?;
    if !args.targets.is_empty() {
        targets.retain(|t| args.targets.iter().any(|wanted| wanted == &t.name || wanted == &t.code));
        if targets.is_empty() {
            bail!("None of the requested targets are in the manifest: {:?}", args.targets);
        }
    }

    let universe = repository.load_universe(&config.reference_universe());
    if universe.is_empty() {
        tracing::warn!("No reference series could be loaded; every target will report no signal");
    }

    let min_rows = args.min_rows.map_or(config.scan.min_rows, |n| n as usize);
    let scanner = LagScanner::new(config.scan.lags.clone())?;
    let engine = ScanEngine::new(SeriesAligner::new(min_rows), scanner);

    tracing::info!(
        targets = targets.len(),
        references = universe.len(),
        from = %window.start,
        to = %window.end,
        min_rows,
        "Starting correlation scan"
    );

    let results = batch::run_all(
        targets,
        repository,
        Arc::new(universe),
        Arc::new(engine),
    )
    .await?;

    let mut combined = BatchReport::new();
    for (target, result) in results {
        match result {
            PipelineResult::Finished(TargetOutcome::Report(report)) => {
                if let Some(top) = report.top() {
                    println!(
                        "{}: best indicator {} (corr {}, {})",
                        target.name, top.reference, top.best_correlation, top.timing
                    );
                }
                combined.push(report);
            }
            PipelineResult::Finished(TargetOutcome::NoSignal) => {
                println!("{}: no signal found", target.name);
            }
            PipelineResult::Finished(TargetOutcome::Skipped { rows, required }) => {
                println!(
                    "{}: only {} aligned trading days (need {}), skipped",
                    target.name, rows, required
                );
            }
            PipelineResult::Failed(reason) => {
                println!("{}: failed: {}", target.name, reason);
            }
        }
    }

    if combined.is_empty() {
        println!("No reports produced.");
        return Ok(());
    }

    let rows = match args.top {
        Some(n) => combined.strongest(n),
        None => combined.rows().to_vec(),
    };
    match args.format.unwrap_or(config.output) {
        OutputFormat::Table => {
            println!("{}", render::report_table(&rows, &config.scan.lags));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }

    Ok(())
}

// ==============================================================================
// Check Command Logic
// ==============================================================================

/// Reports which configured series can be loaded and what span they cover.
fn handle_check(config: &Config) -> anyhow::Result<()> {
    let today = chrono::Local::now().date_naive();
    let repository = SeriesRepository::new(config.data.clone(), today);
    let window = repository.window();

    let mut rows = Vec::new();
    match repository.load_targets() {
        Ok(targets) => {
            for target in targets {
                rows.push(InventoryRow {
                    kind: "target",
                    name: target.name.clone(),
                    file: repository.target_path(&target).display().to_string(),
                    series: repository.load_target(&target).map_err(|e| e.to_string()),
                });
            }
        }
        Err(e) => println!("Target manifest unavailable: {e}"),
    }
    for reference in config.reference_universe() {
        rows.push(InventoryRow {
            kind: "reference",
            name: reference.name.clone(),
            file: repository.reference_path(&reference).display().to_string(),
            series: repository.load_reference(&reference).map_err(|e| e.to_string()),
        });
    }

    println!("Analysis window: {} to {}", window.start, window.end);
    println!("{}", render::inventory_table(&rows));
    Ok(())
}
