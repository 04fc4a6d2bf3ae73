use analytics::{ScanEngine, TargetOutcome};
use anyhow::Result;
use core_types::TimeSeries;
use datasource::{SeriesRepository, TargetSpec};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tokio::task::JoinError;

/// How a single target's pipeline ended.
#[derive(Debug)]
pub enum PipelineResult {
    Finished(TargetOutcome),
    /// The target could not be loaded or its input was malformed.
    Failed(String),
}

/// Runs one load-align-scan pipeline per target concurrently.
///
/// Every pipeline owns its target series and only reads the shared, immutable
/// reference universe, so a failure in one target never touches another.
/// Results come back in manifest order.
pub async fn run_all(
    targets: Vec<TargetSpec>,
    repository: SeriesRepository,
    universe: Arc<Vec<TimeSeries>>,
    engine: Arc<ScanEngine>,
) -> Result<Vec<(TargetSpec, PipelineResult)>> {
    // Set up the progress bar
    let progress_bar = ProgressBar::new(targets.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
            .progress_chars("#>-"),
    );

    let (specs, tasks): (Vec<_>, Vec<_>) = targets
        .into_iter()
        .map(|target| {
            let repository = repository.clone();
            let universe = Arc::clone(&universe);
            let engine = Arc::clone(&engine);
            let pb_clone = progress_bar.clone();
            let spec = target.clone();

            let handle = tokio::task::spawn_blocking(move || {
                pb_clone.set_message(format!("Scanning {}...", target.name));
                let result = run_one(&repository, &engine, &universe, &target);
                pb_clone.inc(1);
                result
            });
            (spec, handle)
        })
        .unzip();

    // Wait for all concurrent pipelines to complete
    let joined = join_all(tasks).await;

    progress_bar.finish_with_message("Scan complete!");

    Ok(pair_results(specs, joined))
}

/// Matches each target with its task result. A task that panicked is
/// reported as a failure of that target.
fn pair_results(
    targets: Vec<TargetSpec>,
    joined: Vec<Result<PipelineResult, JoinError>>,
) -> Vec<(TargetSpec, PipelineResult)> {
    targets
        .into_iter()
        .zip(joined)
        .map(|(target, outcome)| {
            let result = outcome.unwrap_or_else(|e| {
                tracing::error!(commodity = %target.name, error = %e, "A scan task panicked");
                PipelineResult::Failed(format!("scan task panicked: {e}"))
            });
            (target, result)
        })
        .collect()
}

fn run_one(
    repository: &SeriesRepository,
    engine: &ScanEngine,
    universe: &[TimeSeries],
    target: &TargetSpec,
) -> PipelineResult {
    let series = match repository.load_target(target) {
        Ok(series) => series,
        Err(e) => {
            tracing::warn!(commodity = %target.name, error = %e, "Failed to load target");
            return PipelineResult::Failed(e.to_string());
        }
    };

    match engine.run(&series, universe) {
        Ok(outcome) => PipelineResult::Finished(outcome),
        Err(e) => {
            tracing::warn!(commodity = %target.name, error = %e, "Scan failed");
            PipelineResult::Failed(e.to_string())
        }
    }
}
