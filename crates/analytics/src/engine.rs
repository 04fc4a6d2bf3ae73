use crate::aligner::SeriesAligner;
use crate::error::AnalyticsError;
use crate::report::Report;
use crate::scanner::LagScanner;
use core_types::TimeSeries;

/// What one target's align-and-scan pipeline produced.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetOutcome {
    /// At least one reference yielded a defined correlation.
    Report(Report),
    /// Alignment succeeded but no reference correlated at any lag.
    NoSignal,
    /// Too few complete rows survived alignment to be worth scanning.
    Skipped { rows: usize, required: usize },
}

/// A stateless pipeline that aligns a target with its references and scans the result.
///
/// Each call works only on its arguments, so one engine can be shared by
/// concurrently running targets.
#[derive(Debug, Clone, Default)]
pub struct ScanEngine {
    aligner: SeriesAligner,
    scanner: LagScanner,
}

impl ScanEngine {
    pub fn new(aligner: SeriesAligner, scanner: LagScanner) -> Self {
        Self { aligner, scanner }
    }

    pub fn aligner(&self) -> &SeriesAligner {
        &self.aligner
    }

    pub fn scanner(&self) -> &LagScanner {
        &self.scanner
    }

    /// Runs the full pipeline for one target.
    ///
    /// Insufficient data and an empty report are expected outcomes and come
    /// back as `Ok`. Only malformed input (an empty target, duplicate
    /// reference names) is an error.
    pub fn run(
        &self,
        target: &TimeSeries,
        references: &[TimeSeries],
    ) -> Result<TargetOutcome, AnalyticsError> {
        let table = match self.aligner.align(target, references) {
            Ok(table) => table,
            Err(AnalyticsError::InsufficientData { rows, required, .. }) => {
                tracing::info!(
                    commodity = %target.name(),
                    rows,
                    required,
                    "Too few aligned trading days; skipping target"
                );
                return Ok(TargetOutcome::Skipped { rows, required });
            }
            Err(e) => return Err(e),
        };

        let report = self.scanner.scan(&table);
        if report.is_empty() {
            tracing::info!(commodity = %target.name(), "No reference produced a defined correlation");
            return Ok(TargetOutcome::NoSignal);
        }

        if let Some(top) = report.top() {
            tracing::info!(
                commodity = %target.name(),
                reference = %top.reference,
                correlation = %top.best_correlation,
                timing = %top.timing,
                "Best indicator found"
            );
        }
        Ok(TargetOutcome::Report(report))
    }
}
