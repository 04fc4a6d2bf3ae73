use crate::aligner::AlignedTable;
use crate::error::AnalyticsError;
use crate::report::{CorrelationResult, LagCorrelation, Report, round_correlation};
use crate::stats::pearson;
use core_types::LagSpec;
use std::collections::HashSet;

/// Scans every reference column of an aligned table at a fixed set of lags
/// and keeps the strongest correlation per reference.
#[derive(Debug, Clone)]
pub struct LagScanner {
    lags: Vec<LagSpec>,
}

impl Default for LagScanner {
    fn default() -> Self {
        Self {
            lags: LagSpec::default_set(),
        }
    }
}

impl LagScanner {
    /// Creates a scanner over `lags`, examined in the given order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLags` if the list is empty, lacks the synchronized
    /// offset 0, or repeats an offset.
    pub fn new(lags: Vec<LagSpec>) -> Result<Self, AnalyticsError> {
        if lags.is_empty() {
            return Err(AnalyticsError::InvalidLags("no lags supplied".to_string()));
        }
        if !lags.iter().any(|lag| lag.offset == 0) {
            return Err(AnalyticsError::InvalidLags(
                "the synchronized lag 0 must be examined".to_string(),
            ));
        }
        let mut seen = HashSet::with_capacity(lags.len());
        if let Some(dup) = lags.iter().find(|lag| !seen.insert(lag.offset)) {
            return Err(AnalyticsError::InvalidLags(format!(
                "offset {} listed more than once",
                dup.offset
            )));
        }
        Ok(Self { lags })
    }

    pub fn lags(&self) -> &[LagSpec] {
        &self.lags
    }

    /// Produces the ranked report for the table's target.
    ///
    /// References whose correlation is undefined at every lag are left out, so
    /// the report may be empty.
    pub fn scan(&self, table: &AlignedTable) -> Report {
        let target = table.target_values();
        let rows: Vec<CorrelationResult> = table
            .columns()
            .filter_map(|(reference, column)| {
                let result = self.scan_column(table.target_name(), reference, target, column);
                if result.is_none() {
                    tracing::debug!(
                        commodity = %table.target_name(),
                        reference = %reference,
                        "No defined correlation at any lag; reference omitted"
                    );
                }
                result
            })
            .collect();

        Report::new(table.target_name(), rows)
    }

    fn scan_column(
        &self,
        target_name: &str,
        reference: &str,
        target: &[f64],
        column: &[f64],
    ) -> Option<CorrelationResult> {
        let correlations: Vec<Option<f64>> = self
            .lags
            .iter()
            .map(|lag| lagged_correlation(target, column, lag.offset))
            .collect();

        let best_index = select_best(&correlations)?;
        let best_raw = correlations[best_index]?;
        let best_lag = &self.lags[best_index];

        let lags = self
            .lags
            .iter()
            .zip(&correlations)
            .map(|(lag, r)| LagCorrelation {
                offset: lag.offset,
                label: lag.label.clone(),
                correlation: r.map(round_correlation),
            })
            .collect();

        Some(CorrelationResult {
            target: target_name.to_string(),
            reference: reference.to_string(),
            best_correlation: round_correlation(best_raw),
            timing: best_lag.label.clone(),
            best_offset: best_lag.offset,
            lags,
            best_raw,
        })
    }
}

/// Correlates `target[i]` with `reference[i - offset]` over every row where both exist.
pub fn lagged_correlation(target: &[f64], reference: &[f64], offset: usize) -> Option<f64> {
    let n = target.len().min(reference.len());
    if offset >= n {
        return None;
    }
    pearson(&target[offset..n], &reference[..n - offset])
}

/// Index of the defined correlation with the largest magnitude.
/// On equal magnitude the earlier index wins.
fn select_best(correlations: &[Option<f64>]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, r) in correlations.iter().enumerate() {
        let Some(r) = r else { continue };
        match best {
            Some((_, strongest)) if r.abs() <= strongest => {}
            _ => best = Some((index, r.abs())),
        }
    }
    best.map(|(index, _)| index)
}
