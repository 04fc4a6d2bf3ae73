use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::cmp::Ordering;

/// Places kept when a correlation is presented.
pub const REPORT_DECIMALS: u32 = 4;

/// Rounds a correlation for presentation. Inputs are finite by construction.
pub fn round_correlation(value: f64) -> Decimal {
    Decimal::from_f64(value)
        .unwrap_or_default()
        .round_dp_with_strategy(REPORT_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

/// The correlation observed at one examined lag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LagCorrelation {
    pub offset: usize,
    pub label: String,
    /// `None` when the correlation is undefined at this lag (too few pairs or a flat operand).
    pub correlation: Option<Decimal>,
}

/// The strongest relationship found between one target and one reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationResult {
    pub target: String,
    pub reference: String,
    pub best_correlation: Decimal,
    pub timing: String,
    pub best_offset: usize,
    pub lags: Vec<LagCorrelation>,
    #[serde(skip)]
    pub(crate) best_raw: f64,
}

impl CorrelationResult {
    /// The unrounded best correlation, used for ranking.
    pub fn best_raw(&self) -> f64 {
        self.best_raw
    }

    pub fn strength(&self) -> f64 {
        self.best_raw.abs()
    }

    /// Looks up the rounded correlation recorded for a lag offset.
    pub fn correlation_at(&self, offset: usize) -> Option<Decimal> {
        self.lags
            .iter()
            .find(|lag| lag.offset == offset)
            .and_then(|lag| lag.correlation)
    }
}

/// Ranked correlation rows for a single target, strongest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub target: String,
    pub rows: Vec<CorrelationResult>,
}

impl Report {
    /// Builds a report, ranking rows by the absolute value of the unrounded
    /// best correlation. The sort is stable, so equal strengths keep column order.
    pub fn new(target: impl Into<String>, mut rows: Vec<CorrelationResult>) -> Self {
        rows.sort_by(|a, b| b.strength().partial_cmp(&a.strength()).unwrap_or(Ordering::Equal));
        Self {
            target: target.into(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// The best indicator for this target, if any.
    pub fn top(&self) -> Option<&CorrelationResult> {
        self.rows.first()
    }
}

/// All reports from one batch run, concatenated in target order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BatchReport {
    rows: Vec<CorrelationResult>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, report: Report) {
        self.rows.extend(report.rows);
    }

    pub fn rows(&self) -> &[CorrelationResult] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// The first `n` rows.
    pub fn top(&self, n: usize) -> &[CorrelationResult] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// The `n` strongest rows across all targets, ranked by unrounded |best|.
    /// Equal strengths keep batch order.
    pub fn strongest(&self, n: usize) -> Vec<CorrelationResult> {
        let mut ranked = self.rows.clone();
        ranked.sort_by(|a, b| b.strength().partial_cmp(&a.strength()).unwrap_or(Ordering::Equal));
        ranked.truncate(n);
        ranked
    }
}
