use crate::error::AnalyticsError;
use chrono::NaiveDate;
use core_types::{Observation, TimeSeries};
use std::collections::HashSet;

/// Rows an aligned table must keep before it is worth scanning.
pub const DEFAULT_MIN_ROWS: usize = 30;

/// A target series and its reference series sampled on the target's calendar.
///
/// Stored column-major: `target_values[i]` and `columns[c][i]` all belong to
/// `dates[i]`. Every cell is populated; incomplete rows never make it in here.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedTable {
    target: String,
    dates: Vec<NaiveDate>,
    target_values: Vec<f64>,
    references: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl AlignedTable {
    pub fn target_name(&self) -> &str {
        &self.target
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn target_values(&self) -> &[f64] {
        &self.target_values
    }

    pub fn reference_names(&self) -> &[String] {
        &self.references
    }

    pub fn column(&self, index: usize) -> Option<&[f64]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    /// Iterates `(reference name, column values)` in input order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.references
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter().map(Vec::as_slice))
    }
}

/// Left-anchored as-of join of reference series onto a target series.
#[derive(Debug, Clone)]
pub struct SeriesAligner {
    min_rows: usize,
}

impl Default for SeriesAligner {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_ROWS)
    }
}

impl SeriesAligner {
    pub fn new(min_rows: usize) -> Self {
        Self { min_rows }
    }

    pub fn min_rows(&self) -> usize {
        self.min_rows
    }

    /// Aligns every reference onto the target's dates.
    ///
    /// Each reference cell takes the latest recorded reference value at or
    /// before the row date. Rows where the target or any reference is still
    /// absent are dropped afterwards.
    ///
    /// # Errors
    ///
    /// - `EmptyTarget` if the target has no observations.
    /// - `DuplicateReference` if two references share a name.
    /// - `InsufficientData` if fewer than `min_rows` complete rows remain.
    pub fn align(
        &self,
        target: &TimeSeries,
        references: &[TimeSeries],
    ) -> Result<AlignedTable, AnalyticsError> {
        if target.is_empty() {
            return Err(AnalyticsError::EmptyTarget(target.name().to_string()));
        }

        let mut seen = HashSet::with_capacity(references.len());
        for reference in references {
            if !seen.insert(reference.name()) {
                return Err(AnalyticsError::DuplicateReference(
                    reference.name().to_string(),
                ));
            }
        }

        let anchor = target.observations();
        let filled: Vec<Vec<Option<f64>>> = references
            .iter()
            .map(|reference| forward_fill(anchor, reference))
            .collect();

        let mut dates = Vec::with_capacity(anchor.len());
        let mut target_values = Vec::with_capacity(anchor.len());
        let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(anchor.len()); references.len()];

        for (row, observation) in anchor.iter().enumerate() {
            let Some(target_value) = observation.value else {
                continue;
            };
            let cells: Option<Vec<f64>> = filled.iter().map(|column| column[row]).collect();
            let Some(cells) = cells else {
                continue;
            };

            dates.push(observation.date);
            target_values.push(target_value);
            for (column, cell) in columns.iter_mut().zip(cells) {
                column.push(cell);
            }
        }

        tracing::debug!(
            commodity = %target.name(),
            kept = dates.len(),
            dropped = anchor.len() - dates.len(),
            references = references.len(),
            "Aligned reference series onto target calendar"
        );

        if dates.len() < self.min_rows {
            return Err(AnalyticsError::InsufficientData {
                target: target.name().to_string(),
                rows: dates.len(),
                required: self.min_rows,
            });
        }

        Ok(AlignedTable {
            target: target.name().to_string(),
            dates,
            target_values,
            references: references.iter().map(|r| r.name().to_string()).collect(),
            columns,
        })
    }
}

/// Resolves one reference onto the anchor dates with a single merge-scan.
///
/// Both sides are sorted ascending, so the reference cursor only ever moves
/// forward and the whole pass is O(n + m).
fn forward_fill(anchor: &[Observation], reference: &TimeSeries) -> Vec<Option<f64>> {
    let mut filled = Vec::with_capacity(anchor.len());
    let mut last_seen: Option<f64> = None;
    let mut cursor = reference.observations().iter().peekable();

    for observation in anchor {
        while let Some(next) = cursor.next_if(|r| r.date <= observation.date) {
            if next.value.is_some() {
                last_seen = next.value;
            }
        }
        filled.push(last_seen);
    }

    filled
}
