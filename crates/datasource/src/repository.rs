use crate::csv_series::read_series;
use crate::error::DataSourceError;
use crate::manifest::{TargetSpec, load_manifest};
use chrono::{NaiveDate, TimeDelta};
use configuration::{DataSettings, ReferenceSpec};
use core_types::TimeSeries;
use std::path::PathBuf;

/// The inclusive date range a batch run looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AnalysisWindow {
    /// The `lookback_days` long window that ends on `end`.
    ///
    /// A lookback reaching past the earliest representable date starts the
    /// window at `NaiveDate::MIN`.
    pub fn ending(end: NaiveDate, lookback_days: i64) -> Self {
        let start = TimeDelta::try_days(lookback_days)
            .and_then(|lookback| end.checked_sub_signed(lookback))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }
}

/// The `SeriesRepository` provides the application-specific view of the data
/// directory. It knows where each target and reference lives and trims every
/// series to the analysis window before handing it out.
#[derive(Debug, Clone)]
pub struct SeriesRepository {
    settings: DataSettings,
    window: AnalysisWindow,
}

impl SeriesRepository {
    /// `today` is used as the window end unless the settings pin `as_of`.
    pub fn new(settings: DataSettings, today: NaiveDate) -> Self {
        let end = settings.as_of.unwrap_or(today);
        let window = AnalysisWindow::ending(end, settings.lookback_days);
        Self { settings, window }
    }

    pub fn window(&self) -> AnalysisWindow {
        self.window
    }

    pub fn load_targets(&self) -> Result<Vec<TargetSpec>, DataSourceError> {
        load_manifest(&self.settings.targets_manifest)
    }

    pub fn target_path(&self, target: &TargetSpec) -> PathBuf {
        self.settings.targets_dir.join(format!("{}.csv", target.code))
    }

    pub fn reference_path(&self, reference: &ReferenceSpec) -> PathBuf {
        self.settings.references_dir.join(format!("{}.csv", reference.id))
    }

    /// Loads a target's price history, named after the target, clipped to the window.
    pub fn load_target(&self, target: &TargetSpec) -> Result<TimeSeries, DataSourceError> {
        let series = read_series(&self.target_path(target), &target.name)?;
        let clipped = series.clipped(Some(self.window.start), Some(self.window.end));
        tracing::debug!(
            commodity = %target.name,
            code = %target.code,
            observations = clipped.len(),
            "Loaded target series"
        );
        Ok(clipped)
    }

    /// Loads a reference under its display name.
    ///
    /// Only the end of the window is applied: observations before the window
    /// start are kept so the first target days have a value to carry forward.
    pub fn load_reference(&self, reference: &ReferenceSpec) -> Result<TimeSeries, DataSourceError> {
        let series = read_series(&self.reference_path(reference), &reference.name)?;
        Ok(series.clipped(None, Some(self.window.end)))
    }

    /// Loads every reference that is available, skipping missing or empty ones.
    pub fn load_universe(&self, references: &[ReferenceSpec]) -> Vec<TimeSeries> {
        let mut universe = Vec::with_capacity(references.len());
        for reference in references {
            match self.load_reference(reference) {
                Ok(series) if series.recorded() == 0 => {
                    tracing::warn!(reference = %reference.name, "Reference has no usable observations; skipped");
                }
                Ok(series) => universe.push(series),
                Err(e) => {
                    tracing::warn!(reference = %reference.name, error = %e, "Failed to load reference; skipped");
                }
            }
        }
        tracing::info!(
            loaded = universe.len(),
            configured = references.len(),
            "Reference universe ready"
        );
        universe
    }
}
