use crate::error::ConfigError;
use chrono::NaiveDate;
use core_types::LagSpec;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// Longest accepted analysis window: one hundred years.
pub const MAX_LOOKBACK_DAYS: i64 = 36_500;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataSettings,
    pub scan: ScanSettings,
    /// The reference universe every target is compared against.
    pub references: Vec<ReferenceSpec>,
    pub logging: LoggingSettings,
    /// Default stdout format for the combined report.
    pub output: OutputFormat,
}

/// Where the cleaned input series live and which window is analysed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// JSON list of `{ "code": ..., "name": ... }` targets.
    pub targets_manifest: PathBuf,
    /// Directory holding one `<code>.csv` per target.
    pub targets_dir: PathBuf,
    /// Directory holding one `<id>.csv` per reference.
    pub references_dir: PathBuf,
    /// Length of the target history window, ending at `as_of`.
    pub lookback_days: i64,
    /// Last date considered. Defaults to today.
    pub as_of: Option<NaiveDate>,
}

/// Parameters for the alignment and lag scan.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Minimum complete aligned rows for a target to be scanned.
    pub min_rows: usize,
    /// Lags examined in order; earlier entries win ties.
    pub lags: Vec<LagSpec>,
}

/// One reference indicator: its file id and the display name used in reports.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReferenceSpec {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            targets_manifest: PathBuf::from("data/targets.json"),
            targets_dir: PathBuf::from("data/targets"),
            references_dir: PathBuf::from("data/references"),
            lookback_days: 365 * 2,
            as_of: None,
        }
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            min_rows: 30,
            lags: LagSpec::default_set(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl ReferenceSpec {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// The energy, agri-business, broad commodity, safe-haven, consumer and
    /// local-market indicators the scanner compares against by default.
    pub fn default_universe() -> Vec<ReferenceSpec> {
        [
            ("CL=F", "Oil (Cost)"),
            ("NG=F", "Gas (Fertilizer)"),
            ("MOO", "Agri-Business ETF"),
            ("DBC", "Commodity Index"),
            ("GLD", "Gold"),
            ("XLP", "Consumer Staples"),
            ("TWD=X", "USD/TWD"),
            ("^TWII", "Taiwan Weighted"),
        ]
        .into_iter()
        .map(|(id, name)| Self::new(id, name))
        .collect()
    }
}

impl Config {
    /// The configured references, or the default universe when none are listed.
    pub fn reference_universe(&self) -> Vec<ReferenceSpec> {
        if self.references.is_empty() {
            ReferenceSpec::default_universe()
        } else {
            self.references.clone()
        }
    }

    /// Checks the cross-field rules serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan.min_rows < 2 {
            return Err(ConfigError::ValidationError(format!(
                "scan.min_rows must be at least 2, got {}",
                self.scan.min_rows
            )));
        }
        if self.scan.lags.is_empty() {
            return Err(ConfigError::ValidationError(
                "scan.lags must list at least one lag".to_string(),
            ));
        }
        if !self.scan.lags.iter().any(|lag| lag.offset == 0) {
            return Err(ConfigError::ValidationError(
                "scan.lags must include the synchronized offset 0".to_string(),
            ));
        }
        let mut offsets = HashSet::new();
        for lag in &self.scan.lags {
            if !offsets.insert(lag.offset) {
                return Err(ConfigError::ValidationError(format!(
                    "scan.lags lists offset {} more than once",
                    lag.offset
                )));
            }
        }
        if !(1..=MAX_LOOKBACK_DAYS).contains(&self.data.lookback_days) {
            return Err(ConfigError::ValidationError(format!(
                "data.lookback_days must be between 1 and {MAX_LOOKBACK_DAYS}, got {}",
                self.data.lookback_days
            )));
        }

        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for reference in &self.references {
            if reference.id.trim().is_empty() || reference.name.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "references need a non-empty id and name".to_string(),
                ));
            }
            if !ids.insert(reference.id.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "reference id '{}' is listed more than once",
                    reference.id
                )));
            }
            if !names.insert(reference.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "reference name '{}' is listed more than once",
                    reference.name
                )));
            }
        }
        Ok(())
    }
}

/// How the combined report is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}
