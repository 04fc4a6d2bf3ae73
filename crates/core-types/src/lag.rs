use serde::{Deserialize, Serialize};

/// A lag offset in aligned-table rows and the label used for it in reports.
///
/// An offset of `L` pairs each target value with the reference value `L` rows
/// earlier, i.e. it tests whether the reference leads the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LagSpec {
    pub offset: usize,
    pub label: String,
}

impl LagSpec {
    pub fn new(offset: usize, label: impl Into<String>) -> Self {
        Self {
            offset,
            label: label.into(),
        }
    }

    /// Builds a lag with the conventional label for its offset.
    pub fn with_default_label(offset: usize) -> Self {
        let label = match offset {
            0 => "Synchronized".to_string(),
            5 => "Leading (1 Week)".to_string(),
            20 => "Leading (1 Month)".to_string(),
            n => format!("Leading ({n} Rows)"),
        };
        Self { offset, label }
    }

    /// Same day, one trading week and one trading month.
    pub fn default_set() -> Vec<LagSpec> {
        [0, 5, 20].into_iter().map(Self::with_default_label).collect()
    }
}
