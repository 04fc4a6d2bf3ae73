use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Target series '{0}' has no observations")]
    EmptyTarget(String),

    #[error("Not enough aligned data for '{target}': {rows} rows, at least {required} required")]
    InsufficientData {
        target: String,
        rows: usize,
        required: usize,
    },

    #[error("Reference series '{0}' was supplied more than once")]
    DuplicateReference(String),

    #[error("Invalid lag configuration: {0}")]
    InvalidLags(String),
}
