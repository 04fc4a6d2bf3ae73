use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Malformed target manifest '{path}': {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Target manifest '{0}' lists no targets")]
    EmptyManifest(PathBuf),

    #[error("'{path}' has no {column} column")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("Series error: {0}")]
    Series(#[from] core_types::CoreError),
}
