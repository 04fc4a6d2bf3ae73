//! # Agriscan Data Source Crate
//!
//! This crate is the ingestion layer in front of the analytics engine. It turns
//! files on disk into the cleaned, immutable `TimeSeries` values the engine expects.
//!
//! ## Architectural Principles
//!
//! - **Layer 2 Adapter:** All filesystem access lives here. The analytics crate never
//!   sees a path.
//! - **Cleaning Contract:** Every series leaving this crate is sorted ascending, has
//!   unique dates, and marks unusable values as absent.
//!
//! ## Public API
//!
//! - `SeriesRepository`: resolves target and reference files and applies the analysis window.
//! - `read_series`: parses a single `date,value` CSV file.
//! - `load_manifest` / `TargetSpec`: the JSON list of commodities to analyse.
//! - `DataSourceError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod csv_series;
pub mod error;
pub mod manifest;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use csv_series::read_series;
pub use error::DataSourceError;
pub use manifest::{TargetSpec, load_manifest};
pub use repository::{AnalysisWindow, SeriesRepository};
