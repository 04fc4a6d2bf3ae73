//! # Agriscan Analytics Engine
//!
//! This crate finds the macro or financial indicator that moves most closely
//! with a commodity's price, and at which lead time.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files,
//!   networks or configuration sources. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** `SeriesAligner`, `LagScanner` and `ScanEngine` hold only
//!   their parameters. They take immutable series in and hand a report back, so any
//!   number of targets can be processed concurrently without coordination.
//!
//! ## Public API
//!
//! - `SeriesAligner`: left-anchored as-of join of reference series onto a target.
//! - `LagScanner`: Pearson correlation at each configured lag, strongest lag per reference.
//! - `ScanEngine`: the two chained, reporting a `TargetOutcome` per target.
//! - `Report` / `BatchReport`: ranked correlation rows.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod aligner;
pub mod engine;
pub mod error;
pub mod report;
pub mod scanner;
pub mod stats;

// Re-export the key components to create a clean, public-facing API.
pub use aligner::{AlignedTable, DEFAULT_MIN_ROWS, SeriesAligner};
pub use engine::{ScanEngine, TargetOutcome};
pub use error::AnalyticsError;
pub use report::{BatchReport, CorrelationResult, LagCorrelation, Report};
pub use scanner::{LagScanner, lagged_correlation};
pub use stats::pearson;
