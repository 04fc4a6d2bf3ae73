//! # Agriscan Core Types
//!
//! Layer 0 of the workspace: plain data structures shared by the ingestion,
//! analytics and presentation layers. Nothing in here performs I/O.
//!
//! - `TimeSeries` / `Observation`: a named, date-keyed series of optional values.
//! - `LagSpec`: a row offset paired with the label shown in reports.

pub mod error;
pub mod lag;
pub mod series;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use lag::LagSpec;
pub use series::{Observation, TimeSeries};
