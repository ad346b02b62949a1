//! Thermostat dataset loading and statistics.
//!
//! - [`loader`] turns a CSV export into a typed [`Dataset`]
//! - [`stats`] holds the missing-value-aware aggregates every consumer uses
//! - [`summary`] computes the dashboard figures shown by `thermowise stats`

pub mod loader;
pub mod stats;
pub mod summary;

pub use loader::{load_csv, parse_csv};
pub use summary::{ColumnDescription, DatasetInfo, QuickStats};
pub use thermowise_core::Dataset;
