//! Crate-wide error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised by the simulator, the search, and the input loaders.
#[derive(Debug, Error)]
pub enum GridError {
    /// An input series is empty or contains a non-finite or negative sample.
    #[error("malformed input series `{series}`: {reason}")]
    MalformedInput { series: String, reason: String },

    /// The mix costs at least the whole budget, leaving no room for storage.
    #[error(
        "infeasible configuration: generation costs {capital_cost_eur:.2} EUR \
         against a budget of {budget_eur:.2} EUR"
    )]
    InfeasibleConfiguration {
        capital_cost_eur: f64,
        budget_eur: f64,
    },

    /// The balance simulator was handed a non-positive storage capacity.
    #[error("storage capacity must be > 0 kWh, got {capacity_kwh:.2}")]
    NoStorageCapacity { capacity_kwh: f64 },

    /// The search was asked to run over an unusable domain.
    #[error("invalid search setup: {reason}")]
    InvalidBounds { reason: String },

    #[error("column `{column}` not found in \"{}\"", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("cannot parse \"{value}\" as a number in \"{}\" (row {row})", .path.display())]
    Parse {
        path: PathBuf,
        row: usize,
        value: String,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
