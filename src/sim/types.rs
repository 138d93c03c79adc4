//! Core simulation types: storage parameters and dispatch output.

use serde::Serialize;

use crate::config::StorageConfig;
use crate::series::HourlySeries;

/// Storage parameters for one balance run.
///
/// # Examples
///
/// ```
/// use gridmix::sim::types::StorageParams;
///
/// let params = StorageParams::new(500.0, 0.85, 0.5);
/// assert_eq!(params.initial_level_kwh(), 250.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorageParams {
    /// Energy capacity (kWh).
    pub capacity_kwh: f64,
    /// Fraction of surplus retained on charge.
    pub round_trip_efficiency: f64,
    /// Level at hour 0 as a fraction of capacity.
    pub initial_fraction: f64,
}

impl StorageParams {
    pub fn new(capacity_kwh: f64, round_trip_efficiency: f64, initial_fraction: f64) -> Self {
        Self {
            capacity_kwh,
            round_trip_efficiency,
            initial_fraction,
        }
    }

    /// Parameters for `capacity_kwh` with efficiency and start level from config.
    pub fn from_config(capacity_kwh: f64, config: &StorageConfig) -> Self {
        Self::new(
            capacity_kwh,
            config.round_trip_efficiency,
            config.initial_fraction,
        )
    }

    /// Storage level before the first hour (kWh).
    pub fn initial_level_kwh(&self) -> f64 {
        self.capacity_kwh * self.initial_fraction
    }
}

/// Output of one balance run. Never mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchResult {
    /// Backup ("gas") energy needed each hour (kWh, >= 0).
    pub backup_kwh: HourlySeries,
    /// Storage level after each hour's transition (kWh).
    pub storage_kwh: HourlySeries,
    /// Capacity the run was bounded by (kWh).
    pub storage_capacity_kwh: f64,
    /// Sum of `backup_kwh` over the year.
    pub total_backup_kwh: f64,
}
