//! Post-hoc KPI computation from a dispatch trace.

use std::fmt;

use serde::Serialize;

use super::types::{DispatchResult, StorageParams};
use crate::series::HourlySeries;

/// Aggregate indicators derived from one balance run.
///
/// Computed after the run from the hourly traces so the reported figures
/// always agree with the trace itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchSummary {
    /// Annual backup energy (kWh).
    pub total_backup_kwh: f64,
    /// Largest single-hour backup draw (kWh).
    pub peak_backup_kwh: f64,
    /// Hours in which backup was dispatched.
    pub backup_hours: usize,
    /// Hours that ended with storage at capacity.
    pub full_storage_hours: usize,
    /// Hours that ended with storage empty.
    pub empty_storage_hours: usize,
    /// Surplus that could not be stored because storage was full (kWh, pre-efficiency).
    pub spilled_surplus_kwh: f64,
    /// Storage level after the final hour (kWh).
    pub final_storage_kwh: f64,
}

impl DispatchSummary {
    /// Computes the summary for `dispatch`, given the series it was run on.
    ///
    /// # Arguments
    ///
    /// * `dispatch` - Completed balance run
    /// * `production` - Total production the run consumed
    /// * `demand` - Demand the run consumed
    /// * `params` - Storage parameters the run used
    pub fn from_dispatch(
        dispatch: &DispatchResult,
        production: &HourlySeries,
        demand: &HourlySeries,
        params: &StorageParams,
    ) -> Self {
        let capacity = dispatch.storage_capacity_kwh;
        let mut peak_backup = 0.0_f64;
        let mut backup_hours = 0_usize;
        let mut full_hours = 0_usize;
        let mut empty_hours = 0_usize;
        let mut spilled = 0.0_f64;
        let mut previous = params.initial_level_kwh();

        for h in 0..dispatch.backup_kwh.len() {
            let backup = dispatch.backup_kwh[h];
            let level = dispatch.storage_kwh[h];

            peak_backup = peak_backup.max(backup);
            if backup > 0.0 {
                backup_hours += 1;
            }
            if level >= capacity {
                full_hours += 1;
            }
            if level <= 0.0 {
                empty_hours += 1;
            }

            let surplus = production[h] - demand[h];
            if surplus > 0.0 {
                let stored = level - previous;
                spilled += (surplus - stored / params.round_trip_efficiency).max(0.0);
            }
            previous = level;
        }

        Self {
            total_backup_kwh: dispatch.total_backup_kwh,
            peak_backup_kwh: peak_backup,
            backup_hours,
            full_storage_hours: full_hours,
            empty_storage_hours: empty_hours,
            spilled_surplus_kwh: spilled,
            final_storage_kwh: dispatch.storage_kwh.last(),
        }
    }
}

impl fmt::Display for DispatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Dispatch Summary ---")?;
        writeln!(f, "Backup energy:         {:.2} kWh", self.total_backup_kwh)?;
        writeln!(f, "Peak backup hour:      {:.2} kWh", self.peak_backup_kwh)?;
        writeln!(f, "Hours on backup:       {}", self.backup_hours)?;
        writeln!(f, "Hours storage full:    {}", self.full_storage_hours)?;
        writeln!(f, "Hours storage empty:   {}", self.empty_storage_hours)?;
        writeln!(f, "Spilled surplus:       {:.2} kWh", self.spilled_surplus_kwh)?;
        write!(f, "Final storage level:   {:.2} kWh", self.final_storage_kwh)
    }
}
