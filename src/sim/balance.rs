//! Hourly energy balance with a single storage reservoir and backup supply.

use tracing::debug;

use super::types::{DispatchResult, StorageParams};
use crate::error::GridError;
use crate::series::{HOURS_PER_YEAR, HourlySeries};

/// Outcome of a single hourly transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourStep {
    /// Storage level after the hour (kWh).
    pub storage_kwh: f64,
    /// Backup energy dispatched in the hour (kWh).
    pub backup_kwh: f64,
}

/// Applies one hour of the balance rule to `storage_kwh`.
///
/// Surplus charges storage at `round_trip_efficiency`, clamped to capacity.
/// Deficit drains storage first; whatever storage cannot cover is backup.
///
/// # Examples
///
/// ```
/// use gridmix::sim::balance::step_hour;
/// use gridmix::sim::types::StorageParams;
///
/// let params = StorageParams::new(1000.0, 0.85, 0.5);
/// let step = step_hour(100.0, 500.0, 900.0, &params);
/// assert_eq!(step.storage_kwh, 0.0);
/// assert_eq!(step.backup_kwh, 300.0);
/// ```
pub fn step_hour(
    storage_kwh: f64,
    production_kwh: f64,
    demand_kwh: f64,
    params: &StorageParams,
) -> HourStep {
    let net = production_kwh - demand_kwh;
    if net > 0.0 {
        return HourStep {
            storage_kwh: (storage_kwh + net * params.round_trip_efficiency)
                .min(params.capacity_kwh),
            backup_kwh: 0.0,
        };
    }

    let deficit = -net;
    if storage_kwh >= deficit {
        HourStep {
            storage_kwh: storage_kwh - deficit,
            backup_kwh: 0.0,
        }
    } else {
        HourStep {
            storage_kwh: 0.0,
            backup_kwh: deficit - storage_kwh,
        }
    }
}

/// Runs the balance over all hours of the year, strictly in hour order.
///
/// Storage starts at `params.initial_level_kwh()` and is carried from one
/// hour to the next; nothing outside the arguments influences the result.
///
/// # Errors
///
/// Returns [`GridError::NoStorageCapacity`] if `params.capacity_kwh` is not
/// positive. Callers inside the search never reach this: they map
/// infeasible mixes to a sentinel before simulating.
pub fn simulate(
    production: &HourlySeries,
    demand: &HourlySeries,
    params: &StorageParams,
) -> Result<DispatchResult, GridError> {
    if !(params.capacity_kwh > 0.0) {
        return Err(GridError::NoStorageCapacity {
            capacity_kwh: params.capacity_kwh,
        });
    }

    let mut backup = Vec::with_capacity(HOURS_PER_YEAR);
    let mut storage = Vec::with_capacity(HOURS_PER_YEAR);
    let mut level = params.initial_level_kwh();

    for (&produced, &demanded) in production.iter().zip(demand.iter()) {
        let step = step_hour(level, produced, demanded, params);
        level = step.storage_kwh;
        backup.push(step.backup_kwh);
        storage.push(level);
    }

    let backup_kwh = HourlySeries::from_year(backup);
    let storage_kwh = HourlySeries::from_year(storage);
    let total_backup_kwh = backup_kwh.sum();
    debug!(
        capacity_kwh = params.capacity_kwh,
        total_backup_kwh, "balance run complete"
    );

    Ok(DispatchResult {
        backup_kwh,
        storage_kwh,
        storage_capacity_kwh: params.capacity_kwh,
        total_backup_kwh,
    })
}
