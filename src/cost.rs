//! Capital cost of a generation mix and the storage it leaves room for.

use serde::Serialize;

use crate::config::CostConfig;
use crate::generation::GenerationMix;
use crate::search::Bounds;

/// Capital spend per resource (EUR) and the storage it buys.
///
/// Derived from a mix, never stored independently. A negative
/// `storage_eur` means the mix is over budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetAllocation {
    pub budget_eur: f64,
    pub wind_eur: f64,
    pub solar_eur: f64,
    pub nuclear_eur: f64,
    /// Residual budget left for storage (may be ≤ 0).
    pub storage_eur: f64,
    /// Storage energy capacity the residual buys (kWh, may be ≤ 0).
    pub storage_capacity_kwh: f64,
}

impl BudgetAllocation {
    /// Capital cost of the generation units alone.
    pub fn generation_eur(&self) -> f64 {
        self.wind_eur + self.solar_eur + self.nuclear_eur
    }

    /// Whether any storage capacity is left after buying the generation units.
    pub fn is_feasible(&self) -> bool {
        self.storage_capacity_kwh > 0.0
    }
}

/// Splits `budget_eur` between the units in `mix` and storage.
///
/// No rounding is applied; fractional unit counts and fractional kWh are
/// allowed.
pub fn allocate(mix: &GenerationMix, costs: &CostConfig, budget_eur: f64) -> BudgetAllocation {
    let wind_eur = mix.wind_turbines * costs.wind_turbine_eur;
    let solar_eur = mix.solar_panels * costs.solar_panel_eur;
    let nuclear_eur = mix.nuclear_units * costs.nuclear_unit_eur;
    let storage_eur = budget_eur - (wind_eur + solar_eur + nuclear_eur);
    BudgetAllocation {
        budget_eur,
        wind_eur,
        solar_eur,
        nuclear_eur,
        storage_eur,
        storage_capacity_kwh: storage_eur / costs.storage_per_kwh_eur,
    }
}

/// Per-variable search bounds `[0, budget // unit_cost]` for wind, solar, nuclear.
///
/// Each upper bound assumes the whole budget goes to that one resource.
pub fn unit_bounds(costs: &CostConfig, budget_eur: f64) -> Bounds {
    Bounds::new(vec![
        (0.0, (budget_eur / costs.wind_turbine_eur).floor()),
        (0.0, (budget_eur / costs.solar_panel_eur).floor()),
        (0.0, (budget_eur / costs.nuclear_unit_eur).floor()),
    ])
}
