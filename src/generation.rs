//! Hourly production of wind, solar, nuclear, and hydro for a generation mix.

use std::fmt;

use serde::Serialize;

use crate::config::GenerationConfig;
use crate::series::HourlySeries;

/// Unit counts for the three sized resources.
///
/// Counts are `f64` because the search explores a continuous relaxation;
/// reported mixes are rounded with [`GenerationMix::rounded`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationMix {
    pub wind_turbines: f64,
    pub solar_panels: f64,
    pub nuclear_units: f64,
}

impl GenerationMix {
    pub fn new(wind_turbines: f64, solar_panels: f64, nuclear_units: f64) -> Self {
        Self {
            wind_turbines,
            solar_panels,
            nuclear_units,
        }
    }

    /// Builds a mix from an optimizer point `[wind, solar, nuclear]`.
    pub fn from_point(point: &[f64]) -> Self {
        Self::new(point[0], point[1], point[2])
    }

    /// The mix as an optimizer point `[wind, solar, nuclear]`.
    pub fn to_point(self) -> [f64; 3] {
        [self.wind_turbines, self.solar_panels, self.nuclear_units]
    }

    /// Each count rounded to the nearest whole unit.
    pub fn rounded(self) -> Self {
        Self::new(
            self.wind_turbines.round(),
            self.solar_panels.round(),
            self.nuclear_units.round(),
        )
    }

    /// Each count rounded down to a whole unit.
    pub fn floored(self) -> Self {
        Self::new(
            self.wind_turbines.floor(),
            self.solar_panels.floor(),
            self.nuclear_units.floor(),
        )
    }
}

impl fmt::Display for GenerationMix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "wind={:.0} solar={:.0} nuclear={:.0}",
            self.wind_turbines, self.solar_panels, self.nuclear_units
        )
    }
}

/// Hourly production by source (kWh per hour).
#[derive(Debug, Clone, Serialize)]
pub struct ProductionProfile {
    pub wind: HourlySeries,
    pub solar: HourlySeries,
    pub nuclear: HourlySeries,
    pub hydro: HourlySeries,
}

impl ProductionProfile {
    /// Sum of all four sources, hour by hour.
    pub fn total(&self) -> HourlySeries {
        HourlySeries::from_fn(|h| self.wind[h] + self.solar[h] + self.nuclear[h] + self.hydro[h])
    }
}

/// Turns unit counts into hourly production using per-unit curves.
///
/// Holds the normalized per-turbine output curve and irradiance curve,
/// plus the physical ratings from [`GenerationConfig`].
#[derive(Debug, Clone)]
pub struct GenerationModel {
    wind_unit_curve: HourlySeries,
    irradiance: HourlySeries,
    panel_chain: f64,
    nuclear_unit_kw: f64,
    hydro_kw: f64,
}

impl GenerationModel {
    /// Creates a generation model.
    ///
    /// # Arguments
    ///
    /// * `config` - Per-unit ratings and derating chain
    /// * `wind_unit_curve` - Output of one turbine per hour (kWh)
    /// * `irradiance` - Surface irradiance per hour (Wh/m²)
    pub fn new(
        config: &GenerationConfig,
        wind_unit_curve: HourlySeries,
        irradiance: HourlySeries,
    ) -> Self {
        Self {
            wind_unit_curve,
            irradiance,
            panel_chain: config.panel_efficiency_chain(),
            nuclear_unit_kw: config.nuclear_unit_kw,
            hydro_kw: config.hydro_kw(),
        }
    }

    /// Hourly output of each source for `mix`.
    pub fn produce(&self, mix: &GenerationMix) -> ProductionProfile {
        let solar_factor = mix.solar_panels * self.panel_chain / 1000.0;
        ProductionProfile {
            wind: self.wind_unit_curve.scaled(mix.wind_turbines),
            solar: self.irradiance.scaled(solar_factor),
            nuclear: HourlySeries::constant(mix.nuclear_units * self.nuclear_unit_kw),
            hydro: HourlySeries::constant(self.hydro_kw),
        }
    }

    /// Hourly total output for `mix` without materialising each source.
    pub fn total_production(&self, mix: &GenerationMix) -> HourlySeries {
        let solar_factor = mix.solar_panels * self.panel_chain / 1000.0;
        let constant = mix.nuclear_units * self.nuclear_unit_kw + self.hydro_kw;
        HourlySeries::from_fn(|h| {
            mix.wind_turbines * self.wind_unit_curve[h] + solar_factor * self.irradiance[h] + constant
        })
    }
}
