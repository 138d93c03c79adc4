//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the `brighton` scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::brighton`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Capital budget available for the whole mix.
    #[serde(default)]
    pub budget: BudgetConfig,
    /// Per-unit capital costs.
    #[serde(default)]
    pub costs: CostConfig,
    /// Per-unit physical ratings.
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Storage behaviour.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Optimizer settings.
    #[serde(default)]
    pub search: SearchConfig,
    /// Raw input file locations.
    #[serde(default)]
    pub inputs: InputsConfig,
}

/// Capital budget, derived from the served population.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BudgetConfig {
    /// Number of people served.
    pub population: u64,
    /// Investment per person (EUR).
    pub investment_per_capita_eur: f64,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            population: 2_938_200,
            investment_per_capita_eur: 3000.0,
        }
    }
}

impl BudgetConfig {
    /// Total capital budget (EUR).
    pub fn total_eur(&self) -> f64 {
        self.population as f64 * self.investment_per_capita_eur
    }
}

/// Per-unit capital costs (EUR).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CostConfig {
    /// One wind turbine (5 MW class).
    pub wind_turbine_eur: f64,
    /// One solar panel (550 W class).
    pub solar_panel_eur: f64,
    /// One small modular reactor (50 MW class).
    pub nuclear_unit_eur: f64,
    /// One kWh of storage energy capacity.
    pub storage_per_kwh_eur: f64,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            wind_turbine_eur: 6.5e6,
            solar_panel_eur: 600.0,
            nuclear_unit_eur: 250e6,
            storage_per_kwh_eur: 100.0,
        }
    }
}

/// Per-unit physical ratings used by the generation model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    /// Panel surface area (m²).
    pub panel_area_m2: f64,
    /// Panel conversion efficiency (0.0–1.0).
    pub panel_efficiency: f64,
    /// System derating factor (0.0–1.0).
    pub panel_derating: f64,
    /// Continuous output of one nuclear unit (kW).
    pub nuclear_unit_kw: f64,
    /// Catchment area feeding run-of-river hydro (km²).
    pub hydro_area_km2: f64,
    /// Hydro yield per catchment area (kW/km²).
    pub hydro_kw_per_km2: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            panel_area_m2: 2.8,
            panel_efficiency: 0.197,
            panel_derating: 0.55,
            nuclear_unit_kw: 50_000.0,
            hydro_area_km2: 3832.2,
            hydro_kw_per_km2: 20.0,
        }
    }
}

impl GenerationConfig {
    /// Energy per panel per kWh/m² of irradiance.
    pub fn panel_efficiency_chain(&self) -> f64 {
        self.panel_derating * self.panel_area_m2 * self.panel_efficiency
    }

    /// Constant hydro output (kW, equal to kWh per hourly step).
    pub fn hydro_kw(&self) -> f64 {
        self.hydro_area_km2 * self.hydro_kw_per_km2
    }
}

/// Storage behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Fraction of surplus retained on charge (0.0–1.0).
    pub round_trip_efficiency: f64,
    /// Storage level at hour 0 as a fraction of capacity (0.0–1.0).
    pub initial_fraction: f64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            round_trip_efficiency: 0.85,
            initial_fraction: 0.5,
        }
    }
}

/// Optimizer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Total number of objective evaluations.
    pub evaluations: usize,
    /// Random initial design points evaluated before the surrogate takes over.
    pub initial_points: usize,
    /// Optimizer random seed.
    pub seed: u64,
    /// Optimizer type: `"bayes"` or `"random"`.
    pub optimizer: String,
    /// Evaluate independent candidate batches on a thread pool.
    pub parallel: bool,
    /// Random candidates scored by the acquisition function per iteration.
    pub candidates: usize,
    /// Objective value reported for mixes that exceed the budget.
    pub infeasible_sentinel: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            evaluations: 50,
            initial_points: 10,
            seed: 42,
            optimizer: "bayes".to_string(),
            parallel: false,
            candidates: 2000,
            infeasible_sentinel: 1e30,
        }
    }
}

/// Raw input file locations and column names.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputsConfig {
    /// CSV with the per-turbine hourly output.
    pub wind_path: Option<PathBuf>,
    pub wind_column: String,
    /// CSV with hourly irradiance (Wh/m²).
    pub irradiance_path: Option<PathBuf>,
    pub irradiance_column: String,
    /// CSV with hourly demand (kWh).
    pub demand_path: Option<PathBuf>,
    pub demand_column: String,
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            wind_path: None,
            wind_column: "Turbine Output (KW)".to_string(),
            irradiance_path: None,
            irradiance_column: "ALLSKY_SFC_SW_DWN(Wh/m^2)".to_string(),
            demand_path: None,
            demand_column: "demand".to_string(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field} - {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"costs.wind_turbine_eur"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub(crate) fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// Returns the Brighton scenario (the defaults of every section).
    pub fn brighton() -> Self {
        Self::default()
    }

    /// Returns the expensive-storage preset: storage at 300 EUR/kWh.
    pub fn expensive_storage() -> Self {
        Self {
            costs: CostConfig {
                storage_per_kwh_eur: 300.0,
                ..CostConfig::default()
            },
            ..Self::default()
        }
    }

    /// Returns the lean-budget preset: a third of the Brighton investment.
    pub fn lean_budget() -> Self {
        Self {
            budget: BudgetConfig {
                investment_per_capita_eur: 1000.0,
                ..BudgetConfig::default()
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["brighton", "expensive_storage", "lean_budget"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "brighton" => Ok(Self::brighton()),
            "expensive_storage" => Ok(Self::expensive_storage()),
            "lean_budget" => Ok(Self::lean_budget()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let mut positive = |field: &str, value: f64| {
            if !(value.is_finite() && value > 0.0) {
                errors.push(ConfigError::new(field, "must be finite and > 0"));
            }
        };

        positive("budget.investment_per_capita_eur", self.budget.investment_per_capita_eur);

        let c = &self.costs;
        positive("costs.wind_turbine_eur", c.wind_turbine_eur);
        positive("costs.solar_panel_eur", c.solar_panel_eur);
        positive("costs.nuclear_unit_eur", c.nuclear_unit_eur);
        positive("costs.storage_per_kwh_eur", c.storage_per_kwh_eur);

        let g = &self.generation;
        positive("generation.panel_area_m2", g.panel_area_m2);
        positive("generation.nuclear_unit_kw", g.nuclear_unit_kw);

        positive("search.infeasible_sentinel", self.search.infeasible_sentinel);

        if self.budget.population == 0 {
            errors.push(ConfigError::new("budget.population", "must be > 0"));
        }
        for (field, value) in [
            ("generation.panel_efficiency", g.panel_efficiency),
            ("generation.panel_derating", g.panel_derating),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                errors.push(ConfigError::new(field, "must be in (0.0, 1.0]"));
            }
        }
        for (field, value) in [
            ("generation.hydro_area_km2", g.hydro_area_km2),
            ("generation.hydro_kw_per_km2", g.hydro_kw_per_km2),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                errors.push(ConfigError::new(field, "must be finite and >= 0"));
            }
        }

        let st = &self.storage;
        if !(st.round_trip_efficiency > 0.0 && st.round_trip_efficiency <= 1.0) {
            errors.push(ConfigError::new(
                "storage.round_trip_efficiency",
                "must be in (0.0, 1.0]",
            ));
        }
        if !(0.0..=1.0).contains(&st.initial_fraction) {
            errors.push(ConfigError::new("storage.initial_fraction", "must be in [0.0, 1.0]"));
        }

        let s = &self.search;
        if s.evaluations == 0 {
            errors.push(ConfigError::new("search.evaluations", "must be > 0"));
        }
        if s.initial_points == 0 || s.initial_points > s.evaluations {
            errors.push(ConfigError::new(
                "search.initial_points",
                "must be > 0 and <= search.evaluations",
            ));
        }
        if s.optimizer != "bayes" && s.optimizer != "random" {
            errors.push(ConfigError::new(
                "search.optimizer",
                format!("must be \"bayes\" or \"random\", got \"{}\"", s.optimizer),
            ));
        }
        if s.candidates == 0 {
            errors.push(ConfigError::new("search.candidates", "must be > 0"));
        }

        errors
    }
}
