//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use gridmix::config::{BudgetConfig, CostConfig, ScenarioConfig};
use gridmix::search::capacity::SizingProblem;
use gridmix::series::HourlySeries;

/// Per-turbine output alternating between calm and windy six-hour blocks.
pub fn blocky_wind() -> HourlySeries {
    HourlySeries::from_fn(|h| if (h / 6) % 2 == 0 { 1500.0 } else { 100.0 })
}

/// Irradiance with a half-sine day between 06:00 and 18:00 (peak 900 Wh/m²).
pub fn diurnal_irradiance() -> HourlySeries {
    HourlySeries::from_fn(|h| {
        let hour = (h % 24) as f64;
        if (6.0..18.0).contains(&hour) {
            900.0 * (std::f64::consts::PI * (hour - 6.0) / 12.0).sin()
        } else {
            0.0
        }
    })
}

/// Demand with a daytime bump: 800 kWh at night, 1200 kWh 08:00-20:00.
pub fn diurnal_demand() -> HourlySeries {
    HourlySeries::from_fn(|h| if (8..20).contains(&(h % 24)) { 1200.0 } else { 800.0 })
}

/// 1 MEUR scenario sized so a few units and a little storage matter.
///
/// Bounds: wind 0..=10, solar 0..=1000, nuclear 0..=2.
pub fn small_budget_config() -> ScenarioConfig {
    let mut config = ScenarioConfig::default();
    config.budget = BudgetConfig {
        population: 1000,
        investment_per_capita_eur: 1000.0,
    };
    config.costs = CostConfig {
        wind_turbine_eur: 100_000.0,
        solar_panel_eur: 1000.0,
        nuclear_unit_eur: 400_000.0,
        storage_per_kwh_eur: 10.0,
    };
    config.generation.nuclear_unit_kw = 300.0;
    config.generation.hydro_area_km2 = 1.0;
    config.generation.hydro_kw_per_km2 = 100.0;
    config.search.evaluations = 30;
    config.search.initial_points = 20;
    config.search.candidates = 300;
    config
}

/// Small-budget problem on the synthetic diurnal inputs.
pub fn small_problem() -> SizingProblem {
    SizingProblem::new(
        &small_budget_config(),
        blocky_wind(),
        diurnal_irradiance(),
        diurnal_demand(),
    )
}

/// Writes one-day input CSVs into a fresh temp directory.
///
/// Returns `(dir, wind, irradiance, demand)` paths. The loader edge-pads
/// the single day to a full year.
pub fn write_input_csvs(tag: &str) -> (PathBuf, PathBuf, PathBuf, PathBuf) {
    let dir = std::env::temp_dir().join(format!("gridmix-{tag}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");

    let column = |header: &str, values: Vec<f64>| {
        let mut body = format!("{header}\n");
        for v in values {
            body.push_str(&format!("{v}\n"));
        }
        body
    };
    let write = |dir: &Path, name: &str, body: String| {
        let path = dir.join(name);
        std::fs::write(&path, body).expect("write fixture csv");
        path
    };

    let wind = write(
        &dir,
        "wind.csv",
        column("Turbine Output (KW)", (0..24).map(|h| 500.0 + 100.0 * (h % 5) as f64).collect()),
    );
    let irradiance = write(
        &dir,
        "irradiance.csv",
        column("ALLSKY_SFC_SW_DWN(Wh/m^2)", diurnal_irradiance().as_slice()[..24].to_vec()),
    );
    let demand = write(
        &dir,
        "demand.csv",
        column("demand", diurnal_demand().as_slice()[..24].to_vec()),
    );
    (dir, wind, irradiance, demand)
}
