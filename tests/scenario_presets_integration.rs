mod common;

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use gridmix::config::ScenarioConfig;

struct Inputs {
    dir: PathBuf,
    wind: PathBuf,
    irradiance: PathBuf,
    demand: PathBuf,
}

impl Inputs {
    fn new(tag: &str) -> Self {
        let (dir, wind, irradiance, demand) = common::write_input_csvs(tag);
        Self {
            dir,
            wind,
            irradiance,
            demand,
        }
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_gridmix"))
            .arg("--wind-csv")
            .arg(&self.wind)
            .arg("--irradiance-csv")
            .arg(&self.irradiance)
            .arg("--demand-csv")
            .arg(&self.demand)
            .args(args)
            .output()
            .expect("gridmix process should run")
    }
}

impl Drop for Inputs {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.dir).ok();
    }
}

fn stdout_of(output: Output, what: &str) -> String {
    assert!(
        output.status.success(),
        "{what} failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout should be valid UTF-8")
}

fn parse_metric(stdout: &str, label: &str, unit: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing line `{label}` in output: {stdout}"));

    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid format for line `{line}`"));

    let numeric = raw.strip_suffix(unit).unwrap_or(raw).trim();
    numeric
        .parse::<f64>()
        .unwrap_or_else(|_| panic!("failed parsing `{numeric}` from line `{line}`"))
}

#[test]
fn presets_change_storage_bought_for_the_same_mix() {
    let inputs = Inputs::new("presets");
    let simulate = |preset: &str| {
        let args = [
            "--preset", preset, "simulate", "--wind", "100", "--solar", "0", "--nuclear", "0",
        ];
        stdout_of(inputs.run(&args), preset)
    };

    let brighton = simulate("brighton");
    let expensive = simulate("expensive_storage");

    let cheap_kwh = parse_metric(&brighton, "Storage capacity:", "kWh");
    let dear_kwh = parse_metric(&expensive, "Storage capacity:", "kWh");
    assert!((cheap_kwh - 81_646_000.0).abs() < 1.0, "brighton storage {cheap_kwh}");
    assert!((cheap_kwh / dear_kwh - 3.0).abs() < 1e-6);
}

#[test]
fn over_budget_mix_exits_with_error() {
    let inputs = Inputs::new("infeasible");
    let output = inputs.run(&["--preset", "lean_budget", "simulate", "--nuclear", "20"]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        stderr.matches("infeasible configuration").count(),
        1,
        "error should be printed once, stderr: {stderr}"
    );
}

#[test]
fn small_town_optimize_emits_json_report() {
    let inputs = Inputs::new("optimize");
    let stdout = stdout_of(
        inputs.run(&["--scenario", "scenarios/small_town.toml", "optimize", "--json"]),
        "small_town optimize",
    );
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("stdout should be JSON");

    assert_eq!(json["search"]["evaluations"].as_array().map(Vec::len), Some(30));
    for key in ["wind_turbines", "solar_panels", "nuclear_units"] {
        let count = json["mix"][key].as_f64().expect("count is a number");
        assert_eq!(count.fract(), 0.0, "{key} = {count}");
    }
    let capacity = json["report"]["allocation"]["storage_capacity_kwh"]
        .as_f64()
        .expect("capacity is a number");
    assert!(capacity > 0.0);
    assert_eq!(
        json["report"]["dispatch"]["storage_kwh"].as_array().map(Vec::len),
        Some(8760)
    );
}

#[test]
fn missing_inputs_are_reported() {
    let output = Command::new(env!("CARGO_BIN_EXE_gridmix"))
        .args(["simulate", "--wind", "1"])
        .output()
        .expect("gridmix process should run");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("inputs.wind_path"));
}

#[test]
fn bundled_scenarios_parse_and_validate() {
    for name in ["brighton.toml", "small_town.toml"] {
        let path = Path::new("scenarios").join(name);
        let config = ScenarioConfig::from_toml_file(&path)
            .unwrap_or_else(|e| panic!("{name} should parse: {e}"));
        let errors = config.validate();
        assert!(errors.is_empty(), "{name} should be valid: {errors:?}");
    }
}

#[test]
fn brighton_file_matches_preset() {
    let from_file = ScenarioConfig::from_toml_file(Path::new("scenarios/brighton.toml"))
        .expect("brighton.toml should parse");
    let preset = ScenarioConfig::brighton();
    assert_eq!(from_file.budget.total_eur(), preset.budget.total_eur());
    assert_eq!(from_file.costs.storage_per_kwh_eur, preset.costs.storage_per_kwh_eur);
    assert_eq!(from_file.generation.hydro_kw(), preset.generation.hydro_kw());
}
