use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{ConfigError, ScenarioConfig};

#[derive(Parser, Debug)]
#[command(
    name = "gridmix",
    version,
    about = "Size a wind/solar/nuclear/storage mix against a fixed capital budget"
)]
pub struct Cli {
    /// Load scenario from a TOML config file
    #[arg(long, conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Use a built-in preset (brighton, expensive_storage, lean_budget)
    #[arg(long)]
    pub preset: Option<String>,

    /// Override the optimizer seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// CSV with per-turbine hourly output
    #[arg(long)]
    pub wind_csv: Option<PathBuf>,

    /// CSV with hourly irradiance
    #[arg(long)]
    pub irradiance_csv: Option<PathBuf>,

    /// CSV with hourly demand
    #[arg(long)]
    pub demand_csv: Option<PathBuf>,

    /// Emit the report as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Simulate one fixed generation mix
    Simulate {
        /// Number of wind turbines
        #[arg(long, default_value_t = 0)]
        wind: u64,
        /// Number of solar panels
        #[arg(long, default_value_t = 0)]
        solar: u64,
        /// Number of nuclear units
        #[arg(long, default_value_t = 0)]
        nuclear: u64,
    },
    /// Search for the mix that minimizes annual backup energy
    Optimize {
        /// Objective evaluations to spend
        #[arg(long)]
        evaluations: Option<usize>,
        /// Minimizer to use
        #[arg(long, value_enum)]
        optimizer: Option<OptimizerKind>,
        /// Evaluate independent candidates on all cores
        #[arg(long)]
        parallel: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptimizerKind {
    Bayes,
    Random,
}

impl OptimizerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OptimizerKind::Bayes => "bayes",
            OptimizerKind::Random => "random",
        }
    }
}

impl Cli {
    /// Resolves the scenario: `--scenario`, then `--preset`, then `brighton`,
    /// with command-line overrides applied on top.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file or preset cannot be loaded.
    pub fn scenario_config(&self) -> Result<ScenarioConfig, ConfigError> {
        let mut config = if let Some(path) = &self.scenario {
            ScenarioConfig::from_toml_file(path)?
        } else if let Some(name) = &self.preset {
            ScenarioConfig::from_preset(name)?
        } else {
            ScenarioConfig::brighton()
        };

        if let Some(seed) = self.seed {
            config.search.seed = seed;
        }
        if let Some(path) = &self.wind_csv {
            config.inputs.wind_path = Some(path.clone());
        }
        if let Some(path) = &self.irradiance_csv {
            config.inputs.irradiance_path = Some(path.clone());
        }
        if let Some(path) = &self.demand_csv {
            config.inputs.demand_path = Some(path.clone());
        }

        if let Commands::Optimize {
            evaluations,
            optimizer,
            parallel,
        } = &self.command
        {
            if let Some(n) = evaluations {
                config.search.evaluations = *n;
                config.search.initial_points = config.search.initial_points.min(*n);
            }
            if let Some(kind) = optimizer {
                config.search.optimizer = kind.as_str().to_string();
            }
            config.search.parallel |= *parallel;
        }

        Ok(config)
    }
}
