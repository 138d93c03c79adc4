//! gridmix entry point: CLI wiring, input loading, and report output.

use std::process;

use clap::Parser;
use tracing::info;

use gridmix::cli::{Cli, Commands};
use gridmix::error::GridError;
use gridmix::generation::GenerationMix;
use gridmix::io::load::load_inputs;
use gridmix::logging;
use gridmix::search::capacity::{SizingProblem, optimize};

fn print_json(value: &impl serde::Serialize) -> Result<(), GridError> {
    let text = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    println!("{text}");
    Ok(())
}

fn run(cli: &Cli) -> Result<(), GridError> {
    let scenario = cli.scenario_config()?;

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let inputs = load_inputs(&scenario.inputs)?;
    let problem = SizingProblem::new(
        &scenario,
        inputs.wind_unit_curve,
        inputs.irradiance,
        inputs.demand,
    );
    info!(budget_eur = problem.budget_eur, "scenario loaded");

    match &cli.command {
        Commands::Simulate {
            wind,
            solar,
            nuclear,
        } => {
            let mix = GenerationMix::new(*wind as f64, *solar as f64, *nuclear as f64);
            let report = problem.run_fixed_mix(&mix)?;
            if cli.json {
                print_json(&report)?;
            } else {
                println!("{report}");
            }
        }
        Commands::Optimize { .. } => {
            let outcome = optimize(&problem, &scenario.search)?;
            if cli.json {
                print_json(&outcome)?;
            } else {
                println!("--- Search ---");
                println!("Evaluations:           {}", outcome.search.evaluations.len());
                println!("Best continuous mix:   {}", outcome.continuous_mix);
                println!("Best backup energy:    {:.2} kWh", outcome.search.best_value);
                if outcome.repaired {
                    println!("Rounded mix exceeded the budget; counts were floored.");
                }
                println!();
                println!("{}", outcome.report);
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
