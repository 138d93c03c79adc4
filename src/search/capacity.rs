use serde::Serialize;
use tracing::{debug, info, warn};

use super::bayes::BayesianMinimizer;
use super::random::RandomSearch;
use super::{Bounds, MinimizeResult, Minimizer};
use crate::config::{ConfigError, CostConfig, ScenarioConfig, SearchConfig, StorageConfig};
use crate::cost::{BudgetAllocation, allocate, unit_bounds};
use crate::error::GridError;
use crate::generation::{GenerationMix, GenerationModel};
use crate::report::{EnergyTotals, SizingReport};
use crate::series::HourlySeries;
use crate::sim::balance::simulate;
use crate::sim::kpi::DispatchSummary;
use crate::sim::types::StorageParams;

/// A fully specified sizing problem: inputs, costs and budget.
///
/// Owns everything the objective reads, so concurrent evaluations only
/// ever share immutable data.
#[derive(Debug, Clone)]
pub struct SizingProblem {
    pub model: GenerationModel,
    pub demand: HourlySeries,
    pub costs: CostConfig,
    pub storage: StorageConfig,
    pub budget_eur: f64,
}

impl SizingProblem {
    /// Builds a problem from a scenario and the three normalized input series.
    pub fn new(
        config: &ScenarioConfig,
        wind_unit_curve: HourlySeries,
        irradiance: HourlySeries,
        demand: HourlySeries,
    ) -> Self {
        Self {
            model: GenerationModel::new(&config.generation, wind_unit_curve, irradiance),
            demand,
            costs: config.costs.clone(),
            storage: config.storage.clone(),
            budget_eur: config.budget.total_eur(),
        }
    }

    /// Search box `[0, budget // unit_cost]` for wind, solar, nuclear.
    pub fn bounds(&self) -> Bounds {
        unit_bounds(&self.costs, self.budget_eur)
    }

    pub fn allocation(&self, mix: &GenerationMix) -> BudgetAllocation {
        allocate(mix, &self.costs, self.budget_eur)
    }

    /// Annual backup energy for `mix`, or `None` if the mix leaves no
    /// budget for storage. The simulator is not run for infeasible mixes.
    pub fn total_backup(&self, mix: &GenerationMix) -> Option<f64> {
        let allocation = self.allocation(mix);
        if !allocation.is_feasible() {
            return None;
        }
        let production = self.model.total_production(mix);
        let params = StorageParams::from_config(allocation.storage_capacity_kwh, &self.storage);
        simulate(&production, &self.demand, &params)
            .ok()
            .map(|dispatch| dispatch.total_backup_kwh)
    }

    /// Objective value of an optimizer point: annual backup, or `sentinel`
    /// when the point is over budget.
    pub fn objective(&self, point: &[f64], sentinel: f64) -> f64 {
        let mix = GenerationMix::from_point(point);
        match self.total_backup(&mix) {
            Some(backup) => {
                debug!(%mix, backup_kwh = backup, "objective evaluated");
                backup
            }
            None => {
                debug!(%mix, "mix over budget, returning sentinel");
                sentinel
            }
        }
    }

    /// Simulates one fixed mix and builds its full report.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InfeasibleConfiguration`] if the mix leaves no
    /// budget for storage.
    pub fn run_fixed_mix(&self, mix: &GenerationMix) -> Result<SizingReport, GridError> {
        let allocation = self.allocation(mix);
        if !allocation.is_feasible() {
            return Err(GridError::InfeasibleConfiguration {
                capital_cost_eur: allocation.generation_eur(),
                budget_eur: allocation.budget_eur,
            });
        }

        let production = self.model.produce(mix);
        let total = production.total();
        let params = StorageParams::from_config(allocation.storage_capacity_kwh, &self.storage);
        let dispatch = simulate(&total, &self.demand, &params)?;
        let summary = DispatchSummary::from_dispatch(&dispatch, &total, &self.demand, &params);
        let totals = EnergyTotals::new(&production, &self.demand, dispatch.total_backup_kwh);

        Ok(SizingReport {
            mix: *mix,
            allocation,
            production,
            dispatch,
            summary,
            totals,
        })
    }
}

/// Result of a capacity search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    /// Best point found, before rounding.
    pub continuous_mix: GenerationMix,
    /// Whole-unit mix that was reported.
    pub mix: GenerationMix,
    /// True when rounding to nearest went over budget and the mix was floored instead.
    pub repaired: bool,
    pub search: MinimizeResult,
    pub report: SizingReport,
}

/// Drives a [`Minimizer`] over the unit counts of a [`SizingProblem`].
#[derive(Debug, Clone)]
pub struct CapacitySearch<M: Minimizer> {
    minimizer: M,
    evaluations: usize,
    seed: u64,
    sentinel: f64,
}

impl<M: Minimizer> CapacitySearch<M> {
    pub fn new(minimizer: M, evaluations: usize, seed: u64, sentinel: f64) -> Self {
        Self {
            minimizer,
            evaluations,
            seed,
            sentinel,
        }
    }

    /// Runs the search and reports the best whole-unit mix.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Config`] if the sentinel does not exceed annual
    /// demand. Annual backup can never exceed annual demand as long as
    /// production is non-negative, which [`normalize`](crate::series::normalize)
    /// guarantees for every input curve.
    /// Returns [`GridError::InvalidBounds`] if the bounds are unusable or the
    /// evaluation budget is zero.
    /// Returns [`GridError::InfeasibleConfiguration`] if no evaluated point
    /// was within budget.
    pub fn run(&self, problem: &SizingProblem) -> Result<SearchOutcome, GridError> {
        let total_demand = problem.demand.sum();
        if !(self.sentinel > total_demand) {
            return Err(ConfigError::new(
                "search.infeasible_sentinel",
                format!(
                    "{:e} must exceed annual demand {total_demand:.2} kWh",
                    self.sentinel
                ),
            )
            .into());
        }

        let bounds = problem.bounds();
        info!(
            evaluations = self.evaluations,
            seed = self.seed,
            budget_eur = problem.budget_eur,
            ?bounds,
            "starting capacity search"
        );

        let sentinel = self.sentinel;
        let result = self.minimizer.minimize(
            |point: &[f64]| problem.objective(point, sentinel),
            &bounds,
            self.evaluations,
            self.seed,
        )?;

        let continuous_mix = GenerationMix::from_point(&result.best_point);
        if result.best_value >= sentinel {
            let allocation = problem.allocation(&continuous_mix);
            return Err(GridError::InfeasibleConfiguration {
                capital_cost_eur: allocation.generation_eur(),
                budget_eur: allocation.budget_eur,
            });
        }
        info!(mix = %continuous_mix, backup_kwh = result.best_value, "search finished");

        let (mix, repaired) = whole_unit_mix(problem, continuous_mix)?;
        let report = problem.run_fixed_mix(&mix)?;
        info!(%mix, backup_kwh = report.totals.backup_kwh, "reported mix");

        Ok(SearchOutcome {
            continuous_mix,
            mix,
            repaired,
            search: result,
            report,
        })
    }
}

/// Rounds to the nearest whole unit, falling back to flooring when the
/// rounded mix is over budget.
fn whole_unit_mix(
    problem: &SizingProblem,
    continuous: GenerationMix,
) -> Result<(GenerationMix, bool), GridError> {
    let rounded = continuous.rounded();
    if problem.allocation(&rounded).is_feasible() {
        return Ok((rounded, false));
    }

    let floored = continuous.floored();
    let allocation = problem.allocation(&floored);
    if !allocation.is_feasible() {
        return Err(GridError::InfeasibleConfiguration {
            capital_cost_eur: allocation.generation_eur(),
            budget_eur: allocation.budget_eur,
        });
    }
    warn!(%rounded, %floored, "rounded mix exceeds budget, using floored counts");
    Ok((floored, true))
}

/// Runs the search with the minimizer named in `config.optimizer`.
///
/// # Errors
///
/// See [`CapacitySearch::run`]. An unknown optimizer name is reported as
/// [`GridError::Config`] against `search.optimizer`.
pub fn optimize(problem: &SizingProblem, config: &SearchConfig) -> Result<SearchOutcome, GridError> {
    match config.optimizer.as_str() {
        "bayes" => {
            let minimizer =
                BayesianMinimizer::new(config.initial_points, config.candidates, config.parallel);
            CapacitySearch::new(minimizer, config.evaluations, config.seed, config.infeasible_sentinel)
                .run(problem)
        }
        "random" => {
            let minimizer = RandomSearch::new(config.parallel);
            CapacitySearch::new(minimizer, config.evaluations, config.seed, config.infeasible_sentinel)
                .run(problem)
        }
        other => Err(ConfigError::new(
            "search.optimizer",
            format!("unknown optimizer \"{other}\""),
        )
        .into()),
    }
}
