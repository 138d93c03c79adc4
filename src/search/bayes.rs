use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statrs::function::erf::erfc;
use tracing::debug;

use super::gp::GaussianProcess;
use super::{Bounds, Evaluation, MinimizeResult, Minimizer, check_budget, evaluate_batch};
use crate::error::GridError;

/// Spread of local candidates around the incumbent, in unit-cube units.
const LOCAL_STD: f64 = 0.05;

/// Draws Gaussian noise with the Box-Muller transform.
fn gaussian_noise(rng: &mut StdRng, std_dev: f64) -> f64 {
    let u1: f64 = rng.random::<f64>().clamp(1e-12, 1.0);
    let u2: f64 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos() * std_dev
}

/// Expected improvement over `best` for a Gaussian prediction `(mean, std)`.
fn expected_improvement(mean: f64, std: f64, best: f64, xi: f64) -> f64 {
    let gain = best - mean - xi;
    if std <= 0.0 {
        return gain.max(0.0);
    }
    let z = gain / std;
    let cdf = 0.5 * erfc(-z / std::f64::consts::SQRT_2);
    let pdf = (-0.5 * z * z).exp() / (2.0 * std::f64::consts::PI).sqrt();
    gain * cdf + std * pdf
}

/// Surrogate-guided global minimizer.
///
/// Starts with `initial_points` uniform random evaluations (run as one
/// batch, in parallel if requested), then repeatedly fits a Gaussian
/// process to everything observed and evaluates the candidate with the
/// highest expected improvement. Candidate proposal is strictly sequential.
///
/// Observed values are passed through `ln(1 + y - y_min)` before fitting so
/// that very large penalty values do not flatten the surrogate.
#[derive(Debug, Clone)]
pub struct BayesianMinimizer {
    /// Random design points before the surrogate is used.
    pub initial_points: usize,
    /// Candidates scored per proposal.
    pub candidates: usize,
    /// Exploration margin for expected improvement.
    pub xi: f64,
    /// Evaluate the initial design on the rayon pool.
    pub parallel: bool,
}

impl Default for BayesianMinimizer {
    fn default() -> Self {
        Self {
            initial_points: 10,
            candidates: 2000,
            xi: 0.01,
            parallel: false,
        }
    }
}

impl BayesianMinimizer {
    pub fn new(initial_points: usize, candidates: usize, parallel: bool) -> Self {
        Self {
            initial_points,
            candidates,
            parallel,
            ..Self::default()
        }
    }

    /// Picks the next point to evaluate.
    fn propose(&self, observed: &[Evaluation], bounds: &Bounds, rng: &mut StdRng) -> Vec<f64> {
        let unit_x: Vec<Vec<f64>> = observed.iter().map(|e| bounds.to_unit(&e.point)).collect();

        let finite_max = observed
            .iter()
            .map(|e| e.value)
            .filter(|v| v.is_finite())
            .fold(f64::NEG_INFINITY, f64::max);
        let y_min = observed
            .iter()
            .map(|e| e.value)
            .filter(|v| v.is_finite())
            .fold(f64::INFINITY, f64::min);
        if !y_min.is_finite() {
            return bounds.sample(rng);
        }
        let targets: Vec<f64> = observed
            .iter()
            .map(|e| {
                let v = if e.value.is_finite() { e.value } else { finite_max };
                (v - y_min).ln_1p()
            })
            .collect();

        let Some(gp) = GaussianProcess::fit(&unit_x, &targets) else {
            return bounds.sample(rng);
        };

        let incumbent = targets
            .iter()
            .position(|&t| t == 0.0)
            .map_or_else(|| vec![0.5; bounds.dims()], |i| unit_x[i].clone());

        let mut best_candidate: Option<(f64, Vec<f64>)> = None;
        for i in 0..self.candidates {
            let candidate: Vec<f64> = if i % 2 == 0 {
                (0..bounds.dims()).map(|_| rng.random::<f64>()).collect()
            } else {
                incumbent
                    .iter()
                    .map(|&u| (u + gaussian_noise(rng, LOCAL_STD)).clamp(0.0, 1.0))
                    .collect()
            };
            let (mean, std) = gp.predict(&candidate);
            let ei = expected_improvement(mean, std, 0.0, self.xi);
            if best_candidate.as_ref().is_none_or(|(best_ei, _)| ei > *best_ei) {
                best_candidate = Some((ei, candidate));
            }
        }

        match best_candidate {
            Some((ei, candidate)) if ei > 0.0 => {
                debug!(ei, length_scale = gp.length_scale(), "surrogate proposal");
                bounds.from_unit(&candidate)
            }
            _ => bounds.sample(rng),
        }
    }
}

impl Minimizer for BayesianMinimizer {
    fn minimize<F>(
        &self,
        objective: F,
        bounds: &Bounds,
        n_evaluations: usize,
        seed: u64,
    ) -> Result<MinimizeResult, GridError>
    where
        F: Fn(&[f64]) -> f64 + Sync,
    {
        check_budget(bounds, n_evaluations)?;
        let mut rng = StdRng::seed_from_u64(seed);

        let n_initial = self.initial_points.clamp(1, n_evaluations);
        let design: Vec<Vec<f64>> = (0..n_initial).map(|_| bounds.sample(&mut rng)).collect();
        let mut evaluations = evaluate_batch(&objective, design, self.parallel);

        while evaluations.len() < n_evaluations {
            let mut point = self.propose(&evaluations, bounds, &mut rng);
            bounds.clamp(&mut point);
            let value = objective(&point);
            debug!(iteration = evaluations.len(), value, ?point, "evaluated candidate");
            evaluations.push(Evaluation { point, value });
        }

        MinimizeResult::from_evaluations(evaluations)
    }
}
