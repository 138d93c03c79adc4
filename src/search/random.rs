use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{Bounds, MinimizeResult, Minimizer, check_budget, evaluate_batch};
use crate::error::GridError;

/// Evaluates `n_evaluations` uniformly drawn points and keeps the best.
///
/// Useful as a baseline against [`BayesianMinimizer`](super::bayes::BayesianMinimizer)
/// and as the cheapest option when the whole budget can run in parallel.
#[derive(Debug, Clone, Default)]
pub struct RandomSearch {
    pub parallel: bool,
}

impl RandomSearch {
    pub fn new(parallel: bool) -> Self {
        Self { parallel }
    }
}

impl Minimizer for RandomSearch {
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
        let points: Vec<Vec<f64>> = (0..n_evaluations).map(|_| bounds.sample(&mut rng)).collect();
        MinimizeResult::from_evaluations(evaluate_batch(&objective, points, self.parallel))
    }
}
