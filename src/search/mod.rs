//! Black-box minimization over bounded continuous variables.

use rand::Rng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::GridError;

/// Sequential model-based minimizer (Gaussian-process surrogate).
pub mod bayes;
/// Capacity-sizing objective and search driver.
pub mod capacity;
/// Gaussian-process regression used as the surrogate model.
pub mod gp;
/// Uniform random-search minimizer.
pub mod random;

/// Inclusive `[low, high]` range for each search variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bounds(Vec<(f64, f64)>);

impl Bounds {
    pub fn new(ranges: Vec<(f64, f64)>) -> Self {
        Self(ranges)
    }

    pub fn ranges(&self) -> &[(f64, f64)] {
        &self.0
    }

    /// Number of variables.
    pub fn dims(&self) -> usize {
        self.0.len()
    }

    /// Checks that there is at least one variable and every range is finite
    /// with `low <= high`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidBounds`] describing the first bad range.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.0.is_empty() {
            return Err(GridError::InvalidBounds {
                reason: "no search variables".to_string(),
            });
        }
        for (i, &(low, high)) in self.0.iter().enumerate() {
            if !(low.is_finite() && high.is_finite() && low <= high) {
                return Err(GridError::InvalidBounds {
                    reason: format!("variable {i} has range [{low}, {high}]"),
                });
            }
        }
        Ok(())
    }

    /// Clamps `point` into the box.
    pub fn clamp(&self, point: &mut [f64]) {
        for (x, &(low, high)) in point.iter_mut().zip(&self.0) {
            *x = x.clamp(low, high);
        }
    }

    /// Draws a point uniformly from the box.
    pub fn sample(&self, rng: &mut StdRng) -> Vec<f64> {
        self.0
            .iter()
            .map(|&(low, high)| low + (high - low) * rng.random::<f64>())
            .collect()
    }

    /// Maps `point` into the unit cube.
    pub fn to_unit(&self, point: &[f64]) -> Vec<f64> {
        point
            .iter()
            .zip(&self.0)
            .map(|(&x, &(low, high))| if high > low { (x - low) / (high - low) } else { 0.0 })
            .collect()
    }

    /// Maps a unit-cube point back into the box.
    pub fn from_unit(&self, unit: &[f64]) -> Vec<f64> {
        unit.iter()
            .zip(&self.0)
            .map(|(&u, &(low, high))| low + (high - low) * u.clamp(0.0, 1.0))
            .collect()
    }
}

/// One objective evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub point: Vec<f64>,
    pub value: f64,
}

/// Everything a minimizer observed, in evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinimizeResult {
    /// Lowest-valued point observed (first one on ties).
    pub best_point: Vec<f64>,
    pub best_value: f64,
    /// Every evaluation in the order it was requested.
    pub evaluations: Vec<Evaluation>,
}

impl MinimizeResult {
    /// Builds the result from a complete evaluation log.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidBounds`] if `evaluations` is empty.
    pub fn from_evaluations(evaluations: Vec<Evaluation>) -> Result<Self, GridError> {
        let best = evaluations
            .iter()
            .fold(None::<&Evaluation>, |best, e| match best {
                Some(b) if b.value <= e.value => Some(b),
                _ => Some(e),
            })
            .ok_or_else(|| GridError::InvalidBounds {
                reason: "no evaluations were made".to_string(),
            })?;
        Ok(Self {
            best_point: best.point.clone(),
            best_value: best.value,
            evaluations,
        })
    }

    /// Objective value of each evaluation, in order.
    pub fn trajectory(&self) -> Vec<f64> {
        self.evaluations.iter().map(|e| e.value).collect()
    }

    /// Best value seen after each evaluation.
    pub fn running_best(&self) -> Vec<f64> {
        self.evaluations
            .iter()
            .scan(f64::INFINITY, |best, e| {
                *best = best.min(e.value);
                Some(*best)
            })
            .collect()
    }
}

/// A global minimizer over a bounded box.
///
/// Implementations must keep every evaluated point inside `bounds`, treat
/// the objective as expensive and noiseless, evaluate it exactly
/// `n_evaluations` times, and be reproducible for a fixed `seed`.
pub trait Minimizer {
    /// Minimizes `objective` over `bounds`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidBounds`] if the bounds are unusable or
    /// `n_evaluations` is zero.
    fn minimize<F>(
        &self,
        objective: F,
        bounds: &Bounds,
        n_evaluations: usize,
        seed: u64,
    ) -> Result<MinimizeResult, GridError>
    where
        F: Fn(&[f64]) -> f64 + Sync;
}

/// Evaluates a batch of independent points, optionally on the rayon pool.
///
/// Results come back in the order of `points` either way, so parallel and
/// sequential runs produce the same log.
pub(crate) fn evaluate_batch<F>(objective: &F, points: Vec<Vec<f64>>, parallel: bool) -> Vec<Evaluation>
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    if parallel {
        points
            .into_par_iter()
            .map(|point| {
                let value = objective(&point);
                Evaluation { point, value }
            })
            .collect()
    } else {
        points
            .into_iter()
            .map(|point| {
                let value = objective(&point);
                Evaluation { point, value }
            })
            .collect()
    }
}

pub(crate) fn check_budget(bounds: &Bounds, n_evaluations: usize) -> Result<(), GridError> {
    bounds.validate()?;
    if n_evaluations == 0 {
        return Err(GridError::InvalidBounds {
            reason: "evaluation budget must be > 0".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn unit_mapping_round_trips_inside_box() {
        let bounds = Bounds::new(vec![(0.0, 10.0), (100.0, 200.0)]);
        let unit = bounds.to_unit(&[2.5, 150.0]);
        assert_eq!(unit, vec![0.25, 0.5]);
        assert_eq!(bounds.from_unit(&unit), vec![2.5, 150.0]);
    }

    #[test]
    fn degenerate_range_maps_to_low_edge() {
        let bounds = Bounds::new(vec![(0.0, 0.0)]);
        assert_eq!(bounds.to_unit(&[0.0]), vec![0.0]);
        assert_eq!(bounds.from_unit(&[0.7]), vec![0.0]);
    }

    #[test]
    fn samples_stay_in_bounds() {
        let bounds = Bounds::new(vec![(0.0, 1.0), (-5.0, 5.0), (10.0, 10.0)]);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            let p = bounds.sample(&mut rng);
            for (x, &(low, high)) in p.iter().zip(bounds.ranges()) {
                assert!(*x >= low && *x <= high);
            }
        }
    }

    #[test]
    fn inverted_range_is_rejected() {
        let bounds = Bounds::new(vec![(1.0, 0.0)]);
        assert!(bounds.validate().is_err());
        assert!(Bounds::new(Vec::new()).validate().is_err());
    }

    #[test]
    fn best_is_first_lowest() {
        let result = MinimizeResult::from_evaluations(vec![
            Evaluation { point: vec![0.0], value: 3.0 },
            Evaluation { point: vec![1.0], value: 1.0 },
            Evaluation { point: vec![2.0], value: 1.0 },
        ])
        .expect("non-empty log");
        assert_eq!(result.best_point, vec![1.0]);
        assert_eq!(result.running_best(), vec![3.0, 1.0, 1.0]);
    }

    #[test]
    fn parallel_batch_preserves_order() {
        let objective = |p: &[f64]| p[0] * 2.0;
        let points: Vec<Vec<f64>> = (0..64).map(|i| vec![i as f64]).collect();
        let seq = evaluate_batch(&objective, points.clone(), false);
        let par = evaluate_batch(&objective, points, true);
        assert_eq!(seq, par);
    }
}
