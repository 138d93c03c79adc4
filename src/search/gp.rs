use nalgebra::{Cholesky, DMatrix, DVector, Dyn};

/// Diagonal jitter added to the kernel matrix (observations are noiseless).
const JITTER: f64 = 1e-6;

/// Length scales (in unit-cube coordinates) tried when fitting.
const LENGTH_SCALES: [f64; 6] = [0.05, 0.1, 0.2, 0.4, 0.8, 1.6];

/// Matérn 5/2 covariance with unit signal variance.
fn matern52(a: &[f64], b: &[f64], length_scale: f64) -> f64 {
    let dist = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt();
    let r = 5.0_f64.sqrt() * dist / length_scale;
    (1.0 + r + r * r / 3.0) * (-r).exp()
}

/// Gaussian-process regression on points in the unit cube.
///
/// Targets are standardized before fitting; predictions are returned in the
/// original target units. The length scale is picked from a fixed grid by
/// maximizing the log marginal likelihood.
pub struct GaussianProcess {
    train_x: Vec<Vec<f64>>,
    chol: Cholesky<f64, Dyn>,
    alpha: DVector<f64>,
    length_scale: f64,
    y_mean: f64,
    y_std: f64,
}

impl GaussianProcess {
    /// Fits a GP to `(x, y)` pairs.
    ///
    /// Returns `None` when there is no data or every candidate kernel matrix
    /// fails to factorize.
    pub fn fit(x: &[Vec<f64>], y: &[f64]) -> Option<Self> {
        let n = x.len();
        if n == 0 || n != y.len() {
            return None;
        }

        let y_mean = y.iter().sum::<f64>() / n as f64;
        let variance = y.iter().map(|v| (v - y_mean) * (v - y_mean)).sum::<f64>() / n as f64;
        let y_std = if variance.sqrt() > 1e-12 { variance.sqrt() } else { 1.0 };
        let targets = DVector::from_iterator(n, y.iter().map(|v| (v - y_mean) / y_std));

        let mut best: Option<(f64, f64, Cholesky<f64, Dyn>, DVector<f64>)> = None;
        for &length_scale in &LENGTH_SCALES {
            let k = DMatrix::from_fn(n, n, |i, j| {
                matern52(&x[i], &x[j], length_scale) + if i == j { JITTER } else { 0.0 }
            });
            let Some(chol) = k.cholesky() else {
                continue;
            };
            let alpha = chol.solve(&targets);
            let log_det: f64 = chol.l_dirty().diagonal().iter().map(|d| d.ln()).sum::<f64>() * 2.0;
            let log_likelihood = -0.5 * targets.dot(&alpha) - 0.5 * log_det;
            if best.as_ref().is_none_or(|(ll, ..)| log_likelihood > *ll) {
                best = Some((log_likelihood, length_scale, chol, alpha));
            }
        }

        let (_, length_scale, chol, alpha) = best?;
        Some(Self {
            train_x: x.to_vec(),
            chol,
            alpha,
            length_scale,
            y_mean,
            y_std,
        })
    }

    /// Length scale chosen during fitting.
    pub fn length_scale(&self) -> f64 {
        self.length_scale
    }

    /// Posterior mean and standard deviation at `x`.
    pub fn predict(&self, x: &[f64]) -> (f64, f64) {
        let k = DVector::from_iterator(
            self.train_x.len(),
            self.train_x.iter().map(|t| matern52(t, x, self.length_scale)),
        );
        let mean = k.dot(&self.alpha);
        let variance = (1.0 - k.dot(&self.chol.solve(&k))).max(1e-12);
        (
            self.y_mean + mean * self.y_std,
            variance.sqrt() * self.y_std,
        )
    }
}
