//! Hourly time series covering exactly one year.

use std::ops::Index;

use serde::Serialize;

use crate::error::GridError;

/// Number of hourly samples in one (non-leap) year.
pub const HOURS_PER_YEAR: usize = 8760;

/// An ordered sequence of exactly [`HOURS_PER_YEAR`] finite samples.
///
/// Series built by [`normalize`] are also non-negative.
///
/// Index 0 is the first hour of the year. The only ways to obtain a value
/// are [`normalize`] and the constructors below, all of which uphold the
/// length invariant.
///
/// # Examples
///
/// ```
/// use gridmix::series::{HourlySeries, HOURS_PER_YEAR};
///
/// let flat = HourlySeries::constant(900.0);
/// assert_eq!(flat.len(), HOURS_PER_YEAR);
/// assert_eq!(flat.sum(), 900.0 * HOURS_PER_YEAR as f64);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HourlySeries(Vec<f64>);

impl HourlySeries {
    /// A series holding `value` in every hour.
    pub fn constant(value: f64) -> Self {
        Self(vec![value; HOURS_PER_YEAR])
    }

    /// A series built hour by hour from `f(hour)`.
    pub fn from_fn(f: impl FnMut(usize) -> f64) -> Self {
        Self((0..HOURS_PER_YEAR).map(f).collect())
    }

    /// Wraps samples produced by a full-year fold.
    pub(crate) fn from_year(values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), HOURS_PER_YEAR);
        Self(values)
    }

    /// Scales every sample by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self(self.0.iter().map(|v| v * factor).collect())
    }

    /// Always [`HOURS_PER_YEAR`].
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true; present for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Last sample of the year.
    pub fn last(&self) -> f64 {
        self.0[HOURS_PER_YEAR - 1]
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

impl Index<usize> for HourlySeries {
    type Output = f64;

    fn index(&self, hour: usize) -> &f64 {
        &self.0[hour]
    }
}

impl<'a> IntoIterator for &'a HourlySeries {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Coerces a raw series to exactly one year of hourly samples.
///
/// Longer input is truncated to the first [`HOURS_PER_YEAR`] samples; shorter
/// input is edge-padded by repeating its last sample.
///
/// # Arguments
///
/// * `name` - Series name used in error messages (e.g. `"demand"`)
/// * `raw` - Raw samples in hour order
///
/// # Errors
///
/// Returns [`GridError::MalformedInput`] if `raw` is empty or any retained
/// sample is NaN, infinite or negative. Wind output, irradiance and demand
/// are all physical quantities, and the search relies on production never
/// being negative.
pub fn normalize(name: &str, raw: &[f64]) -> Result<HourlySeries, GridError> {
    let kept = &raw[..HOURS_PER_YEAR.min(raw.len())];
    let Some(&edge) = kept.last() else {
        return Err(GridError::MalformedInput {
            series: name.to_string(),
            reason: "series is empty".to_string(),
        });
    };

    if let Some(hour) = kept.iter().position(|v| !v.is_finite()) {
        return Err(GridError::MalformedInput {
            series: name.to_string(),
            reason: format!("non-finite sample {} at hour {hour}", kept[hour]),
        });
    }

    if let Some(hour) = kept.iter().position(|&v| v < 0.0) {
        return Err(GridError::MalformedInput {
            series: name.to_string(),
            reason: format!("negative sample {} at hour {hour}", kept[hour]),
        });
    }

    let mut values = Vec::with_capacity(HOURS_PER_YEAR);
    values.extend_from_slice(kept);
    values.resize(HOURS_PER_YEAR, edge);
    Ok(HourlySeries(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_input_is_truncated() {
        let raw: Vec<f64> = (0..HOURS_PER_YEAR + 24).map(|h| h as f64).collect();
        let s = normalize("wind", &raw).expect("normalize should succeed");
        assert_eq!(s.len(), HOURS_PER_YEAR);
        assert_eq!(s.last(), (HOURS_PER_YEAR - 1) as f64);
    }

    #[test]
    fn short_input_is_edge_padded() {
        let s = normalize("demand", &[1.0, 2.0, 3.0]).expect("normalize should succeed");
        assert_eq!(s.len(), HOURS_PER_YEAR);
        assert_eq!(s[0], 1.0);
        assert_eq!(s[2], 3.0);
        assert!(s.iter().skip(3).all(|&v| v == 3.0));
    }

    #[test]
    fn exact_length_is_unchanged() {
        let raw: Vec<f64> = (0..HOURS_PER_YEAR).map(|h| (h % 24) as f64).collect();
        let s = normalize("irradiance", &raw).expect("normalize should succeed");
        assert_eq!(s.as_slice(), raw.as_slice());
    }

    #[test]
    fn normalize_is_idempotent() {
        for len in [1, 100, HOURS_PER_YEAR, HOURS_PER_YEAR + 7] {
            let raw: Vec<f64> = (0..len).map(|h| (h as f64).sin().abs()).collect();
            let once = normalize("s", &raw).expect("first pass");
            let twice = normalize("s", once.as_slice()).expect("second pass");
            assert_eq!(once, twice, "idempotence failed for len={len}");
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = normalize("demand", &[]).expect_err("empty must fail");
        assert!(matches!(err, GridError::MalformedInput { .. }));
        assert!(err.to_string().contains("demand"));
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let err = normalize("wind", &[1.0, f64::NAN, 2.0]).expect_err("NaN must fail");
        assert!(err.to_string().contains("hour 1"));
    }

    #[test]
    fn negative_input_is_rejected() {
        let err = normalize("demand", &[5.0, 3.0, -0.5]).expect_err("negative must fail");
        assert!(matches!(err, GridError::MalformedInput { .. }));
        assert!(err.to_string().contains("hour 2"));
        assert!(normalize("demand", &[0.0, -0.0]).is_ok());
    }

    #[test]
    fn non_finite_beyond_one_year_is_ignored() {
        let mut raw = vec![1.0; HOURS_PER_YEAR];
        raw.push(f64::INFINITY);
        assert!(normalize("wind", &raw).is_ok());
    }

    #[test]
    fn scaled_multiplies_every_hour() {
        let s = HourlySeries::from_fn(|h| h as f64).scaled(2.0);
        assert_eq!(s[10], 20.0);
    }
}
