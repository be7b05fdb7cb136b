//! Cross-sectional statistics over plain `f64` samples.
//!
//! Callers filter out absent values first; every function here returns `None` on an
//! empty sample instead of dividing by zero.

use serde::{Deserialize, Serialize};

/// Mean, median and extremes of a non-empty sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub mean: f64,
    pub median: f64,
    pub max: f64,
    pub min: f64,
}

impl Distribution {
    #[must_use]
    pub fn of(values: &[f64]) -> Option<Self> {
        Some(Self {
            mean: mean(values)?,
            median: median(values)?,
            max: values.iter().copied().reduce(f64::max)?,
            min: values.iter().copied().reduce(f64::min)?,
        })
    }
}

#[must_use]
pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(sum(values) / values.len() as f64)
    }
}

#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

/// The `q`-quantile with linear interpolation between closest ranks.
///
/// For sorted `v` of length `n`, the rank is `q * (n - 1)`; a fractional rank
/// interpolates between its neighbours. `q` is clamped to `[0, 1]`.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}
