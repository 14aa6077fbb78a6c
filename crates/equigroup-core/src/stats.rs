//! Population statistics shared by the model builders and quality assessors.
//!
//! Every variance here is a population variance (divides by `n`). Functions
//! return `None` for empty input instead of producing `NaN`.

use std::fmt;

/// The statistic a numerical summary or quality figure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Statistic {
    Mean,
    Variance,
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statistic::Mean => f.write_str("mean"),
            Statistic::Variance => f.write_str("variance"),
        }
    }
}

/// Arithmetic mean.
///
/// # Example
///
/// ```
/// use equigroup_core::stats::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance about the values' own mean.
pub fn variance(values: &[f64]) -> Option<f64> {
    let center = mean(values)?;
    variance_about(values, center)
}

/// Population variance about an externally supplied center.
///
/// The partition model measures spread against the global mean rather than
/// a group's own mean; this is the statistic that linearization tracks.
pub fn variance_about(values: &[f64], center: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().map(|v| (v - center).powi(2)).sum();
    Some(sum / values.len() as f64)
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    variance(values).map(f64::sqrt)
}

/// Max/min/mean/standard deviation of a list of per-group figures.
///
/// # Example
///
/// ```
/// use equigroup_core::Dispersion;
///
/// let d = Dispersion::of(&[2.0, 4.0]).unwrap();
/// assert_eq!(d.max, 4.0);
/// assert_eq!(d.min, 2.0);
/// assert_eq!(d.mean, 3.0);
/// assert_eq!(d.sd, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dispersion {
    pub max: f64,
    pub min: f64,
    pub mean: f64,
    pub sd: f64,
}

impl Dispersion {
    /// Summarizes `values`, or `None` when there is nothing to summarize.
    pub fn of(values: &[f64]) -> Option<Self> {
        let mean = mean(values)?;
        let sd = std_dev(values)?;
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        Some(Self { max, min, mean, sd })
    }

    /// Spread between the largest and smallest value.
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}
