//! Per-variable summaries: level proportions and mean/variance.

use crate::stats;

/// Ordered `(level, proportion)` pairs of a categorical variable.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoricalSummary {
    levels: Vec<(String, f64)>,
}

impl CategoricalSummary {
    pub fn new(levels: Vec<(String, f64)>) -> Self {
        Self { levels }
    }

    /// Counts labels in first-seen order and converts counts to proportions.
    ///
    /// # Example
    ///
    /// ```
    /// use equigroup_core::CategoricalSummary;
    ///
    /// let summary = CategoricalSummary::from_labels(["B", "A", "B", "B"]);
    /// assert_eq!(summary.levels()[0], ("B".to_string(), 0.75));
    /// assert_eq!(summary.proportion("A"), 0.25);
    /// assert_eq!(summary.proportion("C"), 0.0);
    /// ```
    pub fn from_labels<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut total = 0usize;
        for label in labels {
            total += 1;
            match counts.iter_mut().find(|(level, _)| level == label) {
                Some((_, count)) => *count += 1,
                None => counts.push((label.to_string(), 1)),
            }
        }

        let levels = counts
            .into_iter()
            .map(|(level, count)| (level, count as f64 / total as f64))
            .collect();
        Self { levels }
    }

    pub fn levels(&self) -> &[(String, f64)] {
        &self.levels
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.levels.iter().map(|(l, p)| (l.as_str(), *p))
    }

    /// Proportion of `level`; a level that never occurs has proportion 0.
    pub fn proportion(&self, level: &str) -> f64 {
        self.levels
            .iter()
            .find(|(l, _)| l == level)
            .map(|(_, p)| *p)
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Population mean and population variance of a numerical variable.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumericalSummary {
    pub mean: f64,
    pub variance: f64,
}

impl NumericalSummary {
    pub fn new(mean: f64, variance: f64) -> Self {
        Self { mean, variance }
    }

    /// Summarizes `values`, or `None` when empty.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mean = stats::mean(values)?;
        let variance = stats::variance_about(values, mean)?;
        Some(Self { mean, variance })
    }
}
