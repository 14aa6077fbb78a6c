use std::collections::BTreeMap;

use equigroup_core::stats::{mean, variance};
use equigroup_core::{EntityId, EquigroupError, Result, SolveStatus, SolvedValues};

use super::DistributionModel;
use crate::check_value_count;
use crate::keys::DeviationPair;

/// How far one statistic of the selection is from the reference.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchError {
    /// Solved `plus + minus` of the deviation pair.
    pub deviation: f64,
    /// `|achieved - reference|` measured on the selected values.
    pub absolute: f64,
    /// `absolute` scaled by 100.
    pub percent: f64,
}

impl MatchError {
    fn new(deviation: f64, achieved: f64, reference: f64) -> Self {
        let absolute = (achieved - reference).abs();
        Self {
            deviation,
            absolute,
            percent: absolute * 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumericalMatch {
    pub mean: MatchError,
    /// The achieved variance is taken about the selection's own mean.
    pub variance: MatchError,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistributionQuality {
    pub numerical: BTreeMap<String, NumericalMatch>,
    /// Solved violation per variable and level.
    pub categorical: BTreeMap<String, BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistributionReport {
    /// Selected candidates in candidate order.
    pub selected: Vec<EntityId>,
    pub quality: DistributionQuality,
    pub status: SolveStatus,
    pub objective: f64,
}

impl DistributionReport {
    pub fn is_optimal(&self) -> bool {
        self.status.is_optimal()
    }
}

impl DistributionModel<'_> {
    /// Collects the candidates with `x[e] == 1`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSolution` unless exactly `n_people` are selected.
    pub fn extract(&self, solved: &SolvedValues) -> Result<Vec<EntityId>> {
        check_value_count(&self.model, solved)?;

        let selected: Vec<EntityId> = self
            .candidates
            .entities()
            .iter()
            .map(|e| e.id())
            .filter(|id| {
                self.selection_var(id)
                    .and_then(|x| solved.is_one(x))
                    .unwrap_or(false)
            })
            .cloned()
            .collect();

        if selected.len() != self.n_people {
            return Err(EquigroupError::InvalidSolution(format!(
                "{} candidates selected but {} were requested",
                selected.len(),
                self.n_people
            )));
        }
        Ok(selected)
    }

    /// Deviation and post-hoc errors of a selection.
    pub fn assess(&self, selected: &[EntityId], solved: &SolvedValues) -> Result<DistributionQuality> {
        let mut quality = DistributionQuality::default();

        for (name, d) in &self.deviations {
            let values: Vec<f64> = selected
                .iter()
                .filter_map(|id| self.candidates.entity(id))
                .filter_map(|e| e.number(name))
                .collect();
            let (Some(achieved_mean), Some(achieved_var)) = (mean(&values), variance(&values))
            else {
                return Err(EquigroupError::InvalidSolution(format!(
                    "selection holds no value of '{}'",
                    name
                )));
            };
            let target = self.reference.numerical_summary(name).ok_or_else(|| {
                EquigroupError::Dataset(format!("reference population has no summary for '{}'", name))
            })?;

            quality.numerical.insert(
                name.clone(),
                NumericalMatch {
                    mean: MatchError::new(pair_total(solved, &d.mean), achieved_mean, target.mean),
                    variance: MatchError::new(
                        pair_total(solved, &d.variance),
                        achieved_var,
                        target.variance,
                    ),
                },
            );
        }

        for (key, &v) in &self.violations {
            quality
                .categorical
                .entry(key.variable.clone())
                .or_default()
                .insert(key.level.clone(), solved.value(v).unwrap_or(0.0));
        }

        Ok(quality)
    }
}

fn pair_total(solved: &SolvedValues, pair: &DeviationPair) -> f64 {
    solved.value(pair.plus).unwrap_or(0.0) + solved.value(pair.minus).unwrap_or(0.0)
}
