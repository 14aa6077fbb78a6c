//! Reading a solved partition model back into an allocation and its quality.

use std::collections::BTreeMap;

use equigroup_core::stats::{mean, variance};
use equigroup_core::{
    Dispersion, EntityId, EquigroupError, GroupIndex, Result, SolveStatus, SolvedValues, VarId,
};

use super::PartitionModel;
use crate::check_value_count;
use crate::keys::LevelKey;

/// Which group every entity landed in, both ways round.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartitionAllocation {
    #[cfg_attr(feature = "serde", serde(rename = "entity-group"))]
    pub entity_group: BTreeMap<EntityId, GroupIndex>,

    #[cfg_attr(feature = "serde", serde(rename = "group-entity"))]
    pub group_entities: BTreeMap<GroupIndex, Vec<EntityId>>,
}

impl PartitionAllocation {
    pub fn group_of(&self, entity: &EntityId) -> Option<GroupIndex> {
        self.entity_group.get(entity).copied()
    }

    /// Members of `group` in dataset order.
    pub fn members(&self, group: GroupIndex) -> &[EntityId] {
        self.group_entities
            .get(&group)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn group_count(&self) -> usize {
        self.group_entities.len()
    }
}

/// How unequal the groups ended up for one numerical variable.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumericalBalance {
    /// Dispersion of the per-group means.
    pub mean: Dispersion,
    /// Dispersion of the per-group variances, each about its own group mean.
    pub variance: Dispersion,
    /// Solved `mean_max - mean_min`.
    pub mean_range: f64,
    /// Solved `var_max - var_min`, the linear proxy the model minimised.
    pub variance_range: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartitionQuality {
    pub numerical: BTreeMap<String, NumericalBalance>,
    /// Variable, then level, then the dispersion of its violation across groups.
    pub categorical: BTreeMap<String, BTreeMap<String, Dispersion>>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartitionReport {
    pub allocation: PartitionAllocation,
    pub quality: PartitionQuality,
    pub status: SolveStatus,
    pub objective: f64,
}

impl PartitionReport {
    pub fn is_optimal(&self) -> bool {
        self.status.is_optimal()
    }
}

impl PartitionModel<'_> {
    /// Maps solved `x[e, g]` to an allocation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSolution` if an entity is in zero or several groups, or
    /// a group does not hold its planned size.
    pub fn extract(&self, solved: &SolvedValues) -> Result<PartitionAllocation> {
        check_value_count(&self.model, solved)?;

        let mut allocation = PartitionAllocation {
            entity_group: BTreeMap::new(),
            group_entities: self.plan.groups().map(|g| (g, Vec::new())).collect(),
        };

        for entity in self.dataset.entities() {
            let id = entity.id();
            let mut chosen = self.plan.groups().filter(|&g| {
                self.assignment_var(id, g)
                    .and_then(|x| solved.is_one(x))
                    .unwrap_or(false)
            });

            let group = match (chosen.next(), chosen.next()) {
                (Some(g), None) => g,
                (None, _) => {
                    return Err(EquigroupError::InvalidSolution(format!(
                        "entity '{}' is not assigned to any group",
                        id
                    )))
                }
                (Some(a), Some(b)) => {
                    return Err(EquigroupError::InvalidSolution(format!(
                        "entity '{}' is assigned to both group {} and group {}",
                        id, a, b
                    )))
                }
            };

            allocation.entity_group.insert(id.clone(), group);
            allocation
                .group_entities
                .entry(group)
                .or_default()
                .push(id.clone());
        }

        for (group, planned) in self.plan.sizes() {
            let actual = allocation.members(group).len();
            if actual != planned {
                return Err(EquigroupError::InvalidSolution(format!(
                    "group {} holds {} entities but {} were planned",
                    group, actual, planned
                )));
            }
        }

        Ok(allocation)
    }

    /// Post-hoc statistics of an extracted allocation.
    ///
    /// Group means and variances are computed from the members' values, not
    /// from the linear proxy used while solving.
    pub fn assess(
        &self,
        allocation: &PartitionAllocation,
        solved: &SolvedValues,
    ) -> Result<PartitionQuality> {
        let mut quality = PartitionQuality::default();

        for (name, bounds) in &self.bounds {
            let mut means = Vec::with_capacity(self.plan.len());
            let mut variances = Vec::with_capacity(self.plan.len());
            for group in self.plan.groups() {
                let values: Vec<f64> = allocation
                    .members(group)
                    .iter()
                    .filter_map(|id| self.dataset.entity(id))
                    .filter_map(|e| e.number(name))
                    .collect();
                if let (Some(m), Some(v)) = (mean(&values), variance(&values)) {
                    means.push(m);
                    variances.push(v);
                }
            }

            let (Some(mean_spread), Some(variance_spread)) =
                (Dispersion::of(&means), Dispersion::of(&variances))
            else {
                return Err(EquigroupError::InvalidSolution(format!(
                    "no group holds a value of '{}'",
                    name
                )));
            };
            quality.numerical.insert(
                name.clone(),
                NumericalBalance {
                    mean: mean_spread,
                    variance: variance_spread,
                    mean_range: solved_range(solved, bounds.mean_min, bounds.mean_max),
                    variance_range: solved_range(solved, bounds.var_min, bounds.var_max),
                },
            );
        }

        let mut per_level: BTreeMap<&LevelKey, Vec<f64>> = BTreeMap::new();
        for ((level, _), &var) in &self.violations {
            per_level
                .entry(level)
                .or_default()
                .push(solved.value(var).unwrap_or(0.0));
        }
        for (level, values) in per_level {
            if let Some(dispersion) = Dispersion::of(&values) {
                quality
                    .categorical
                    .entry(level.variable.clone())
                    .or_default()
                    .insert(level.level.clone(), dispersion);
            }
        }

        Ok(quality)
    }
}

fn solved_range(solved: &SolvedValues, min: VarId, max: VarId) -> f64 {
    solved.value(max).unwrap_or(0.0) - solved.value(min).unwrap_or(0.0)
}
