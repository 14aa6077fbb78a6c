//! Balanced partition of every entity into a fixed number of groups.
//!
//! # Formulation
//!
//! Variables:
//! - `x[e, g]` binary, entity `e` sits in group `g`
//! - `v[c, l, g] >= 0`, violation of level `l` of categorical `c` in group `g`
//! - `mean_min`, `mean_max` (free) and `var_min`, `var_max` (`>= 0`) per
//!   numerical variable
//!
//! Objective (minimised):
//!
//! ```text
//! sum over numerical v:  w_v * ((mean_max - mean_min) / |mean_v| + (var_max - var_min) / var_v)
//! + penalty * sum of all v[c, l, g]
//! ```
//!
//! Constraints:
//! 1. every entity sits in exactly one group
//! 2. every group holds exactly its planned size
//! 3. per group and numerical variable, `size * mean_min <= sum(value * x) <= size * mean_max`
//!    and likewise for `sum((value - global_mean)^2 * x)` against the variance bounds
//! 4. per group and level, with `t = floor(p * size)`:
//!    `count + v >= t` and `count - v <= t + 1`
//!
//! The variance rows measure spread about the global mean rather than the
//! group's own mean, which keeps them linear.

mod report;

#[cfg(test)]
mod tests;

pub use report::{NumericalBalance, PartitionAllocation, PartitionQuality, PartitionReport};

use std::collections::BTreeMap;

use equigroup_core::{
    Dataset, EntityId, EquigroupError, GroupIndex, GroupPlan, LinearExpr, LinearModel,
    ModelBuilder, Result, SolvedValues, Statistic, VarId,
};
use tracing::{debug, info};

use crate::keys::{AssignmentKey, LevelKey, NumericBounds};
use crate::{proportional_target, Formulation, ObjectiveWeights};

/// A built partition model over one dataset.
///
/// # Example
///
/// ```
/// use equigroup_core::{Classification, Dataset, Entity, GroupIndex};
/// use equigroup_model::{Formulation, PartitionModel};
///
/// let entities = vec![
///     Entity::new("a").with("Color", "Red"),
///     Entity::new("b").with("Color", "Blue"),
///     Entity::new("c").with("Color", "Red"),
///     Entity::new("d").with("Color", "Blue"),
/// ];
/// let classification = Classification::new(["Color"], Vec::<String>::new()).unwrap();
/// let dataset = Dataset::from_entities(entities, &classification).unwrap();
///
/// let model = PartitionModel::new(&dataset, 2).unwrap();
/// // 4 x 2 assignments + 2 levels x 2 groups of violations
/// assert_eq!(model.linear_model().variable_count(), 12);
/// assert_eq!(model.plan().size(GroupIndex::new(1)), Some(2));
/// ```
#[derive(Debug)]
pub struct PartitionModel<'a> {
    dataset: &'a Dataset,
    plan: GroupPlan,
    weights: ObjectiveWeights,
    model: LinearModel,
    assignment: BTreeMap<AssignmentKey, VarId>,
    violations: BTreeMap<(LevelKey, GroupIndex), VarId>,
    bounds: BTreeMap<String, NumericBounds>,
}

impl<'a> PartitionModel<'a> {
    /// Builds the model with the default objective weights.
    ///
    /// # Errors
    ///
    /// Returns `DegenerateInput` when `n_groups` is zero or exceeds the
    /// entity count, and `DegenerateVariable` when a numerical variable has a
    /// zero global mean or variance.
    pub fn new(dataset: &'a Dataset, n_groups: usize) -> Result<Self> {
        Self::with_weights(dataset, n_groups, ObjectiveWeights::default())
    }

    /// Builds the model with explicit objective weights.
    pub fn with_weights(
        dataset: &'a Dataset,
        n_groups: usize,
        weights: ObjectiveWeights,
    ) -> Result<Self> {
        weights.validate()?;
        let plan = GroupPlan::new(dataset.len(), n_groups)?;
        check_divisors(dataset)?;

        let mut builder = ModelBuilder::new("partition");
        let groups: Vec<(GroupIndex, usize)> = plan.sizes().collect();

        // grid[i][j] is x[entity i, group j + 1]
        let mut grid: Vec<Vec<VarId>> = Vec::with_capacity(dataset.len());
        let mut assignment = BTreeMap::new();
        for entity in dataset.entities() {
            let mut row = Vec::with_capacity(groups.len());
            for &(group, _) in &groups {
                let var = builder.binary(format!("x[{},{}]", entity.id(), group));
                assignment.insert(AssignmentKey::new(entity.id().clone(), group), var);
                row.push(var);
            }
            grid.push(row);
        }

        let mut bounds = BTreeMap::new();
        for name in dataset.numerical().keys() {
            let b = NumericBounds {
                mean_min: builder.free(format!("{}_mean_min", name)),
                mean_max: builder.free(format!("{}_mean_max", name)),
                var_min: builder.non_negative(format!("{}_var_min", name)),
                var_max: builder.non_negative(format!("{}_var_max", name)),
            };
            bounds.insert(name.clone(), b);
        }

        let mut violations = BTreeMap::new();
        for (name, summary) in dataset.categorical() {
            for (level, _) in summary.iter() {
                for &(group, _) in &groups {
                    let var = builder.non_negative(format!("{}_violation[{},{}]", name, level, group));
                    violations.insert((LevelKey::new(name.as_str(), level), group), var);
                }
            }
        }

        // Objective
        for (name, summary) in dataset.numerical() {
            let b = &bounds[name];
            let weight = weights.numerical_weight(name);
            builder.minimise(&range(b.mean_min, b.mean_max), weight / summary.mean.abs());
            builder.minimise(&range(b.var_min, b.var_max), weight / summary.variance);
        }
        for &var in violations.values() {
            builder.minimise(&LinearExpr::term(var, 1.0), weights.categorical_penalty);
        }

        // 1. Assignment
        for (entity, row) in dataset.entities().iter().zip(&grid) {
            let expr = row.iter().map(|&x| (x, 1.0)).collect();
            builder.equal(format!("assign[{}]", entity.id()), expr, 1.0);
        }

        // 2. Group size
        for (j, &(group, size)) in groups.iter().enumerate() {
            let expr = grid.iter().map(|row| (row[j], 1.0)).collect();
            builder.equal(format!("size[{}]", group), expr, size as f64);
        }
        debug!(
            event = "constraints_added",
            family = "assignment",
            rows = dataset.len() + groups.len(),
        );

        // 3. Numeric range
        for (name, summary) in dataset.numerical() {
            let b = &bounds[name];
            let values = dataset.values(name);
            let squared: Vec<f64> = values.iter().map(|v| (v - summary.mean).powi(2)).collect();

            for (j, &(group, size)) in groups.iter().enumerate() {
                let size = size as f64;
                let sum = weighted_column(&grid, j, &values);
                let spread = weighted_column(&grid, j, &squared);

                builder.greater_eq(
                    format!("{}_mean_lo[{}]", name, group),
                    with_term(&sum, b.mean_min, -size),
                    0.0,
                );
                builder.less_eq(
                    format!("{}_mean_hi[{}]", name, group),
                    with_term(&sum, b.mean_max, -size),
                    0.0,
                );
                builder.greater_eq(
                    format!("{}_var_lo[{}]", name, group),
                    with_term(&spread, b.var_min, -size),
                    0.0,
                );
                builder.less_eq(
                    format!("{}_var_hi[{}]", name, group),
                    with_term(&spread, b.var_max, -size),
                    0.0,
                );
            }
        }
        debug!(
            event = "constraints_added",
            family = "numerical",
            rows = 4 * groups.len() * bounds.len(),
        );

        // 4. Categorical proportion
        for (name, summary) in dataset.categorical() {
            for (level, proportion) in summary.iter() {
                let holders: Vec<usize> = dataset
                    .entities()
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.level(name) == Some(level))
                    .map(|(i, _)| i)
                    .collect();

                for (j, &(group, size)) in groups.iter().enumerate() {
                    let v = violations[&(LevelKey::new(name.as_str(), level), group)];
                    let target = proportional_target(proportion, size);
                    let count: LinearExpr = holders.iter().map(|&i| (grid[i][j], 1.0)).collect();

                    builder.greater_eq(
                        format!("{}_lo[{},{}]", name, level, group),
                        with_term(&count, v, 1.0),
                        target,
                    );
                    builder.less_eq(
                        format!("{}_hi[{},{}]", name, level, group),
                        with_term(&count, v, -1.0),
                        target + 1.0,
                    );
                }
            }
        }
        debug!(
            event = "constraints_added",
            family = "categorical",
            rows = 2 * violations.len(),
        );

        let model = builder.build();
        info!(
            event = "model_built",
            model = model.name(),
            entity_count = dataset.len(),
            group_count = plan.len(),
            variable_count = model.variable_count(),
            constraint_count = model.constraint_count(),
        );

        Ok(Self {
            dataset,
            plan,
            weights,
            model,
            assignment,
            violations,
            bounds,
        })
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn plan(&self) -> &GroupPlan {
        &self.plan
    }

    pub fn weights(&self) -> &ObjectiveWeights {
        &self.weights
    }

    /// The `x[entity, group]` variable.
    pub fn assignment_var(&self, entity: &EntityId, group: GroupIndex) -> Option<VarId> {
        self.assignment
            .get(&AssignmentKey::new(entity.clone(), group))
            .copied()
    }

    /// The violation variable of `level` in `group`.
    pub fn violation_var(&self, level: &LevelKey, group: GroupIndex) -> Option<VarId> {
        self.violations.get(&(level.clone(), group)).copied()
    }

    /// The bracket variables of a numerical variable.
    pub fn bounds(&self, variable: &str) -> Option<&NumericBounds> {
        self.bounds.get(variable)
    }
}

impl Formulation for PartitionModel<'_> {
    type Report = PartitionReport;

    fn linear_model(&self) -> &LinearModel {
        &self.model
    }

    fn interpret(&self, solved: &SolvedValues) -> Result<PartitionReport> {
        let allocation = self.extract(solved)?;
        let quality = self.assess(&allocation, solved)?;
        Ok(PartitionReport {
            allocation,
            quality,
            status: solved.status(),
            objective: solved.objective(),
        })
    }
}

// The objective divides by each numerical variable's global mean and variance.
// Both count as zero only within rounding noise of the values' own scale.
fn check_divisors(dataset: &Dataset) -> Result<()> {
    for (name, summary) in dataset.numerical() {
        let values = dataset.values(name);
        let scale = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let noise = f64::EPSILON * values.len().max(1) as f64;

        if summary.mean.abs() <= noise * scale {
            return Err(EquigroupError::DegenerateVariable {
                variable: name.clone(),
                statistic: Statistic::Mean,
            });
        }
        if summary.variance <= noise * scale * scale {
            return Err(EquigroupError::DegenerateVariable {
                variable: name.clone(),
                statistic: Statistic::Variance,
            });
        }
    }
    Ok(())
}

fn range(min: VarId, max: VarId) -> LinearExpr {
    [(max, 1.0), (min, -1.0)].into_iter().collect()
}

fn weighted_column(grid: &[Vec<VarId>], column: usize, weights: &[f64]) -> LinearExpr {
    grid.iter()
        .zip(weights)
        .map(|(row, &w)| (row[column], w))
        .collect()
}

fn with_term(expr: &LinearExpr, var: VarId, coefficient: f64) -> LinearExpr {
    let mut out = expr.clone();
    out.add_term(var, coefficient);
    out
}
