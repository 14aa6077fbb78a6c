//! Selection of a fixed-size subset that resembles a reference population.
//!
//! # Formulation
//!
//! Variables: `x[e]` binary per candidate, `v[c, l] >= 0` per categorical
//! level found among the candidates, and non-negative pairs
//! `(mean_p, mean_n)`, `(var_p, var_n)` per numerical variable.
//!
//! Objective: `sum w_v * (mean_p + mean_n + var_p + var_n) + penalty * sum v`.
//!
//! Constraints, with `n = n_people`:
//! 1. `sum x == n`
//! 2. `sum(value / n * x) - mean_p + mean_n == reference_mean`, and the same
//!    for `(value - candidate_mean)^2` against the reference variance
//! 3. per level, with `t = floor(reference_proportion * n)`:
//!    `count + v >= t` and `count - v <= t + 1`
//!
//! A level the reference never shows has proportion 0, which steers the
//! selection away from it.

mod report;


pub use report::{DistributionQuality, DistributionReport, MatchError, NumericalMatch};

use std::collections::BTreeMap;

use equigroup_core::{
    Dataset, EntityId, EquigroupError, LinearExpr, LinearModel, ModelBuilder, Result,
    SolvedValues, VarId,
};
use tracing::{debug, info};

use crate::keys::{DeviationPair, LevelKey, NumericDeviations};
use crate::{proportional_target, Formulation, ObjectiveWeights};

/// A built distribution model.
#[derive(Debug)]
pub struct DistributionModel<'a> {
    reference: &'a Dataset,
    candidates: &'a Dataset,
    n_people: usize,
    weights: ObjectiveWeights,
    model: LinearModel,
    selection: BTreeMap<EntityId, VarId>,
    violations: BTreeMap<LevelKey, VarId>,
    deviations: BTreeMap<String, NumericDeviations>,
}

impl<'a> DistributionModel<'a> {
    /// Builds the model with the default objective weights.
    ///
    /// # Errors
    ///
    /// - `DegenerateInput` when `n_people` is zero
    /// - `Infeasible` when `n_people` exceeds the candidate count
    /// - `Dataset` when the reference lacks a summary for a candidate variable
    pub fn new(reference: &'a Dataset, candidates: &'a Dataset, n_people: usize) -> Result<Self> {
        Self::with_weights(reference, candidates, n_people, ObjectiveWeights::default())
    }

    pub fn with_weights(
        reference: &'a Dataset,
        candidates: &'a Dataset,
        n_people: usize,
        weights: ObjectiveWeights,
    ) -> Result<Self> {
        weights.validate()?;
        if n_people == 0 {
            return Err(EquigroupError::DegenerateInput(
                "cannot select zero people".to_string(),
            ));
        }
        if n_people > candidates.len() {
            return Err(EquigroupError::Infeasible(format!(
                "{} people requested from {} candidates",
                n_people,
                candidates.len()
            )));
        }
        check_reference_covers(reference, candidates)?;

        let n = n_people as f64;
        let mut builder = ModelBuilder::new("distribution");

        let mut selection = BTreeMap::new();
        let mut column = Vec::with_capacity(candidates.len());
        for entity in candidates.entities() {
            let x = builder.binary(format!("x[{}]", entity.id()));
            selection.insert(entity.id().clone(), x);
            column.push(x);
        }

        let mut deviations = BTreeMap::new();
        for name in candidates.numerical().keys() {
            let mut pair = |stat: &str| DeviationPair {
                plus: builder.non_negative(format!("{}_{}_p", name, stat)),
                minus: builder.non_negative(format!("{}_{}_n", name, stat)),
            };
            let d = NumericDeviations {
                mean: pair("mean"),
                variance: pair("var"),
            };
            deviations.insert(name.clone(), d);
        }

        let mut violations = BTreeMap::new();
        for (name, summary) in candidates.categorical() {
            for (level, _) in summary.iter() {
                let v = builder.non_negative(format!("{}_violation[{}]", name, level));
                violations.insert(LevelKey::new(name.as_str(), level), v);
            }
        }

        // Objective
        for (name, d) in &deviations {
            let total: LinearExpr = [d.mean.plus, d.mean.minus, d.variance.plus, d.variance.minus]
                .into_iter()
                .map(|var| (var, 1.0))
                .collect();
            builder.minimise(&total, weights.numerical_weight(name));
        }
        for &v in violations.values() {
            builder.minimise(&LinearExpr::term(v, 1.0), weights.categorical_penalty);
        }

        // 1. Selection count
        let count: LinearExpr = column.iter().map(|&x| (x, 1.0)).collect();
        builder.equal("select", count, n);

        // 2. Numeric matching
        for (name, summary) in candidates.numerical() {
            let d = &deviations[name];
            let target = &reference.numerical()[name];
            let values = candidates.values(name);

            let mut mean_expr: LinearExpr =
                column.iter().zip(&values).map(|(&x, &v)| (x, v / n)).collect();
            mean_expr.add_term(d.mean.plus, -1.0);
            mean_expr.add_term(d.mean.minus, 1.0);
            builder.equal(format!("{}_mean", name), mean_expr, target.mean);

            let mut var_expr: LinearExpr = column
                .iter()
                .zip(&values)
                .map(|(&x, &v)| (x, (v - summary.mean).powi(2) / n))
                .collect();
            var_expr.add_term(d.variance.plus, -1.0);
            var_expr.add_term(d.variance.minus, 1.0);
            builder.equal(format!("{}_var", name), var_expr, target.variance);
        }

        // 3. Categorical matching
        for (name, summary) in candidates.categorical() {
            let reference_levels = &reference.categorical()[name];
            for (level, _) in summary.iter() {
                let proportion = reference_levels.proportion(level);
                if proportion == 0.0 {
                    debug!(
                        event = "level_absent_from_reference",
                        variable = name.as_str(),
                        level = level,
                    );
                }
                let target = proportional_target(proportion, n_people);
                let v = violations[&LevelKey::new(name.as_str(), level)];

                let count: LinearExpr = candidates
                    .entities()
                    .iter()
                    .zip(&column)
                    .filter(|(e, _)| e.level(name) == Some(level))
                    .map(|(_, &x)| (x, 1.0))
                    .collect();

                let mut lower = count.clone();
                lower.add_term(v, 1.0);
                builder.greater_eq(format!("{}_lo[{}]", name, level), lower, target);

                let mut upper = count;
                upper.add_term(v, -1.0);
                builder.less_eq(format!("{}_hi[{}]", name, level), upper, target + 1.0);
            }
        }

        let model = builder.build();
        info!(
            event = "model_built",
            model = model.name(),
            entity_count = candidates.len(),
            n_people = n_people,
            variable_count = model.variable_count(),
            constraint_count = model.constraint_count(),
        );

        Ok(Self {
            reference,
            candidates,
            n_people,
            weights,
            model,
            selection,
            violations,
            deviations,
        })
    }

    pub fn reference(&self) -> &'a Dataset {
        self.reference
    }

    pub fn candidates(&self) -> &'a Dataset {
        self.candidates
    }

    pub fn n_people(&self) -> usize {
        self.n_people
    }

    pub fn weights(&self) -> &ObjectiveWeights {
        &self.weights
    }

    pub fn selection_var(&self, entity: &EntityId) -> Option<VarId> {
        self.selection.get(entity).copied()
    }

    pub fn violation_var(&self, level: &LevelKey) -> Option<VarId> {
        self.violations.get(level).copied()
    }

    pub fn deviations(&self, variable: &str) -> Option<&NumericDeviations> {
        self.deviations.get(variable)
    }
}

impl Formulation for DistributionModel<'_> {
    type Report = DistributionReport;

    fn linear_model(&self) -> &LinearModel {
        &self.model
    }

    fn interpret(&self, solved: &SolvedValues) -> Result<DistributionReport> {
        let selected = self.extract(solved)?;
        let quality = self.assess(&selected, solved)?;
        Ok(DistributionReport {
            selected,
            quality,
            status: solved.status(),
            objective: solved.objective(),
        })
    }
}

fn check_reference_covers(reference: &Dataset, candidates: &Dataset) -> Result<()> {
    let missing = candidates
        .numerical()
        .keys()
        .find(|name| reference.numerical_summary(name).is_none())
        .or_else(|| {
            candidates
                .categorical()
                .keys()
                .find(|name| reference.categorical_summary(name).is_none())
        });

    match missing {
        Some(name) => Err(EquigroupError::Dataset(format!(
            "reference population has no summary for '{}'",
            name
        ))),
        None => Ok(()),
    }
}
