//! Typed keys for the decision variables of a formulation.

use equigroup_core::{EntityId, GroupIndex, VarId};

/// `x[entity, group]` in the partition model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssignmentKey {
    pub entity: EntityId,
    pub group: GroupIndex,
}

impl AssignmentKey {
    pub fn new(entity: EntityId, group: GroupIndex) -> Self {
        Self { entity, group }
    }
}

/// One level of one categorical variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LevelKey {
    pub variable: String,
    pub level: String,
}

impl LevelKey {
    pub fn new(variable: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            level: level.into(),
        }
    }
}

/// Bracket variables of one numerical variable in the partition model.
///
/// Every group's mean lies in `[mean_min, mean_max]` and its variance proxy
/// in `[var_min, var_max]`; the variance bounds are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericBounds {
    pub mean_min: VarId,
    pub mean_max: VarId,
    pub var_min: VarId,
    pub var_max: VarId,
}

/// Signed deviation pairs of one numerical variable in the distribution model.
///
/// `achieved - reference == plus - minus`, both non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviationPair {
    pub plus: VarId,
    pub minus: VarId,
}

/// Deviation pairs for the mean and the variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericDeviations {
    pub mean: DeviationPair,
    pub variance: DeviationPair,
}
