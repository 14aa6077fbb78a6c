//! equigroup Core - Core types for balanced grouping and representative sampling
//!
//! This crate provides the fundamental abstractions for equigroup:
//! - Dataset contract: entities, attribute classification and summaries
//! - Statistics shared by the model builders and the quality assessors
//! - Group size planning
//! - A solver-neutral linear model IR and its solved values

pub mod backend;
pub mod dataset;
pub mod error;
pub mod groups;
pub mod model;
pub mod stats;

pub use backend::SolverBackend;
pub use dataset::{
    CategoricalSummary, Classification, Dataset, Entity, EntityId, NumericalSummary, Value,
};
pub use error::{EquigroupError, Result};
pub use groups::{GroupIndex, GroupPlan};
pub use model::{
    LinearConstraint, LinearExpr, LinearModel, ModelBuilder, Relation, SolveStatus, SolvedValues,
    VarId, VarKind, VariableDef,
};
pub use stats::{Dispersion, Statistic};
