//! equigroup - Balanced grouping and representative sampling in Rust
//!
//! Two problems over a [`Dataset`] of entities with categorical and
//! numerical attributes, each solved as a mixed-integer linear program:
//!
//! - **Partition**: split every entity into `n` near-equal groups whose
//!   category mix and numerical statistics are as similar as possible.
//! - **Distribution**: pick `n_people` candidates whose profile matches a
//!   reference population.
//!
//! # Example
//!
//! ```rust
//! use equigroup::prelude::*;
//!
//! let entities = vec![
//!     Entity::new("r1").with("Color", "Red"),
//!     Entity::new("r2").with("Color", "Red"),
//!     Entity::new("b1").with("Color", "Blue"),
//!     Entity::new("b2").with("Color", "Blue"),
//! ];
//! let classification = Classification::new(["Color"], Vec::<String>::new()).unwrap();
//! let dataset = Dataset::from_entities(entities, &classification).unwrap();
//!
//! let config = GroupingConfig::new().with_backends([SolverBackend::Microlp]);
//! let report = equigroup::partition_entities(&dataset, 2, &config).unwrap();
//!
//! let g = report.allocation.group_of(&EntityId::new("r1")).unwrap();
//! assert_ne!(report.allocation.group_of(&EntityId::new("r2")), Some(g));
//! ```

mod problem;

pub use problem::{create_similar_population, partition_entities, solve, Problem, Report};

pub use equigroup_config::{ConfigError, GroupingConfig, SolverConfig};
pub use equigroup_core::{
    CategoricalSummary, Classification, Dataset, Dispersion, Entity, EntityId, EquigroupError,
    GroupIndex, GroupPlan, NumericalSummary, Result, SolveStatus, SolverBackend, Value,
};
pub use equigroup_model::{
    DistributionModel, DistributionQuality, DistributionReport, Formulation, MatchError,
    NumericalBalance, NumericalMatch, ObjectiveWeights, PartitionAllocation, PartitionModel,
    PartitionQuality, PartitionReport,
};
pub use equigroup_solver::{MilpSolver, SolverCapabilities};

/// Colored console output for solve events.
#[cfg(feature = "console")]
pub use equigroup_console as console;

pub mod prelude {
    pub use super::{
        Classification, Dataset, Entity, EntityId, GroupIndex, GroupingConfig, SolveStatus,
        SolverBackend,
    };
    pub use super::{DistributionReport, PartitionReport, Problem, Report};
    pub use super::{DistributionModel, Formulation, MilpSolver, PartitionModel};
}
