//! Entry points that build, solve and read back a model in one call.

use std::time::Duration;

use equigroup_config::GroupingConfig;
use equigroup_core::{Dataset, Result, SolveStatus};
use equigroup_model::{
    DistributionModel, DistributionReport, Formulation, PartitionModel, PartitionReport,
};
use equigroup_solver::MilpSolver;
use tracing::debug;

/// Solves any formulation and interprets the result.
pub fn solve<F: Formulation>(
    formulation: &F,
    solver: &MilpSolver,
    time_limit: Duration,
) -> Result<F::Report> {
    let solved = solver.solve(formulation.linear_model(), time_limit)?;
    formulation.interpret(&solved)
}

/// One of the two supported problems, ready to solve.
///
/// Each variant is consumed by [`solve`](Problem::solve), so a model is
/// solved at most once.
#[derive(Debug)]
pub enum Problem<'a> {
    Partition(PartitionModel<'a>),
    Distribution(DistributionModel<'a>),
}

impl Problem<'_> {
    pub fn solve(self, solver: &MilpSolver, time_limit: Duration) -> Result<Report> {
        match self {
            Problem::Partition(model) => solve(&model, solver, time_limit).map(Report::Partition),
            Problem::Distribution(model) => {
                solve(&model, solver, time_limit).map(Report::Distribution)
            }
        }
    }
}

impl<'a> From<PartitionModel<'a>> for Problem<'a> {
    fn from(model: PartitionModel<'a>) -> Self {
        Problem::Partition(model)
    }
}

impl<'a> From<DistributionModel<'a>> for Problem<'a> {
    fn from(model: DistributionModel<'a>) -> Self {
        Problem::Distribution(model)
    }
}

/// The report matching a [`Problem`] variant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Report {
    Partition(PartitionReport),
    Distribution(DistributionReport),
}

impl Report {
    pub fn status(&self) -> SolveStatus {
        match self {
            Report::Partition(r) => r.status,
            Report::Distribution(r) => r.status,
        }
    }

    pub fn objective(&self) -> f64 {
        match self {
            Report::Partition(r) => r.objective,
            Report::Distribution(r) => r.objective,
        }
    }

    /// False when the solver stopped at the time limit.
    pub fn is_optimal(&self) -> bool {
        self.status().is_optimal()
    }

    pub fn as_partition(&self) -> Option<&PartitionReport> {
        match self {
            Report::Partition(r) => Some(r),
            Report::Distribution(_) => None,
        }
    }

    pub fn as_distribution(&self) -> Option<&DistributionReport> {
        match self {
            Report::Distribution(r) => Some(r),
            Report::Partition(_) => None,
        }
    }
}

/// Splits `dataset` into `n_groups` balanced groups.
///
/// The model is built before any backend is probed, so input errors are
/// reported without touching a solver.
///
/// # Errors
///
/// - `Config` for invalid weights or time limit
/// - `DegenerateInput` / `DegenerateVariable` / `Dataset` for unusable input
/// - `SolverUnavailable`, `Infeasible`, `TimeLimitExceeded` or `Solver` from
///   the solve itself
pub fn partition_entities(
    dataset: &Dataset,
    n_groups: usize,
    config: &GroupingConfig,
) -> Result<PartitionReport> {
    config.validate()?;
    init_console();

    let model = PartitionModel::with_weights(dataset, n_groups, config.weights.clone())?;
    let solver = MilpSolver::from_config(config)?;
    debug!(backend = solver.backend().name(), "partition solver selected");
    solve(&model, &solver, config.time_limit())
}

/// Selects `n_people` from `candidates` to resemble `reference`.
///
/// # Errors
///
/// As [`partition_entities`]; additionally `Infeasible` when `n_people`
/// exceeds the candidate pool.
pub fn create_similar_population(
    reference: &Dataset,
    candidates: &Dataset,
    n_people: usize,
    config: &GroupingConfig,
) -> Result<DistributionReport> {
    config.validate()?;
    init_console();

    let model =
        DistributionModel::with_weights(reference, candidates, n_people, config.weights.clone())?;
    let solver = MilpSolver::from_config(config)?;
    debug!(backend = solver.backend().name(), "distribution solver selected");
    solve(&model, &solver, config.time_limit())
}

#[cfg(feature = "console")]
fn init_console() {
    equigroup_console::init();
}

#[cfg(not(feature = "console"))]
fn init_console() {}

#[cfg(test)]
mod tests {
    use super::*;
    use equigroup_core::{EquigroupError, SolverBackend};
    use equigroup_test::{color_pairs, perfect_match};

    #[test]
    fn test_configured_weights_reach_model() {
        let config = GroupingConfig::new()
            .with_backends([SolverBackend::Microlp])
            .with_categorical_penalty(3.0);
        let data = color_pairs();
        let model = PartitionModel::with_weights(&data, 2, config.weights.clone()).unwrap();
        assert_eq!(model.weights().categorical_penalty, 3.0);

        let report = partition_entities(&data, 2, &config).unwrap();
        assert!(report.objective.abs() < 1e-6);
    }

    #[test]
    fn test_invalid_config_rejected_before_build() {
        let config = GroupingConfig::new().with_time_limit_seconds(0.0);
        let err = partition_entities(&color_pairs(), 2, &config).unwrap_err();
        assert!(matches!(err, EquigroupError::Config(_)));
    }

    #[test]
    fn test_input_errors_precede_probe() {
        // No backend could run, but the group count is checked first.
        let config = GroupingConfig::new().with_backends([SolverBackend::Highs]);
        let err = partition_entities(&color_pairs(), 5, &config).unwrap_err();
        assert!(matches!(err, EquigroupError::DegenerateInput(_)));
    }

    #[test]
    fn test_report_accessors() {
        let fixture = perfect_match();
        let model =
            DistributionModel::new(&fixture.reference, &fixture.candidates, fixture.n_people)
                .unwrap();
        let solver = MilpSolver::probe(&[SolverBackend::Microlp]).unwrap();
        let report = Problem::from(model)
            .solve(&solver, Duration::from_secs(60))
            .unwrap();

        assert!(report.as_partition().is_none());
        assert_eq!(report.as_distribution().map(|r| r.selected.len()), Some(5));
        assert!(report.is_optimal());
        assert!(report.objective().abs() < 1e-6);
    }
}
