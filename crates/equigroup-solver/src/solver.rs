use std::time::{Duration, Instant};

use equigroup_config::GroupingConfig;
use equigroup_core::{
    EquigroupError, LinearModel, Result, SolvedValues, SolverBackend,
};
use tracing::{info, warn};

use crate::capability::SolverCapabilities;

/// Solves linear models with the backend chosen at construction.
///
/// A solver is cheap to clone and can be reused for any number of models;
/// each call to [`solve`](MilpSolver::solve) builds a fresh backend problem.
#[derive(Debug, Clone)]
pub struct MilpSolver {
    capabilities: SolverCapabilities,
}

impl MilpSolver {
    /// Probes `preferences` in order and keeps the first working backend.
    pub fn probe(preferences: &[SolverBackend]) -> Result<Self> {
        Ok(Self {
            capabilities: SolverCapabilities::probe(preferences)?,
        })
    }

    /// Probes the backends listed in the configuration.
    pub fn from_config(config: &GroupingConfig) -> Result<Self> {
        Self::probe(&config.solver.backends)
    }

    pub fn backend(&self) -> SolverBackend {
        self.capabilities.selected()
    }

    pub fn capabilities(&self) -> &SolverCapabilities {
        &self.capabilities
    }

    /// Solves `model` within `time_limit`.
    ///
    /// A solve the backend stopped at the time limit while holding an
    /// incumbent is marked [`TimeLimited`](equigroup_core::SolveStatus::TimeLimited);
    /// its values are the best found, not a proven optimum.
    ///
    /// # Errors
    ///
    /// - `DegenerateInput` for a zero time limit
    /// - `Infeasible` when the model has no feasible solution
    /// - `TimeLimitExceeded` when the budget expired with no solution at all
    /// - `Solver` for any other backend failure
    pub fn solve(&self, model: &LinearModel, time_limit: Duration) -> Result<SolvedValues> {
        if time_limit.is_zero() {
            return Err(EquigroupError::DegenerateInput(
                "time limit must be positive".to_string(),
            ));
        }

        let backend = self.backend();
        info!(
            event = "solve_start",
            model = model.name(),
            backend = backend.name(),
            variable_count = model.variable_count(),
            constraint_count = model.constraint_count(),
            time_limit_secs = time_limit.as_secs_f64(),
        );

        let start = Instant::now();
        let outcome = match backend {
            #[cfg(feature = "highs")]
            SolverBackend::Highs => crate::highs::solve(model, time_limit),
            #[cfg(not(feature = "highs"))]
            SolverBackend::Highs => Err(EquigroupError::SolverUnavailable(
                "HiGHS support not compiled in".to_string(),
            )),
            SolverBackend::Microlp => crate::microlp::solve(model, time_limit),
        };
        let elapsed = start.elapsed();

        let (values, status) = match outcome {
            Ok(solved) => solved,
            Err(err) => {
                if let EquigroupError::TimeLimitExceeded(_) = err {
                    warn!(
                        event = "solve_timeout",
                        model = model.name(),
                        time_limit_secs = time_limit.as_secs_f64(),
                    );
                }
                return Err(err);
            }
        };

        if values.len() != model.variable_count() {
            return Err(EquigroupError::Solver(format!(
                "backend returned {} values for {} variables",
                values.len(),
                model.variable_count()
            )));
        }

        let objective = model.objective_value(&values);

        info!(
            event = "solve_end",
            model = model.name(),
            status = %status,
            objective = objective,
            duration_ms = elapsed.as_millis() as u64,
        );

        Ok(SolvedValues::new(values, status, objective, elapsed))
    }
}
