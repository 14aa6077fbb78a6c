//! One-time selection of a working solver backend.

use std::time::Duration;

use equigroup_core::{
    EquigroupError, LinearExpr, LinearModel, ModelBuilder, Result, SolveStatus, SolverBackend,
};
use good_lp::ResolutionError;
use tracing::{debug, info};

const PROBE_TIME_LIMIT: Duration = Duration::from_secs(5);

/// Whether `backend` was compiled into this build.
pub fn is_compiled(backend: SolverBackend) -> bool {
    match backend {
        SolverBackend::Highs => cfg!(feature = "highs"),
        SolverBackend::Microlp => true,
    }
}

/// The backend selected by a probe and why the others were passed over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverCapabilities {
    selected: SolverBackend,
    rejected: Vec<(SolverBackend, String)>,
}

impl SolverCapabilities {
    /// Tries each backend in order on a one-variable model and keeps the
    /// first that solves it.
    ///
    /// # Errors
    ///
    /// Returns `SolverUnavailable` if no listed backend works.
    pub fn probe(preferences: &[SolverBackend]) -> Result<Self> {
        let model = probe_model();
        let mut rejected = Vec::new();

        for &backend in preferences {
            let outcome = if is_compiled(backend) {
                run_probe(backend, &model)
            } else {
                Err(format!(
                    "{} support not compiled in (enable the `{}` feature)",
                    backend, backend
                ))
            };

            match outcome {
                Ok(()) => {
                    info!(event = "solver_probe", backend = backend.name(), ok = true);
                    return Ok(Self { selected: backend, rejected });
                }
                Err(reason) => {
                    debug!(
                        event = "solver_probe",
                        backend = backend.name(),
                        ok = false,
                        reason = %reason,
                    );
                    rejected.push((backend, reason));
                }
            }
        }

        let tried = rejected
            .iter()
            .map(|(b, reason)| format!("{}: {}", b, reason))
            .collect::<Vec<_>>();
        Err(EquigroupError::SolverUnavailable(if tried.is_empty() {
            "no solver backend configured".to_string()
        } else {
            tried.join("; ")
        }))
    }

    pub fn selected(&self) -> SolverBackend {
        self.selected
    }

    /// Backends tried before the selected one, with the reason each failed.
    pub fn rejected(&self) -> &[(SolverBackend, String)] {
        &self.rejected
    }
}

// minimise x subject to x >= 1, x binary
fn probe_model() -> LinearModel {
    let mut builder = ModelBuilder::new("probe");
    let x = builder.binary("x");
    builder.greater_eq("x_set", LinearExpr::term(x, 1.0), 1.0);
    builder.minimise(&LinearExpr::term(x, 1.0), 1.0);
    builder.build()
}

fn run_probe(backend: SolverBackend, model: &LinearModel) -> std::result::Result<(), String> {
    let (values, _) = solve_raw(backend, model).map_err(|e| e.to_string())?;
    match values.first() {
        Some(&x) if (x - 1.0).abs() < 1e-6 => Ok(()),
        other => Err(format!("probe model returned {:?} instead of x = 1", other)),
    }
}

fn solve_raw(
    backend: SolverBackend,
    model: &LinearModel,
) -> std::result::Result<(Vec<f64>, SolveStatus), ResolutionError> {
    match backend {
        #[cfg(feature = "highs")]
        SolverBackend::Highs => crate::highs::solve_raw(model, PROBE_TIME_LIMIT),
        #[cfg(not(feature = "highs"))]
        SolverBackend::Highs => Err(ResolutionError::Other("HiGHS support not compiled in")),
        SolverBackend::Microlp => crate::microlp::solve_raw(model, PROBE_TIME_LIMIT),
    }
}
