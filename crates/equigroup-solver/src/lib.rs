//! MILP solver adapter for equigroup.
//!
//! Translates a solver-neutral [`LinearModel`](equigroup_core::LinearModel)
//! into a `good_lp` problem, runs it under a wall-clock budget and hands back
//! [`SolvedValues`](equigroup_core::SolvedValues).
//!
//! Backends are chosen once by [`SolverCapabilities::probe`], which tries each
//! preferred backend on a one-variable model and keeps the first that works.
//! Every later solve reuses that choice.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use equigroup_core::{LinearExpr, ModelBuilder, SolverBackend};
//! use equigroup_solver::MilpSolver;
//!
//! let mut builder = ModelBuilder::new("pick-one");
//! let x = builder.binary("x");
//! let y = builder.binary("y");
//! builder.equal("one", [(x, 1.0), (y, 1.0)].into_iter().collect(), 1.0);
//! builder.minimise(&LinearExpr::term(x, 2.0), 1.0);
//! builder.minimise(&LinearExpr::term(y, 3.0), 1.0);
//! let model = builder.build();
//!
//! let solver = MilpSolver::probe(&[SolverBackend::Microlp]).unwrap();
//! let solved = solver.solve(&model, Duration::from_secs(5)).unwrap();
//! assert_eq!(solved.is_one(x), Some(true));
//! assert!((solved.objective() - 2.0).abs() < 1e-9);
//! ```

mod capability;
#[cfg(feature = "highs")]
mod highs;
mod microlp;
mod solver;
mod translate;


pub use capability::{is_compiled, SolverCapabilities};
pub use solver::MilpSolver;
