//! Names of the MILP solver backends equigroup can drive.

use std::fmt;

/// A MILP solver backend.
///
/// Which backends are actually usable depends on how the solver crate was
/// compiled; the choice between them is made once by a capability probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SolverBackend {
    /// HiGHS, with native time limit support.
    Highs,

    /// microlp, a pure-Rust branch and bound solver.
    Microlp,
}

impl SolverBackend {
    /// All backends, in default preference order.
    pub const ALL: [SolverBackend; 2] = [SolverBackend::Highs, SolverBackend::Microlp];

    pub fn name(self) -> &'static str {
        match self {
            SolverBackend::Highs => "highs",
            SolverBackend::Microlp => "microlp",
        }
    }
}

impl fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
