//! `LinearModel` to `good_lp` translation.

use std::time::Duration;

use equigroup_core::{
    EquigroupError, LinearExpr, LinearModel, Relation, SolveStatus, VarKind, VariableDef,
};
use good_lp::solvers::SolutionStatus;
use good_lp::{
    variable, Constraint, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
    Variable, VariableDefinition,
};

/// A model rewritten in `good_lp` terms, not yet bound to a backend.
pub(crate) struct Translation {
    pub vars: ProblemVariables,
    /// `handles[i]` is the variable with `VarId` index `i`.
    pub handles: Vec<Variable>,
    pub objective: Expression,
    pub constraints: Vec<Constraint>,
}

pub(crate) fn translate(model: &LinearModel) -> Translation {
    let mut vars = ProblemVariables::new();
    let handles: Vec<Variable> = model
        .variables()
        .iter()
        .map(|def| vars.add(definition(def)))
        .collect();

    // The objective constant does not move the optimum; it is added back when
    // the objective is evaluated on the solved values.
    let objective = expression(model.objective(), &handles);

    let constraints = model
        .constraints()
        .iter()
        .map(|c| {
            let lhs = expression(&c.expr, &handles);
            let rhs = c.rhs - c.expr.constant_term();
            match c.relation {
                Relation::LessEq => lhs.leq(rhs),
                Relation::GreaterEq => lhs.geq(rhs),
                Relation::Equal => lhs.eq(rhs),
            }
        })
        .collect();

    Translation {
        vars,
        handles,
        objective,
        constraints,
    }
}

fn definition(def: &VariableDef) -> VariableDefinition {
    let base = variable().name(def.name.clone());
    match def.kind {
        VarKind::Binary => base.binary(),
        VarKind::Continuous { lower, upper } => {
            let base = match lower {
                Some(l) => base.min(l),
                None => base,
            };
            match upper {
                Some(u) => base.max(u),
                None => base,
            }
        }
    }
}

// Linear terms only; callers handle the constant.
fn expression(expr: &LinearExpr, handles: &[Variable]) -> Expression {
    let mut out = Expression::with_capacity(expr.terms().len());
    for &(var, coefficient) in expr.terms() {
        out.add_mul(coefficient, handles[var.index()]);
    }
    out
}

/// Adds the constraints to a backend problem, solves it and reads every variable.
///
/// The status is the backend's own: a solve cut short by its time limit
/// returns the incumbent as [`SolveStatus::TimeLimited`].
pub(crate) fn run<M>(
    mut problem: M,
    constraints: Vec<Constraint>,
    handles: &[Variable],
) -> Result<(Vec<f64>, SolveStatus), ResolutionError>
where
    M: SolverModel<Error = ResolutionError>,
{
    for constraint in constraints {
        problem.add_constraint(constraint);
    }
    let solution = problem.solve()?;
    let status = match solution.status() {
        SolutionStatus::Optimal => SolveStatus::Optimal,
        _ => SolveStatus::TimeLimited,
    };
    let values = handles.iter().map(|&v| solution.value(v)).collect();
    Ok((values, status))
}

pub(crate) fn map_resolution(
    err: ResolutionError,
    model: &str,
    time_limit: Duration,
) -> EquigroupError {
    match err {
        ResolutionError::Infeasible => {
            EquigroupError::Infeasible(format!("model '{}' has no feasible solution", model))
        }
        ResolutionError::Unbounded => {
            EquigroupError::Solver(format!("model '{}' is unbounded", model))
        }
        other => {
            let message = other.to_string();
            if message.to_ascii_lowercase().contains("time limit") {
                EquigroupError::TimeLimitExceeded(time_limit)
            } else {
                EquigroupError::Solver(message)
            }
        }
    }
}
