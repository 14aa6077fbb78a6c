//! Solver-neutral linear model IR.
//!
//! Model builders accumulate variable and constraint descriptions in a
//! [`ModelBuilder`] they own, then emit one immutable [`LinearModel`]. The
//! solver crate translates that value for a concrete backend and hands back
//! [`SolvedValues`] indexed by [`VarId`].

mod expr;
mod solution;

#[cfg(test)]
mod tests;

pub use expr::{LinearConstraint, LinearExpr, Relation, VarId, VarKind, VariableDef};
pub use solution::{SolveStatus, SolvedValues};

/// Accumulates a minimisation model.
#[derive(Debug)]
pub struct ModelBuilder {
    name: String,
    variables: Vec<VariableDef>,
    objective: LinearExpr,
    constraints: Vec<LinearConstraint>,
}

impl ModelBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            objective: LinearExpr::new(),
            constraints: Vec::new(),
        }
    }

    /// Declares a variable and returns its handle.
    pub fn variable(&mut self, name: impl Into<String>, kind: VarKind) -> VarId {
        let id = VarId::new(self.variables.len());
        self.variables.push(VariableDef {
            name: name.into(),
            kind,
        });
        id
    }

    pub fn binary(&mut self, name: impl Into<String>) -> VarId {
        self.variable(name, VarKind::Binary)
    }

    pub fn free(&mut self, name: impl Into<String>) -> VarId {
        self.variable(name, VarKind::free())
    }

    pub fn non_negative(&mut self, name: impl Into<String>) -> VarId {
        self.variable(name, VarKind::non_negative())
    }

    /// Adds `weight * expr` to the objective.
    pub fn minimise(&mut self, expr: &LinearExpr, weight: f64) {
        self.objective.add_scaled(expr, weight);
    }

    pub fn constrain(
        &mut self,
        name: impl Into<String>,
        expr: LinearExpr,
        relation: Relation,
        rhs: f64,
    ) {
        self.constraints.push(LinearConstraint {
            name: name.into(),
            expr,
            relation,
            rhs,
        });
    }

    pub fn less_eq(&mut self, name: impl Into<String>, expr: LinearExpr, rhs: f64) {
        self.constrain(name, expr, Relation::LessEq, rhs);
    }

    pub fn greater_eq(&mut self, name: impl Into<String>, expr: LinearExpr, rhs: f64) {
        self.constrain(name, expr, Relation::GreaterEq, rhs);
    }

    pub fn equal(&mut self, name: impl Into<String>, expr: LinearExpr, rhs: f64) {
        self.constrain(name, expr, Relation::Equal, rhs);
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn build(self) -> LinearModel {
        LinearModel {
            name: self.name,
            variables: self.variables,
            objective: self.objective,
            constraints: self.constraints,
        }
    }
}

/// A finished minimisation model.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    name: String,
    variables: Vec<VariableDef>,
    objective: LinearExpr,
    constraints: Vec<LinearConstraint>,
}

impl LinearModel {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variables(&self) -> &[VariableDef] {
        &self.variables
    }

    pub fn variable(&self, id: VarId) -> Option<&VariableDef> {
        self.variables.get(id.index())
    }

    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn binary_count(&self) -> usize {
        self.variables
            .iter()
            .filter(|v| v.kind == VarKind::Binary)
            .count()
    }

    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.objective.evaluate(values)
    }

    /// Constraints and variable domains violated by `values`.
    ///
    /// Returns the names of the offending constraints and variables.
    pub fn violations(&self, values: &[f64], tolerance: f64) -> Vec<&str> {
        let domains = self
            .variables
            .iter()
            .zip(values)
            .filter(|(def, value)| !def.kind.admits(**value, tolerance))
            .map(|(def, _)| def.name.as_str());
        let rows = self
            .constraints
            .iter()
            .filter(|c| !c.is_satisfied_by(values, tolerance))
            .map(|c| c.name.as_str());
        domains.chain(rows).collect()
    }

    /// Whether `values` assigns every variable and satisfies the whole model.
    pub fn is_satisfied_by(&self, values: &[f64], tolerance: f64) -> bool {
        values.len() == self.variables.len() && self.violations(values, tolerance).is_empty()
    }
}
