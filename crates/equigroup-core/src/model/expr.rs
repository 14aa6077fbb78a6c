//! Variables, linear expressions and constraints.

use std::fmt;

/// Opaque handle of a decision variable inside one [`LinearModel`](super::LinearModel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the variable in the model's variable list.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Domain of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VarKind {
    /// 0 or 1.
    Binary,

    /// A real number within optional bounds.
    Continuous {
        lower: Option<f64>,
        upper: Option<f64>,
    },
}

impl VarKind {
    /// Unbounded in both directions.
    pub fn free() -> Self {
        VarKind::Continuous {
            lower: None,
            upper: None,
        }
    }

    /// Bounded below by zero.
    pub fn non_negative() -> Self {
        VarKind::Continuous {
            lower: Some(0.0),
            upper: None,
        }
    }

    /// Whether `value` lies in the domain, up to `tolerance`.
    pub fn admits(&self, value: f64, tolerance: f64) -> bool {
        match *self {
            VarKind::Binary => value.abs() <= tolerance || (value - 1.0).abs() <= tolerance,
            VarKind::Continuous { lower, upper } => {
                lower.map_or(true, |l| value >= l - tolerance)
                    && upper.map_or(true, |u| value <= u + tolerance)
            }
        }
    }
}

/// A named decision variable.
///
/// The name is for display and solver logs only; identity is the [`VarId`].
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDef {
    pub name: String,
    pub kind: VarKind,
}

/// A sum of weighted variables plus a constant.
///
/// # Example
///
/// ```
/// use equigroup_core::{LinearExpr, ModelBuilder};
///
/// let mut builder = ModelBuilder::new("demo");
/// let x = builder.binary("x");
/// let y = builder.free("y");
///
/// let mut expr = LinearExpr::constant(1.0);
/// expr.add_term(x, 2.0);
/// expr.add_term(y, -1.0);
///
/// assert_eq!(expr.evaluate(&[1.0, 0.5]), 2.5);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
    constant: f64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            terms: Vec::with_capacity(capacity),
            constant: 0.0,
        }
    }

    pub fn constant(value: f64) -> Self {
        Self {
            terms: Vec::new(),
            constant: value,
        }
    }

    pub fn term(var: VarId, coefficient: f64) -> Self {
        Self {
            terms: vec![(var, coefficient)],
            constant: 0.0,
        }
    }

    pub fn add_term(&mut self, var: VarId, coefficient: f64) {
        self.terms.push((var, coefficient));
    }

    pub fn add_constant(&mut self, value: f64) {
        self.constant += value;
    }

    /// Adds `factor * other` to this expression.
    pub fn add_scaled(&mut self, other: &LinearExpr, factor: f64) {
        self.terms
            .extend(other.terms.iter().map(|&(var, c)| (var, c * factor)));
        self.constant += other.constant * factor;
    }

    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    pub fn constant_term(&self) -> f64 {
        self.constant
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Value of the expression under `values`, indexed by [`VarId::index`].
    ///
    /// Variables outside `values` count as zero.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(var, c)| c * values.get(var.index()).copied().unwrap_or(0.0))
            .sum::<f64>()
            + self.constant
    }
}

impl FromIterator<(VarId, f64)> for LinearExpr {
    fn from_iter<I: IntoIterator<Item = (VarId, f64)>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
            constant: 0.0,
        }
    }
}

/// Comparison between a constraint's expression and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    LessEq,
    GreaterEq,
    Equal,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::LessEq => f.write_str("<="),
            Relation::GreaterEq => f.write_str(">="),
            Relation::Equal => f.write_str("=="),
        }
    }
}

/// `expr <relation> rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub name: String,
    pub expr: LinearExpr,
    pub relation: Relation,
    pub rhs: f64,
}

impl LinearConstraint {
    pub fn is_satisfied_by(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.expr.evaluate(values);
        match self.relation {
            Relation::LessEq => lhs <= self.rhs + tolerance,
            Relation::GreaterEq => lhs >= self.rhs - tolerance,
            Relation::Equal => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}
