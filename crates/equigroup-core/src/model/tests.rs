use std::time::Duration;

use super::*;

#[test]
fn test_builder_assigns_sequential_ids() {
    let mut builder = ModelBuilder::new("ids");
    let a = builder.binary("a");
    let b = builder.free("b");
    let c = builder.non_negative("c");
    assert_eq!((a.index(), b.index(), c.index()), (0, 1, 2));

    let model = builder.build();
    assert_eq!(model.variable_count(), 3);
    assert_eq!(model.binary_count(), 1);
    assert_eq!(model.variable(c).unwrap().kind, VarKind::non_negative());
}

#[test]
fn test_objective_accumulates_weighted_terms() {
    let mut builder = ModelBuilder::new("objective");
    let x = builder.free("x");
    let y = builder.free("y");

    builder.minimise(&LinearExpr::term(x, 1.0), 2.0);
    let mut diff = LinearExpr::term(y, 1.0);
    diff.add_term(x, -1.0);
    builder.minimise(&diff, 0.5);

    let model = builder.build();
    // 2x + 0.5(y - x)
    assert_eq!(model.objective_value(&[1.0, 3.0]), 3.0);
}

#[test]
fn test_constraint_satisfaction() {
    let mut builder = ModelBuilder::new("rows");
    let x = builder.binary("x");
    let y = builder.binary("y");
    builder.equal("one", [(x, 1.0), (y, 1.0)].into_iter().collect(), 1.0);
    builder.less_eq("cap", LinearExpr::term(x, 3.0), 2.0);
    let model = builder.build();

    assert!(model.is_satisfied_by(&[0.0, 1.0], 1e-9));
    assert_eq!(model.violations(&[1.0, 0.0], 1e-9), vec!["cap"]);
    assert_eq!(model.violations(&[1.0, 1.0], 1e-9), vec!["one", "cap"]);
    // Wrong length never satisfies
    assert!(!model.is_satisfied_by(&[0.0], 1e-9));
}

#[test]
fn test_domain_violations() {
    let mut builder = ModelBuilder::new("domains");
    builder.binary("x");
    builder.non_negative("slack");
    let model = builder.build();

    assert_eq!(model.violations(&[0.5, 1.0], 1e-9), vec!["x"]);
    assert_eq!(model.violations(&[1.0, -2.0], 1e-9), vec!["slack"]);
}

#[test]
fn test_expression_constant_and_scaling() {
    let mut builder = ModelBuilder::new("expr");
    let x = builder.free("x");

    let mut base = LinearExpr::term(x, 2.0);
    base.add_constant(1.0);
    let mut scaled = LinearExpr::new();
    scaled.add_scaled(&base, -3.0);

    assert_eq!(scaled.constant_term(), -3.0);
    assert_eq!(scaled.terms(), &[(x, -6.0)]);
    assert_eq!(scaled.evaluate(&[1.0]), -9.0);
}

#[test]
fn test_solved_values_binary_reading() {
    let mut builder = ModelBuilder::new("read");
    let x = builder.binary("x");
    let y = builder.binary("y");
    let _ = builder.build();

    let solved = SolvedValues::new(
        vec![0.9999999, 1e-8],
        SolveStatus::Optimal,
        0.0,
        Duration::ZERO,
    );
    assert_eq!(solved.is_one(x), Some(true));
    assert_eq!(solved.is_one(y), Some(false));
    assert!(solved.status().is_optimal());
    assert!(!SolveStatus::TimeLimited.is_optimal());
}
