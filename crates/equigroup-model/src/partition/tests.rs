use std::time::Duration;

use equigroup_core::stats::{mean, variance};
use equigroup_core::{
    Classification, Dataset, Dispersion, Entity, EntityId, EquigroupError, GroupIndex, SolveStatus,
    SolvedValues, Statistic,
};
use equigroup_test::{color_pairs, scenario_a};

use super::*;
use crate::FEASIBILITY_TOLERANCE;

fn g(index: usize) -> GroupIndex {
    GroupIndex::new(index)
}

// Sets x[e, g] = 1 for each pair and every bracket variable to the achieved extremes.
fn solved_for(model: &PartitionModel<'_>, groups: &[(&str, usize)]) -> SolvedValues {
    let mut values = vec![0.0; model.linear_model().variable_count()];
    for &(id, group) in groups {
        let x = model.assignment_var(&EntityId::from(id), g(group)).unwrap();
        values[x.index()] = 1.0;
    }

    let dataset = model.dataset();
    for (name, summary) in dataset.numerical() {
        let mut means = Vec::new();
        let mut proxies = Vec::new();
        for group in model.plan().groups() {
            let members: Vec<f64> = groups
                .iter()
                .filter(|&&(_, grp)| grp == group.get())
                .map(|&(id, _)| dataset.entity(&EntityId::from(id)).unwrap().number(name).unwrap())
                .collect();
            let size = members.len() as f64;
            means.push(members.iter().sum::<f64>() / size);
            proxies.push(
                members
                    .iter()
                    .map(|v| (v - summary.mean).powi(2))
                    .sum::<f64>()
                    / size,
            );
        }
        let b = model.bounds(name).unwrap();
        values[b.mean_min.index()] = means.iter().copied().fold(f64::INFINITY, f64::min);
        values[b.mean_max.index()] = means.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        values[b.var_min.index()] = proxies.iter().copied().fold(f64::INFINITY, f64::min);
        values[b.var_max.index()] = proxies.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    }

    let objective = model.linear_model().objective_value(&values);
    SolvedValues::new(values, SolveStatus::Optimal, objective, Duration::ZERO)
}

const SCENARIO_A_SPLIT: [(&str, usize); 10] = [
    ("p01", 1),
    ("p02", 1),
    ("p03", 1),
    ("p04", 2),
    ("p05", 2),
    ("p06", 2),
    ("p07", 3),
    ("p08", 3),
    ("p09", 3),
    ("p10", 3),
];

#[test]
fn test_color_pairs_model_shape() {
    let data = color_pairs();
    let model = PartitionModel::new(&data, 2).unwrap();
    let lp = model.linear_model();

    // 4 x 2 assignments, 2 levels x 2 groups of violations
    assert_eq!(lp.variable_count(), 12);
    assert_eq!(lp.binary_count(), 8);
    // 4 assignment + 2 size + 2 per level and group
    assert_eq!(lp.constraint_count(), 4 + 2 + 8);
}

#[test]
fn test_scenario_a_model_shape() {
    let data = scenario_a();
    let model = PartitionModel::new(&data, 3).unwrap();
    let lp = model.linear_model();

    assert_eq!(model.plan().sizes().map(|(_, s)| s).collect::<Vec<_>>(), vec![3, 3, 4]);
    assert_eq!(lp.variable_count(), 30 + 4 + 6);
    assert_eq!(lp.constraint_count(), 10 + 3 + 4 * 3 + 2 * 6);
    assert!(model.bounds("Age").is_some());
    assert!(model.bounds("Color").is_none());
}

#[test]
fn test_degenerate_group_counts() {
    let data = color_pairs();
    assert!(matches!(
        PartitionModel::new(&data, 0),
        Err(EquigroupError::DegenerateInput(_))
    ));
    assert!(matches!(
        PartitionModel::new(&data, 5),
        Err(EquigroupError::DegenerateInput(_))
    ));
}

#[test]
fn test_zero_statistics_rejected() {
    let classification = Classification::new(Vec::<String>::new(), ["Age"]).unwrap();

    let flat = vec![
        Entity::new("a").with("Age", 5.0),
        Entity::new("b").with("Age", 5.0),
    ];
    let flat = Dataset::from_entities(flat, &classification).unwrap();
    match PartitionModel::new(&flat, 2) {
        Err(EquigroupError::DegenerateVariable { variable, statistic }) => {
            assert_eq!(variable, "Age");
            assert_eq!(statistic, Statistic::Variance);
        }
        other => panic!("expected degenerate variance, got {:?}", other),
    }

    let centered = vec![
        Entity::new("a").with("Age", -1.0),
        Entity::new("b").with("Age", 1.0),
    ];
    let centered = Dataset::from_entities(centered, &classification).unwrap();
    assert!(matches!(
        PartitionModel::new(&centered, 2),
        Err(EquigroupError::DegenerateVariable {
            statistic: Statistic::Mean,
            ..
        })
    ));
}

#[test]
fn test_small_scale_variable_accepted() {
    let classification = Classification::new(Vec::<String>::new(), ["Dose"]).unwrap();
    let entities = vec![
        Entity::new("a").with("Dose", 1e-8),
        Entity::new("b").with("Dose", 2e-8),
        Entity::new("c").with("Dose", 3e-8),
        Entity::new("d").with("Dose", 4e-8),
    ];
    let data = Dataset::from_entities(entities, &classification).unwrap();
    let summary = data.numerical_summary("Dose").unwrap();
    assert!(summary.variance < f64::EPSILON);

    let model = PartitionModel::new(&data, 2).unwrap();
    assert!(model.bounds("Dose").is_some());
}

#[test]
fn test_constant_with_rounding_noise_rejected() {
    let classification = Classification::new(Vec::<String>::new(), ["Share"]).unwrap();
    let entities = (0..3)
        .map(|i| Entity::new(format!("s{}", i)).with("Share", 0.1))
        .collect();
    let data = Dataset::from_entities(entities, &classification).unwrap();
    assert!(matches!(
        PartitionModel::new(&data, 3),
        Err(EquigroupError::DegenerateVariable {
            statistic: Statistic::Variance,
            ..
        })
    ));
}

#[test]
fn test_invalid_weights_rejected() {
    let data = color_pairs();
    let result = PartitionModel::with_weights(&data, 2, ObjectiveWeights::new(0.0));
    assert!(matches!(result, Err(EquigroupError::Config(_))));
}

#[test]
fn test_mixed_pairs_satisfy_model_without_violation() {
    let data = color_pairs();
    let model = PartitionModel::new(&data, 2).unwrap();
    let solved = solved_for(&model, &[("r1", 1), ("b1", 1), ("r2", 2), ("b2", 2)]);

    assert!(model
        .linear_model()
        .is_satisfied_by(solved.values(), FEASIBILITY_TOLERANCE));
    assert_eq!(solved.objective(), 0.0);
}

#[test]
fn test_same_color_groups_need_violation() {
    let data = color_pairs();
    let model = PartitionModel::new(&data, 2).unwrap();
    let mut solved = solved_for(&model, &[("r1", 1), ("r2", 1), ("b1", 2), ("b2", 2)]);

    // Each group misses the color it lacks by one
    let violated = model
        .linear_model()
        .violations(solved.values(), FEASIBILITY_TOLERANCE);
    assert_eq!(violated, vec!["Color_lo[Red,2]", "Color_lo[Blue,1]"]);

    let mut values = solved.values().to_vec();
    let blue = LevelKey::new("Color", "Blue");
    let red = LevelKey::new("Color", "Red");
    values[model.violation_var(&blue, g(1)).unwrap().index()] = 1.0;
    values[model.violation_var(&red, g(2)).unwrap().index()] = 1.0;
    assert!(model
        .linear_model()
        .is_satisfied_by(&values, FEASIBILITY_TOLERANCE));
    // Two units of violation at the default penalty
    assert_eq!(model.linear_model().objective_value(&values), 2e4);

    solved = SolvedValues::new(values, SolveStatus::Optimal, 2e4, Duration::ZERO);
    let report = model.interpret(&solved).unwrap();
    let blue_spread = report.quality.categorical["Color"]["Blue"];
    assert_eq!(blue_spread.max, 1.0);
    assert_eq!(blue_spread.min, 0.0);
    assert_eq!(blue_spread.mean, 0.5);
}

#[test]
fn test_scenario_a_split_satisfies_model() {
    let data = scenario_a();
    let model = PartitionModel::new(&data, 3).unwrap();
    let solved = solved_for(&model, &SCENARIO_A_SPLIT);

    assert!(model
        .linear_model()
        .is_satisfied_by(solved.values(), FEASIBILITY_TOLERANCE));
}

#[test]
fn test_objective_normalizes_ranges() {
    let data = scenario_a();
    let model = PartitionModel::new(&data, 3).unwrap();
    let solved = solved_for(&model, &SCENARIO_A_SPLIT);

    let summary = data.numerical_summary("Age").unwrap();
    let b = model.bounds("Age").unwrap();
    let mean_range = solved.value(b.mean_max).unwrap() - solved.value(b.mean_min).unwrap();
    let var_range = solved.value(b.var_max).unwrap() - solved.value(b.var_min).unwrap();
    let expected = mean_range / summary.mean + var_range / summary.variance;

    assert!((solved.objective() - expected).abs() < 1e-9);
}

#[test]
fn test_numerical_weight_scales_objective() {
    let data = scenario_a();
    let plain = PartitionModel::new(&data, 3).unwrap();
    let weighted = PartitionModel::with_weights(
        &data,
        3,
        ObjectiveWeights::default().with_numerical("Age", 3.0),
    )
    .unwrap();

    let plain_solved = solved_for(&plain, &SCENARIO_A_SPLIT);
    let weighted_solved = solved_for(&weighted, &SCENARIO_A_SPLIT);
    assert!((weighted_solved.objective() - 3.0 * plain_solved.objective()).abs() < 1e-9);
}

#[test]
fn test_extract_scenario_a() {
    let data = scenario_a();
    let model = PartitionModel::new(&data, 3).unwrap();
    let allocation = model.extract(&solved_for(&model, &SCENARIO_A_SPLIT)).unwrap();

    assert_eq!(allocation.entity_group.len(), 10);
    assert_eq!(allocation.group_count(), 3);
    assert_eq!(allocation.group_of(&EntityId::from("p05")), Some(g(2)));
    let ids: Vec<&str> = allocation.members(g(3)).iter().map(EntityId::as_str).collect();
    assert_eq!(ids, vec!["p07", "p08", "p09", "p10"]);
    for (group, size) in model.plan().sizes() {
        assert_eq!(allocation.members(group).len(), size);
    }
}

#[test]
fn test_extract_rejects_double_assignment() {
    let data = color_pairs();
    let model = PartitionModel::new(&data, 2).unwrap();
    let solved = solved_for(
        &model,
        &[("r1", 1), ("r1", 2), ("b1", 1), ("r2", 2), ("b2", 2)],
    );
    assert!(matches!(
        model.extract(&solved),
        Err(EquigroupError::InvalidSolution(_))
    ));
}

#[test]
fn test_extract_rejects_unassigned_entity() {
    let data = color_pairs();
    let model = PartitionModel::new(&data, 2).unwrap();
    let solved = solved_for(&model, &[("r1", 1), ("b1", 1), ("r2", 2)]);
    let err = model.extract(&solved).unwrap_err();
    assert!(err.to_string().contains("b2"));
}

#[test]
fn test_extract_rejects_wrong_group_size() {
    let data = color_pairs();
    let model = PartitionModel::new(&data, 2).unwrap();
    let solved = solved_for(&model, &[("r1", 1), ("b1", 1), ("r2", 1), ("b2", 2)]);
    let err = model.extract(&solved).unwrap_err();
    assert!(err.to_string().contains("group 1 holds 3"));
}

#[test]
fn test_extract_rejects_wrong_value_count() {
    let data = color_pairs();
    let model = PartitionModel::new(&data, 2).unwrap();
    let solved = SolvedValues::new(vec![1.0; 3], SolveStatus::Optimal, 0.0, Duration::ZERO);
    assert!(matches!(
        model.extract(&solved),
        Err(EquigroupError::InvalidSolution(_))
    ));
}

#[test]
fn test_assess_uses_true_group_statistics() {
    let data = scenario_a();
    let model = PartitionModel::new(&data, 3).unwrap();
    let report = model.interpret(&solved_for(&model, &SCENARIO_A_SPLIT)).unwrap();
    let balance = report.quality.numerical["Age"];

    let groups = [
        vec![21.0, 34.0, 45.0],
        vec![23.0, 52.0, 38.0],
        vec![29.0, 41.0, 33.0, 27.0],
    ];
    let means: Vec<f64> = groups.iter().map(|v| mean(v).unwrap()).collect();
    let variances: Vec<f64> = groups.iter().map(|v| variance(v).unwrap()).collect();

    let expected_mean = Dispersion::of(&means).unwrap();
    let expected_var = Dispersion::of(&variances).unwrap();
    assert!((balance.mean.max - expected_mean.max).abs() < 1e-9);
    assert!((balance.mean.min - expected_mean.min).abs() < 1e-9);
    assert!((balance.mean.sd - expected_mean.sd).abs() < 1e-9);
    assert!((balance.variance.mean - expected_var.mean).abs() < 1e-9);
    assert!((balance.mean_range - expected_mean.range()).abs() < 1e-9);

    let red = report.quality.categorical["Color"]["Red"];
    assert_eq!((red.max, red.min, red.sd), (0.0, 0.0, 0.0));
    assert!(report.is_optimal());
}

#[test]
fn test_interpret_is_idempotent() {
    let data = scenario_a();
    let model = PartitionModel::new(&data, 3).unwrap();
    let solved = solved_for(&model, &SCENARIO_A_SPLIT);

    let first = model.interpret(&solved).unwrap();
    let second = model.interpret(&solved).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_time_limited_status_carried() {
    let data = color_pairs();
    let model = PartitionModel::new(&data, 2).unwrap();
    let values = solved_for(&model, &[("r1", 1), ("b1", 1), ("r2", 2), ("b2", 2)])
        .values()
        .to_vec();
    let solved = SolvedValues::new(values, SolveStatus::TimeLimited, 0.0, Duration::from_secs(1));

    let report = model.interpret(&solved).unwrap();
    assert_eq!(report.status, SolveStatus::TimeLimited);
    assert!(!report.is_optimal());
}
