use std::collections::BTreeMap;

use super::*;

fn people() -> Vec<Entity> {
    vec![
        Entity::new("p1").with("Color", "Red").with("Score", 1.0),
        Entity::new("p2").with("Color", "Blue").with("Score", 2.0),
        Entity::new("p3").with("Color", "Red").with("Score", 3.0),
        Entity::new("p4").with("Color", "Green").with("Score", 6.0),
    ]
}

fn classification() -> Classification {
    Classification::new(["Color"], ["Score"]).unwrap()
}

#[test]
fn test_from_entities_computes_summaries() {
    let dataset = Dataset::from_entities(people(), &classification()).unwrap();

    let color = dataset.categorical_summary("Color").unwrap();
    let levels: Vec<_> = color.iter().map(|(l, _)| l.to_string()).collect();
    assert_eq!(levels, vec!["Red", "Blue", "Green"]);
    assert_eq!(color.proportion("Red"), 0.5);
    assert_eq!(color.proportion("Blue"), 0.25);

    let score = dataset.numerical_summary("Score").unwrap();
    assert_eq!(score.mean, 3.0);
    // (4 + 1 + 0 + 9) / 4
    assert_eq!(score.variance, 3.5);
}

#[test]
fn test_lookup_by_id() {
    let dataset = Dataset::from_entities(people(), &classification()).unwrap();
    let id = EntityId::new("p3");
    assert!(dataset.contains(&id));
    assert_eq!(dataset.entity(&id).unwrap().number("Score"), Some(3.0));
    assert!(dataset.entity(&EntityId::new("nobody")).is_none());
    assert_eq!(dataset.values("Score"), vec![1.0, 2.0, 3.0, 6.0]);
}

#[test]
fn test_empty_dataset_is_degenerate() {
    let result = Dataset::from_entities(Vec::new(), &classification());
    assert!(matches!(result, Err(EquigroupError::DegenerateInput(_))));
}

#[test]
fn test_duplicate_ids_rejected() {
    let mut entities = people();
    entities.push(Entity::new("p1").with("Color", "Red").with("Score", 0.0));
    let result = Dataset::from_entities(entities, &classification());
    assert!(matches!(result, Err(EquigroupError::Dataset(_))));
}

#[test]
fn test_missing_attribute_rejected() {
    let mut entities = people();
    entities.push(Entity::new("p5").with("Color", "Red"));
    let result = Dataset::from_entities(entities, &classification());
    assert!(matches!(result, Err(EquigroupError::Dataset(_))));
}

#[test]
fn test_mistyped_attribute_rejected() {
    let entities = vec![Entity::new("p1").with("Color", 3.0).with("Score", 1.0)];
    let result = Dataset::from_entities(entities, &classification());
    assert!(matches!(result, Err(EquigroupError::Dataset(_))));
}

#[test]
fn test_overlapping_classification_rejected() {
    let result = Classification::new(["Color"], ["Color"]);
    assert!(matches!(result, Err(EquigroupError::Dataset(_))));
}

#[test]
fn test_new_with_precomputed_summaries() {
    let mut categorical = BTreeMap::new();
    categorical.insert(
        "Color".to_string(),
        CategoricalSummary::new(vec![("Red".to_string(), 0.5), ("Blue".to_string(), 0.5)]),
    );
    let mut numerical = BTreeMap::new();
    numerical.insert("Score".to_string(), NumericalSummary::new(10.0, 4.0));

    let dataset = Dataset::new(people(), categorical, numerical).unwrap();
    assert!(dataset.classification().is_categorical("Color"));
    assert!(dataset.classification().is_numerical("Score"));
    // Summaries are taken as given, not recomputed
    assert_eq!(dataset.numerical_summary("Score").unwrap().mean, 10.0);
}

#[test]
fn test_invalid_proportion_rejected() {
    let mut categorical = BTreeMap::new();
    categorical.insert(
        "Color".to_string(),
        CategoricalSummary::new(vec![("Red".to_string(), 1.5)]),
    );
    let result = Dataset::new(people(), categorical, BTreeMap::new());
    assert!(matches!(result, Err(EquigroupError::Dataset(_))));
}
