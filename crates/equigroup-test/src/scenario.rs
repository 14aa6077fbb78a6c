//! Fixed datasets with known answers.

use std::collections::BTreeMap;

use equigroup_core::{Classification, Dataset, Entity, NumericalSummary};

/// A reference population, a candidate pool and how many to select.
#[derive(Debug, Clone)]
pub struct SelectionFixture {
    pub reference: Dataset,
    pub candidates: Dataset,
    pub n_people: usize,
}

fn dataset(entities: Vec<Entity>, categorical: &[&str], numerical: &[&str]) -> Dataset {
    let classification =
        Classification::new(categorical.iter().copied(), numerical.iter().copied()).unwrap();
    Dataset::from_entities(entities, &classification).unwrap()
}

/// Ten entities with a balanced `Color` and a spread of `Age` values.
///
/// Meant to be split into three groups of sizes 3, 3 and 4.
pub fn scenario_a() -> Dataset {
    let rows = [
        ("p01", "Red", 21.0),
        ("p02", "Blue", 34.0),
        ("p03", "Red", 45.0),
        ("p04", "Blue", 23.0),
        ("p05", "Red", 52.0),
        ("p06", "Blue", 38.0),
        ("p07", "Red", 29.0),
        ("p08", "Blue", 41.0),
        ("p09", "Red", 33.0),
        ("p10", "Blue", 27.0),
    ];
    let entities = rows
        .iter()
        .map(|&(id, color, age)| Entity::new(id).with("Color", color).with("Age", age))
        .collect();
    dataset(entities, &["Color"], &["Age"])
}

/// Four entities, two `Red` and two `Blue`, no numerical attributes.
///
/// Two groups of two can each take one of every color.
pub fn color_pairs() -> Dataset {
    let entities = vec![
        Entity::new("r1").with("Color", "Red"),
        Entity::new("r2").with("Color", "Red"),
        Entity::new("b1").with("Color", "Blue"),
        Entity::new("b2").with("Color", "Blue"),
    ];
    dataset(entities, &["Color"], &[])
}

/// Twenty candidates over levels `A`, `B`, `C`; select five.
///
/// The reference has `A` at 0.4, `B` at 0.4 and `C` at 0.2.
pub fn candidate_pool() -> SelectionFixture {
    let reference_rows = [
        ("A", 50.0),
        ("A", 55.0),
        ("A", 60.0),
        ("A", 45.0),
        ("B", 52.0),
        ("B", 48.0),
        ("B", 58.0),
        ("B", 42.0),
        ("C", 50.0),
        ("C", 40.0),
    ];
    let reference = reference_rows
        .iter()
        .enumerate()
        .map(|(i, &(level, score))| {
            Entity::new(format!("ref{}", i))
                .with("Category", level)
                .with("Score", score)
        })
        .collect();

    let levels = ["A", "B", "A", "C", "B"];
    let candidates = (0..20)
        .map(|i| {
            Entity::new(format!("c{:02}", i))
                .with("Category", levels[i % levels.len()])
                .with("Score", 30.0 + (i as f64 * 7.0) % 40.0)
        })
        .collect();

    SelectionFixture {
        reference: dataset(reference, &["Category"], &["Score"]),
        candidates: dataset(candidates, &["Category"], &["Score"]),
        n_people: 5,
    }
}

/// A pool holding exactly one five-person subset with mean 10 and variance 4.
///
/// The reference summary is given directly. The pool's own mean is also 10,
/// so the subset `{m7, m9, m10, m11, m13}` matches with zero deviation.
pub fn perfect_match() -> SelectionFixture {
    let scores = [7.0, 9.0, 10.0, 11.0, 13.0];
    let reference_entities = scores
        .iter()
        .enumerate()
        .map(|(i, &s)| Entity::new(format!("ref{}", i)).with("Score", s))
        .collect();
    let mut numerical = BTreeMap::new();
    numerical.insert("Score".to_string(), NumericalSummary::new(10.0, 4.0));
    let reference = Dataset::new(reference_entities, BTreeMap::new(), numerical).unwrap();

    let matching = scores
        .iter()
        .map(|&s| Entity::new(format!("m{}", s as i64)).with("Score", s));
    let decoys = [0.0, 20.0, 1.0, 19.0]
        .into_iter()
        .map(|s| Entity::new(format!("d{}", s as i64)).with("Score", s));
    let candidates = dataset(matching.chain(decoys).collect(), &[], &["Score"]);

    SelectionFixture {
        reference,
        candidates,
        n_people: 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_a_is_balanced() {
        let data = scenario_a();
        assert_eq!(data.len(), 10);
        assert_eq!(data.categorical_summary("Color").unwrap().proportion("Red"), 0.5);
    }

    #[test]
    fn test_candidate_pool_reference_proportions() {
        let fixture = candidate_pool();
        let summary = fixture.reference.categorical_summary("Category").unwrap();
        assert_eq!(summary.proportion("A"), 0.4);
        assert_eq!(summary.proportion("C"), 0.2);
        assert_eq!(fixture.candidates.len(), 20);
    }

    #[test]
    fn test_perfect_match_pool_mean() {
        let fixture = perfect_match();
        let pool = fixture.candidates.numerical_summary("Score").unwrap();
        assert_eq!(pool.mean, 10.0);
        let reference = fixture.reference.numerical_summary("Score").unwrap();
        assert_eq!((reference.mean, reference.variance), (10.0, 4.0));
    }
}
