//! Reproducible random populations.

use equigroup_core::{Classification, Dataset, Entity};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const COLORS: [&str; 3] = ["Red", "Green", "Blue"];

/// Builds `n` entities with a `Color` level, an integer `Age` and a real `Score`.
///
/// The same seed always yields the same population.
pub fn synthetic_population(seed: u64, n: usize) -> Dataset {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let entities = (0..n)
        .map(|i| {
            let color = COLORS[rng.random_range(0..COLORS.len())];
            let age = rng.random_range(18..66) as f64;
            let score: f64 = rng.random_range(40.0..100.0);
            Entity::new(format!("e{:03}", i))
                .with("Color", color)
                .with("Age", age)
                .with("Score", score)
        })
        .collect();

    let classification = Classification::new(["Color"], ["Age", "Score"]).unwrap();
    Dataset::from_entities(entities, &classification).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_population() {
        let a = synthetic_population(7, 12);
        let b = synthetic_population(7, 12);
        assert_eq!(a.entities(), b.entities());
        assert_eq!(a.len(), 12);
    }

    #[test]
    fn test_values_in_range() {
        let data = synthetic_population(42, 30);
        assert!(data.values("Age").iter().all(|a| (18.0..66.0).contains(a)));
        assert!(data.values("Score").iter().all(|s| (40.0..100.0).contains(s)));
    }
}
