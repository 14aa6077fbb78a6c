//! The dataset contract consumed by the model builders.
//!
//! A [`Dataset`] is loaded once and is read-only afterwards. It holds the
//! entity records, which attributes are categorical or numerical, and the
//! per-variable summaries the models target.

mod entity;
mod summary;

#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, BTreeSet, HashMap};

pub use entity::{Entity, EntityId, Value};
pub use summary::{CategoricalSummary, NumericalSummary};

use crate::error::{EquigroupError, Result};

/// Two disjoint sets of attribute names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    categorical: BTreeSet<String>,
    numerical: BTreeSet<String>,
}

impl Classification {
    /// Creates a classification.
    ///
    /// # Errors
    ///
    /// Returns `Dataset` if an attribute is classified as both kinds.
    pub fn new<C, N>(categorical: C, numerical: N) -> Result<Self>
    where
        C: IntoIterator,
        C::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        let categorical: BTreeSet<String> = categorical.into_iter().map(Into::into).collect();
        let numerical: BTreeSet<String> = numerical.into_iter().map(Into::into).collect();

        if let Some(name) = categorical.intersection(&numerical).next() {
            return Err(EquigroupError::Dataset(format!(
                "attribute '{}' is classified as both categorical and numerical",
                name
            )));
        }

        Ok(Self {
            categorical,
            numerical,
        })
    }

    pub fn categorical(&self) -> impl Iterator<Item = &str> {
        self.categorical.iter().map(String::as_str)
    }

    pub fn numerical(&self) -> impl Iterator<Item = &str> {
        self.numerical.iter().map(String::as_str)
    }

    pub fn is_categorical(&self, name: &str) -> bool {
        self.categorical.contains(name)
    }

    pub fn is_numerical(&self, name: &str) -> bool {
        self.numerical.contains(name)
    }
}

/// Entity records plus their classification and summaries.
///
/// # Example
///
/// ```
/// use equigroup_core::{Classification, Dataset, Entity};
///
/// let entities = vec![
///     Entity::new("a").with("Color", "Red").with("Age", 20.0),
///     Entity::new("b").with("Color", "Blue").with("Age", 30.0),
/// ];
/// let classification = Classification::new(["Color"], ["Age"]).unwrap();
/// let dataset = Dataset::from_entities(entities, &classification).unwrap();
///
/// assert_eq!(dataset.len(), 2);
/// assert_eq!(dataset.categorical_summary("Color").unwrap().proportion("Red"), 0.5);
/// assert_eq!(dataset.numerical_summary("Age").unwrap().mean, 25.0);
/// assert_eq!(dataset.numerical_summary("Age").unwrap().variance, 25.0);
/// ```
#[derive(Debug, Clone)]
pub struct Dataset {
    entities: Vec<Entity>,
    index: HashMap<EntityId, usize>,
    classification: Classification,
    categorical: BTreeMap<String, CategoricalSummary>,
    numerical: BTreeMap<String, NumericalSummary>,
}

impl Dataset {
    /// Creates a dataset from entities and precomputed summaries.
    ///
    /// The classification is the key sets of the two summary maps.
    ///
    /// # Errors
    ///
    /// Returns `DegenerateInput` for an empty entity list and `Dataset` for
    /// duplicate ids, missing or mistyped attributes, or invalid summaries.
    pub fn new(
        entities: Vec<Entity>,
        categorical: BTreeMap<String, CategoricalSummary>,
        numerical: BTreeMap<String, NumericalSummary>,
    ) -> Result<Self> {
        let classification = Classification::new(categorical.keys().cloned(), numerical.keys().cloned())?;

        for (name, summary) in &categorical {
            for (level, proportion) in summary.iter() {
                if !proportion.is_finite() || !(0.0..=1.0).contains(&proportion) {
                    return Err(EquigroupError::Dataset(format!(
                        "level '{}' of '{}' has proportion {} outside [0, 1]",
                        level, name, proportion
                    )));
                }
            }
        }
        for (name, summary) in &numerical {
            if !summary.mean.is_finite() || !summary.variance.is_finite() || summary.variance < 0.0 {
                return Err(EquigroupError::Dataset(format!(
                    "numerical summary of '{}' is invalid (mean {}, variance {})",
                    name, summary.mean, summary.variance
                )));
            }
        }

        let index = index_entities(&entities, &classification)?;

        Ok(Self {
            entities,
            index,
            classification,
            categorical,
            numerical,
        })
    }

    /// Creates a dataset and computes its summaries from the entities.
    ///
    /// Categorical levels keep first-seen order; numerical variance is the
    /// population variance.
    pub fn from_entities(entities: Vec<Entity>, classification: &Classification) -> Result<Self> {
        // Validate before summarizing so missing attributes report clearly.
        index_entities(&entities, classification)?;

        let categorical = classification
            .categorical()
            .map(|name| {
                let labels = entities.iter().filter_map(|e| e.level(name));
                (name.to_string(), CategoricalSummary::from_labels(labels))
            })
            .collect();

        let mut numerical = BTreeMap::new();
        for name in classification.numerical() {
            let values: Vec<f64> = entities.iter().filter_map(|e| e.number(name)).collect();
            let summary = NumericalSummary::from_values(&values).ok_or_else(|| {
                EquigroupError::DegenerateInput(format!("no values for numerical variable '{}'", name))
            })?;
            numerical.insert(name.to_string(), summary);
        }

        Self::new(entities, categorical, numerical)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: &EntityId) -> Option<&Entity> {
        self.index.get(id).map(|&i| &self.entities[i])
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    /// Categorical summaries keyed by variable name.
    pub fn categorical(&self) -> &BTreeMap<String, CategoricalSummary> {
        &self.categorical
    }

    /// Numerical summaries keyed by variable name.
    pub fn numerical(&self) -> &BTreeMap<String, NumericalSummary> {
        &self.numerical
    }

    pub fn categorical_summary(&self, name: &str) -> Option<&CategoricalSummary> {
        self.categorical.get(name)
    }

    pub fn numerical_summary(&self, name: &str) -> Option<&NumericalSummary> {
        self.numerical.get(name)
    }

    /// Value of numerical variable `name` for each entity, in entity order.
    ///
    /// Every entity is guaranteed to carry the variable by construction.
    pub fn values(&self, name: &str) -> Vec<f64> {
        self.entities.iter().filter_map(|e| e.number(name)).collect()
    }
}

// Checks ids are unique and every classified attribute is present with the right kind.
fn index_entities(
    entities: &[Entity],
    classification: &Classification,
) -> Result<HashMap<EntityId, usize>> {
    if entities.is_empty() {
        return Err(EquigroupError::DegenerateInput(
            "dataset has no entities".to_string(),
        ));
    }

    let mut index = HashMap::with_capacity(entities.len());
    for (i, entity) in entities.iter().enumerate() {
        if index.insert(entity.id().clone(), i).is_some() {
            return Err(EquigroupError::Dataset(format!(
                "duplicate entity id '{}'",
                entity.id()
            )));
        }

        for name in classification.categorical() {
            if entity.level(name).is_none() {
                return Err(EquigroupError::Dataset(format!(
                    "entity '{}' has no categorical value for '{}'",
                    entity.id(),
                    name
                )));
            }
        }
        for name in classification.numerical() {
            match entity.number(name) {
                Some(x) if x.is_finite() => {}
                Some(x) => {
                    return Err(EquigroupError::Dataset(format!(
                        "entity '{}' has non-finite value {} for '{}'",
                        entity.id(),
                        x,
                        name
                    )))
                }
                None => {
                    return Err(EquigroupError::Dataset(format!(
                        "entity '{}' has no numerical value for '{}'",
                        entity.id(),
                        name
                    )))
                }
            }
        }
    }

    Ok(index)
}
