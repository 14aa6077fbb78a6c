//! Group size planning.
//!
//! Splits `n` entities across `g` groups as evenly as possible: the first
//! `g - n % g` groups get `n / g` entities, the rest get one more.

use std::fmt;

use crate::error::{EquigroupError, Result};

/// One-based index of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct GroupIndex(usize);

impl GroupIndex {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for GroupIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A near-equal partition of entity counts across groups.
///
/// # Example
///
/// ```
/// use equigroup_core::{GroupIndex, GroupPlan};
///
/// let plan = GroupPlan::new(10, 3).unwrap();
/// assert_eq!(plan.size(GroupIndex::new(1)), Some(3));
/// assert_eq!(plan.size(GroupIndex::new(2)), Some(3));
/// assert_eq!(plan.size(GroupIndex::new(3)), Some(4));
/// assert_eq!(plan.total(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPlan {
    // sizes[i] belongs to group i + 1
    sizes: Vec<usize>,
}

impl GroupPlan {
    /// Plans `n_groups` group sizes for `n_entities` entities.
    ///
    /// # Errors
    ///
    /// Returns `DegenerateInput` when there are no groups, no entities, or
    /// more groups than entities.
    pub fn new(n_entities: usize, n_groups: usize) -> Result<Self> {
        if n_groups == 0 {
            return Err(EquigroupError::DegenerateInput(
                "group count must be positive".to_string(),
            ));
        }
        if n_entities == 0 {
            return Err(EquigroupError::DegenerateInput(
                "cannot plan groups for an empty dataset".to_string(),
            ));
        }
        if n_groups > n_entities {
            return Err(EquigroupError::DegenerateInput(format!(
                "{} groups requested for only {} entities",
                n_groups, n_entities
            )));
        }

        let base = n_entities / n_groups;
        // Number of groups holding `base` entities; the others hold `base + 1`.
        let k = n_groups - n_entities % n_groups;
        let sizes = (1..=n_groups)
            .map(|g| if g <= k { base } else { base + 1 })
            .collect();

        Ok(Self { sizes })
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Groups in order `1..=g`.
    pub fn groups(&self) -> impl Iterator<Item = GroupIndex> + '_ {
        (1..=self.sizes.len()).map(GroupIndex)
    }

    /// Groups paired with their planned sizes.
    pub fn sizes(&self) -> impl Iterator<Item = (GroupIndex, usize)> + '_ {
        self.sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| (GroupIndex(i + 1), size))
    }

    /// Planned size of `group`, or `None` if the group is not part of the plan.
    pub fn size(&self, group: GroupIndex) -> Option<usize> {
        group
            .0
            .checked_sub(1)
            .and_then(|i| self.sizes.get(i))
            .copied()
    }

    /// Sum of all group sizes.
    pub fn total(&self) -> usize {
        self.sizes.iter().sum()
    }
}
