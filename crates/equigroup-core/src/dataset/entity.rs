//! Entities and their attribute values.

use std::collections::BTreeMap;
use std::fmt;

/// Identifier of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Value of a single attribute.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Value {
    /// A numeric measurement.
    Numerical(f64),

    /// A discrete label.
    Categorical(String),
}

impl Value {
    /// Returns the label if this is a categorical value.
    pub fn as_level(&self) -> Option<&str> {
        match self {
            Value::Categorical(level) => Some(level),
            Value::Numerical(_) => None,
        }
    }

    /// Returns the number if this is a numerical value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Numerical(x) => Some(*x),
            Value::Categorical(_) => None,
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Numerical(x)
    }
}

impl From<&str> for Value {
    fn from(level: &str) -> Self {
        Value::Categorical(level.to_string())
    }
}

impl From<String> for Value {
    fn from(level: String) -> Self {
        Value::Categorical(level)
    }
}

/// An identified record of named attribute values.
///
/// # Example
///
/// ```
/// use equigroup_core::Entity;
///
/// let entity = Entity::new("A01").with("Color", "Red").with("Age", 31.0);
/// assert_eq!(entity.level("Color"), Some("Red"));
/// assert_eq!(entity.number("Age"), Some(31.0));
/// assert_eq!(entity.number("Color"), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    id: EntityId,
    attributes: BTreeMap<String, Value>,
}

impl Entity {
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Adds or replaces an attribute.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn level(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_level)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_number)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }
}
