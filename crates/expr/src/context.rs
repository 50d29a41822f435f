//! The read-only data an expression is evaluated against.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Extra named values visible to expressions as `@name`, alongside the feature.
pub type Attributes = HashMap<String, Value>;

/// One geographic record with named attribute values.
pub trait Feature {
    fn id(&self) -> i64;

    /// Returns the attribute value, or `None` if the feature does not carry it.
    /// An attribute that is present but empty is `Some(Value::Null)`.
    fn get(&self, name: &str) -> Option<Value>;
}

/// A feature backed by an in-memory attribute map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapFeature {
    pub id: i64,
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
}

impl MapFeature {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            attributes: HashMap::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(name.into(), value.into());
    }
}

impl Feature for MapFeature {
    fn id(&self) -> i64 {
        self.id
    }

    fn get(&self, name: &str) -> Option<Value> {
        self.attributes.get(name).cloned()
    }
}
