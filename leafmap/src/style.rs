//! Vector layer styling.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Leaflet path options applied to a vector layer, e.g. `color` or `fillOpacity`.
///
/// A style is applied as a whole: setting a style on a layer replaces any previous or default
/// style instead of merging with it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style(BTreeMap<String, Value>);

impl Style {
    /// Creates an empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default style of vector layers added to an interactive map.
    pub fn default_vector() -> Self {
        Self::new().with("color", "blue").with("fillOpacity", 0.4)
    }

    /// Default hover style of vector layers added to an interactive map.
    pub fn default_hover() -> Self {
        Self::new().with("color", "red").with("fillOpacity", 0.7)
    }

    /// Sets a property and returns the style.
    pub fn with(mut self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(property, value);
        self
    }

    /// Sets a property.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(property.into(), value.into());
    }

    /// Returns a property value.
    pub fn get(&self, property: &str) -> Option<&Value> {
        self.0.get(property)
    }

    /// Number of properties set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no property is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over properties in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Style {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
