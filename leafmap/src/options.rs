//! Map construction options.

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value};

use crate::error::MapError;
use crate::geo::LatLon;

/// Options a map is constructed with.
///
/// Keys other than `center`, `zoom` and `height` are collected into [`MapOptions::extra`] and
/// forwarded to the host map unchanged.
///
/// ```json
/// {"center": [48.2, 16.37], "zoom": 11, "height": "600px", "maxZoom": 18}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapOptions {
    /// Initial center of the view.
    pub center: LatLon,
    /// Initial zoom level.
    pub zoom: f64,
    /// CSS height of the map element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    /// Options passed through to the host map.
    #[serde(flatten)]
    pub extra: JsonMap<String, Value>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self::new(LatLon::new(0.0, 0.0), 2.0)
    }
}

impl MapOptions {
    /// Creates options with the given view and no passthrough options.
    pub fn new(center: LatLon, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            height: None,
            extra: JsonMap::new(),
        }
    }

    /// Parses options from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, MapError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Removes a passthrough option and returns it.
    pub(crate) fn take_extra(&mut self, key: &str) -> Option<Value> {
        self.extra.remove(key)
    }
}

/// Reads the option selecting the tile layer a map starts with.
///
/// A missing option or `true` selects `default`, a string selects that name and `false` or
/// `null` starts without tiles. Any other value is rejected.
pub(crate) fn start_layer(
    key: &str,
    option: Option<Value>,
    default: &str,
) -> Result<Option<String>, MapError> {
    match option {
        None | Some(Value::Bool(true)) => Ok(Some(default.to_string())),
        Some(Value::Bool(false) | Value::Null) => Ok(None),
        Some(Value::String(name)) => Ok(Some(name)),
        Some(other) => Err(MapError::invalid_argument(format!(
            "option '{key}' must be a basemap name, true, false or null, got {other}"
        ))),
    }
}
