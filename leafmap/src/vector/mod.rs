//! Vector data inputs accepted by the `add_vector` helpers.

use std::path::{Path, PathBuf};

use geojson::{FeatureCollection, JsonValue};

use crate::error::MapError;
use crate::host::MapHost;

pub mod io;
mod table;

pub use table::{FeatureRow, FeatureTable};

const INVALID_VECTOR_DATA: &str =
    "vector data must be a file path, a feature table or a GeoJSON-like mapping with a \"features\" key";

/// Name given to vector layers by default.
pub const DEFAULT_LAYER_NAME: &str = "Vector Layer";

/// Vector data to be added to a map.
#[derive(Debug, Clone, PartialEq)]
pub enum VectorData {
    /// Path to a vector file, see [`io::read_file`] for supported formats.
    Path(PathBuf),
    /// Table already in memory.
    Table(FeatureTable),
    /// GeoJSON-like mapping with a `"features"` array.
    GeoJson(JsonValue),
}

impl VectorData {
    /// Converts the input into a feature table.
    ///
    /// A `GeoJson` value that is not an object with a `"features"` array is rejected with
    /// [`MapError::InvalidArgument`]. File and parsing errors are returned as is.
    pub fn into_table(self) -> Result<FeatureTable, MapError> {
        match self {
            VectorData::Path(path) => io::read_file(path),
            VectorData::Table(table) => Ok(table),
            VectorData::GeoJson(value) => table_from_mapping(&value),
        }
    }
}

fn table_from_mapping(value: &JsonValue) -> Result<FeatureTable, MapError> {
    match value.get("features") {
        Some(JsonValue::Array(features)) => FeatureTable::from_features(features),
        _ => Err(MapError::invalid_argument(INVALID_VECTOR_DATA)),
    }
}

impl From<PathBuf> for VectorData {
    fn from(value: PathBuf) -> Self {
        Self::Path(value)
    }
}

impl From<&Path> for VectorData {
    fn from(value: &Path) -> Self {
        Self::Path(value.to_path_buf())
    }
}

impl From<&str> for VectorData {
    fn from(value: &str) -> Self {
        Self::Path(value.into())
    }
}

impl From<String> for VectorData {
    fn from(value: String) -> Self {
        Self::Path(value.into())
    }
}

impl From<FeatureTable> for VectorData {
    fn from(value: FeatureTable) -> Self {
        Self::Table(value)
    }
}

impl TryFrom<JsonValue> for VectorData {
    type Error = MapError;

    /// A JSON string is taken as a path, an object with a `"features"` key as a GeoJSON-like
    /// mapping. Anything else is rejected.
    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        let is_mapping = value
            .as_object()
            .is_some_and(|object| object.contains_key("features"));
        match value {
            JsonValue::String(path) => Ok(Self::Path(path.into())),
            value if is_mapping => Ok(Self::GeoJson(value)),
            _ => Err(MapError::invalid_argument(INVALID_VECTOR_DATA)),
        }
    }
}

/// Normalizes the data and fits the host view to it if requested. Returns the features to be
/// shown. The host is left untouched if the data cannot be loaded.
pub(crate) fn prepare(
    host: &mut impl MapHost,
    data: VectorData,
    zoom_to_layer: bool,
) -> Result<FeatureCollection, MapError> {
    let table = data.into_table()?;

    if zoom_to_layer {
        match table.total_bounds() {
            Some(bbox) => host.fit_bounds(bbox.to_lat_lon_bounds()),
            None => log::warn!("Vector data has no coordinates, view is not fitted"),
        }
    }

    Ok(table.geo_interface())
}

/// Options of a vector layer.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorOptions {
    /// Layer name, defaults to `"Vector Layer"`.
    pub name: String,
    /// Fit the map view to the layer bounds, defaults to `true`.
    pub zoom_to_layer: bool,
}

impl Default for VectorOptions {
    fn default() -> Self {
        Self {
            name: DEFAULT_LAYER_NAME.to_string(),
            zoom_to_layer: true,
        }
    }
}

impl VectorOptions {
    /// Sets the layer name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets whether the view is fitted to the layer.
    pub fn with_zoom_to_layer(mut self, zoom_to_layer: bool) -> Self {
        self.zoom_to_layer = zoom_to_layer;
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn integer_is_not_vector_data() {
        let result = VectorData::try_from(json!(42));
        assert!(matches!(result, Err(MapError::InvalidArgument(_))));
    }

    #[test]
    fn mapping_without_features_is_rejected() {
        let data = VectorData::GeoJson(json!({"type": "FeatureCollection"}));
        let Err(MapError::InvalidArgument(message)) = data.into_table() else {
            panic!("expected invalid argument");
        };
        assert!(message.contains("file path"));
        assert!(message.contains("feature table"));
        assert!(message.contains("GeoJSON-like mapping"));
    }

    #[test]
    fn features_must_be_an_array() {
        let data = VectorData::GeoJson(json!({"features": {"0": {}}}));
        assert!(matches!(
            data.into_table(),
            Err(MapError::InvalidArgument(_))
        ));
    }

    #[test]
    fn json_string_is_a_path() {
        let data = VectorData::try_from(json!("data/rivers.geojson")).unwrap();
        assert_eq!(data, VectorData::Path("data/rivers.geojson".into()));
    }

    #[test]
    fn mapping_is_normalized() {
        let data = VectorData::try_from(json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}, "properties": {}}
            ]
        }))
        .unwrap();
        assert_eq!(data.into_table().unwrap().len(), 1);
    }
}
