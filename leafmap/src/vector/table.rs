use geo_types::Geometry;
use geojson::{feature, Feature, FeatureCollection, GeoJson, JsonObject, JsonValue};

use crate::error::MapError;
use crate::geo::BoundingBox;

/// Row of a [`FeatureTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    /// Geometry of the row. Rows without geometry are allowed.
    pub geometry: Option<Geometry<f64>>,
    /// Attribute values of the row.
    pub properties: JsonObject,
}

impl FeatureRow {
    /// Creates a row.
    pub fn new(geometry: Option<Geometry<f64>>, properties: JsonObject) -> Self {
        Self {
            geometry,
            properties,
        }
    }

    /// Bounding box of the row geometry.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.geometry.as_ref().and_then(BoundingBox::of_geometry)
    }
}

/// In-memory table of geometries with attributes.
///
/// This is the common form every vector input is normalized into before it is added to a map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    rows: Vec<FeatureRow>,
}

impl FeatureTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row.
    pub fn push(&mut self, geometry: Option<Geometry<f64>>, properties: JsonObject) {
        self.rows.push(FeatureRow::new(geometry, properties));
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates over the rows.
    pub fn iter(&self) -> impl Iterator<Item = &FeatureRow> {
        self.rows.iter()
    }

    /// Builds a table from a list of GeoJSON-like feature objects.
    ///
    /// Every item must be an object. Its `geometry` member may be missing or `null`, its
    /// `properties` member may be missing or `null`; the `type` member is not checked.
    pub fn from_features(features: &[JsonValue]) -> Result<Self, MapError> {
        let mut table = Self::new();
        for (index, item) in features.iter().enumerate() {
            let Some(object) = item.as_object() else {
                return Err(MapError::invalid_argument(format!(
                    "feature at index {index} is not an object"
                )));
            };

            let geometry = match object.get("geometry") {
                None | Some(JsonValue::Null) => None,
                Some(value) => {
                    let geometry: geojson::Geometry = serde_json::from_value(value.clone())?;
                    Some(Geometry::<f64>::try_from(geometry)?)
                }
            };

            let properties = match object.get("properties") {
                None | Some(JsonValue::Null) => JsonObject::new(),
                Some(JsonValue::Object(properties)) => properties.clone(),
                Some(_) => {
                    return Err(MapError::invalid_argument(format!(
                        "properties of feature at index {index} is not an object"
                    )))
                }
            };

            table.push(geometry, properties);
        }

        Ok(table)
    }

    /// Builds a table from parsed GeoJSON. A bare geometry or feature becomes a single row.
    pub fn from_geojson(geojson: GeoJson) -> Result<Self, MapError> {
        let mut table = Self::new();
        match geojson {
            GeoJson::FeatureCollection(collection) => {
                for feature in collection.features {
                    table.push_feature(feature)?;
                }
            }
            GeoJson::Feature(feature) => table.push_feature(feature)?,
            GeoJson::Geometry(geometry) => {
                table.push(Some(Geometry::try_from(geometry)?), JsonObject::new())
            }
        }

        Ok(table)
    }

    fn push_feature(&mut self, feature: Feature) -> Result<(), MapError> {
        let geometry = feature.geometry.map(Geometry::try_from).transpose()?;
        self.push(geometry, feature.properties.unwrap_or_default());
        Ok(())
    }

    /// Total bounds `(min_x, min_y, max_x, max_y)` of all geometries, or `None` if the table
    /// contains no coordinates.
    pub fn total_bounds(&self) -> Option<BoundingBox> {
        self.rows
            .iter()
            .filter_map(FeatureRow::bounds)
            .reduce(|acc, bbox| acc.merge(&bbox))
    }

    /// Feature collection representation of the table.
    ///
    /// Features are identified by their row index as a string and carry their own bounding box;
    /// the collection carries the total bounds.
    pub fn geo_interface(&self) -> FeatureCollection {
        let features = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| Feature {
                bbox: row.bounds().map(|b| b.to_array().to_vec()),
                geometry: row
                    .geometry
                    .as_ref()
                    .map(|g| geojson::Geometry::new(geojson::Value::from(g))),
                id: Some(feature::Id::String(index.to_string())),
                properties: Some(row.properties.clone()),
                foreign_members: None,
            })
            .collect();

        FeatureCollection {
            bbox: self.total_bounds().map(|b| b.to_array().to_vec()),
            features,
            foreign_members: None,
        }
    }
}

impl FromIterator<FeatureRow> for FeatureTable {
    fn from_iter<T: IntoIterator<Item = FeatureRow>>(iter: T) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Geometry<f64>>> for FeatureTable {
    fn from(geometries: Vec<Geometry<f64>>) -> Self {
        geometries
            .into_iter()
            .map(|g| FeatureRow::new(Some(g), JsonObject::new()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use geo_types::point;
    use serde_json::json;

    use super::*;

    fn two_points() -> Vec<JsonValue> {
        vec![
            json!({
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [13.4, 52.5]},
                "properties": {"name": "Berlin"}
            }),
            json!({
                "geometry": {"type": "Point", "coordinates": [2.35, 48.85]},
                "properties": {"name": "Paris"}
            }),
        ]
    }

    #[test]
    fn from_features_keeps_properties() {
        let table = FeatureTable::from_features(&two_points()).unwrap();
        assert_eq!(table.len(), 2);
        let names: Vec<_> = table
            .iter()
            .map(|row| row.properties["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["Berlin", "Paris"]);
    }

    #[test]
    fn total_bounds_of_points() {
        let table = FeatureTable::from_features(&two_points()).unwrap();
        let bounds = table.total_bounds().unwrap();
        assert_relative_eq!(bounds.min_x, 2.35);
        assert_relative_eq!(bounds.min_y, 48.85);
        assert_relative_eq!(bounds.max_x, 13.4);
        assert_relative_eq!(bounds.max_y, 52.5);
    }

    #[test]
    fn rows_without_geometry_are_kept_but_not_bounded() {
        let features = vec![
            json!({"geometry": null, "properties": {"name": "nowhere"}}),
            json!({"geometry": {"type": "Point", "coordinates": [1.0, 2.0]}}),
        ];
        let table = FeatureTable::from_features(&features).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.total_bounds(),
            Some(BoundingBox::new(1.0, 2.0, 1.0, 2.0))
        );
    }

    #[test]
    fn empty_table_has_no_bounds() {
        assert!(FeatureTable::new().total_bounds().is_none());
    }

    #[test]
    fn non_object_feature_is_rejected() {
        let result = FeatureTable::from_features(&[json!("not a feature")]);
        assert!(matches!(result, Err(MapError::InvalidArgument(_))));
    }

    #[test]
    fn invalid_geometry_propagates_parse_error() {
        let result = FeatureTable::from_features(&[json!({"geometry": {"type": "Circle"}})]);
        assert!(matches!(result, Err(MapError::Json(_))));
    }

    #[test]
    fn geo_interface_numbers_features() {
        let table = FeatureTable::from(vec![
            Geometry::Point(point!(x: 1.0, y: 1.0)),
            Geometry::Point(point!(x: 3.0, y: 4.0)),
        ]);
        let collection = table.geo_interface();
        assert_eq!(collection.bbox, Some(vec![1.0, 1.0, 3.0, 4.0]));
        assert_eq!(
            collection.features[1].id,
            Some(feature::Id::String("1".to_string()))
        );
        assert_eq!(collection.features[1].bbox, Some(vec![3.0, 4.0, 3.0, 4.0]));
    }

    #[test]
    fn from_geojson_accepts_bare_geometry() {
        let geojson: GeoJson = r#"{"type": "LineString", "coordinates": [[0, 0], [5, 5]]}"#
            .parse()
            .unwrap();
        let table = FeatureTable::from_geojson(geojson).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.total_bounds(),
            Some(BoundingBox::new(0.0, 0.0, 5.0, 5.0))
        );
    }
}
