//! Geographic coordinates and bounding boxes.
//!
//! Geometry is stored in `[lon, lat]` order (x, y) while Leaflet expects `[lat, lon]` pairs for the
//! map center and for bound fitting. [`BoundingBox`] is in storage order, [`LatLon`] and
//! [`LatLonBounds`] are in Leaflet order.

use geo_types::{Coord, Geometry, Polygon};
use serde::{Deserialize, Serialize};

/// Geographic point in Leaflet order. Serialized as `[lat, lon]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLon {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl LatLon {
    /// Creates a new point.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns true if both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl From<[f64; 2]> for LatLon {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Self { lat, lon }
    }
}

impl From<LatLon> for [f64; 2] {
    fn from(value: LatLon) -> Self {
        [value.lat, value.lon]
    }
}

impl From<(f64, f64)> for LatLon {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

/// View bounds given by the south-west and north-east corners. Serialized as
/// `[[south, west], [north, east]]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[[f64; 2]; 2]", into = "[[f64; 2]; 2]")]
pub struct LatLonBounds {
    /// South-west corner.
    pub south_west: LatLon,
    /// North-east corner.
    pub north_east: LatLon,
}

impl LatLonBounds {
    /// Creates bounds from two corners.
    pub const fn new(south_west: LatLon, north_east: LatLon) -> Self {
        Self {
            south_west,
            north_east,
        }
    }
}

impl From<[[f64; 2]; 2]> for LatLonBounds {
    fn from([sw, ne]: [[f64; 2]; 2]) -> Self {
        Self::new(sw.into(), ne.into())
    }
}

impl From<LatLonBounds> for [[f64; 2]; 2] {
    fn from(value: LatLonBounds) -> Self {
        [value.south_west.into(), value.north_east.into()]
    }
}

/// Axis-aligned rectangle `(min_x, min_y, max_x, max_y)` in geometry storage order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum x (west).
    pub min_x: f64,
    /// Minimum y (south).
    pub min_y: f64,
    /// Maximum x (east).
    pub max_x: f64,
    /// Maximum y (north).
    pub max_y: f64,
}

impl BoundingBox {
    /// Creates a bounding box from its edges.
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Degenerate box containing a single coordinate.
    pub fn from_coord(coord: Coord<f64>) -> Self {
        Self::new(coord.x, coord.y, coord.x, coord.y)
    }

    /// Bounding box of a geometry, or `None` if the geometry has no coordinates.
    pub fn of_geometry(geometry: &Geometry<f64>) -> Option<Self> {
        let mut bbox: Option<Self> = None;
        visit_coords(geometry, &mut |coord| match bbox.as_mut() {
            Some(b) => b.include(coord),
            None => bbox = Some(Self::from_coord(coord)),
        });
        bbox
    }

    /// Grows the box to contain the coordinate.
    pub fn include(&mut self, coord: Coord<f64>) {
        self.min_x = self.min_x.min(coord.x);
        self.min_y = self.min_y.min(coord.y);
        self.max_x = self.max_x.max(coord.x);
        self.max_y = self.max_y.max(coord.y);
    }

    /// Smallest box containing both boxes.
    pub fn merge(&self, other: &Self) -> Self {
        Self::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// The box as `[min_x, min_y, max_x, max_y]`, the GeoJSON `bbox` layout.
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }

    /// Converts to Leaflet bounds `[[min_y, min_x], [max_y, max_x]]`.
    pub fn to_lat_lon_bounds(&self) -> LatLonBounds {
        LatLonBounds::new(
            LatLon::new(self.min_y, self.min_x),
            LatLon::new(self.max_y, self.max_x),
        )
    }
}

fn visit_coords(geometry: &Geometry<f64>, f: &mut impl FnMut(Coord<f64>)) {
    match geometry {
        Geometry::Point(p) => f(p.0),
        Geometry::Line(l) => {
            f(l.start);
            f(l.end);
        }
        Geometry::LineString(ls) => ls.0.iter().copied().for_each(f),
        Geometry::Polygon(poly) => visit_polygon(poly, f),
        Geometry::MultiPoint(mp) => mp.0.iter().for_each(|p| f(p.0)),
        Geometry::MultiLineString(mls) => {
            for ls in &mls.0 {
                ls.0.iter().copied().for_each(&mut *f);
            }
        }
        Geometry::MultiPolygon(mp) => {
            for poly in &mp.0 {
                visit_polygon(poly, f);
            }
        }
        Geometry::GeometryCollection(gc) => {
            for g in &gc.0 {
                visit_coords(g, f);
            }
        }
        Geometry::Rect(rect) => {
            f(rect.min());
            f(rect.max());
        }
        Geometry::Triangle(t) => t.to_array().into_iter().for_each(f),
    }
}

fn visit_polygon(polygon: &Polygon<f64>, f: &mut impl FnMut(Coord<f64>)) {
    for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
        ring.0.iter().copied().for_each(&mut *f);
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use geo_types::{line_string, point, polygon, GeometryCollection};

    use super::*;

    #[test]
    fn bbox_of_polygon_with_hole() {
        let poly = polygon!(
            exterior: [(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 5.0), (x: 0.0, y: 0.0)],
            interiors: [[(x: 2.0, y: 1.0), (x: 3.0, y: 1.0), (x: 3.0, y: 2.0), (x: 2.0, y: 1.0)]],
        );
        let bbox = BoundingBox::of_geometry(&Geometry::Polygon(poly)).expect("has coords");
        assert_eq!(bbox, BoundingBox::new(0.0, 0.0, 10.0, 5.0));
    }

    #[test]
    fn bbox_of_collection() {
        let collection = GeometryCollection::new_from(vec![
            Geometry::Point(point!(x: -3.5, y: 40.0)),
            Geometry::LineString(line_string![(x: 2.0, y: 41.0), (x: 2.5, y: 48.9)]),
        ]);
        let bbox = BoundingBox::of_geometry(&Geometry::GeometryCollection(collection))
            .expect("has coords");
        assert_abs_diff_eq!(bbox.min_x, -3.5);
        assert_abs_diff_eq!(bbox.min_y, 40.0);
        assert_abs_diff_eq!(bbox.max_x, 2.5);
        assert_abs_diff_eq!(bbox.max_y, 48.9);
    }

    #[test]
    fn empty_geometry_has_no_bbox() {
        let empty = Geometry::GeometryCollection(GeometryCollection::new_from(vec![]));
        assert!(BoundingBox::of_geometry(&empty).is_none());
    }

    #[test]
    fn lat_lon_bounds_swap_axis_order() {
        let bounds = BoundingBox::new(-10.0, 35.0, 5.0, 44.0).to_lat_lon_bounds();
        let serialized = serde_json::to_value(bounds).expect("serializable");
        assert_eq!(serialized, serde_json::json!([[35.0, -10.0], [44.0, 5.0]]));
    }
}
