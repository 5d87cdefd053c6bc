//! Reading vector files into a [`FeatureTable`].

use std::collections::HashMap;
use std::path::Path;

use geo_types::{Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use geojson::{GeoJson, JsonObject, JsonValue};
use shapefile::dbase::{Date, FieldValue};
use shapefile::{PolygonRing, Shape};

use super::FeatureTable;
use crate::error::MapError;

/// Reads a vector file. The format is chosen by the file extension:
///
/// * `geojson`, `json`: GeoJSON,
/// * `shp`: ESRI Shapefile, attributes are read from the `dbf` file next to it.
pub fn read_file(path: impl AsRef<Path>) -> Result<FeatureTable, MapError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let table = match extension.as_str() {
        "geojson" | "json" => read_geojson(path)?,
        "shp" => read_shapefile(path)?,
        _ => return Err(MapError::UnsupportedFormat(path.display().to_string())),
    };

    log::info!("Loaded {} features from {}", table.len(), path.display());
    Ok(table)
}

fn read_geojson(path: &Path) -> Result<FeatureTable, MapError> {
    let geojson: GeoJson = std::fs::read_to_string(path)?.parse()?;
    FeatureTable::from_geojson(geojson)
}

fn read_shapefile(path: &Path) -> Result<FeatureTable, MapError> {
    let mut table = FeatureTable::new();
    for (shape, record) in shapefile::read(path)? {
        let fields: HashMap<String, FieldValue> = record.into();
        let properties = fields
            .into_iter()
            .map(|(name, value)| (name, field_to_json(value)))
            .collect::<JsonObject>();
        table.push(shape_to_geometry(shape), properties);
    }

    Ok(table)
}

fn field_to_json(value: FieldValue) -> JsonValue {
    match value {
        FieldValue::Character(Some(s)) => JsonValue::String(s.trim().to_string()),
        FieldValue::Memo(s) => JsonValue::String(s),
        FieldValue::Numeric(Some(n)) => JsonValue::from(n),
        FieldValue::Float(Some(n)) => JsonValue::from(f64::from(n)),
        FieldValue::Double(n) | FieldValue::Currency(n) => JsonValue::from(n),
        FieldValue::Integer(n) => JsonValue::from(n),
        FieldValue::Logical(Some(b)) => JsonValue::Bool(b),
        FieldValue::Date(Some(date)) => JsonValue::String(iso_date(&date)),
        FieldValue::DateTime(datetime) => {
            let time = datetime.time();
            JsonValue::String(format!(
                "{}T{:02}:{:02}:{:02}",
                iso_date(&datetime.date()),
                time.hours(),
                time.minutes(),
                time.seconds()
            ))
        }
        // Empty values.
        _ => JsonValue::Null,
    }
}

fn iso_date(date: &Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

fn shape_to_geometry(shape: Shape) -> Option<Geometry<f64>> {
    match shape {
        Shape::NullShape => None,
        Shape::Point(p) => Some(Point::new(p.x, p.y).into()),
        Shape::PointM(p) => Some(Point::new(p.x, p.y).into()),
        Shape::PointZ(p) => Some(Point::new(p.x, p.y).into()),
        Shape::Multipoint(mp) => Some(multi_point(mp.points().iter().map(|p| (p.x, p.y)))),
        Shape::MultipointM(mp) => Some(multi_point(mp.points().iter().map(|p| (p.x, p.y)))),
        Shape::MultipointZ(mp) => Some(multi_point(mp.points().iter().map(|p| (p.x, p.y)))),
        Shape::Polyline(pl) => Some(lines(pl.parts().iter().map(|part| {
            part.iter().map(|p| (p.x, p.y)).collect()
        }))),
        Shape::PolylineM(pl) => Some(lines(pl.parts().iter().map(|part| {
            part.iter().map(|p| (p.x, p.y)).collect()
        }))),
        Shape::PolylineZ(pl) => Some(lines(pl.parts().iter().map(|part| {
            part.iter().map(|p| (p.x, p.y)).collect()
        }))),
        Shape::Polygon(poly) => polygons(
            poly.rings()
                .iter()
                .map(|ring| ring_coords(ring, |p| (p.x, p.y))),
        ),
        Shape::PolygonM(poly) => polygons(
            poly.rings()
                .iter()
                .map(|ring| ring_coords(ring, |p| (p.x, p.y))),
        ),
        Shape::PolygonZ(poly) => polygons(
            poly.rings()
                .iter()
                .map(|ring| ring_coords(ring, |p| (p.x, p.y))),
        ),
        Shape::Multipatch(_) => {
            log::warn!("Multipatch shapes are not supported and are loaded without geometry");
            None
        }
    }
}

fn multi_point(points: impl Iterator<Item = (f64, f64)>) -> Geometry<f64> {
    MultiPoint::from(points.map(Point::from).collect::<Vec<_>>()).into()
}

fn lines(parts: impl Iterator<Item = Vec<(f64, f64)>>) -> Geometry<f64> {
    let mut lines: Vec<LineString<f64>> = parts.map(LineString::from).collect();
    if lines.len() == 1 {
        lines.remove(0).into()
    } else {
        MultiLineString::new(lines).into()
    }
}

/// Ring of a shapefile polygon, tagged by whether it is an outer ring.
struct Ring {
    outer: bool,
    coords: Vec<(f64, f64)>,
}

fn ring_coords<P>(ring: &PolygonRing<P>, xy: impl Fn(&P) -> (f64, f64)) -> Ring {
    Ring {
        outer: matches!(ring, PolygonRing::Outer(_)),
        coords: ring.points().iter().map(xy).collect(),
    }
}

/// Shapefile polygons list each outer ring followed by its holes.
fn polygons(rings: impl Iterator<Item = Ring>) -> Option<Geometry<f64>> {
    let mut polygons: Vec<Polygon<f64>> = vec![];
    for ring in rings {
        let line = LineString::from(ring.coords);
        if ring.outer {
            polygons.push(Polygon::new(line, vec![]));
        } else if let Some(last) = polygons.last_mut() {
            last.interiors_push(line);
        } else {
            log::warn!("Inner polygon ring without an outer ring is skipped");
        }
    }

    match polygons.len() {
        0 => None,
        1 => polygons.pop().map(Geometry::Polygon),
        _ => Some(MultiPolygon::new(polygons).into()),
    }
}
