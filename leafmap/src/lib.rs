//! Leaflet map models with helpers to load vector data, choose basemaps and add layer controls.
//!
//! Two map types are provided:
//!
//! * [`HtmlMap`] renders to a standalone HTML page,
//! * [`LeafletMap`] models an interactive widget and exports its state as JSON.
//!
//! Both wrap a [`MapHost`] and add the same kind of helpers on top of it. Vector data can be
//! given as a file path, a [`FeatureTable`] or a GeoJSON-like mapping, see [`VectorData`].

pub mod basemap;
mod error;
pub mod geo;
pub mod host;
mod html_map;
pub mod layer;
mod leaflet_map;
mod options;
pub mod style;
pub mod vector;

pub use error::MapError;
pub use geo::{BoundingBox, LatLon, LatLonBounds};
pub use host::{HtmlDocument, MapHost, WidgetModel};
pub use html_map::{HtmlMap, HtmlMapBuilder};
pub use layer::{Control, ControlPosition, GeoJsonLayer, Layer, TileLayer};
pub use leaflet_map::{LeafletMap, LeafletMapBuilder};
pub use options::MapOptions;
pub use style::Style;
pub use vector::{FeatureTable, VectorData, VectorOptions};
