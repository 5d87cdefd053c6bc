//! Layers and controls that can be added to a map host.

use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};

use crate::style::Style;

/// A layer displayed by the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Layer {
    /// Raster tiles fetched from a URL template.
    Tile(TileLayer),
    /// Vector features rendered from GeoJSON.
    GeoJson(GeoJsonLayer),
}

impl Layer {
    /// Name shown in layer controls, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Layer::Tile(tile) => tile.name.as_deref(),
            Layer::GeoJson(geojson) => Some(&geojson.name),
        }
    }

    /// Returns the tile layer if this is one.
    pub fn as_tile(&self) -> Option<&TileLayer> {
        match self {
            Layer::Tile(tile) => Some(tile),
            Layer::GeoJson(_) => None,
        }
    }

    /// Returns the GeoJSON layer if this is one.
    pub fn as_geojson(&self) -> Option<&GeoJsonLayer> {
        match self {
            Layer::GeoJson(geojson) => Some(geojson),
            Layer::Tile(_) => None,
        }
    }
}

impl From<TileLayer> for Layer {
    fn from(value: TileLayer) -> Self {
        Self::Tile(value)
    }
}

impl From<GeoJsonLayer> for Layer {
    fn from(value: GeoJsonLayer) -> Self {
        Self::GeoJson(value)
    }
}

/// Raster tile layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayer {
    /// URL template with `{z}`, `{x}` and `{y}` placeholders.
    pub url: String,
    /// Attribution text (may contain HTML).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    /// Layer name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Maximum zoom level served by the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<u8>,
}

impl TileLayer {
    /// Creates an unnamed tile layer without attribution.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            attribution: None,
            name: None,
            max_zoom: None,
        }
    }

    /// Sets the attribution.
    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = Some(attribution.into());
        self
    }

    /// Sets the layer name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the maximum zoom level.
    pub fn with_max_zoom(mut self, max_zoom: u8) -> Self {
        self.max_zoom = Some(max_zoom);
        self
    }
}

/// Vector layer rendered from a feature collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoJsonLayer {
    /// Layer name.
    pub name: String,
    /// Features of the layer.
    pub data: FeatureCollection,
    /// Style of the features.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    /// Style of a feature under the pointer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_style: Option<Style>,
}

impl GeoJsonLayer {
    /// Creates an unstyled layer.
    pub fn new(name: impl Into<String>, data: FeatureCollection) -> Self {
        Self {
            name: name.into(),
            data,
            style: None,
            hover_style: None,
        }
    }

    /// Sets the style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// Sets the hover style.
    pub fn with_hover_style(mut self, hover_style: Style) -> Self {
        self.hover_style = Some(hover_style);
        self
    }

    /// Number of features in the layer.
    pub fn feature_count(&self) -> usize {
        self.data.features.len()
    }
}

/// Corner of the map a control is attached to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPosition {
    /// Top left corner.
    TopLeft,
    /// Top right corner.
    #[default]
    TopRight,
    /// Bottom left corner.
    BottomLeft,
    /// Bottom right corner.
    BottomRight,
}

impl ControlPosition {
    /// Leaflet name of the position.
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlPosition::TopLeft => "topleft",
            ControlPosition::TopRight => "topright",
            ControlPosition::BottomLeft => "bottomleft",
            ControlPosition::BottomRight => "bottomright",
        }
    }
}

/// UI control attached to the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Control {
    /// Lists the map layers and lets the user toggle them.
    Layers {
        /// Corner the control is attached to.
        position: ControlPosition,
    },
}
