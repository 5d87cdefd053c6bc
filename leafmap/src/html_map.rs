//! Static HTML map with vector helpers.

use std::path::Path;

use serde_json::Value;

use crate::error::MapError;
use crate::geo::LatLon;
use crate::host::{HtmlDocument, MapHost};
use crate::layer::{Control, ControlPosition, GeoJsonLayer};
use crate::options::MapOptions;
use crate::vector::{self, VectorData, VectorOptions};

/// Map rendered to a standalone HTML page, with helpers to add vector data and a layer control.
///
/// ```no_run
/// use leafmap::{HtmlMap, VectorOptions};
///
/// let mut map = HtmlMap::builder().with_latlon(46.8, 8.2).with_zoom(7.0).build()?;
/// map.add_vector("cantons.geojson", VectorOptions::default().with_name("Cantons"))?;
/// map.add_layer_control();
/// map.save("cantons.html")?;
/// # Ok::<(), leafmap::MapError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HtmlMap<H = HtmlDocument> {
    host: H,
}

impl HtmlMap<HtmlDocument> {
    /// Creates a map with default options: centered on `(0, 0)` at zoom level 2.
    pub fn new() -> Result<Self, MapError> {
        Self::builder().build()
    }

    /// Returns a builder for the map.
    pub fn builder() -> HtmlMapBuilder {
        HtmlMapBuilder::default()
    }

    /// Renders the map to an HTML page.
    pub fn to_html(&self) -> Result<String, MapError> {
        self.host.render()
    }

    /// Writes the map page to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MapError> {
        self.host.save(path)
    }
}

impl<H: MapHost> HtmlMap<H> {
    /// Wraps an existing host.
    pub fn with_host(host: H) -> Self {
        Self { host }
    }

    /// The wrapped host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the wrapped host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Unwraps the host.
    pub fn into_host(self) -> H {
        self.host
    }

    /// Adds a control listing all layers of the map.
    pub fn add_layer_control(&mut self) {
        self.host.add_control(Control::Layers {
            position: ControlPosition::default(),
        });
    }

    /// Adds vector data as a GeoJSON layer.
    ///
    /// If `options.zoom_to_layer` is set, the view is fitted to the bounds of the data first.
    /// Nothing is changed if the data cannot be loaded.
    pub fn add_vector(
        &mut self,
        data: impl Into<VectorData>,
        options: VectorOptions,
    ) -> Result<(), MapError> {
        let features = vector::prepare(&mut self.host, data.into(), options.zoom_to_layer)?;
        self.host
            .add_layer(GeoJsonLayer::new(options.name, features).into());
        Ok(())
    }
}

/// Builder of [`HtmlMap`].
#[derive(Debug, Clone)]
pub struct HtmlMapBuilder {
    options: MapOptions,
}

impl Default for HtmlMapBuilder {
    fn default() -> Self {
        Self {
            options: MapOptions::new(LatLon::new(0.0, 0.0), 2.0),
        }
    }
}

impl HtmlMapBuilder {
    /// Sets the initial view center.
    pub fn with_latlon(mut self, lat: f64, lon: f64) -> Self {
        self.options.center = LatLon::new(lat, lon);
        self
    }

    /// Sets the initial zoom level.
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.options.zoom = zoom;
        self
    }

    /// Sets a passthrough option of the Leaflet map, e.g. `maxZoom`.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.extra.insert(key.into(), value.into());
        self
    }

    /// Replaces all options.
    pub fn with_options(mut self, options: MapOptions) -> Self {
        self.options = options;
        self
    }

    /// Creates the map.
    pub fn build(self) -> Result<HtmlMap, MapError> {
        Ok(HtmlMap::with_host(HtmlDocument::new(self.options)?))
    }
}
