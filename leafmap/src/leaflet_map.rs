//! Interactive widget map with basemap, layer control and vector helpers.

use serde_json::Value;

use crate::basemap::{self, ProviderCatalog};
use crate::error::MapError;
use crate::geo::LatLon;
use crate::host::{MapHost, WidgetModel};
use crate::layer::{Control, ControlPosition, GeoJsonLayer};
use crate::options::MapOptions;
use crate::style::Style;
use crate::vector::{self, VectorData, VectorOptions};

/// Interactive map widget.
///
/// Scroll-wheel zoom is enabled on construction.
///
/// ```no_run
/// use leafmap::{LeafletMap, VectorOptions};
///
/// let mut map = LeafletMap::builder().with_height("600px").build()?;
/// map.add_basemap("CartoDB Positron")?;
/// map.add_vector("rivers.shp", VectorOptions::default().with_name("Rivers"), None, None)?;
/// map.add_layer_control();
/// println!("{}", map.to_state()?);
/// # Ok::<(), leafmap::MapError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LeafletMap<H = WidgetModel> {
    host: H,
}

impl LeafletMap<WidgetModel> {
    /// Creates a map with default options: centered on `(20, 0)` at zoom level 2, 400 pixels high.
    pub fn new() -> Result<Self, MapError> {
        Self::builder().build()
    }

    /// Returns a builder for the map.
    pub fn builder() -> LeafletMapBuilder {
        LeafletMapBuilder::default()
    }

    /// JSON state of the widget.
    pub fn to_state(&self) -> Result<Value, MapError> {
        self.host.to_state()
    }
}

impl<H: MapHost> LeafletMap<H> {
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

    /// Adds a basemap by name.
    ///
    /// Accepted names are listed in [`basemap::BASEMAPS`]. An unknown name fails with
    /// [`MapError::InvalidArgument`] and no layer is added.
    pub fn add_basemap(&mut self, name: &str) -> Result<(), MapError> {
        let layer = basemap::basemap_layer(name)?;
        self.host.add_layer(layer.into());
        Ok(())
    }

    /// Adds a basemap from the provider catalog by dotted path, e.g. `CartoDB.Voyager`.
    ///
    /// The layer is named after the path. A path that does not lead to a provider fails with
    /// [`MapError::InvalidArgument`] listing the top-level catalog keys.
    pub fn add_provider_basemap(&mut self, path: &str) -> Result<(), MapError> {
        let layer = ProviderCatalog::builtin().tile_layer(path)?;
        self.host.add_layer(layer.into());
        Ok(())
    }

    /// Adds a layer control in the top right corner.
    pub fn add_layer_control(&mut self) {
        self.host.add_control(Control::Layers {
            position: ControlPosition::TopRight,
        });
    }

    /// Adds vector data as a styled GeoJSON layer.
    ///
    /// `style` defaults to [`Style::default_vector`] and `hover_style` to
    /// [`Style::default_hover`]. A given style replaces the default, it is not merged with it.
    pub fn add_vector(
        &mut self,
        data: impl Into<VectorData>,
        options: VectorOptions,
        style: Option<Style>,
        hover_style: Option<Style>,
    ) -> Result<(), MapError> {
        let features = vector::prepare(&mut self.host, data.into(), options.zoom_to_layer)?;
        let layer = GeoJsonLayer::new(options.name, features)
            .with_style(style.unwrap_or_else(Style::default_vector))
            .with_hover_style(hover_style.unwrap_or_else(Style::default_hover));
        self.host.add_layer(layer.into());
        Ok(())
    }
}

/// Builder of [`LeafletMap`].
#[derive(Debug, Clone)]
pub struct LeafletMapBuilder {
    options: MapOptions,
}

impl Default for LeafletMapBuilder {
    fn default() -> Self {
        Self {
            options: MapOptions::new(LatLon::new(20.0, 0.0), 2.0),
        }
    }
}

impl LeafletMapBuilder {
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

    /// Sets the CSS height of the widget.
    pub fn with_height(mut self, height: impl Into<String>) -> Self {
        self.options.height = Some(height.into());
        self
    }

    /// Sets a passthrough option of the widget.
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
    pub fn build(self) -> Result<LeafletMap, MapError> {
        let mut model = WidgetModel::new(self.options)?;
        model.set_scroll_wheel_zoom(true);
        Ok(LeafletMap::with_host(model))
    }
}
