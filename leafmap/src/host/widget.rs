//! Interactive map widget model.

use serde_json::{json, Map as JsonMap, Value};

use super::MapHost;
use crate::basemap::ProviderCatalog;
use crate::error::MapError;
use crate::geo::{LatLon, LatLonBounds};
use crate::layer::{Control, Layer};
use crate::options::{start_layer, MapOptions};

/// Height of the widget when none is given.
pub const DEFAULT_HEIGHT: &str = "400px";

/// Passthrough option selecting the initial basemap. `false` or `null` starts without a
/// basemap, a string selects a provider by dotted path.
const BASEMAP_OPTION: &str = "basemap";

const DEFAULT_PROVIDER: &str = "OpenStreetMap.Mapnik";

/// State of an interactive Leaflet widget.
///
/// The model tracks what the front end displays and can be exported with
/// [`WidgetModel::to_state`]. Passthrough options are merged into the exported state.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetModel {
    center: LatLon,
    zoom: f64,
    height: String,
    scroll_wheel_zoom: bool,
    options: JsonMap<String, Value>,
    layers: Vec<Layer>,
    controls: Vec<Control>,
    bounds: Option<LatLonBounds>,
}

impl WidgetModel {
    /// Creates a widget model. Unless disabled by the `basemap` option, the widget starts with
    /// the OpenStreetMap basemap.
    pub fn new(mut options: MapOptions) -> Result<Self, MapError> {
        if !options.center.is_finite() || !options.zoom.is_finite() {
            return Err(MapError::Host(format!(
                "map center {:?} and zoom {} must be finite",
                options.center, options.zoom
            )));
        }

        let basemap = start_layer(
            BASEMAP_OPTION,
            options.take_extra(BASEMAP_OPTION),
            DEFAULT_PROVIDER,
        )?;
        let mut model = Self {
            center: options.center,
            zoom: options.zoom,
            height: options
                .height
                .unwrap_or_else(|| DEFAULT_HEIGHT.to_string()),
            scroll_wheel_zoom: false,
            options: options.extra,
            layers: vec![],
            controls: vec![],
            bounds: None,
        };

        if let Some(path) = basemap {
            model.add_layer(ProviderCatalog::builtin().tile_layer(&path)?.into());
        }

        Ok(model)
    }

    /// Current view center.
    pub fn center(&self) -> LatLon {
        self.center
    }

    /// Current zoom level.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// CSS height of the widget.
    pub fn height(&self) -> &str {
        &self.height
    }

    /// Sets the CSS height of the widget.
    pub fn set_height(&mut self, height: impl Into<String>) {
        self.height = height.into();
    }

    /// Whether the mouse wheel zooms the map.
    pub fn scroll_wheel_zoom(&self) -> bool {
        self.scroll_wheel_zoom
    }

    /// Enables or disables zooming with the mouse wheel.
    pub fn set_scroll_wheel_zoom(&mut self, enabled: bool) {
        self.scroll_wheel_zoom = enabled;
    }

    /// Passthrough options of the widget.
    pub fn options(&self) -> &JsonMap<String, Value> {
        &self.options
    }

    /// JSON state of the widget.
    pub fn to_state(&self) -> Result<Value, MapError> {
        let mut state = self.options.clone();
        state.insert("_model_name".into(), json!("LeafletMapModel"));
        state.insert("center".into(), serde_json::to_value(self.center)?);
        state.insert("zoom".into(), json!(self.zoom));
        state.insert("scroll_wheel_zoom".into(), json!(self.scroll_wheel_zoom));
        state.insert("layout".into(), json!({ "height": self.height }));
        state.insert("layers".into(), serde_json::to_value(&self.layers)?);
        state.insert("controls".into(), serde_json::to_value(&self.controls)?);
        if let Some(bounds) = self.bounds {
            state.insert("bounds".into(), serde_json::to_value(bounds)?);
        }

        Ok(Value::Object(state))
    }
}

impl MapHost for WidgetModel {
    fn add_layer(&mut self, layer: Layer) {
        log::debug!("Adding layer {:?} to widget", layer.name());
        self.layers.push(layer);
    }

    fn add_control(&mut self, control: Control) {
        log::debug!("Adding control {control:?} to widget");
        self.controls.push(control);
    }

    /// Centers the view on the bounds. The zoom level is chosen by the front end, which knows
    /// the widget size.
    fn fit_bounds(&mut self, bounds: LatLonBounds) {
        self.center = LatLon::new(
            (bounds.south_west.lat + bounds.north_east.lat) / 2.0,
            (bounds.south_west.lon + bounds.north_east.lon) / 2.0,
        );
        self.bounds = Some(bounds);
    }

    fn layers(&self) -> &[Layer] {
        &self.layers
    }

    fn controls(&self) -> &[Control] {
        &self.controls
    }

    fn view_bounds(&self) -> Option<LatLonBounds> {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::layer::ControlPosition;

    #[test]
    fn defaults() {
        let model = WidgetModel::new(MapOptions::default()).unwrap();
        assert_eq!(model.height(), DEFAULT_HEIGHT);
        assert!(!model.scroll_wheel_zoom());
        assert_eq!(model.layers().len(), 1);
        assert_eq!(model.layers()[0].name(), Some(DEFAULT_PROVIDER));
    }

    #[test]
    fn basemap_option_selects_provider() {
        let mut options = MapOptions::default();
        options
            .extra
            .insert(BASEMAP_OPTION.into(), json!("Esri.WorldTopoMap"));
        let model = WidgetModel::new(options).unwrap();
        assert_eq!(model.layers()[0].name(), Some("Esri.WorldTopoMap"));
    }

    #[test]
    fn unknown_basemap_option_fails() {
        let mut options = MapOptions::default();
        options
            .extra
            .insert(BASEMAP_OPTION.into(), json!("Nowhere.Tiles"));
        assert!(matches!(
            WidgetModel::new(options),
            Err(MapError::InvalidArgument(_))
        ));
    }

    #[test]
    fn non_name_basemap_option_fails() {
        let mut options = MapOptions::default();
        options.extra.insert(BASEMAP_OPTION.into(), json!(5));
        assert!(matches!(
            WidgetModel::new(options),
            Err(MapError::InvalidArgument(_))
        ));
    }

    #[test]
    fn fit_bounds_recenters() {
        let mut model = WidgetModel::new(MapOptions::default()).unwrap();
        model.fit_bounds(LatLonBounds::new(
            LatLon::new(40.0, -10.0),
            LatLon::new(50.0, 10.0),
        ));
        assert_relative_eq!(model.center().lat, 45.0);
        assert_relative_eq!(model.center().lon, 0.0);
        assert_eq!(model.zoom(), 2.0);
    }

    #[test]
    fn state_contains_passthrough_options() {
        let mut options = MapOptions::new(LatLon::new(20.0, 0.0), 3.0);
        options.extra.insert("basemap".into(), json!(false));
        options.extra.insert("zoom_control".into(), json!(false));
        let mut model = WidgetModel::new(options).unwrap();
        model.set_scroll_wheel_zoom(true);
        model.add_control(Control::Layers {
            position: ControlPosition::TopRight,
        });

        let state = model.to_state().unwrap();
        assert_eq!(state["zoom_control"], json!(false));
        assert_eq!(state["center"], json!([20.0, 0.0]));
        assert_eq!(state["scroll_wheel_zoom"], json!(true));
        assert_eq!(state["layout"]["height"], json!("400px"));
        assert_eq!(state["layers"], json!([]));
        assert_eq!(
            state["controls"],
            json!([{"type": "layers", "position": "topright"}])
        );
        assert!(state.get("bounds").is_none());
    }
}
