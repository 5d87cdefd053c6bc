//! Static HTML map document.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;
use serde_json::json;

use super::MapHost;
use crate::basemap::{self, DEFAULT_BASEMAP};
use crate::error::MapError;
use crate::geo::LatLonBounds;
use crate::layer::{Control, GeoJsonLayer, Layer, TileLayer};
use crate::options::{start_layer, MapOptions};

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

/// Passthrough option selecting the initial tile layer. `false` or `null` starts without tiles,
/// a string selects a basemap by name.
const TILES_OPTION: &str = "tiles";

/// Map that is rendered to a standalone Leaflet HTML page.
///
/// Passthrough options are written into the options object of `L.map`.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlDocument {
    options: MapOptions,
    layers: Vec<Layer>,
    controls: Vec<Control>,
    bounds: Option<LatLonBounds>,
}

impl HtmlDocument {
    /// Creates a document. Unless disabled by the `tiles` option, the document starts with an
    /// OpenStreetMap tile layer.
    pub fn new(mut options: MapOptions) -> Result<Self, MapError> {
        if !options.center.is_finite() || !options.zoom.is_finite() {
            return Err(MapError::Host(format!(
                "map center {:?} and zoom {} must be finite",
                options.center, options.zoom
            )));
        }

        let tiles = start_layer(
            TILES_OPTION,
            options.take_extra(TILES_OPTION),
            DEFAULT_BASEMAP,
        )?;
        let mut document = Self {
            options,
            layers: vec![],
            controls: vec![],
            bounds: None,
        };

        if let Some(name) = tiles {
            document.add_layer(basemap::basemap_layer(&name)?.into());
        }

        Ok(document)
    }

    /// Options the document was created with.
    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Renders the page.
    pub fn render(&self) -> Result<String, MapError> {
        let mut map_options = self.options.extra.clone();
        map_options.insert("center".into(), serde_json::to_value(self.options.center)?);
        map_options.insert("zoom".into(), json!(self.options.zoom));

        let height = self.options.height.as_deref().unwrap_or("100%");

        let mut script = format!("var map = L.map(\"map\", {});\n", script_json(&map_options)?);
        for (index, layer) in self.layers.iter().enumerate() {
            let statement = match layer {
                Layer::Tile(tile) => tile_layer_script(index, tile)?,
                Layer::GeoJson(geojson) => geojson_layer_script(index, geojson)?,
            };
            script.push_str(&statement);
        }
        for control in &self.controls {
            script.push_str(&self.control_script(control)?);
        }
        if let Some(bounds) = self.bounds {
            script.push_str(&format!("map.fitBounds({});\n", script_json(&bounds)?));
        }

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1.0" />
<link rel="stylesheet" href="{LEAFLET_CSS}" />
<script src="{LEAFLET_JS}"></script>
<style>
html, body {{ width: 100%; height: 100%; margin: 0; padding: 0; }}
#map {{ position: relative; width: 100%; height: {height}; }}
</style>
</head>
<body>
<div id="map"></div>
<script>
{script}</script>
</body>
</html>
"#
        ))
    }

    /// Renders the page and writes it to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MapError> {
        let path = path.as_ref();
        std::fs::write(path, self.render()?)?;
        log::info!("Saved map to {}", path.display());
        Ok(())
    }

    fn control_script(&self, control: &Control) -> Result<String, MapError> {
        let Control::Layers { position } = control;

        let mut base = vec![];
        let mut overlays = vec![];
        let mut seen: HashMap<String, usize> = HashMap::new();
        for (index, layer) in self.layers.iter().enumerate() {
            let name = match layer.name() {
                Some(name) => name.to_string(),
                None => layer_var(index),
            };
            // Control labels must be unique.
            let count = seen.entry(name.clone()).or_default();
            *count += 1;
            let label = if *count == 1 {
                name
            } else {
                log::warn!("Layer name {name:?} is used more than once, labelled as #{count}");
                format!("{name} ({count})")
            };
            let entry = format!("{}: {}", script_json(&label)?, layer_var(index));
            match layer {
                Layer::Tile(_) => base.push(entry),
                Layer::GeoJson(_) => overlays.push(entry),
            }
        }

        Ok(format!(
            "L.control.layers({{{}}}, {{{}}}, {}).addTo(map);\n",
            base.join(", "),
            overlays.join(", "),
            script_json(&json!({"position": position.as_str()}))?,
        ))
    }
}

impl MapHost for HtmlDocument {
    fn add_layer(&mut self, layer: Layer) {
        log::debug!("Adding layer {:?} to html document", layer.name());
        self.layers.push(layer);
    }

    fn add_control(&mut self, control: Control) {
        log::debug!("Adding control {control:?} to html document");
        self.controls.push(control);
    }

    fn fit_bounds(&mut self, bounds: LatLonBounds) {
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

fn layer_var(index: usize) -> String {
    format!("layer_{index}")
}

/// Serializes a value for embedding into a script element.
fn script_json(value: &impl Serialize) -> Result<String, MapError> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn tile_layer_script(index: usize, tile: &TileLayer) -> Result<String, MapError> {
    let mut options = serde_json::Map::new();
    if let Some(attribution) = &tile.attribution {
        options.insert("attribution".into(), json!(attribution));
    }
    if let Some(max_zoom) = tile.max_zoom {
        options.insert("maxZoom".into(), json!(max_zoom));
    }

    Ok(format!(
        "var {} = L.tileLayer({}, {}).addTo(map);\n",
        layer_var(index),
        script_json(&tile.url)?,
        script_json(&options)?,
    ))
}

fn geojson_layer_script(index: usize, layer: &GeoJsonLayer) -> Result<String, MapError> {
    let var = layer_var(index);
    let mut options = vec![];
    if let Some(style) = &layer.style {
        options.push(format!(
            "style: function(feature) {{ return {}; }}",
            script_json(style)?
        ));
    }
    if let Some(hover_style) = &layer.hover_style {
        options.push(format!(
            "onEachFeature: function(feature, featureLayer) {{ featureLayer.on({{ \
             mouseover: function(e) {{ e.target.setStyle({}); }}, \
             mouseout: function(e) {{ {var}.resetStyle(e.target); }} }}); }}",
            script_json(hover_style)?
        ));
    }

    Ok(format!(
        "var {var} = L.geoJson({}, {{{}}}).addTo(map);\n",
        script_json(&layer.data)?,
        options.join(", "),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::LatLon;
    use crate::layer::ControlPosition;
    use crate::style::Style;
    use crate::vector::FeatureTable;

    fn bare_document() -> HtmlDocument {
        let mut options = MapOptions::default();
        options.extra.insert(TILES_OPTION.into(), json!(false));
        HtmlDocument::new(options).unwrap()
    }

    #[test]
    fn starts_with_openstreetmap() {
        let document = HtmlDocument::new(MapOptions::default()).unwrap();
        assert_eq!(document.layers().len(), 1);
        assert_eq!(document.layers()[0].name(), Some("OpenStreetMap"));
        assert!(!document.options().extra.contains_key(TILES_OPTION));
    }

    #[test]
    fn tiles_option_selects_basemap() {
        let mut options = MapOptions::default();
        options
            .extra
            .insert(TILES_OPTION.into(), json!("CartoDB Positron"));
        let document = HtmlDocument::new(options).unwrap();
        assert_eq!(document.layers()[0].name(), Some("CartoDB Positron"));
    }

    #[test]
    fn tiles_can_be_disabled() {
        assert!(bare_document().layers().is_empty());
    }

    #[test]
    fn tiles_option_must_name_a_basemap() {
        let mut options = MapOptions::default();
        options.extra.insert(TILES_OPTION.into(), json!(5));
        assert!(matches!(
            HtmlDocument::new(options),
            Err(MapError::InvalidArgument(_))
        ));

        let mut options = MapOptions::default();
        options.extra.insert(TILES_OPTION.into(), json!(true));
        let document = HtmlDocument::new(options).unwrap();
        assert_eq!(document.layers()[0].name(), Some(DEFAULT_BASEMAP));
    }

    #[test]
    fn rejects_non_finite_view() {
        let options = MapOptions::new(LatLon::new(f64::NAN, 0.0), 2.0);
        assert!(matches!(HtmlDocument::new(options), Err(MapError::Host(_))));
    }

    #[test]
    fn renders_passthrough_options_and_view() {
        let mut options = MapOptions::new(LatLon::new(51.5, -0.12), 9.0);
        options.extra.insert("maxZoom".into(), json!(15));
        let document = HtmlDocument::new(options).unwrap();
        let html = document.render().unwrap();

        assert!(html.contains(r#""center":[51.5,-0.12]"#));
        assert!(html.contains(r#""maxZoom":15"#));
        assert!(html.contains("L.tileLayer(\"https://tile.openstreetmap.org/{z}/{x}/{y}.png\""));
    }

    #[test]
    fn renders_layer_control_with_overlays() {
        let mut document = HtmlDocument::new(MapOptions::default()).unwrap();
        document.add_layer(GeoJsonLayer::new("Rivers", FeatureTable::new().geo_interface()).into());
        document.add_control(Control::Layers {
            position: ControlPosition::TopRight,
        });
        let html = document.render().unwrap();

        assert!(html.contains(
            r#"L.control.layers({"OpenStreetMap": layer_0}, {"Rivers": layer_1}, {"position":"topright"})"#
        ));
    }

    #[test]
    fn layer_control_labels_repeated_names() {
        let mut document = bare_document();
        for _ in 0..3 {
            document.add_layer(
                GeoJsonLayer::new("Vector Layer", FeatureTable::new().geo_interface()).into(),
            );
        }
        document.add_control(Control::Layers {
            position: ControlPosition::TopRight,
        });
        let html = document.render().unwrap();

        assert!(html.contains(
            r#"L.control.layers({}, {"Vector Layer": layer_0, "Vector Layer (2)": layer_1, "Vector Layer (3)": layer_2}"#
        ));
    }

    #[test]
    fn renders_styles_and_fit() {
        let mut document = bare_document();
        document.add_layer(
            GeoJsonLayer::new("Parks", FeatureTable::new().geo_interface())
                .with_style(Style::default_vector())
                .with_hover_style(Style::default_hover())
                .into(),
        );
        document.fit_bounds(LatLonBounds::new(LatLon::new(1.0, 2.0), LatLon::new(3.0, 4.0)));
        let html = document.render().unwrap();

        assert!(html.contains(r#"return {"color":"blue","fillOpacity":0.4};"#));
        assert!(html.contains(r#"e.target.setStyle({"color":"red","fillOpacity":0.7});"#));
        assert!(html.contains("map.fitBounds([[1.0,2.0],[3.0,4.0]]);"));
    }

    #[test]
    fn escapes_script_terminators() {
        let mut document = bare_document();
        document.add_layer(
            TileLayer::new("https://tiles.example.com/{z}/{x}/{y}.png")
                .with_attribution("</script><script>alert(1)</script>")
                .into(),
        );
        let html = document.render().unwrap();

        assert!(!html.contains("</script><script>alert"));
        assert!(html.contains(r#"<\/script><script>alert(1)<\/script>"#));
    }

    #[test]
    fn saves_to_file() {
        let path = std::env::temp_dir().join(format!("leafmap-html-{}.html", std::process::id()));
        bare_document().save(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(written.starts_with("<!DOCTYPE html>"));
    }
}
