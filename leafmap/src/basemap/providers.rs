//! Nested catalog of tile providers.
//!
//! Providers are grouped by vendor (`CartoDB.Positron`, `Esri.WorldImagery`, ...) and looked up
//! by walking a dotted path through the groups.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use crate::error::MapError;
use crate::layer::TileLayer;

static BUILTIN: OnceLock<ProviderCatalog> = OnceLock::new();

const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Tile provider description.
///
/// The URL template may contain provider variables such as `{variant}` besides the tile
/// placeholders `{z}`, `{x}`, `{y}`, the subdomain placeholder `{s}` and the retina suffix
/// placeholder `{r}`.
#[derive(Debug, Clone, PartialEq)]
pub struct TileProvider {
    /// Dotted catalog name, e.g. `CartoDB.Positron`.
    pub name: String,
    /// URL template.
    pub url: String,
    /// HTML attribution.
    pub attribution: String,
    /// Maximum zoom level.
    pub max_zoom: u8,
    /// Subdomain letters substituted for `{s}`.
    pub subdomains: String,
    /// Provider variables substituted into the URL template.
    pub variables: BTreeMap<String, String>,
}

impl TileProvider {
    /// Creates a provider without subdomains or variables.
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        attribution: impl Into<String>,
        max_zoom: u8,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            attribution: attribution.into(),
            max_zoom,
            subdomains: "abc".to_string(),
            variables: BTreeMap::new(),
        }
    }

    /// Sets the subdomain letters.
    pub fn with_subdomains(mut self, subdomains: impl Into<String>) -> Self {
        self.subdomains = subdomains.into();
        self
    }

    /// Sets a URL template variable.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Builds the tile URL template.
    ///
    /// Provider variables are substituted, `{s}` becomes the first subdomain and `{r}` is
    /// removed. `{z}`, `{x}` and `{y}` are left in place for the map client.
    pub fn build_url(&self) -> Result<String, strfmt::FmtError> {
        let mut vars: HashMap<String, String> = ["z", "x", "y"]
            .into_iter()
            .map(|key| (key.to_string(), format!("{{{key}}}")))
            .collect();
        let subdomain = self.subdomains.chars().next().map(String::from);
        vars.insert("s".to_string(), subdomain.unwrap_or_default());
        vars.insert("r".to_string(), String::new());
        vars.extend(self.variables.clone());

        strfmt::strfmt(&self.url, &vars)
    }

    /// Creates a tile layer showing this provider.
    pub fn to_tile_layer(&self) -> Result<TileLayer, strfmt::FmtError> {
        Ok(TileLayer::new(self.build_url()?)
            .with_attribution(self.attribution.clone())
            .with_name(self.name.clone())
            .with_max_zoom(self.max_zoom))
    }
}

/// Node of the provider catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderNode {
    /// A single provider.
    Provider(TileProvider),
    /// Named group of nodes.
    Group(BTreeMap<String, ProviderNode>),
}

/// Tree of tile providers addressed by dotted paths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderCatalog {
    root: BTreeMap<String, ProviderNode>,
}

impl ProviderCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of the providers shipped with the crate.
    pub fn builtin() -> &'static Self {
        BUILTIN.get_or_init(|| {
            log::debug!("Initializing builtin tile provider catalog");
            builtin_catalog()
        })
    }

    /// Adds a provider under its dotted name, creating groups on the way.
    ///
    /// An existing provider or group with the same path is replaced. A provider that sits where
    /// a group is needed is replaced by that group.
    pub fn insert(&mut self, provider: TileProvider) {
        let segments: Vec<String> = provider.name.split('.').map(String::from).collect();
        let Some((leaf, groups)) = segments.split_last() else {
            return;
        };

        let mut level = &mut self.root;
        for segment in groups {
            let node = level
                .entry(segment.clone())
                .or_insert_with(|| ProviderNode::Group(BTreeMap::new()));
            if let ProviderNode::Provider(_) = node {
                *node = ProviderNode::Group(BTreeMap::new());
            }
            level = match node {
                ProviderNode::Group(children) => children,
                ProviderNode::Provider(_) => return,
            };
        }

        level.insert(leaf.clone(), ProviderNode::Provider(provider));
    }

    /// Top-level keys of the catalog in name order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.root.keys().map(String::as_str)
    }

    /// Returns the node at the dotted path, if any.
    pub fn get(&self, path: &str) -> Option<&ProviderNode> {
        let mut segments = path.split('.');
        let mut node = self.root.get(segments.next()?)?;
        for segment in segments {
            match node {
                ProviderNode::Group(children) => node = children.get(segment)?,
                ProviderNode::Provider(_) => return None,
            }
        }

        Some(node)
    }

    /// Resolves a dotted path to a provider.
    ///
    /// Fails with [`MapError::InvalidArgument`] listing the top-level keys if the path does not
    /// exist or ends at a group.
    pub fn resolve(&self, path: &str) -> Result<&TileProvider, MapError> {
        match self.get(path) {
            Some(ProviderNode::Provider(provider)) => Ok(provider),
            _ => Err(self.not_recognized(path)),
        }
    }

    /// Resolves a dotted path and builds a tile layer named after the path.
    pub fn tile_layer(&self, path: &str) -> Result<TileLayer, MapError> {
        let provider = self.resolve(path)?;
        let layer = provider.to_tile_layer().map_err(|err| {
            log::warn!("Failed to build url of tile provider {path}: {err}");
            self.not_recognized(path)
        })?;

        Ok(layer.with_name(path))
    }

    fn not_recognized(&self, path: &str) -> MapError {
        MapError::invalid_argument(format!(
            "Basemap '{path}' not recognized. Available options: {:?}",
            self.keys().collect::<Vec<_>>()
        ))
    }
}

fn builtin_catalog() -> ProviderCatalog {
    let mut catalog = ProviderCatalog::new();

    catalog.insert(TileProvider::new(
        "OpenStreetMap.Mapnik",
        "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
        OSM_ATTRIBUTION,
        19,
    ));
    catalog.insert(TileProvider::new(
        "OpenStreetMap.DE",
        "https://tile.openstreetmap.de/{z}/{x}/{y}.png",
        OSM_ATTRIBUTION,
        18,
    ));
    catalog.insert(TileProvider::new(
        "OpenStreetMap.France",
        "https://{s}.tile.openstreetmap.fr/osmfr/{z}/{x}/{y}.png",
        format!("&copy; OpenStreetMap France | {OSM_ATTRIBUTION}"),
        20,
    ));
    catalog.insert(TileProvider::new(
        "OpenStreetMap.HOT",
        "https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png",
        format!(
            "{OSM_ATTRIBUTION}, Tiles style by <a href=\"https://www.hotosm.org/\">Humanitarian \
             OpenStreetMap Team</a> hosted by <a href=\"https://openstreetmap.fr/\">OpenStreetMap France</a>"
        ),
        19,
    ));
    catalog.insert(TileProvider::new(
        "OpenTopoMap",
        "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
        format!(
            "Map data: {OSM_ATTRIBUTION}, <a href=\"http://viewfinderpanoramas.org\">SRTM</a> | \
             Map style: &copy; <a href=\"https://opentopomap.org\">OpenTopoMap</a> \
             (<a href=\"https://creativecommons.org/licenses/by-sa/3.0/\">CC-BY-SA</a>)"
        ),
        17,
    ));
    catalog.insert(TileProvider::new(
        "CyclOSM",
        "https://{s}.tile-cyclosm.openstreetmap.fr/cyclosm/{z}/{x}/{y}.png",
        format!(
            "<a href=\"https://github.com/cyclosm/cyclosm-cartocss-style/releases\">CyclOSM</a> | \
             Map data: {OSM_ATTRIBUTION}"
        ),
        20,
    ));

    for (name, variant) in [
        ("Positron", "light_all"),
        ("PositronNoLabels", "light_nolabels"),
        ("DarkMatter", "dark_all"),
        ("DarkMatterNoLabels", "dark_nolabels"),
        ("Voyager", "rastertiles/voyager"),
    ] {
        catalog.insert(
            TileProvider::new(
                format!("CartoDB.{name}"),
                "https://{s}.basemaps.cartocdn.com/{variant}/{z}/{x}/{y}{r}.png",
                format!(
                    "{OSM_ATTRIBUTION} &copy; <a href=\"https://carto.com/attributions\">CARTO</a>"
                ),
                20,
            )
            .with_subdomains("abcd")
            .with_variable("variant", variant),
        );
    }

    for (name, variant, max_zoom, sources) in [
        (
            "WorldStreetMap",
            "World_Street_Map",
            18,
            "Source: Esri, DeLorme, NAVTEQ, USGS, Intermap, iPC, NRCAN, Esri Japan, METI, \
             Esri China (Hong Kong), Esri (Thailand), TomTom, 2012",
        ),
        (
            "WorldTopoMap",
            "World_Topo_Map",
            18,
            "Esri, DeLorme, NAVTEQ, TomTom, Intermap, iPC, USGS, FAO, NPS, NRCAN, GeoBase, \
             Kadaster NL, Ordnance Survey, Esri Japan, METI, Esri China (Hong Kong), and the GIS \
             User Community",
        ),
        (
            "WorldImagery",
            "World_Imagery",
            18,
            "Source: Esri, i-cubed, USDA, USGS, AEX, GeoEye, Getmapping, Aerogrid, IGN, IGP, \
             UPR-EGP, and the GIS User Community",
        ),
        (
            "NatGeoWorldMap",
            "NatGeo_World_Map",
            16,
            "National Geographic, Esri, DeLorme, NAVTEQ, UNEP-WCMC, USGS, NASA, ESA, METI, NRCAN, \
             GEBCO, NOAA, iPC",
        ),
    ] {
        catalog.insert(
            TileProvider::new(
                format!("Esri.{name}"),
                "https://server.arcgisonline.com/ArcGIS/rest/services/{variant}/MapServer/tile/{z}/{y}/{x}",
                format!("Tiles &copy; Esri &mdash; {sources}"),
                max_zoom,
            )
            .with_variable("variant", variant),
        );
    }

    catalog
}
