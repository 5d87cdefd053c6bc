//! Basemap catalogs.
//!
//! [`BASEMAPS`] is a short list of friendly names. Each name is an alias of an entry in the
//! nested [`ProviderCatalog`], so both lookups return the same URL and attribution.

mod providers;

pub use providers::{ProviderCatalog, ProviderNode, TileProvider};

use crate::error::MapError;
use crate::layer::TileLayer;

/// Basemap names accepted by `add_basemap` and the provider paths they stand for.
pub const BASEMAPS: [(&str, &str); 5] = [
    ("OpenStreetMap", "OpenStreetMap.Mapnik"),
    ("CartoDB Positron", "CartoDB.Positron"),
    ("CartoDB DarkMatter", "CartoDB.DarkMatter"),
    ("OpenTopoMap", "OpenTopoMap"),
    ("Esri WorldImagery", "Esri.WorldImagery"),
];

/// Name of the basemap used when none is given.
pub const DEFAULT_BASEMAP: &str = "OpenStreetMap";

/// Returns the tile provider behind a basemap name.
///
/// Fails with [`MapError::InvalidArgument`] listing the accepted names if the name is unknown.
pub fn basemap(name: &str) -> Result<&'static TileProvider, MapError> {
    let Some((_, path)) = BASEMAPS.iter().find(|(key, _)| *key == name) else {
        let names: Vec<&str> = BASEMAPS.iter().map(|(key, _)| *key).collect();
        return Err(MapError::invalid_argument(format!(
            "Basemap '{name}' not recognized. Available options: {names:?}"
        )));
    };

    ProviderCatalog::builtin().resolve(path)
}

/// Builds the tile layer of a basemap name. The layer is named after the basemap.
pub fn basemap_layer(name: &str) -> Result<TileLayer, MapError> {
    let layer = basemap(name)?
        .to_tile_layer()
        .map_err(|err| MapError::invalid_argument(format!("Basemap '{name}': {err}")))?;

    Ok(layer.with_name(name))
}
