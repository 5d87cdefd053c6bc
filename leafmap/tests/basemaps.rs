use leafmap::basemap::{ProviderCatalog, BASEMAPS};
use leafmap::{LeafletMap, MapError, MapHost};

fn bare_map() -> LeafletMap {
    LeafletMap::builder()
        .with_option("basemap", false)
        .build()
        .expect("map")
}

#[test]
fn named_basemap_adds_single_tile_layer() {
    let mut map = bare_map();
    map.add_basemap("OpenTopoMap").expect("known basemap");

    let layers = map.host().layers();
    assert_eq!(layers.len(), 1);
    let tile = layers[0].as_tile().expect("tile layer");
    assert_eq!(tile.url, "https://a.tile.opentopomap.org/{z}/{x}/{y}.png");
    assert_eq!(
        tile.attribution.as_deref(),
        Some(
            ProviderCatalog::builtin()
                .resolve("OpenTopoMap")
                .expect("provider")
                .attribution
                .as_str()
        )
    );
    assert_eq!(tile.max_zoom, Some(17));
}

#[test]
fn unknown_basemap_adds_nothing() {
    let mut map = bare_map();
    let err = map.add_basemap("Unknown").unwrap_err();

    assert!(matches!(err, MapError::InvalidArgument(_)));
    let message = err.to_string();
    assert!(message.starts_with("Basemap 'Unknown' not recognized"));
    for (name, _) in BASEMAPS {
        assert!(message.contains(name), "{name} missing from {message}");
    }
    assert!(map.host().layers().is_empty());
}

#[test]
fn basemap_names_are_case_sensitive() {
    let mut map = bare_map();
    assert!(map.add_basemap("openstreetmap").is_err());
    assert!(map.host().layers().is_empty());
}

#[test]
fn named_and_provider_basemaps_agree() {
    let mut map = bare_map();
    map.add_basemap("CartoDB Positron").expect("known basemap");
    map.add_provider_basemap("CartoDB.Positron")
        .expect("known provider");

    let layers = map.host().layers();
    let named = layers[0].as_tile().expect("tile layer");
    let provider = layers[1].as_tile().expect("tile layer");
    assert_eq!(named.url, provider.url);
    assert_eq!(named.attribution, provider.attribution);
    assert!(provider.url.contains("light_all"));
    assert_eq!(named.name.as_deref(), Some("CartoDB Positron"));
    assert_eq!(provider.name.as_deref(), Some("CartoDB.Positron"));
}

#[test]
fn provider_group_is_not_a_basemap() {
    let mut map = bare_map();
    let err = map.add_provider_basemap("CartoDB").unwrap_err();

    assert!(matches!(err, MapError::InvalidArgument(_)));
    assert!(err.to_string().contains("Available options"));
    assert!(map.host().layers().is_empty());
}

#[test]
fn provider_paths_are_never_evaluated() {
    let mut map = bare_map();
    for path in [
        "__import__",
        "__import__('os').system('true')",
        "CartoDB.Positron.extra",
        "",
        ".",
        "CartoDB..Positron",
    ] {
        assert!(
            map.add_provider_basemap(path).is_err(),
            "{path:?} should not resolve"
        );
    }
    assert!(map.host().layers().is_empty());
}

#[test]
fn default_widget_starts_with_openstreetmap() {
    let map = LeafletMap::new().expect("map");
    let layers = map.host().layers();

    assert_eq!(layers.len(), 1);
    let tile = layers[0].as_tile().expect("tile layer");
    assert!(tile.url.contains("openstreetmap.org"));
}
