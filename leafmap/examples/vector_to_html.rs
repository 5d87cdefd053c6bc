//! Render a GeoJSON or Shapefile dataset to a standalone HTML map.
//! Run with: cargo run --example vector_to_html -- <path> [output.html] [basemap]

use anyhow::Context;
use leafmap::{HtmlMap, VectorOptions};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input = args
        .next()
        .context("usage: vector_to_html <path> [output.html] [basemap]")?;
    let output = args.next().unwrap_or_else(|| "map.html".to_string());
    let tiles = args.next().unwrap_or_else(|| "OpenStreetMap".to_string());

    let name = std::path::Path::new(&input)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("Vector Layer")
        .to_string();

    let mut map = HtmlMap::builder().with_option("tiles", tiles).build()?;
    map.add_vector(input.as_str(), VectorOptions::default().with_name(name))
        .with_context(|| format!("failed to load {input}"))?;
    map.add_layer_control();
    map.save(&output)?;

    log::info!("Map written to {output}");
    Ok(())
}
