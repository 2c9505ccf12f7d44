//! Heightmap import command

use anyhow::{Context, Result};
use glade_scene::{save_level, Scene};
use glade_terrain::Heightfield;
use std::path::Path;

/// Sunlight for a freshly imported level: low in the west
const DEFAULT_SUNLIGHT: [f32; 3] = [-1.0, 1.0, 0.0];

pub fn run(image: &str, output: &str, scale: f64) -> Result<()> {
    let heightfield = Heightfield::from_png(Path::new(image), scale)
        .with_context(|| format!("failed to import heightmap {image}"))?;
    let (width, depth) = heightfield.size();

    let mut scene = Scene::from_heightfield(heightfield);
    scene.set_sunlight_dir(DEFAULT_SUNLIGHT[0], DEFAULT_SUNLIGHT[1], DEFAULT_SUNLIGHT[2]);
    save_level(output, &scene).with_context(|| format!("failed to write level {output}"))?;

    println!("Imported {} ({} x {}) -> {}", image, width, depth, output);
    Ok(())
}
