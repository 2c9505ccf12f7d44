//! Level summary command

use anyhow::{Context, Result};
use glade_scene::load_level;

pub fn run(path: &str) -> Result<()> {
    let scene = load_level(path).with_context(|| format!("failed to load level {path}"))?;
    let (width, depth) = scene.size();
    let sun = scene.sunlight();

    println!("Level: {}", path);
    println!("  Size:     {} x {}", width, depth);
    if let Some((lo, hi)) = scene.heightfield().altitude_range() {
        println!("  Altitude: {:.3} .. {:.3}", lo, hi);
    }
    println!("  Sunlight: ({}, {}, {})", sun.x, sun.y, sun.z);
    println!("  Trees:    {}", scene.trees().len());
    println!("  Roads:    {}", scene.roads().len());
    for (i, road) in scene.roads().iter().enumerate() {
        println!(
            "    [{}] width {} with {} segment(s)",
            i,
            road.width(),
            road.segment_count()
        );
    }
    println!("  Others:   {}", scene.others().len());

    Ok(())
}
