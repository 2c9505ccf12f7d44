//! Level loading from JSON files

use crate::format::LevelFile;
use crate::scene::Scene;
use glade_core::{GladeError, Result};
use glade_terrain::Heightfield;
use std::fs;
use std::path::Path;

/// Load a level from a JSON file
pub fn load_level<P: AsRef<Path>>(path: P) -> Result<Scene> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let scene = load_level_str(&content)?;
    tracing::info!(
        trees = scene.trees().len(),
        roads = scene.roads().len(),
        others = scene.others().len(),
        "loaded level {}",
        path.display()
    );
    Ok(scene)
}

/// Load a level from a JSON string.
///
/// Either the whole document is accepted or an error is returned; a
/// partially built scene never escapes.
pub fn load_level_str(content: &str) -> Result<Scene> {
    let level: LevelFile = serde_json::from_str(content)
        .map_err(|e| GladeError::MalformedLevel(e.to_string()))?;
    level_to_scene(level)
}

/// Build a scene from an already parsed level document
pub fn level_to_scene(level: LevelFile) -> Result<Scene> {
    if level.width == 0 || level.depth == 0 {
        return Err(GladeError::MalformedLevel(format!(
            "level size must be positive, got {}x{}",
            level.width, level.depth
        )));
    }
    let sunlight: [f32; 3] = level.sunlight.as_slice().try_into().map_err(|_| {
        GladeError::MalformedLevel(format!(
            "sunlight must have 3 components, got {}",
            level.sunlight.len()
        ))
    })?;
    let expected = level.width.checked_mul(level.depth).ok_or_else(|| {
        GladeError::MalformedLevel(format!(
            "level size {}x{} is too large",
            level.width, level.depth
        ))
    })?;
    if level.altitude.len() != expected {
        return Err(GladeError::MalformedLevel(format!(
            "altitude must have {expected} values for a {}x{} level, got {}",
            level.width,
            level.depth,
            level.altitude.len()
        )));
    }

    let heightfield = Heightfield::from_raw(level.altitude, level.width, level.depth)?;
    let mut scene = Scene::from_heightfield(heightfield);
    scene.set_sunlight_dir(sunlight[0], sunlight[1], sunlight[2]);

    for tree in &level.trees {
        scene.add_tree(tree.x, tree.z);
    }
    for (i, road) in level.roads.iter().enumerate() {
        scene.add_road(road.width, &road.spine).map_err(|e| match e {
            GladeError::MalformedLevel(msg) => {
                GladeError::MalformedLevel(format!("road {i}: {msg}"))
            }
            other => other,
        })?;
    }
    for other in &level.others {
        scene.add_other(other.x, other.z);
    }

    Ok(scene)
}
