//! Level saving to JSON files

use crate::format::{GroundPosition, LevelFile, RoadDef};
use crate::scene::Scene;
use glade_core::Result;
use std::fs;
use std::path::Path;

/// Save a scene to a level file
pub fn save_level<P: AsRef<Path>>(path: P, scene: &Scene) -> Result<()> {
    let path = path.as_ref();
    let content = save_level_string(scene)?;
    fs::write(path, content)?;
    tracing::info!("saved level {}", path.display());
    Ok(())
}

/// Save a scene to a pretty-printed JSON string
pub fn save_level_string(scene: &Scene) -> Result<String> {
    let level = scene_to_level_file(scene);
    let content = serde_json::to_string_pretty(&level)?;
    Ok(content)
}

/// Convert a Scene to a LevelFile
pub fn scene_to_level_file(scene: &Scene) -> LevelFile {
    let (width, depth) = scene.size();
    let ground = |x: f64, z: f64| GroundPosition { x, z };

    LevelFile {
        width,
        depth,
        sunlight: scene.sunlight().to_array().to_vec(),
        // Heightfield storage is already x + z * width
        altitude: scene.heightfield().heights().to_vec(),
        trees: scene
            .trees()
            .iter()
            .map(|t| ground(t.position().x, t.position().z))
            .collect(),
        roads: scene
            .roads()
            .iter()
            .map(|r| RoadDef {
                width: r.width(),
                spine: r.spine(),
            })
            .collect(),
        others: scene
            .others()
            .iter()
            .map(|o| ground(o.position().x, o.position().z))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{load_level, load_level_str};
    use glade_core::Point2;
    use glade_core::RoadPath;

    fn sample_scene() -> Scene {
        let mut scene = Scene::new(4, 3);
        for x in 0..4 {
            for z in 0..3 {
                scene.set_grid_altitude(x, z, 10.0 * x as f64 + z as f64);
            }
        }
        scene.set_sunlight_dir(-1.0, 1.0, 0.5);
        scene.add_tree(1.0, 2.0);
        scene.add_tree(2.5, 0.0);
        scene
            .add_road(1.5, &[0.0, 0.0, 1.0, 0.0, 2.0, 1.0, 3.0, 1.0])
            .unwrap();
        let mut built = RoadPath::new(2.0, Point2::new(0.0, 2.0));
        built.add_segment(1.0, 2.0, 2.0, 2.0, 3.0, 2.0);
        built.add_segment(3.0, 1.5, 2.0, 1.0, 1.0, 1.0);
        scene.push_road(built);
        scene.add_other(3.0, 1.0);
        scene
    }

    #[test]
    fn altitude_is_written_row_by_row() {
        let level = scene_to_level_file(&sample_scene());
        assert_eq!(level.altitude.len(), 12);
        // index = x + z * width
        assert_eq!(level.altitude[1], 10.0);
        assert_eq!(level.altitude[4], 1.0);
        assert_eq!(level.altitude[3 + 2 * 4], 32.0);
    }

    #[test]
    fn props_keep_their_own_array() {
        let level = scene_to_level_file(&sample_scene());
        assert_eq!(level.trees.len(), 2);
        assert_eq!(level.others, vec![GroundPosition { x: 3.0, z: 1.0 }]);
    }

    #[test]
    fn string_round_trip_preserves_scene() {
        let original = sample_scene();
        let json = save_level_string(&original).unwrap();
        let loaded = load_level_str(&json).unwrap();

        assert_eq!(loaded.size(), original.size());
        assert_eq!(loaded.heightfield(), original.heightfield());
        assert_eq!(loaded.sunlight(), original.sunlight());
        assert_eq!(loaded.roads(), original.roads());

        let positions = |s: &Scene| {
            s.trees()
                .iter()
                .map(|t| t.position())
                .chain(s.others().iter().map(|o| o.position()))
                .collect::<Vec<_>>()
        };
        assert_eq!(positions(&loaded), positions(&original));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.json");

        let original = sample_scene();
        save_level(&path, &original).unwrap();
        let loaded = load_level(&path).unwrap();

        assert_eq!(loaded.heightfield(), original.heightfield());
        assert_eq!(loaded.roads().len(), 2);
        assert_eq!(loaded.roads()[1].segment_count(), 2);
        assert_eq!(loaded.others().len(), 1);
    }
}
