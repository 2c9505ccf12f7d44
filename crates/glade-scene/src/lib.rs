//! Glade Scene - the level aggregate and its JSON serialization
//!
//! A [`Scene`] owns the terrain plus every road, tree and prop placed on it,
//! and knows the order they must be drawn in. Levels are loaded from and
//! saved to JSON documents.

mod format;
mod loader;
pub mod objects;
pub mod resources;
mod saver;
pub mod scene;

pub use format::{GroundPosition, LevelFile, RoadDef};
pub use loader::{level_to_scene, load_level, load_level_str};
pub use objects::{avatar_mesh, Prop, Tree, AVATAR_RADIUS, DEFAULT_GROUND_ALTITUDE};
pub use resources::{Material, SceneResources, ShaderHandle, TextureHandle};
pub use saver::{save_level, save_level_string, scene_to_level_file};
pub use scene::{DrawPass, Scene, SceneRenderer, ROAD_ELEVATION};
