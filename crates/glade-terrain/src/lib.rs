//! Glade Terrain - Heightfield-based terrain
//!
//! Provides the altitude grid, point altitude queries, and surface mesh
//! generation. Does not depend on a rendering backend; outputs raw vertex
//! data for the renderer to consume.

pub mod heightfield;
pub mod surface;

pub use heightfield::{Heightfield, OutOfRange};
pub use surface::{generate_surface, TerrainSurface};
