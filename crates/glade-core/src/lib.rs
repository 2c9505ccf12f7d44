//! Glade Core - Foundational types for the Glade scene engine
//!
//! This crate provides the types that all other Glade crates depend on:
//! - `Vec3`, `Point2`, `Point3`, `Color` - Spatial types
//! - `Vertex`, `Mesh` - CPU-side mesh data for the renderer
//! - `RoadPath` - Piecewise cubic Bezier road centrelines and ribbons
//! - Error types and Result alias

mod error;
pub mod mesh;
pub mod spline;
mod types;

pub use error::{GladeError, Result};
pub use mesh::{face_normal, Mesh, Vertex};
pub use spline::{RibbonSample, RoadPath, DEFAULT_RIBBON_STEPS};
pub use types::{mat4_mul, Color, Point2, Point3, Vec3};
