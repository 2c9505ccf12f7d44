//! CLI command implementations

pub mod heightmap;
pub mod info;
pub mod mesh;
pub mod roundtrip;
pub mod simulate;
