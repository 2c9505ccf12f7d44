//! Level file format definitions

use serde::{Deserialize, Serialize};

/// Root structure of a level JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelFile {
    /// Grid samples along X
    pub width: usize,
    /// Grid samples along Z
    pub depth: usize,
    /// Initial directional light vector
    pub sunlight: Vec<f32>,
    /// `width * depth` altitudes; index `i` is cell `(i % width, i / width)`
    pub altitude: Vec<f64>,
    #[serde(default)]
    pub trees: Vec<GroundPosition>,
    #[serde(default)]
    pub roads: Vec<RoadDef>,
    #[serde(default)]
    pub others: Vec<GroundPosition>,
}

/// A placed object; altitude is derived from the terrain on load
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundPosition {
    pub x: f64,
    pub z: f64,
}

/// A road: width plus flattened `(x, z)` Bezier control points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadDef {
    pub width: f64,
    pub spine: Vec<f64>,
}

impl LevelFile {
    /// A flat level with no objects
    pub fn new(width: usize, depth: usize, sunlight: [f32; 3]) -> Self {
        Self {
            width,
            depth,
            sunlight: sunlight.to_vec(),
            altitude: vec![0.0; width * depth],
            trees: Vec::new(),
            roads: Vec::new(),
            others: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_file_deserialization() {
        let json = r#"{
            "width": 2,
            "depth": 2,
            "sunlight": [-1, 1, 0],
            "altitude": [0, 0.5, 1, 1.5],
            "trees": [{ "x": 0.5, "z": 0.5 }],
            "roads": [{ "width": 1.5, "spine": [0, 0, 1, 0, 1, 1, 0, 1] }]
        }"#;

        let level: LevelFile = serde_json::from_str(json).unwrap();
        assert_eq!(level.width, 2);
        assert_eq!(level.sunlight, vec![-1.0, 1.0, 0.0]);
        assert_eq!(level.trees.len(), 1);
        assert_eq!(level.roads[0].spine.len(), 8);
        // optional arrays default to empty
        assert!(level.others.is_empty());
    }

    #[test]
    fn test_level_file_serialization() {
        let level = LevelFile::new(3, 1, [0.0, -1.0, 0.0]);
        let json = serde_json::to_string(&level).unwrap();
        assert!(json.contains("\"altitude\":[0.0,0.0,0.0]"));
        assert!(json.contains("\"others\":[]"));
    }
}
