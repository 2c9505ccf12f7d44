//! Mesh statistics command

use anyhow::{Context, Result};
use glade_core::Mesh;
use glade_scene::{load_level, DrawPass, Material, SceneRenderer};

/// Tallies draw calls instead of rendering them
#[derive(Default)]
struct MeshStats {
    rows: Vec<(DrawPass, usize, usize)>,
}

impl SceneRenderer for MeshStats {
    fn draw_mesh(&mut self, pass: DrawPass, mesh: &Mesh, _material: &Material) {
        self.rows.push((pass, mesh.vertex_count(), mesh.triangle_count()));
    }
}

pub fn run(path: &str, road_steps: usize) -> Result<()> {
    let mut scene = load_level(path).with_context(|| format!("failed to load level {path}"))?;
    scene.set_road_steps(road_steps);

    let mut stats = MeshStats::default();
    scene.draw(&mut stats);

    let mut total = (0, 0);
    for (pass, vertices, triangles) in &stats.rows {
        println!("{:<12} {:>8} verts {:>8} tris", format!("{pass:?}"), vertices, triangles);
        total.0 += vertices;
        total.1 += triangles;
    }
    println!("{:<12} {:>8} verts {:>8} tris", "Total", total.0, total.1);
    Ok(())
}
