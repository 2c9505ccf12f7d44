//! Terrain surface mesh generation

use glade_core::{face_normal, Mesh, Vec3, Vertex};

use crate::heightfield::Heightfield;

/// Triangulated terrain surface
pub struct TerrainSurface {
    /// Flat-shaded triangle list, three unshared vertices per face
    pub mesh: Mesh,
    /// AABB minimum corner
    pub aabb_min: [f32; 3],
    /// AABB maximum corner
    pub aabb_max: [f32; 3],
}

impl TerrainSurface {
    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    /// Export as (vertices, triangle_indices)
    pub fn trimesh_data(&self) -> (Vec<[f32; 3]>, Vec<[u32; 3]>) {
        let vertices = self.mesh.vertices.iter().map(|v| v.position).collect();
        let triangles = self
            .mesh
            .indices
            .chunks(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
            .collect();
        (vertices, triangles)
    }
}

/// Texture coordinates shared by both triangles of a cell
const CELL_UVS: [[f32; 2]; 3] = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]];

/// Tessellate every unit cell of the heightfield into two triangles.
///
/// For the cell at `(row, col)` (row along X, col along Z) the triangles are
/// `(row,col)-(row,col+1)-(row+1,col)` and
/// `(row+1,col)-(row,col+1)-(row+1,col+1)`. Each triangle is flat shaded with
/// its own face normal, flipped if needed so it points up.
pub fn generate_surface(heightfield: &Heightfield) -> TerrainSurface {
    let (width, depth) = heightfield.size();
    let cells = width.saturating_sub(1) * depth.saturating_sub(1);
    let mut mesh = Mesh::with_capacity(cells * 6, cells * 6);

    let corner = |x: usize, z: usize| -> Vec3 {
        Vec3::new(x as f32, heightfield.grid_altitude(x, z) as f32, z as f32)
    };

    for row in 0..width.saturating_sub(1) {
        for col in 0..depth.saturating_sub(1) {
            let first = [corner(row, col), corner(row, col + 1), corner(row + 1, col)];
            let second = [
                corner(row + 1, col),
                corner(row, col + 1),
                corner(row + 1, col + 1),
            ];
            push_face(&mut mesh, first);
            push_face(&mut mesh, second);
        }
    }

    let (aabb_min, aabb_max) = mesh.aabb().unwrap_or(([0.0; 3], [0.0; 3]));
    tracing::debug!(triangles = mesh.triangle_count(), "generated terrain surface");

    TerrainSurface {
        mesh,
        aabb_min,
        aabb_max,
    }
}

fn push_face(mesh: &mut Mesh, corners: [Vec3; 3]) {
    let normal = face_normal(corners[0], corners[1], corners[2]);
    let normal = if normal.y < 0.0 { -normal } else { normal };

    let base = mesh.vertices.len() as u32;
    for (pos, uv) in corners.iter().zip(CELL_UVS) {
        mesh.push_vertex(Vertex::new(pos.to_array(), normal.to_array(), uv));
    }
    mesh.push_triangle(base, base + 1, base + 2);
}
