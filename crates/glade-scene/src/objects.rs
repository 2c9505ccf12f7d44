//! Placed objects: trees and props anchored to the terrain
//!
//! An object's altitude is sampled once, when it is placed. Later terrain
//! edits do not move it.

use std::f64::consts::PI;

use glade_core::{face_normal, Color, Mesh, Point3, Vec3, Vertex};
use glade_terrain::Heightfield;

/// Altitude used when an object is placed off the heightfield
pub const DEFAULT_GROUND_ALTITUDE: f64 = 0.0;

fn ground_altitude(heightfield: &Heightfield, x: f64, z: f64, kind: &str) -> f64 {
    match heightfield.altitude(x, z) {
        Ok(y) => y,
        Err(e) => {
            tracing::warn!("{kind} placed off terrain: {e}; using {DEFAULT_GROUND_ALTITUDE}");
            DEFAULT_GROUND_ALTITUDE
        }
    }
}

/// A tree: a capped cylindrical trunk with a spherical crown of leaves
#[derive(Debug, Clone)]
pub struct Tree {
    position: Point3,
    trunk: Mesh,
    foliage: Mesh,
}

impl Tree {
    pub const HEIGHT: f64 = 2.0;
    pub const TRUNK_RADIUS: f64 = 0.1;
    pub const SLICES: u32 = 32;
    pub const FOLIAGE_RADIUS: f64 = 0.4;
    pub const FOLIAGE_STACKS: u32 = 16;

    /// Place a tree at `(x, z)` on the terrain
    pub fn planted(x: f64, z: f64, heightfield: &Heightfield) -> Self {
        let y = ground_altitude(heightfield, x, z, "tree");
        Self::at(Point3::new(x, y, z))
    }

    /// Build a tree whose base sits exactly at `position`
    pub fn at(position: Point3) -> Self {
        Self {
            position,
            trunk: trunk_mesh(position, Self::HEIGHT, Self::TRUNK_RADIUS, Self::SLICES),
            foliage: sphere_mesh(
                Point3::new(position.x, position.y + Self::HEIGHT, position.z),
                Self::FOLIAGE_RADIUS,
                Self::FOLIAGE_STACKS,
                Self::SLICES,
            ),
        }
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    /// Cylinder side plus top and bottom caps
    pub fn trunk_mesh(&self) -> &Mesh {
        &self.trunk
    }

    /// Leaf sphere centred on the top of the trunk
    pub fn foliage_mesh(&self) -> &Mesh {
        &self.foliage
    }
}

/// A flat upright quad with per-corner colours
#[derive(Debug, Clone)]
pub struct Prop {
    position: Point3,
    mesh: Mesh,
}

impl Prop {
    pub const HEIGHT: f32 = 2.0;
    pub const CORNER_COLORS: [Color; 4] = [Color::RED, Color::GREEN, Color::BLUE, Color::YELLOW];

    /// Place a prop at `(x, z)` on the terrain
    pub fn planted(x: f64, z: f64, heightfield: &Heightfield) -> Self {
        let y = ground_altitude(heightfield, x, z, "prop");
        Self::at(Point3::new(x, y, z))
    }

    pub fn at(position: Point3) -> Self {
        Self {
            position,
            mesh: prop_mesh(position),
        }
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

/// Avatar sphere dimensions
pub const AVATAR_RADIUS: f64 = 0.25;
const AVATAR_SEGMENTS: u32 = 20;

/// Avatar sphere centred at `position`, spun `spin` degrees about +Y
pub fn avatar_mesh(position: Point3, spin: f64) -> Mesh {
    let mut mesh = sphere_mesh(Point3::default(), AVATAR_RADIUS, AVATAR_SEGMENTS, AVATAR_SEGMENTS);
    let (sin, cos) = (spin.to_radians() as f32).sin_cos();
    let rotate = |v: [f32; 3]| [v[0] * cos + v[2] * sin, v[1], -v[0] * sin + v[2] * cos];
    let offset = position.to_vec3();
    for v in &mut mesh.vertices {
        let p = rotate(v.position);
        v.position = [p[0] + offset.x, p[1] + offset.y, p[2] + offset.z];
        v.normal = rotate(v.normal);
    }
    mesh
}

fn trunk_mesh(base: Point3, height: f64, radius: f64, slices: u32) -> Mesh {
    let ring = slices as usize + 1;
    let mut mesh = Mesh::with_capacity(ring * 4 + 2, slices as usize * 12);
    let step = 2.0 * PI / slices as f64;
    let bottom = base.y as f32;
    let top = (base.y + height) as f32;

    // Side wall: bottom/top vertex pairs, seam duplicated for UVs
    for i in 0..=slices {
        let a = i as f64 * step;
        let (sin, cos) = a.sin_cos();
        let x = (base.x + radius * cos) as f32;
        let z = (base.z + radius * sin) as f32;
        let normal = [cos as f32, 0.0, sin as f32];
        let u = i as f32 / slices as f32;
        mesh.push_vertex(Vertex::new([x, bottom, z], normal, [u, 0.0]));
        mesh.push_vertex(Vertex::new([x, top, z], normal, [u, 1.0]));
    }
    for i in 0..slices {
        let b0 = i * 2;
        let t0 = b0 + 1;
        let b1 = b0 + 2;
        let t1 = b0 + 3;
        mesh.push_quad(b0, t0, t1, b1);
    }

    push_cap(&mut mesh, base, top, radius, slices, true);
    push_cap(&mut mesh, base, bottom, radius, slices, false);
    mesh
}

/// Triangle fan closing one end of the trunk
fn push_cap(mesh: &mut Mesh, base: Point3, y: f32, radius: f64, slices: u32, facing_up: bool) {
    let normal = if facing_up { Vec3::UP } else { Vec3::DOWN }.to_array();
    let step = 2.0 * PI / slices as f64;

    let center = mesh.push_vertex(Vertex::new(
        [base.x as f32, y, base.z as f32],
        normal,
        [0.5, 0.5],
    ));
    for i in 0..=slices {
        let (sin, cos) = (i as f64 * step).sin_cos();
        mesh.push_vertex(Vertex::new(
            [(base.x + radius * cos) as f32, y, (base.z + radius * sin) as f32],
            normal,
            [0.5 + 0.5 * cos as f32, 0.5 + 0.5 * sin as f32],
        ));
    }
    for i in 0..slices {
        let a = center + 1 + i;
        let b = a + 1;
        if facing_up {
            mesh.push_triangle(center, b, a);
        } else {
            mesh.push_triangle(center, a, b);
        }
    }
}

fn sphere_mesh(center: Point3, radius: f64, stacks: u32, sectors: u32) -> Mesh {
    let mut mesh = Mesh::with_capacity(
        ((stacks + 1) * (sectors + 1)) as usize,
        (stacks * sectors * 6) as usize,
    );

    for stack in 0..=stacks {
        let phi = PI * stack as f64 / stacks as f64;
        let (sin_phi, cos_phi) = phi.sin_cos();
        for sector in 0..=sectors {
            let theta = 2.0 * PI * sector as f64 / sectors as f64;
            let (sin_theta, cos_theta) = theta.sin_cos();
            let n = [sin_phi * cos_theta, cos_phi, sin_phi * sin_theta];
            mesh.push_vertex(Vertex::new(
                [
                    (center.x + radius * n[0]) as f32,
                    (center.y + radius * n[1]) as f32,
                    (center.z + radius * n[2]) as f32,
                ],
                [n[0] as f32, n[1] as f32, n[2] as f32],
                [
                    sector as f32 / sectors as f32,
                    stack as f32 / stacks as f32,
                ],
            ));
        }
    }

    for stack in 0..stacks {
        for sector in 0..sectors {
            let a = stack * (sectors + 1) + sector;
            let b = a + sectors + 1;
            if stack != 0 {
                mesh.push_triangle(a, a + 1, b);
            }
            if stack != stacks - 1 {
                mesh.push_triangle(a + 1, b + 1, b);
            }
        }
    }

    mesh
}

fn prop_mesh(position: Point3) -> Mesh {
    let (x, y, z) = (position.x as f32, position.y as f32, position.z as f32);
    let corners = [
        Vec3::new(x, y, z),
        Vec3::new(x - 1.0, y, z - 1.0),
        Vec3::new(x - 1.0, y + Prop::HEIGHT, z - 1.0),
        Vec3::new(x, y + Prop::HEIGHT, z),
    ];
    let normal = face_normal(corners[0], corners[1], corners[3]).to_array();
    let uvs = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    let mut mesh = Mesh::with_capacity(4, 6);
    for ((corner, color), uv) in corners.iter().zip(Prop::CORNER_COLORS).zip(uvs) {
        mesh.push_vertex(Vertex::new(corner.to_array(), normal, uv).with_color(color.to_array()));
    }
    mesh.push_quad(0, 1, 2, 3);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hill() -> Heightfield {
        let mut hf = Heightfield::new(5, 5);
        for x in 0..5 {
            for z in 0..5 {
                hf.set_grid_altitude(x, z, 0.5 * x as f64);
            }
        }
        hf
    }

    #[test]
    fn tree_sits_on_sampled_altitude() {
        let hf = hill();
        let tree = Tree::planted(2.0, 3.0, &hf);
        assert_eq!(tree.position(), Point3::new(2.0, 1.0, 3.0));
    }

    #[test]
    fn tree_off_terrain_uses_default_altitude() {
        let hf = hill();
        let tree = Tree::planted(-4.0, 1.0, &hf);
        assert_eq!(tree.position().y, DEFAULT_GROUND_ALTITUDE);
    }

    #[test]
    fn tree_altitude_is_fixed_at_placement() {
        let mut hf = hill();
        let tree = Tree::planted(1.0, 1.0, &hf);
        hf.set_grid_altitude(1, 1, 50.0);
        assert_eq!(tree.position().y, 0.5);
    }

    #[test]
    fn trunk_spans_base_to_height() {
        let tree = Tree::at(Point3::new(0.0, 1.0, 0.0));
        let (min, max) = tree.trunk_mesh().aabb().unwrap();
        assert!((min[1] - 1.0).abs() < 1e-6);
        assert!((max[1] - 3.0).abs() < 1e-6);
        assert!((max[0] - 0.1).abs() < 1e-6);

        let slices = Tree::SLICES as usize;
        // side quads + two fans
        assert_eq!(tree.trunk_mesh().triangle_count(), slices * 2 + slices * 2);
    }

    #[test]
    fn caps_face_outward() {
        let tree = Tree::at(Point3::new(0.0, 0.0, 0.0));
        let mesh = tree.trunk_mesh();
        for tri in mesh.indices.chunks(3) {
            let v = |i: u32| Vec3::from_array(mesh.vertices[i as usize].position);
            let stored = Vec3::from_array(mesh.vertices[tri[0] as usize].normal);
            let geometric = face_normal(v(tri[0]), v(tri[1]), v(tri[2]));
            assert!(geometric.dot(&stored) > 0.0);
        }
    }

    #[test]
    fn foliage_is_centred_on_trunk_top() {
        let tree = Tree::at(Point3::new(3.0, 1.0, 4.0));
        for v in &tree.foliage_mesh().vertices {
            let d = Vec3::from_array(v.position) - Vec3::new(3.0, 3.0, 4.0);
            assert!((d.length() - 0.4).abs() < 1e-5);
        }
    }

    #[test]
    fn avatar_sphere_is_centred_and_spun() {
        let centre = Point3::new(1.0, 2.0, 3.0);
        let still = avatar_mesh(centre, 0.0);
        let spun = avatar_mesh(centre, 90.0);
        assert_eq!(still.vertex_count(), spun.vertex_count());

        for v in &spun.vertices {
            let d = Vec3::from_array(v.position) - centre.to_vec3();
            assert!((d.length() - 0.25).abs() < 1e-5);
        }
        // a quarter turn moves the seam
        let seam = |m: &Mesh| m.vertices[AVATAR_SEGMENTS as usize + 2].position;
        assert!((seam(&still)[0] - seam(&spun)[0]).abs() > 1e-3);
    }

    #[test]
    fn prop_quad_has_coloured_corners() {
        let hf = hill();
        let prop = Prop::planted(3.0, 3.0, &hf);
        assert_eq!(prop.position(), Point3::new(3.0, 1.5, 3.0));

        let mesh = prop.mesh();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertices[0].position, [3.0, 1.5, 3.0]);
        assert_eq!(mesh.vertices[2].position, [2.0, 3.5, 2.0]);
        assert_eq!(mesh.vertices[1].color, Color::GREEN.to_array());
        assert_eq!(mesh.vertices[3].color, Color::YELLOW.to_array());
    }
}
