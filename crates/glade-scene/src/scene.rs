//! The scene aggregate and its draw ordering

use glade_core::{Mesh, Result, RoadPath, Vec3, DEFAULT_RIBBON_STEPS};
use glade_terrain::{generate_surface, Heightfield, OutOfRange, TerrainSurface};

use crate::objects::{Prop, Tree};
use crate::resources::{Material, SceneResources};

/// Height of a road surface above the terrain at its first control point
pub const ROAD_ELEVATION: f64 = 0.02;

/// Which part of the frame a draw call belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawPass {
    Terrain,
    TreeTrunk,
    TreeFoliage,
    Road,
    Prop,
    Avatar,
}

/// Rendering backend seam. The scene issues draw calls in a fixed order;
/// the backend owns every GPU concern.
pub trait SceneRenderer {
    fn draw_mesh(&mut self, pass: DrawPass, mesh: &Mesh, material: &Material);
}

/// A loaded level: terrain, roads, trees, props, and the initial sunlight
#[derive(Debug, Clone)]
pub struct Scene {
    heightfield: Heightfield,
    roads: Vec<RoadPath>,
    trees: Vec<Tree>,
    props: Vec<Prop>,
    sunlight: Vec3,
    resources: SceneResources,
    road_steps: usize,
}

impl Scene {
    /// Create a flat scene with `width × depth` grid samples
    pub fn new(width: usize, depth: usize) -> Self {
        Self::from_heightfield(Heightfield::new(width, depth))
    }

    pub fn from_heightfield(heightfield: Heightfield) -> Self {
        Self {
            heightfield,
            roads: Vec::new(),
            trees: Vec::new(),
            props: Vec::new(),
            sunlight: Vec3::ZERO,
            resources: SceneResources::default(),
            road_steps: DEFAULT_RIBBON_STEPS,
        }
    }

    /// Grid size as (width, depth)
    pub fn size(&self) -> (usize, usize) {
        self.heightfield.size()
    }

    pub fn heightfield(&self) -> &Heightfield {
        &self.heightfield
    }

    pub fn heightfield_mut(&mut self) -> &mut Heightfield {
        &mut self.heightfield
    }

    pub fn altitude(&self, x: f64, z: f64) -> std::result::Result<f64, OutOfRange> {
        self.heightfield.altitude(x, z)
    }

    pub fn grid_altitude(&self, x: usize, z: usize) -> f64 {
        self.heightfield.grid_altitude(x, z)
    }

    pub fn set_grid_altitude(&mut self, x: usize, z: usize, h: f64) {
        self.heightfield.set_grid_altitude(x, z, h);
    }

    /// Resize the terrain grid, keeping overlapping altitudes
    pub fn resize(&mut self, width: usize, depth: usize) {
        self.heightfield.resize(width, depth);
    }

    /// Directional light vector the day-night cycle starts from
    pub fn sunlight(&self) -> Vec3 {
        self.sunlight
    }

    pub fn set_sunlight_dir(&mut self, dx: f32, dy: f32, dz: f32) {
        self.sunlight = Vec3::new(dx, dy, dz);
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn roads(&self) -> &[RoadPath] {
        &self.roads
    }

    pub fn others(&self) -> &[Prop] {
        &self.props
    }

    /// Place a tree; its altitude is sampled from the terrain now
    pub fn add_tree(&mut self, x: f64, z: f64) {
        self.trees.push(Tree::planted(x, z, &self.heightfield));
    }

    /// Add a road from a flattened `(x, z)` control-point spine
    pub fn add_road(&mut self, width: f64, spine: &[f64]) -> Result<()> {
        self.roads.push(RoadPath::from_spine(width, spine)?);
        Ok(())
    }

    /// Add a road built elsewhere, e.g. incrementally with `add_segment`
    pub fn push_road(&mut self, road: RoadPath) {
        self.roads.push(road);
    }

    /// Place a prop; its altitude is sampled from the terrain now
    pub fn add_other(&mut self, x: f64, z: f64) {
        self.props.push(Prop::planted(x, z, &self.heightfield));
    }

    pub fn resources(&self) -> &SceneResources {
        &self.resources
    }

    /// Install the texture/shader table once the backend has loaded it
    pub fn set_resources(&mut self, resources: SceneResources) {
        self.resources = resources;
    }

    /// Ribbon subdivisions per road segment
    pub fn set_road_steps(&mut self, steps: usize) {
        self.road_steps = steps.max(1);
    }

    /// Triangulated terrain for the current grid
    pub fn terrain_surface(&self) -> TerrainSurface {
        generate_surface(&self.heightfield)
    }

    /// Road ribbon at the terrain altitude under its first control point
    pub fn road_mesh(&self, road: &RoadPath) -> Mesh {
        let start = road.point(0.0);
        let ground = self.heightfield.altitude_or(start.x, start.z, 0.0);
        road.ribbon_mesh(self.road_steps, ground + ROAD_ELEVATION)
    }

    /// Issue every draw call for one frame.
    ///
    /// Order is fixed: terrain, trees, roads, props. Roads and props rely on
    /// the terrain having populated the depth buffer first.
    pub fn draw<R: SceneRenderer>(&self, renderer: &mut R) -> usize {
        let resources = &self.resources;
        let mut calls = 0;

        let surface = self.terrain_surface();
        renderer.draw_mesh(DrawPass::Terrain, &surface.mesh, &Material::terrain(resources));
        calls += 1;

        let trunk = Material::trunk(resources);
        let foliage = Material::foliage(resources);
        for tree in &self.trees {
            renderer.draw_mesh(DrawPass::TreeTrunk, tree.trunk_mesh(), &trunk);
            renderer.draw_mesh(DrawPass::TreeFoliage, tree.foliage_mesh(), &foliage);
            calls += 2;
        }

        let road = Material::road(resources);
        for path in &self.roads {
            renderer.draw_mesh(DrawPass::Road, &self.road_mesh(path), &road);
            calls += 1;
        }

        let prop = Material::prop(resources);
        for other in &self.props {
            renderer.draw_mesh(DrawPass::Prop, other.mesh(), &prop);
            calls += 1;
        }

        tracing::debug!(
            trees = self.trees.len(),
            roads = self.roads.len(),
            props = self.props.len(),
            calls,
            "scene drawn"
        );
        calls
    }
}
