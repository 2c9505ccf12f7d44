//! Pure spline math: piecewise cubic Bezier road paths.
//!
//! A path is a chain of cubic segments sharing endpoints: the first segment
//! uses points 0..=3 and every later segment reuses the previous endpoint and
//! contributes three more points, so a path always holds `1 + 3n` points.
//! Ribbon sampling offsets the centreline by half the road width along the
//! local perpendicular to produce a textured strip.

use crate::mesh::{Mesh, Vertex};
use crate::{GladeError, Point2, Result};

/// Default number of ribbon steps per Bezier segment.
pub const DEFAULT_RIBBON_STEPS: usize = 10;

/// Cubic Bernstein weights `(1-u)^3, 3(1-u)^2 u, 3(1-u) u^2, u^3`.
pub fn bernstein(u: f64) -> [f64; 4] {
    let v = 1.0 - u;
    [v * v * v, 3.0 * v * v * u, 3.0 * v * u * u, u * u * u]
}

/// Evaluate a cubic Bezier segment at local parameter `u` in [0, 1].
pub fn cubic_bezier(p0: Point2, p1: Point2, p2: Point2, p3: Point2, u: f64) -> Point2 {
    let [b0, b1, b2, b3] = bernstein(u);
    Point2::new(
        b0 * p0.x + b1 * p1.x + b2 * p2.x + b3 * p3.x,
        b0 * p0.z + b1 * p1.z + b2 * p2.z + b3 * p3.z,
    )
}

/// Derivative of a cubic Bezier segment at local parameter `u`.
pub fn cubic_bezier_tangent(p0: Point2, p1: Point2, p2: Point2, p3: Point2, u: f64) -> Point2 {
    let v = 1.0 - u;
    (p1 - p0) * (3.0 * v * v) + (p2 - p1) * (6.0 * v * u) + (p3 - p2) * (3.0 * u * u)
}

/// One cross-section of a road ribbon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RibbonSample {
    /// Path parameter in [0, segment_count]
    pub t: f64,
    /// Progress along the whole strip in [0, 1]
    pub progress: f64,
    pub center: Point2,
    pub left: Point2,
    pub right: Point2,
}

/// A road centreline: cubic Bezier segments with a constant width.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadPath {
    width: f64,
    points: Vec<Point2>,
}

impl RoadPath {
    /// Start an empty path (zero segments) at `start`.
    pub fn new(width: f64, start: Point2) -> Self {
        Self {
            width,
            points: vec![start],
        }
    }

    /// Build a path from a flattened `(x, z)` spine.
    ///
    /// The spine must hold an even number of values forming `1 + 3n` points.
    pub fn from_spine(width: f64, spine: &[f64]) -> Result<Self> {
        if spine.len() % 2 != 0 {
            return Err(GladeError::MalformedLevel(format!(
                "road spine has odd length {}",
                spine.len()
            )));
        }
        let point_count = spine.len() / 2;
        if point_count % 3 != 1 {
            return Err(GladeError::MalformedLevel(format!(
                "road spine has {point_count} points, expected 1 + 3n"
            )));
        }

        let points = spine
            .chunks_exact(2)
            .map(|c| Point2::new(c[0], c[1]))
            .collect();

        Ok(Self { width, points })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn segment_count(&self) -> usize {
        (self.points.len() - 1) / 3
    }

    /// Append a segment from the current last point through two control
    /// points to `(ex, ez)`.
    pub fn add_segment(&mut self, c1x: f64, c1z: f64, c2x: f64, c2z: f64, ex: f64, ez: f64) {
        self.points.push(Point2::new(c1x, c1z));
        self.points.push(Point2::new(c2x, c2z));
        self.points.push(Point2::new(ex, ez));
    }

    /// Raw control point `i`. Panics if `i >= point_count()`.
    pub fn control_point(&self, i: usize) -> Point2 {
        self.points[i]
    }

    pub fn control_points(&self) -> &[Point2] {
        &self.points
    }

    /// Flattened `(x, z)` sequence, the inverse of [`RoadPath::from_spine`].
    pub fn spine(&self) -> Vec<f64> {
        self.points.iter().flat_map(|p| [p.x, p.z]).collect()
    }

    /// Resolve `t` to a segment index and local parameter.
    ///
    /// `t` is clamped to `[0, segment_count]`; `t == segment_count` maps to
    /// the end of the last segment.
    fn locate(&self, t: f64) -> (usize, f64) {
        let n = self.segment_count();
        if n == 0 {
            return (0, 0.0);
        }
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, n as f64) };
        let seg = (t.floor() as usize).min(n - 1);
        (seg, t - seg as f64)
    }

    fn segment(&self, seg: usize) -> [Point2; 4] {
        let i = seg * 3;
        [
            self.points[i],
            self.points[i + 1],
            self.points[i + 2],
            self.points[i + 3],
        ]
    }

    /// Position on the centreline at path parameter `t` in `[0, segment_count]`.
    pub fn point(&self, t: f64) -> Point2 {
        if self.segment_count() == 0 {
            return self.points[0];
        }
        let (seg, u) = self.locate(t);
        let [p0, p1, p2, p3] = self.segment(seg);
        cubic_bezier(p0, p1, p2, p3, u)
    }

    /// Derivative of the centreline at path parameter `t`.
    pub fn tangent(&self, t: f64) -> Point2 {
        if self.segment_count() == 0 {
            return Point2::default();
        }
        let (seg, u) = self.locate(t);
        let [p0, p1, p2, p3] = self.segment(seg);
        cubic_bezier_tangent(p0, p1, p2, p3, u)
    }

    /// Sample the road ribbon, `steps` subdivisions per segment.
    ///
    /// Each sample's rails sit `width / 2` either side of the centreline,
    /// perpendicular to the secant towards the next sample.
    pub fn ribbon(&self, steps: usize) -> Vec<RibbonSample> {
        let segments = self.segment_count();
        let steps = steps.max(1);
        if segments == 0 {
            return Vec::new();
        }

        let total = segments * steps;
        let params: Vec<f64> = (0..=total)
            .map(|i| {
                let seg = (i / steps).min(segments - 1);
                let local = (i - seg * steps) as f64 / steps as f64;
                seg as f64 + local
            })
            .collect();
        let centers: Vec<Point2> = params.iter().map(|&t| self.point(t)).collect();

        let half_width = self.width / 2.0;
        let mut samples = Vec::with_capacity(centers.len());
        let mut last_perp = Point2::default();

        for (i, (&t, &center)) in params.iter().zip(&centers).enumerate() {
            let secant = if i + 1 < centers.len() {
                centers[i + 1] - center
            } else {
                center - centers[i - 1]
            };

            // Degenerate secants (coincident samples) keep the previous offset
            let perp = Point2::new(secant.z, -secant.x).normalized();
            let perp = if perp.length() > 0.0 { perp } else { last_perp };
            last_perp = perp;

            let offset = perp * half_width;
            samples.push(RibbonSample {
                t,
                progress: i as f64 / total as f64,
                center,
                left: center - offset,
                right: center + offset,
            });
        }

        samples
    }

    /// Build the ribbon as a quad strip at a constant `elevation`.
    ///
    /// `u` follows strip progress, `v` is 0 on the left rail and 1 on the right.
    pub fn ribbon_mesh(&self, steps: usize, elevation: f64) -> Mesh {
        let samples = self.ribbon(steps);
        let mut mesh = Mesh::with_capacity(samples.len() * 2, samples.len().saturating_sub(1) * 6);
        let y = elevation as f32;
        let up = [0.0, 1.0, 0.0];

        for sample in &samples {
            let u = sample.progress as f32;
            mesh.push_vertex(Vertex::new(
                [sample.left.x as f32, y, sample.left.z as f32],
                up,
                [u, 0.0],
            ));
            mesh.push_vertex(Vertex::new(
                [sample.right.x as f32, y, sample.right.z as f32],
                up,
                [u, 1.0],
            ));
        }

        for i in 1..samples.len() as u32 {
            let prev_left = (i - 1) * 2;
            let prev_right = prev_left + 1;
            let left = i * 2;
            let right = left + 1;
            if sample_is_forward_ccw(&samples, i as usize) {
                mesh.push_quad(prev_left, left, right, prev_right);
            } else {
                mesh.push_quad(prev_left, prev_right, right, left);
            }
        }

        mesh
    }
}

/// Whether `prev_left -> left -> right` winds counter-clockwise seen from +Y.
fn sample_is_forward_ccw(samples: &[RibbonSample], i: usize) -> bool {
    let a = samples[i - 1].left;
    let b = samples[i].left;
    let c = samples[i].right;
    // Y component of (b - a) × (c - a) in XZ
    let ab = b - a;
    let ac = c - a;
    ab.z * ac.x - ab.x * ac.z >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Point2, b: Point2) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.z - b.z).abs() < 1e-9
    }

    fn s_curve() -> RoadPath {
        let mut road = RoadPath::new(2.0, Point2::new(0.0, 0.0));
        road.add_segment(1.0, 3.0, 3.0, 3.0, 4.0, 0.0);
        road.add_segment(5.0, -3.0, 7.0, -3.0, 8.0, 0.0);
        road.add_segment(9.0, 2.0, 10.0, 4.0, 12.0, 4.0);
        road
    }

    #[test]
    fn add_segment_grows_by_three_points() {
        let road = s_curve();
        assert_eq!(road.segment_count(), 3);
        assert_eq!(road.point_count(), 1 + 3 * 3);
    }

    #[test]
    fn endpoints_match_first_and_last_control_points() {
        let road = s_curve();
        assert!(approx(road.point(0.0), road.control_point(0)));
        assert!(approx(road.point(3.0), road.control_point(9)));
    }

    #[test]
    fn integer_parameters_hit_segment_boundaries() {
        let road = s_curve();
        for k in 0..=road.segment_count() {
            assert!(
                approx(road.point(k as f64), road.control_point(3 * k)),
                "t = {k}"
            );
        }
    }

    #[test]
    fn spine_and_incremental_layouts_agree() {
        let built = s_curve();
        let loaded = RoadPath::from_spine(2.0, &built.spine()).unwrap();
        assert_eq!(built, loaded);
    }

    #[test]
    fn spine_with_bad_point_count_is_rejected() {
        // 2 points is not 1 + 3n
        assert!(RoadPath::from_spine(1.0, &[0.0, 0.0, 1.0, 1.0]).is_err());
        // odd number of coordinates
        assert!(RoadPath::from_spine(1.0, &[0.0, 0.0, 1.0]).is_err());
        // a bare start point is a valid zero-segment path
        assert_eq!(RoadPath::from_spine(1.0, &[0.0, 0.0]).unwrap().segment_count(), 0);
    }

    #[test]
    fn tangent_matches_finite_difference() {
        let road = s_curve();
        let t = 1.37;
        let h = 1e-6;
        let numeric = (road.point(t + h) - road.point(t - h)) * (1.0 / (2.0 * h));
        let analytic = road.tangent(t);
        assert!((numeric.x - analytic.x).abs() < 1e-4);
        assert!((numeric.z - analytic.z).abs() < 1e-4);
    }

    #[test]
    fn straight_ribbon_rails_are_half_width_from_centre() {
        let mut road = RoadPath::new(3.0, Point2::new(0.0, 0.0));
        road.add_segment(1.0, 0.0, 2.0, 0.0, 3.0, 0.0);

        let samples = road.ribbon(DEFAULT_RIBBON_STEPS);
        assert_eq!(samples.len(), DEFAULT_RIBBON_STEPS + 1);
        for s in &samples {
            assert!((s.left.distance(&s.center) - 1.5).abs() < 1e-9);
            assert!((s.right.distance(&s.center) - 1.5).abs() < 1e-9);
            // perpendicular to a road along +X lies along Z
            assert!((s.left.x - s.center.x).abs() < 1e-9);
        }
        assert!((samples.last().unwrap().progress - 1.0).abs() < 1e-12);
        assert!(approx(samples.last().unwrap().center, Point2::new(3.0, 0.0)));
    }

    #[test]
    fn ribbon_mesh_is_a_continuous_strip() {
        let road = s_curve();
        let mesh = road.ribbon_mesh(DEFAULT_RIBBON_STEPS, 0.5);
        let samples = 3 * DEFAULT_RIBBON_STEPS + 1;
        assert_eq!(mesh.vertex_count(), samples * 2);
        assert_eq!(mesh.triangle_count(), (samples - 1) * 2);
        assert!(mesh.vertices.iter().all(|v| (v.position[1] - 0.5).abs() < 1e-6));
    }

    #[test]
    fn ribbon_triangles_face_up() {
        let mut road = RoadPath::new(1.0, Point2::new(0.0, 0.0));
        road.add_segment(4.0, 0.0, 8.0, 4.0, 12.0, 4.0);
        road.add_segment(16.0, 4.0, 20.0, 0.0, 24.0, 0.0);
        let mesh = road.ribbon_mesh(4, 0.0);
        for tri in mesh.indices.chunks(3) {
            let a = crate::Vec3::from_array(mesh.vertices[tri[0] as usize].position);
            let b = crate::Vec3::from_array(mesh.vertices[tri[1] as usize].position);
            let c = crate::Vec3::from_array(mesh.vertices[tri[2] as usize].position);
            assert!((b - a).cross(&(c - a)).y >= -1e-6);
        }
    }

    #[test]
    fn zero_segment_path_has_no_ribbon() {
        let road = RoadPath::new(1.0, Point2::new(2.0, 2.0));
        assert!(road.ribbon(10).is_empty());
        assert_eq!(road.point(0.0), Point2::new(2.0, 2.0));
    }
}
