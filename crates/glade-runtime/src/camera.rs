//! First-person camera with a terrain-following avatar
//!
//! [`CameraState`] is a plain value. Every command and every bounce frame
//! produces a new state; nothing is mutated in place.

use glade_core::{mat4_mul, Point2, Point3, Vec3};
use glade_terrain::Heightfield;

use crate::input::Command;

/// Yaw change per turn command, in radians
pub const TURN_STEP: f64 = 0.1;
/// Avatar spin change per turn command, in degrees
pub const SPIN_STEP: f64 = 5.7;
/// Camera eye height above the terrain ahead of it
pub const EYE_HEIGHT: f64 = 3.0;
/// Camera altitude used when the terrain ahead is off the grid
pub const FALLBACK_EYE_ALTITUDE: f64 = 3.0;
/// How far ahead of the camera the avatar walks
pub const AVATAR_OFFSET: f64 = 2.0;
/// Terrain altitude assumed under an avatar that is off the grid
pub const FALLBACK_AVATAR_GROUND: f64 = 1.2;
/// Avatar bounce band above the terrain
pub const BOUNCE_MIN: f64 = 0.5;
pub const BOUNCE_MAX: f64 = 1.8;

/// Camera and avatar state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Point3,
    /// Heading in radians; forward is `(sin yaw, -cos yaw)`
    pub yaw: f64,
    pub avatar_y: f64,
    pub avatar_velocity: f64,
    /// Avatar rotation about Y, in degrees
    pub avatar_spin: f64,
    pub show_avatar: bool,
    pub torch: bool,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: Point3::new(10.0, 3.0, 10.0),
            yaw: -0.8,
            avatar_y: 3.0 / 1.6,
            avatar_velocity: -0.1,
            avatar_spin: 0.0,
            show_avatar: true,
            torch: false,
        }
    }
}

impl CameraState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Horizontal unit vector the camera faces
    pub fn forward(&self) -> Point2 {
        Point2::new(self.yaw.sin(), -self.yaw.cos())
    }

    /// Ground point the avatar stands over
    fn avatar_ground(&self) -> Point2 {
        self.position.ground() + self.forward() * AVATAR_OFFSET
    }

    /// Where the avatar is drawn
    pub fn avatar_position(&self) -> Point3 {
        let ground = self.avatar_ground();
        Point3::new(ground.x, self.avatar_y, ground.z)
    }

    /// Apply one navigation command
    pub fn apply(self, command: Command, heightfield: &Heightfield) -> Self {
        let mut next = self;
        match command {
            Command::MoveForward => {
                let f = self.forward();
                next.position.x += f.x;
                next.position.z += f.z;
                next.position.y = next.eye_altitude(heightfield);
            }
            Command::MoveBackward => {
                let f = self.forward();
                next.position.x -= f.x;
                next.position.z -= f.z;
                next.position.y = next.eye_altitude(heightfield);
            }
            Command::TurnRight => {
                next.yaw += TURN_STEP;
                next.avatar_spin -= SPIN_STEP;
            }
            Command::TurnLeft => {
                next.yaw -= TURN_STEP;
                next.avatar_spin += SPIN_STEP;
            }
            Command::ToggleAvatar => next.show_avatar = !next.show_avatar,
            Command::ToggleTorch => next.torch = !next.torch,
        }
        next
    }

    /// Eye altitude for the current position: terrain under the avatar plus eye height
    fn eye_altitude(&self, heightfield: &Heightfield) -> f64 {
        let ground = self.avatar_ground();
        match heightfield.altitude(ground.x, ground.z) {
            Ok(alt) => alt + EYE_HEIGHT,
            Err(_) => FALLBACK_EYE_ALTITUDE,
        }
    }

    /// Advance the avatar bounce by one frame.
    ///
    /// The avatar stays within `[ground + 0.5, ground + 1.8]`; velocity flips
    /// and the position clamps on the frame it would leave that band.
    pub fn bounce(self, heightfield: &Heightfield) -> Self {
        let ground = self.avatar_ground();
        let alt = heightfield.altitude_or(ground.x, ground.z, FALLBACK_AVATAR_GROUND);
        let (lower, upper) = (alt + BOUNCE_MIN, alt + BOUNCE_MAX);

        let mut next = self;
        let y = self.avatar_y + self.avatar_velocity;
        if y < lower {
            next.avatar_velocity = -self.avatar_velocity;
            next.avatar_y = lower;
        } else if y > upper {
            next.avatar_velocity = -self.avatar_velocity;
            next.avatar_y = upper;
        } else {
            next.avatar_y = y;
        }
        next
    }

    /// Viewing parameters for this state
    pub fn view(&self) -> CameraView {
        let f = self.forward();
        let p = self.position;
        CameraView {
            eye: p.to_vec3(),
            target: Vec3::new((p.x + f.x) as f32, (p.y * 0.9) as f32, (p.z + f.z) as f32),
            up: Vec3::UP,
            fov: 60.0,
            aspect: 1.0,
            near: 2.0,
            far: 8.0,
        }
    }

    /// Spotlight carried by the camera
    pub fn torch_light(&self) -> SpotLight {
        let f = self.forward();
        let p = self.position;
        SpotLight {
            position: Vec3::new(p.x as f32, (p.y + 2.0) as f32, p.z as f32),
            direction: Vec3::new(f.x as f32, -0.6, f.z as f32),
            cutoff: 10.0,
            exponent: 4.0,
            color: [0.6, 0.6, 0.6, 1.0],
            enabled: self.torch,
        }
    }
}

/// Look-at camera with a perspective projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraView {
    /// Get the view matrix (4x4, column-major)
    pub fn view_matrix(&self) -> [[f32; 4]; 4] {
        let f = (self.target - self.eye).normalized();
        let s = f.cross(&self.up).normalized();
        let u = s.cross(&f);

        [
            [s.x, u.x, -f.x, 0.0],
            [s.y, u.y, -f.y, 0.0],
            [s.z, u.z, -f.z, 0.0],
            [-s.dot(&self.eye), -u.dot(&self.eye), f.dot(&self.eye), 1.0],
        ]
    }

    /// Get the projection matrix (4x4, column-major)
    pub fn projection_matrix(&self) -> [[f32; 4]; 4] {
        let f = 1.0 / (self.fov.to_radians() / 2.0).tan();
        let depth = self.far - self.near;

        [
            [f / self.aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, -(self.far + self.near) / depth, -1.0],
            [0.0, 0.0, -(2.0 * self.far * self.near) / depth, 0.0],
        ]
    }

    pub fn view_projection_matrix(&self) -> [[f32; 4]; 4] {
        mat4_mul(&self.projection_matrix(), &self.view_matrix())
    }
}

/// A cone light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub position: Vec3,
    pub direction: Vec3,
    /// Half-angle of the cone in degrees
    pub cutoff: f32,
    pub exponent: f32,
    pub color: [f32; 4],
    pub enabled: bool,
}
