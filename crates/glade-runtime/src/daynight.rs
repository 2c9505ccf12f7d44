//! Day-night lighting cycle
//!
//! The active light (sun by day, moon by night) climbs along a fixed arc.
//! While rising only its horizontal component advances; once past the
//! zenith it also drops. When it sinks below the horizon (`y > 1`) the arc
//! restarts and the other light takes over.

use glade_core::Vec3;

/// Horizon ceiling; crossing it ends the current day or night
pub const HORIZON: f32 = 1.0;
/// Start-of-arc direction after a reset
pub const ARC_START: (f32, f32) = (-1.99, -1.0);
pub const STEP_X: f32 = 0.01;
pub const STEP_Y: f32 = 0.007;
/// Green channel loss per day tick
pub const SUN_FADE: f32 = 0.001;

pub const SUN_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
pub const MOON_COLOR: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightSource {
    Sun,
    Moon,
}

/// What the renderer must push this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightUpdate {
    pub source: LightSource,
    /// Homogeneous direction (`w = 0`)
    pub direction: [f32; 4],
    /// Only the sun changes colour
    pub color: Option<[f32; 4]>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayNightCycle {
    direction: [f32; 4],
    sun_color: [f32; 4],
    rising: bool,
    is_day: bool,
}

impl DayNightCycle {
    /// Start a day with the sun at `sunlight`
    pub fn new(sunlight: Vec3) -> Self {
        Self {
            direction: [sunlight.x, sunlight.y, sunlight.z, 0.0],
            sun_color: SUN_COLOR,
            rising: true,
            is_day: true,
        }
    }

    pub fn direction(&self) -> [f32; 4] {
        self.direction
    }

    pub fn sun_color(&self) -> [f32; 4] {
        self.sun_color
    }

    pub fn is_day(&self) -> bool {
        self.is_day
    }

    pub fn is_rising(&self) -> bool {
        self.rising
    }

    pub fn active_source(&self) -> LightSource {
        if self.is_day {
            LightSource::Sun
        } else {
            LightSource::Moon
        }
    }

    /// Advance one frame
    pub fn tick(&mut self) -> LightUpdate {
        if self.direction[1] > HORIZON {
            self.direction[0] = ARC_START.0;
            self.direction[1] = ARC_START.1;
            self.sun_color[1] = 1.0;
            self.rising = true;
            self.is_day = !self.is_day;
            tracing::info!("{} begins", if self.is_day { "day" } else { "night" });
        }

        self.direction[0] += STEP_X;
        if self.rising {
            if self.direction[0] > 0.0 {
                self.rising = false;
            }
        } else {
            self.direction[1] += STEP_Y;
        }

        if self.is_day {
            self.sun_color[1] -= SUN_FADE;
            LightUpdate {
                source: LightSource::Sun,
                direction: self.direction,
                color: Some(self.sun_color),
            }
        } else {
            LightUpdate {
                source: LightSource::Moon,
                direction: self.direction,
                color: None,
            }
        }
    }
}
