//! Glade Runtime - per-frame simulation
//!
//! Provides the pieces the frame loop drives:
//! - `CameraState`: first-person camera plus the bouncing avatar
//! - `DayNightCycle`: sun and moon moving along their arc
//! - `KeyBindings` / `InputState`: key events to navigation commands
//! - `Simulation`: a loaded scene with all of the above
//! - `GladeConfig`: layered TOML configuration

mod camera;
mod config;
mod daynight;
mod input;
mod simulation;

pub use camera::{CameraState, CameraView, SpotLight};
pub use config::{GladeConfig, GladeConfigFile, SimulationSection, LOG_ENV_VAR};
pub use daynight::{DayNightCycle, LightSource, LightUpdate, MOON_COLOR, SUN_COLOR};
pub use input::{parse_key, Command, InputState, KeyBindings};
pub use simulation::{FrameLights, Simulation};
