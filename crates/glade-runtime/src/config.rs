//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variable: `GLADE_LOG`
//! 2. Project-local: `.glade/config.toml`
//! 3. Global: `~/.glade/config.toml`

use glade_core::{GladeError, Result, DEFAULT_RIBBON_STEPS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::input::KeyBindings;

pub const LOG_ENV_VAR: &str = "GLADE_LOG";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_TARGET_FPS: u32 = 60;

/// `[simulation]` table as written on disk; unset keys fall through to lower layers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationSection {
    #[serde(default)]
    pub target_fps: Option<u32>,
    #[serde(default)]
    pub road_steps: Option<usize>,
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GladeConfigFile {
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub simulation: SimulationSection,
    /// command name -> key names
    #[serde(default)]
    pub bindings: HashMap<String, Vec<String>>,
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GladeConfig {
    pub log_level: String,
    pub target_fps: u32,
    pub road_steps: usize,
    pub bindings: HashMap<String, Vec<String>>,
}

impl Default for GladeConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            target_fps: DEFAULT_TARGET_FPS,
            road_steps: DEFAULT_RIBBON_STEPS,
            bindings: HashMap::new(),
        }
    }
}

impl GladeConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = GladeConfig::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config.merge(Self::load_file(&global_path)?);
            }
        }

        let local_path = PathBuf::from(".glade/config.toml");
        if local_path.exists() {
            config.merge(Self::load_file(&local_path)?);
        }

        config.apply_log_override(std::env::var(LOG_ENV_VAR).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load config from a specific file path only (for testing)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = GladeConfig::default();
        config.merge(Self::load_file(path)?);
        config.validate()?;
        Ok(config)
    }

    /// Duration of one frame at the target rate, in seconds.
    ///
    /// The simulation itself has no clock; frame drivers and reports use this
    /// to convert frame counts into time.
    pub fn frame_seconds(&self) -> f64 {
        1.0 / self.target_fps as f64
    }

    /// Key bindings with this config's overrides applied to the defaults
    pub fn key_bindings(&self) -> Result<KeyBindings> {
        let mut bindings = KeyBindings::default();
        bindings.apply_overrides(&self.bindings)?;
        Ok(bindings)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".glade").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<GladeConfigFile> {
        let content = std::fs::read_to_string(path)?;
        let config: GladeConfigFile = toml::from_str(&content).map_err(|e| {
            GladeError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })?;
        Ok(config)
    }

    fn merge(&mut self, overlay: GladeConfigFile) {
        if let Some(level) = overlay.log_level {
            self.log_level = level;
        }
        if let Some(fps) = overlay.simulation.target_fps {
            self.target_fps = fps;
        }
        if let Some(steps) = overlay.simulation.road_steps {
            self.road_steps = steps;
        }
        self.bindings.extend(overlay.bindings);
    }

    fn apply_log_override(&mut self, level: Option<String>) {
        if let Some(level) = level.filter(|l| !l.trim().is_empty()) {
            self.log_level = level;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.target_fps == 0 {
            return Err(GladeError::ConfigError("target_fps must be positive".into()));
        }
        if self.road_steps == 0 {
            return Err(GladeError::ConfigError("road_steps must be positive".into()));
        }
        self.key_bindings().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Command;
    use winit::keyboard::KeyCode;

    fn temp_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_config_from_file() {
        let (_dir, path) = temp_config(
            r#"
log_level = "debug"

[simulation]
target_fps = 30

[bindings]
toggle_torch = ["L"]
"#,
        );
        let config = GladeConfig::load_from_file(&path).unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.target_fps, 30);
        assert!((config.frame_seconds() - 1.0 / 30.0).abs() < 1e-12);
        assert_eq!(config.road_steps, DEFAULT_RIBBON_STEPS);

        let bindings = config.key_bindings().unwrap();
        assert_eq!(bindings.command_for(KeyCode::KeyL), Some(Command::ToggleTorch));
        assert_eq!(bindings.command_for(KeyCode::KeyW), Some(Command::MoveForward));
    }

    #[test]
    fn test_later_layers_win() {
        let mut config = GladeConfig::default();
        config.merge(GladeConfigFile {
            log_level: Some("warn".into()),
            simulation: SimulationSection {
                target_fps: Some(24),
                road_steps: Some(4),
            },
            bindings: HashMap::new(),
        });
        config.merge(GladeConfigFile {
            simulation: SimulationSection {
                target_fps: None,
                road_steps: Some(16),
            },
            ..Default::default()
        });

        assert_eq!(config.log_level, "warn");
        assert_eq!(config.target_fps, 24);
        assert_eq!(config.road_steps, 16);
    }

    #[test]
    fn test_env_log_override() {
        let mut config = GladeConfig::default();
        config.apply_log_override(Some("glade_scene=trace".into()));
        assert_eq!(config.log_level, "glade_scene=trace");

        config.apply_log_override(Some("  ".into()));
        assert_eq!(config.log_level, "glade_scene=trace");
        config.apply_log_override(None);
        assert_eq!(config.log_level, "glade_scene=trace");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let (_dir, path) = temp_config("[simulation]\nroad_steps = 0\n");
        assert!(GladeConfig::load_from_file(&path).is_err());

        let (_dir, path) = temp_config("[bindings]\nfly = [\"F\"]\n");
        assert!(GladeConfig::load_from_file(&path).is_err());

        let (_dir, path) = temp_config("log_level = [");
        assert!(matches!(
            GladeConfig::load_from_file(&path),
            Err(GladeError::ConfigError(_))
        ));
    }
}
