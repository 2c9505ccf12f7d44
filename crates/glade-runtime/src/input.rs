//! Navigation commands and keyboard bindings

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use glade_core::GladeError;
use winit::keyboard::KeyCode;

/// One discrete navigation command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveForward,
    MoveBackward,
    TurnLeft,
    TurnRight,
    ToggleAvatar,
    ToggleTorch,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::MoveForward,
        Command::MoveBackward,
        Command::TurnLeft,
        Command::TurnRight,
        Command::ToggleAvatar,
        Command::ToggleTorch,
    ];

    /// Name used in config files
    pub fn name(&self) -> &'static str {
        match self {
            Command::MoveForward => "move_forward",
            Command::MoveBackward => "move_backward",
            Command::TurnLeft => "turn_left",
            Command::TurnRight => "turn_right",
            Command::ToggleAvatar => "toggle_avatar",
            Command::ToggleTorch => "toggle_torch",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = GladeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| GladeError::ConfigError(format!("unknown command '{s}'")))
    }
}

/// Parse a key name as written in config files ("W", "KeyW", "ArrowUp", "Space").
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let key = match name {
        "Space" | "space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        "Escape" => KeyCode::Escape,
        "Tab" => KeyCode::Tab,
        "ArrowUp" | "Up" => KeyCode::ArrowUp,
        "ArrowDown" | "Down" => KeyCode::ArrowDown,
        "ArrowLeft" | "Left" => KeyCode::ArrowLeft,
        "ArrowRight" | "Right" => KeyCode::ArrowRight,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ControlLeft" => KeyCode::ControlLeft,
        _ => {
            let letter = name.strip_prefix("Key").unwrap_or(name);
            let mut chars = letter.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => letter_key(c.to_ascii_uppercase())?,
                _ => return None,
            }
        }
    };
    Some(key)
}

fn letter_key(c: char) -> Option<KeyCode> {
    const LETTERS: [KeyCode; 26] = [
        KeyCode::KeyA,
        KeyCode::KeyB,
        KeyCode::KeyC,
        KeyCode::KeyD,
        KeyCode::KeyE,
        KeyCode::KeyF,
        KeyCode::KeyG,
        KeyCode::KeyH,
        KeyCode::KeyI,
        KeyCode::KeyJ,
        KeyCode::KeyK,
        KeyCode::KeyL,
        KeyCode::KeyM,
        KeyCode::KeyN,
        KeyCode::KeyO,
        KeyCode::KeyP,
        KeyCode::KeyQ,
        KeyCode::KeyR,
        KeyCode::KeyS,
        KeyCode::KeyT,
        KeyCode::KeyU,
        KeyCode::KeyV,
        KeyCode::KeyW,
        KeyCode::KeyX,
        KeyCode::KeyY,
        KeyCode::KeyZ,
    ];
    if c.is_ascii_uppercase() {
        Some(LETTERS[(c as u8 - b'A') as usize])
    } else {
        None
    }
}

/// Command bindings: command -> list of keys
#[derive(Debug, Clone)]
pub struct KeyBindings {
    action_map: HashMap<Command, Vec<KeyCode>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut map = HashMap::new();
        map.insert(Command::MoveForward, vec![KeyCode::KeyW, KeyCode::ArrowUp]);
        map.insert(Command::MoveBackward, vec![KeyCode::KeyS, KeyCode::ArrowDown]);
        map.insert(Command::TurnRight, vec![KeyCode::KeyD, KeyCode::ArrowRight]);
        map.insert(Command::TurnLeft, vec![KeyCode::KeyA, KeyCode::ArrowLeft]);
        map.insert(Command::ToggleAvatar, vec![KeyCode::Space]);
        map.insert(Command::ToggleTorch, vec![KeyCode::KeyT]);
        Self { action_map: map }
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the keys bound to a command
    pub fn bind(&mut self, command: Command, keys: Vec<KeyCode>) {
        self.action_map.insert(command, keys);
    }

    /// Apply `command name -> key names` overrides from config
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, Vec<String>>) -> glade_core::Result<()> {
        for (name, key_names) in overrides {
            let command: Command = name.parse()?;
            let keys = key_names
                .iter()
                .map(|k| {
                    parse_key(k).ok_or_else(|| {
                        GladeError::ConfigError(format!("unknown key '{k}' bound to {name}"))
                    })
                })
                .collect::<glade_core::Result<Vec<_>>>()?;
            self.bind(command, keys);
        }
        Ok(())
    }

    /// The command a key fires, if any
    pub fn command_for(&self, key: KeyCode) -> Option<Command> {
        Command::ALL.into_iter().find(|c| {
            self.action_map
                .get(c)
                .is_some_and(|keys| keys.contains(&key))
        })
    }

    pub fn keys_for(&self, command: Command) -> &[KeyCode] {
        self.action_map.get(&command).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Turns raw key events into commands. A command fires once, on release.
#[derive(Debug, Default)]
pub struct InputState {
    bindings: KeyBindings,
    keys_down: HashSet<KeyCode>,
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            keys_down: HashSet::new(),
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Process a key press event
    pub fn process_key_down(&mut self, key: KeyCode) {
        self.keys_down.insert(key);
    }

    /// Process a key release event, returning the bound command
    pub fn process_key_up(&mut self, key: KeyCode) -> Option<Command> {
        self.keys_down.remove(&key);
        self.bindings.command_for(key)
    }

    /// Is a key currently held down?
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.command_for(KeyCode::KeyW), Some(Command::MoveForward));
        assert_eq!(bindings.command_for(KeyCode::ArrowUp), Some(Command::MoveForward));
        assert_eq!(bindings.command_for(KeyCode::ArrowDown), Some(Command::MoveBackward));
        assert_eq!(bindings.command_for(KeyCode::KeyD), Some(Command::TurnRight));
        assert_eq!(bindings.command_for(KeyCode::ArrowLeft), Some(Command::TurnLeft));
        assert_eq!(bindings.command_for(KeyCode::Space), Some(Command::ToggleAvatar));
        assert_eq!(bindings.command_for(KeyCode::KeyT), Some(Command::ToggleTorch));
        assert_eq!(bindings.command_for(KeyCode::KeyQ), None);
    }

    #[test]
    fn test_command_fires_on_release() {
        let mut input = InputState::default();

        input.process_key_down(KeyCode::KeyW);
        assert!(input.is_key_down(KeyCode::KeyW));

        assert_eq!(input.process_key_up(KeyCode::KeyW), Some(Command::MoveForward));
        assert!(!input.is_key_down(KeyCode::KeyW));
    }

    #[test]
    fn test_overrides() {
        let mut bindings = KeyBindings::default();
        let mut overrides = HashMap::new();
        overrides.insert("toggle_torch".to_string(), vec!["f".to_string(), "KeyL".to_string()]);
        bindings.apply_overrides(&overrides).unwrap();

        assert_eq!(bindings.command_for(KeyCode::KeyF), Some(Command::ToggleTorch));
        assert_eq!(bindings.command_for(KeyCode::KeyL), Some(Command::ToggleTorch));
        assert_eq!(bindings.command_for(KeyCode::KeyT), None);
    }

    #[test]
    fn test_bad_overrides_are_rejected() {
        let mut bindings = KeyBindings::default();

        let mut unknown_command = HashMap::new();
        unknown_command.insert("jump".to_string(), vec!["J".to_string()]);
        assert!(bindings.apply_overrides(&unknown_command).is_err());

        let mut unknown_key = HashMap::new();
        unknown_key.insert("turn_left".to_string(), vec!["F13".to_string()]);
        assert!(bindings.apply_overrides(&unknown_key).is_err());
    }

    #[test]
    fn test_parse_key_names() {
        assert_eq!(parse_key("W"), Some(KeyCode::KeyW));
        assert_eq!(parse_key("KeyZ"), Some(KeyCode::KeyZ));
        assert_eq!(parse_key("Up"), Some(KeyCode::ArrowUp));
        assert_eq!(parse_key("space"), Some(KeyCode::Space));
        assert_eq!(parse_key("1"), None);
        assert_eq!(parse_key("Keyboard"), None);
    }
}
