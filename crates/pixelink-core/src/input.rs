//! Input events delivered by the host shell.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer events in host pointer space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, modifiers: Modifiers },
    Move { position: Point },
    Up,
}

/// Editor commands bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommand {
    /// Restore the state before the last gesture.
    Undo,
    /// Clear the active drawing layer.
    ClearLayer,
}

impl KeyCommand {
    /// Resolve a key press to a command.
    pub fn from_shortcut(key: &str, modifiers: Modifiers) -> Option<KeyCommand> {
        match key {
            "z" | "Z" if modifiers.command() && !modifiers.shift => Some(KeyCommand::Undo),
            "Delete" | "Backspace" => Some(KeyCommand::ClearLayer),
            _ => None,
        }
    }

    /// Human-readable shortcut (e.g. "Ctrl+Z").
    pub fn shortcut(&self) -> &'static str {
        match self {
            KeyCommand::Undo => "Ctrl+Z",
            KeyCommand::ClearLayer => "Delete",
        }
    }
}
