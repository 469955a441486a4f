//! Scripted input replayed against a canvas session.

use kurbo::Point;
use pixelink_core::{
    BrushKind, CanvasError, CanvasResult, CanvasSession, CellColor, KeyCommand, Modifiers,
    PropertyValue, SessionConfig,
};
use pixelink_render::FrameBuffer;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A recorded input session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Session settings; defaults apply when absent.
    #[serde(default)]
    pub config: Option<SessionConfig>,
    pub events: Vec<ScriptEvent>,
}

/// One host event. Pointer positions are in device pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        ctrl: bool,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp,
    Key {
        command: KeyCommand,
    },
    /// `null` deselects the brush.
    SetBrush {
        brush: Option<BrushKind>,
    },
    SetProperty {
        brush: BrushKind,
        name: String,
        value: PropertyValue,
    },
    SetColor {
        color: CellColor,
    },
    SetZoom {
        zoom: f64,
    },
    SetGrid {
        width: u32,
        height: u32,
    },
    SetLayer {
        name: String,
    },
    AddLayer {
        name: String,
    },
    RemoveLayer {
        name: String,
    },
}

impl Script {
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        let script: Self = serde_json::from_str(json)?;
        if let Some(config) = &script.config {
            config.validate()?;
        }
        Ok(script)
    }

    pub fn load(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Apply every event in order, rendering into `target` after each one.
    pub fn replay(
        &self,
        session: &mut CanvasSession,
        target: &mut FrameBuffer,
    ) -> CanvasResult<()> {
        for (index, event) in self.events.iter().enumerate() {
            log::trace!("Event {}: {:?}", index, event);
            event.apply(session)?;
            target.resize(session.metrics().surface_size());
            session.render(target);
        }
        log::info!("Replayed {} events", self.events.len());
        Ok(())
    }
}

impl ScriptEvent {
    /// Forward this event to a session.
    ///
    /// Values the session would treat as contract violations are rejected
    /// here instead.
    pub fn apply(&self, session: &mut CanvasSession) -> CanvasResult<()> {
        match self {
            ScriptEvent::PointerDown { x, y, shift, ctrl } => {
                let modifiers = Modifiers {
                    shift: *shift,
                    ctrl: *ctrl,
                    ..Modifiers::default()
                };
                session.on_pointer_down(Point::new(*x, *y), modifiers);
            }
            ScriptEvent::PointerMove { x, y } => session.on_pointer_move(Point::new(*x, *y)),
            ScriptEvent::PointerUp => session.on_pointer_up(),
            ScriptEvent::Key { command } => {
                if !session.on_key_command(*command) {
                    log::debug!("Key command {:?} had no effect", command);
                }
            }
            ScriptEvent::SetBrush { brush } => session.set_active_brush(*brush),
            ScriptEvent::SetProperty { brush, name, value } => {
                if !session.set_brush_property(*brush, name, *value) {
                    log::warn!("Ignored property '{}' for {} brush", name, brush);
                }
            }
            ScriptEvent::SetColor { color } => session.set_paint_color(*color),
            ScriptEvent::SetZoom { zoom } => {
                if !zoom.is_finite() || *zoom <= 0.0 {
                    return Err(CanvasError::InvalidConfig(format!(
                        "zoom must be positive, got {}",
                        zoom
                    )));
                }
                session.set_zoom(*zoom);
            }
            ScriptEvent::SetGrid { width, height } => {
                if *width == 0 || *height == 0 {
                    return Err(CanvasError::InvalidConfig(format!(
                        "grid must have at least one cell, got {}x{}",
                        width, height
                    )));
                }
                session.set_grid_size(*width, *height);
            }
            ScriptEvent::SetLayer { name } => session.set_active_layer(name),
            ScriptEvent::AddLayer { name } => {
                if !session.add_layer(name) {
                    log::warn!("Layer '{}' already exists", name);
                }
            }
            ScriptEvent::RemoveLayer { name } => {
                if !session.remove_layer(name) {
                    log::warn!("Layer '{}' cannot be removed", name);
                }
            }
        }
        Ok(())
    }
}
