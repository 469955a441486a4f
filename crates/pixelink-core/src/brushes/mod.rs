//! Brush system: brush kinds, their properties and gesture dispatch.

mod bucket;
mod eraser;
mod pencil;
mod select;

pub use bucket::Bucket;
pub use eraser::Eraser;
pub use pencil::Pencil;
pub use select::RectangleSelect;

use crate::color::CellColor;
use crate::error::CanvasError;
use crate::grid::CellCoord;
use crate::input::Modifiers;
use crate::layer::LayerSet;
use crate::paint::Painter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Available brushes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushKind {
    Pencil,
    Eraser,
    Bucket,
    Select,
}

impl BrushKind {
    /// Every registered brush.
    pub const ALL: [BrushKind; 4] = [
        BrushKind::Pencil,
        BrushKind::Eraser,
        BrushKind::Bucket,
        BrushKind::Select,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BrushKind::Pencil => "pencil",
            BrushKind::Eraser => "eraser",
            BrushKind::Bucket => "bucket",
            BrushKind::Select => "select",
        }
    }

    /// Properties this brush reads.
    pub fn properties(self) -> &'static [BrushProperty] {
        match self {
            BrushKind::Pencil | BrushKind::Eraser => &[BrushProperty::Scale],
            BrushKind::Bucket => &[BrushProperty::Contiguous],
            BrushKind::Select => &[],
        }
    }

    /// Whether this brush reads a property.
    pub fn owns(self, property: BrushProperty) -> bool {
        self.properties().contains(&property)
    }

    /// Initial state for this brush.
    pub fn default_state(self) -> BrushState {
        BrushState {
            kind: self,
            properties: self
                .properties()
                .iter()
                .map(|&p| (p, p.default_value()))
                .collect(),
        }
    }
}

impl fmt::Display for BrushKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BrushKind {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BrushKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CanvasError::UnknownBrush(s.to_string()))
    }
}

/// Brush property identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushProperty {
    /// Side length of the square block painted per cell (number).
    Scale,
    /// Fill only the connected region instead of every matching cell (flag).
    Contiguous,
}

impl BrushProperty {
    pub fn name(self) -> &'static str {
        match self {
            BrushProperty::Scale => "scale",
            BrushProperty::Contiguous => "contiguous",
        }
    }

    pub fn default_value(self) -> PropertyValue {
        match self {
            BrushProperty::Scale => PropertyValue::Number(1.0),
            BrushProperty::Contiguous => PropertyValue::Flag(true),
        }
    }
}

impl FromStr for BrushProperty {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scale" => Ok(BrushProperty::Scale),
            "contiguous" => Ok(BrushProperty::Contiguous),
            _ => Err(CanvasError::UnknownProperty(s.to_string())),
        }
    }
}

/// Value of a brush property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    Flag(bool),
}

impl PropertyValue {
    pub fn as_number(self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(n),
            PropertyValue::Flag(_) => None,
        }
    }

    pub fn as_flag(self) -> Option<bool> {
        match self {
            PropertyValue::Flag(b) => Some(b),
            PropertyValue::Number(_) => None,
        }
    }
}

/// A brush kind plus its property values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrushState {
    pub kind: BrushKind,
    pub properties: Vec<(BrushProperty, PropertyValue)>,
}

impl BrushState {
    /// Look up a property value.
    pub fn get(&self, property: BrushProperty) -> Option<PropertyValue> {
        self.properties
            .iter()
            .find(|(p, _)| *p == property)
            .map(|&(_, value)| value)
    }

    /// Set a property. Properties the brush does not read are ignored;
    /// returns whether the value was stored.
    pub fn set(&mut self, property: BrushProperty, value: PropertyValue) -> bool {
        if !self.kind.owns(property) {
            log::debug!("Ignoring property '{}' for {} brush", property.name(), self.kind);
            return false;
        }
        match self.properties.iter_mut().find(|(p, _)| *p == property) {
            Some((_, slot)) => *slot = value,
            None => self.properties.push((property, value)),
        }
        true
    }

    /// Numeric property, falling back to its default when missing or of the
    /// wrong type.
    pub fn number(&self, property: BrushProperty) -> f64 {
        self.get(property)
            .and_then(PropertyValue::as_number)
            .or_else(|| property.default_value().as_number())
            .unwrap_or_default()
    }

    /// Boolean property, falling back to its default when missing or of the
    /// wrong type.
    pub fn flag(&self, property: BrushProperty) -> bool {
        self.get(property)
            .and_then(PropertyValue::as_flag)
            .or_else(|| property.default_value().as_flag())
            .unwrap_or_default()
    }

    /// Block size for square brushes: rounded, at least 1.
    pub fn scale(&self) -> i64 {
        let scale = self.number(BrushProperty::Scale);
        if scale.is_finite() {
            (scale.round() as i64).max(1)
        } else {
            1
        }
    }
}

/// Where a brush call sits in the pointer gesture lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// Pointer moving with no button held.
    Hover,
    /// The pointer-down itself, dispatched once per gesture.
    Press,
    /// Pointer moving while held.
    Hold,
    /// The pointer-up ending the gesture.
    Release,
}

impl GesturePhase {
    /// Whether the pointer is held during this call.
    pub fn is_down(self) -> bool {
        matches!(self, GesturePhase::Press | GesturePhase::Hold)
    }
}

/// Everything a brush sees for one dispatch.
#[derive(Debug, Clone, Copy)]
pub struct Gesture<'a> {
    /// Cell under the pointer.
    pub cell: CellCoord,
    pub phase: GesturePhase,
    /// Cell recorded at the most recent pointer-down.
    pub start: Option<CellCoord>,
    /// Name of the layer strokes commit to.
    pub active_layer: &'a str,
    pub color: CellColor,
    pub modifiers: Modifiers,
}

/// Shared brush contract.
///
/// A brush redraws the preview layer on every call and commits to the active
/// layer only while the gesture is down. It is handed the layer set fresh on
/// each call and keeps nothing between calls.
pub trait BrushAction {
    fn apply(&self, gesture: &Gesture<'_>, layers: &mut LayerSet, painter: &mut Painter<'_>);
}

/// Run the brush described by `state` for one gesture event.
pub fn dispatch(
    state: &BrushState,
    gesture: &Gesture<'_>,
    layers: &mut LayerSet,
    painter: &mut Painter<'_>,
) {
    match state.kind {
        BrushKind::Pencil => Pencil::from_state(state).apply(gesture, layers, painter),
        BrushKind::Eraser => Eraser::from_state(state).apply(gesture, layers, painter),
        BrushKind::Bucket => Bucket::from_state(state).apply(gesture, layers, painter),
        BrushKind::Select => RectangleSelect.apply(gesture, layers, painter),
    }
}
