//! Eraser: resets square blocks to `EMPTY`.

use super::{BrushAction, BrushState, Gesture};
use crate::color::CellColor;
use crate::layer::{LayerSet, PREVIEW_LAYER};
use crate::paint::Painter;

/// Eraser.
///
/// Erased cells are written before the preview is rebuilt: the rebuild
/// repaints the whole surface, which is what removes them from the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eraser {
    /// Block side length in cells.
    pub scale: i64,
}

impl Eraser {
    pub fn from_state(state: &BrushState) -> Self {
        Self {
            scale: state.scale(),
        }
    }
}

impl BrushAction for Eraser {
    fn apply(&self, gesture: &Gesture<'_>, layers: &mut LayerSet, painter: &mut Painter<'_>) {
        let block = (self.scale, self.scale);

        if gesture.phase.is_down() {
            if let Some(layer) = layers.get_mut(gesture.active_layer) {
                painter.paint_rect(layer, gesture.cell, block, CellColor::EMPTY);
            }
        }

        painter.clear(layers, PREVIEW_LAYER);
        if let Some(preview) = layers.get_mut(PREVIEW_LAYER) {
            painter.paint_rect(preview, gesture.cell, block, CellColor::ERASER_INDICATOR);
        }
    }
}
