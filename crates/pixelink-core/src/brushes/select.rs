//! Rectangle select: marquee feedback on the preview layer.

use super::{BrushAction, Gesture};
use crate::color::CellColor;
use crate::grid::CellCoord;
use crate::layer::{LayerSet, PREVIEW_LAYER};
use crate::paint::Painter;

/// Rectangular marquee. Never touches the active layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectangleSelect;

impl RectangleSelect {
    /// Signed block size covering `start` through `current`, both inclusive.
    /// With `square` set both sides take the larger span.
    pub fn span(start: CellCoord, current: CellCoord, square: bool) -> (i64, i64) {
        let dx = current.x as i64 - start.x as i64;
        let dy = current.y as i64 - start.y as i64;
        let (mut w, mut h) = (dx.abs() + 1, dy.abs() + 1);
        if square {
            let side = w.max(h);
            w = side;
            h = side;
        }
        let sign = |d: i64| if d < 0 { -1 } else { 1 };
        (w * sign(dx), h * sign(dy))
    }
}

impl BrushAction for RectangleSelect {
    fn apply(&self, gesture: &Gesture<'_>, layers: &mut LayerSet, painter: &mut Painter<'_>) {
        painter.clear(layers, PREVIEW_LAYER);

        if !gesture.phase.is_down() {
            return;
        }
        let Some(start) = gesture.start else {
            return;
        };
        let size = Self::span(start, gesture.cell, gesture.modifiers.shift);
        if let Some(preview) = layers.get_mut(PREVIEW_LAYER) {
            painter.paint_rect(preview, start, size, CellColor::INDICATOR);
        }
    }
}
