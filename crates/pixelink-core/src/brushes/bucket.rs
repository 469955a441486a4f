//! Bucket: flood fills from the cursor.

use super::{BrushAction, BrushProperty, BrushState, Gesture, GesturePhase};
use crate::color::CellColor;
use crate::fill::{flood_fill, replace_color};
use crate::layer::{LayerSet, PREVIEW_LAYER};
use crate::paint::Painter;

/// Bucket fill.
///
/// Fires once per press; held moves only move the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Fill only the connected region around the seed.
    pub contiguous: bool,
}

impl Bucket {
    pub fn from_state(state: &BrushState) -> Self {
        Self {
            contiguous: state.flag(BrushProperty::Contiguous),
        }
    }
}

impl BrushAction for Bucket {
    fn apply(&self, gesture: &Gesture<'_>, layers: &mut LayerSet, painter: &mut Painter<'_>) {
        if gesture.phase == GesturePhase::Press {
            if let Some(layer) = layers.get_mut(gesture.active_layer) {
                let changed = if self.contiguous {
                    flood_fill(layer, gesture.cell, gesture.color)
                } else {
                    replace_color(layer, gesture.cell, gesture.color)
                };
                log::debug!("Bucket filled {} cells on '{}'", changed, gesture.active_layer);
            }
        }

        // The fill only touched cells; the full repaint puts it on screen.
        painter.clear(layers, PREVIEW_LAYER);
        if let Some(preview) = layers.get_mut(PREVIEW_LAYER) {
            painter.paint_cell(preview, gesture.cell, CellColor::INDICATOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::brushes::tests::BrushBench;
    use crate::brushes::{BrushKind, BrushProperty, GesturePhase, PropertyValue};
    use crate::color::CellColor;
    use crate::grid::CellCoord;
    use crate::input::Modifiers;
    use crate::layer::DEFAULT_LAYER;
    use crate::paint::PaintCommand;

    #[test]
    fn test_fills_empty_layer() {
        let mut bench = BrushBench::new(4, 4);
        let state = BrushKind::Bucket.default_state();
        bench.run_with(
            &state,
            CellCoord::new(0, 0),
            GesturePhase::Press,
            Some(CellCoord::new(0, 0)),
            CellColor::BLUE,
            Modifiers::default(),
        );

        assert!(bench.drawing().cells().all(|(_, c)| c == CellColor::BLUE));
        let blue_fills = bench
            .sink
            .commands
            .iter()
            .filter(|c| matches!(c, PaintCommand::Fill { color, .. } if *color == CellColor::BLUE))
            .count();
        assert_eq!(blue_fills, 16);
    }

    #[test]
    fn test_hold_does_not_fill() {
        let mut bench = BrushBench::new(4, 4);
        let state = BrushKind::Bucket.default_state();
        bench.run(&state, CellCoord::new(0, 0), GesturePhase::Hold, None);
        bench.run(&state, CellCoord::new(1, 1), GesturePhase::Hover, None);

        assert!(bench.drawing().is_blank());
        let preview: Vec<_> = bench.preview().painted_cells().collect();
        assert_eq!(preview, vec![(CellCoord::new(1, 1), CellColor::INDICATOR)]);
    }

    #[test]
    fn test_fires_once_per_press() {
        let mut bench = BrushBench::new(3, 1);
        let state = BrushKind::Bucket.default_state();
        let start = Some(CellCoord::new(0, 0));
        bench.run(&state, CellCoord::new(0, 0), GesturePhase::Press, start);
        assert!(bench.drawing().cells().all(|(_, c)| c == CellColor::RED));

        // Carve a hole, then keep holding over it: no refill.
        bench.layers.get_mut(DEFAULT_LAYER).unwrap().set(1, 0, CellColor::EMPTY);
        bench.run(&state, CellCoord::new(1, 0), GesturePhase::Hold, start);
        assert_eq!(bench.drawing().get(1, 0), Some(CellColor::EMPTY));
    }

    #[test]
    fn test_non_contiguous_replaces_everywhere() {
        let mut bench = BrushBench::new(3, 1);
        {
            let layer = bench.layers.get_mut(DEFAULT_LAYER).unwrap();
            layer.set(1, 0, CellColor::GREEN);
        }
        let mut state = BrushKind::Bucket.default_state();
        state.set(BrushProperty::Contiguous, PropertyValue::Flag(false));
        bench.run(&state, CellCoord::new(0, 0), GesturePhase::Press, None);

        assert_eq!(bench.drawing().get(0, 0), Some(CellColor::RED));
        assert_eq!(bench.drawing().get(1, 0), Some(CellColor::GREEN));
        assert_eq!(bench.drawing().get(2, 0), Some(CellColor::RED));
    }
}
