//! Pencil: paints square blocks in the paint color.

use super::{BrushAction, BrushState, Gesture};
use crate::layer::{LayerSet, PREVIEW_LAYER};
use crate::paint::Painter;

/// Freehand pencil.
///
/// Commits on the press and again on every held move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pencil {
    /// Block side length in cells.
    pub scale: i64,
}

impl Pencil {
    pub fn from_state(state: &BrushState) -> Self {
        Self {
            scale: state.scale(),
        }
    }
}

impl BrushAction for Pencil {
    fn apply(&self, gesture: &Gesture<'_>, layers: &mut LayerSet, painter: &mut Painter<'_>) {
        let block = (self.scale, self.scale);

        painter.clear(layers, PREVIEW_LAYER);
        if let Some(preview) = layers.get_mut(PREVIEW_LAYER) {
            painter.paint_rect(preview, gesture.cell, block, gesture.color);
        }

        if !gesture.phase.is_down() {
            return;
        }
        if let Some(layer) = layers.get_mut(gesture.active_layer) {
            painter.paint_rect(layer, gesture.cell, block, gesture.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::brushes::tests::BrushBench;
    use crate::brushes::{BrushKind, BrushProperty, GesturePhase, PropertyValue};
    use crate::color::CellColor;
    use crate::grid::CellCoord;

    #[test]
    fn test_hover_only_previews() {
        let mut bench = BrushBench::new(4, 4);
        let state = BrushKind::Pencil.default_state();
        bench.run(&state, CellCoord::new(1, 1), GesturePhase::Hover, None);

        assert!(bench.drawing().is_blank());
        assert_eq!(bench.preview().get(1, 1), Some(CellColor::RED));
    }

    #[test]
    fn test_press_commits_single_cell() {
        let mut bench = BrushBench::new(4, 4);
        let state = BrushKind::Pencil.default_state();
        bench.run(&state, CellCoord::new(1, 1), GesturePhase::Press, Some(CellCoord::new(1, 1)));

        let painted: Vec<_> = bench.drawing().painted_cells().collect();
        assert_eq!(painted, vec![(CellCoord::new(1, 1), CellColor::RED)]);
    }

    #[test]
    fn test_hold_keeps_committing() {
        let mut bench = BrushBench::new(4, 4);
        let state = BrushKind::Pencil.default_state();
        let start = Some(CellCoord::new(0, 0));
        bench.run(&state, CellCoord::new(0, 0), GesturePhase::Press, start);
        bench.run(&state, CellCoord::new(1, 0), GesturePhase::Hold, start);
        bench.run(&state, CellCoord::new(2, 0), GesturePhase::Hold, start);
        bench.run(&state, CellCoord::new(3, 3), GesturePhase::Release, start);

        assert_eq!(bench.drawing().painted_cells().count(), 3);
        assert_eq!(bench.drawing().get(3, 3), Some(CellColor::EMPTY));
        // Preview only tracks the latest position.
        let preview: Vec<_> = bench.preview().painted_cells().collect();
        assert_eq!(preview, vec![(CellCoord::new(3, 3), CellColor::RED)]);
    }

    #[test]
    fn test_scaled_block() {
        let mut bench = BrushBench::new(4, 4);
        let mut state = BrushKind::Pencil.default_state();
        state.set(BrushProperty::Scale, PropertyValue::Number(3.0));
        bench.run(&state, CellCoord::new(2, 2), GesturePhase::Press, None);

        // Only the in-bounds part of the 3x3 block lands.
        let cells: Vec<_> = bench.drawing().painted_cells().map(|(c, _)| c).collect();
        assert_eq!(
            cells,
            vec![
                CellCoord::new(2, 2),
                CellCoord::new(3, 2),
                CellCoord::new(2, 3),
                CellCoord::new(3, 3),
            ]
        );
    }

    #[test]
    fn test_unresolved_layer_is_noop() {
        let mut bench = BrushBench::new(4, 4);
        bench.layers.remove(crate::layer::DEFAULT_LAYER);
        let state = BrushKind::Pencil.default_state();
        bench.run(&state, CellCoord::new(1, 1), GesturePhase::Press, None);

        assert_eq!(bench.preview().get(1, 1), Some(CellColor::RED));
        assert_eq!(bench.layers.len(), 1);
    }
}
