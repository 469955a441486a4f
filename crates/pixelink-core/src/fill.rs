//! Flood fill over layer cells.

use crate::color::CellColor;
use crate::grid::CellCoord;
use crate::layer::Layer;

/// Replace the 4-connected region of cells matching the seed's color.
///
/// The target color is read from the seed before any write. A cell is filled
/// only while its current color equals the target, so the fill never crosses
/// a cell of another color. Returns the number of cells changed. Seeds
/// outside the layer and seeds already holding `replacement` change nothing.
///
/// Uses an explicit stack, so region size does not bound call depth.
pub fn flood_fill(layer: &mut Layer, seed: CellCoord, replacement: CellColor) -> usize {
    let Some(target) = layer.get(seed.x, seed.y) else {
        return 0;
    };
    if target == replacement {
        return 0;
    }

    let (width, height) = (layer.width(), layer.height());
    let mut filled = 0;
    let mut stack = vec![seed];

    while let Some(CellCoord { x, y }) = stack.pop() {
        if layer.get(x, y) != Some(target) {
            continue;
        }
        layer.set(x, y, replacement);
        filled += 1;

        if x + 1 < width {
            stack.push(CellCoord::new(x + 1, y));
        }
        if x > 0 {
            stack.push(CellCoord::new(x - 1, y));
        }
        if y + 1 < height {
            stack.push(CellCoord::new(x, y + 1));
        }
        if y > 0 {
            stack.push(CellCoord::new(x, y - 1));
        }
    }

    log::trace!("Flood fill at ({}, {}) changed {} cells", seed.x, seed.y, filled);
    filled
}

/// Replace every cell matching the seed's color, connected or not.
pub fn replace_color(layer: &mut Layer, seed: CellCoord, replacement: CellColor) -> usize {
    let Some(target) = layer.get(seed.x, seed.y) else {
        return 0;
    };
    if target == replacement {
        return 0;
    }

    let matching: Vec<CellCoord> = layer
        .cells()
        .filter(|&(_, color)| color == target)
        .map(|(cell, _)| cell)
        .collect();
    for cell in &matching {
        layer.set(cell.x, cell.y, replacement);
    }
    matching.len()
}
