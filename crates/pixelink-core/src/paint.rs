//! Paint sink abstraction and the layer painting operations.

use crate::color::CellColor;
use crate::grid::{CellCoord, GridMetrics};
use crate::layer::{Layer, LayerSet};
use kurbo::Rect;

/// Host drawing surface.
///
/// This is the only thing the engine requires of its host. Rectangles are in
/// device pixels.
pub trait PaintSink {
    /// Fill a rectangle with a color (source-over).
    fn fill_rect(&mut self, rect: Rect, color: CellColor);

    /// Reset a rectangle to fully transparent.
    fn clear_rect(&mut self, rect: Rect);
}

/// A recorded paint call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintCommand {
    Fill { rect: Rect, color: CellColor },
    Clear { rect: Rect },
}

impl PaintCommand {
    /// Replay this command into a sink.
    pub fn apply(&self, sink: &mut dyn PaintSink) {
        match *self {
            PaintCommand::Fill { rect, color } => sink.fill_rect(rect, color),
            PaintCommand::Clear { rect } => sink.clear_rect(rect),
        }
    }
}

/// Paint commands queued for the host.
///
/// A clear that covers the whole surface makes everything queued before it
/// irrelevant, so those commands are dropped.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    surface: Rect,
    commands: Vec<PaintCommand>,
}

impl DisplayList {
    /// Create a list for a surface.
    pub fn new(surface: Rect) -> Self {
        Self {
            surface,
            commands: Vec::new(),
        }
    }

    /// Update the surface bounds (after a zoom or grid change).
    pub fn set_surface(&mut self, surface: Rect) {
        self.surface = surface;
    }

    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replay every queued command into `sink` and empty the list.
    pub fn drain_into(&mut self, sink: &mut dyn PaintSink) {
        for command in self.commands.drain(..) {
            command.apply(sink);
        }
    }
}

impl PaintSink for DisplayList {
    fn fill_rect(&mut self, rect: Rect, color: CellColor) {
        self.commands.push(PaintCommand::Fill { rect, color });
    }

    fn clear_rect(&mut self, rect: Rect) {
        if rect.union(self.surface) == rect {
            self.commands.clear();
        }
        self.commands.push(PaintCommand::Clear { rect });
    }
}

/// Paints layer cells onto a sink at the current grid metrics.
pub struct Painter<'a> {
    metrics: &'a GridMetrics,
    sink: &'a mut dyn PaintSink,
}

impl<'a> Painter<'a> {
    pub fn new(metrics: &'a GridMetrics, sink: &'a mut dyn PaintSink) -> Self {
        Self { metrics, sink }
    }

    pub fn metrics(&self) -> &GridMetrics {
        self.metrics
    }

    /// Paint one cell on the device and store it in the layer.
    ///
    /// Out-of-range cells are skipped entirely.
    pub fn paint_cell(&mut self, layer: &mut Layer, cell: CellCoord, color: CellColor) {
        if !layer.size().contains(cell.x, cell.y) {
            return;
        }
        self.sink.fill_rect(self.metrics.cell_rect(cell), color);
        layer.set(cell.x, cell.y, color);
    }

    /// Paint a `|dx| x |dy|` block anchored at `origin`, stepping in the
    /// sign direction of each component. Cells falling off the grid are
    /// skipped, not clamped.
    pub fn paint_rect(
        &mut self,
        layer: &mut Layer,
        origin: CellCoord,
        size: (i64, i64),
        color: CellColor,
    ) {
        for cell in block_cells(origin, size) {
            self.paint_cell(layer, cell, color);
        }
    }

    /// Repaint every non-`EMPTY` cell of a layer.
    pub fn refresh(&mut self, layer: &Layer) {
        for (cell, color) in layer.painted_cells() {
            self.sink.fill_rect(self.metrics.cell_rect(cell), color);
        }
    }

    /// Repaint every layer in composite order.
    pub fn refresh_all(&mut self, layers: &LayerSet) {
        for (_, layer) in layers.iter() {
            self.refresh(layer);
        }
    }

    /// Clear the whole surface, reset the named layer to `EMPTY` and repaint
    /// every layer. A missing layer name still clears and repaints.
    pub fn clear(&mut self, layers: &mut LayerSet, layer_name: &str) {
        self.sink.clear_rect(self.metrics.surface_rect());
        if let Some(layer) = layers.get_mut(layer_name) {
            layer.clear();
        }
        self.refresh_all(layers);
    }

    /// Clear the whole surface and repaint every layer.
    pub fn repaint(&mut self, layers: &LayerSet) {
        self.sink.clear_rect(self.metrics.surface_rect());
        self.refresh_all(layers);
    }
}

/// Cells of a block anchored at `origin` spanning `|dx| x |dy|` cells in the
/// sign direction of each component. Cells with a negative coordinate are
/// dropped.
pub fn block_cells(origin: CellCoord, size: (i64, i64)) -> impl Iterator<Item = CellCoord> {
    let (dx, dy) = size;
    let (step_x, step_y) = (dx.signum(), dy.signum());
    let (ox, oy) = (origin.x as i64, origin.y as i64);
    (0..dx.abs()).flat_map(move |i| {
        (0..dy.abs()).filter_map(move |j| {
            let x = ox + i * step_x;
            let y = oy + j * step_y;
            match (u32::try_from(x), u32::try_from(y)) {
                (Ok(x), Ok(y)) => Some(CellCoord::new(x, y)),
                _ => None,
            }
        })
    })
}
