//! Canvas session: owns the layers, history and brush selection and turns
//! host events into brush dispatches.

use crate::brushes::{self, BrushKind, BrushState, Gesture, GesturePhase, PropertyValue};
use crate::color::CellColor;
use crate::config::SessionConfig;
use crate::grid::{CellCoord, GridMetrics, GridSize};
use crate::history::HistoryStack;
use crate::input::{KeyCommand, Modifiers, PointerEvent};
use crate::layer::{Layer, LayerSet, PREVIEW_LAYER};
use crate::paint::{DisplayList, PaintSink, Painter};
use kurbo::{Point, Rect};
use std::collections::HashMap;

/// Pointer state across one gesture.
#[derive(Debug, Clone, Copy, Default)]
struct PointerState {
    down: bool,
    /// Cell at the most recent pointer-down.
    start: Option<CellCoord>,
    /// Cell at the most recent pointer event.
    last: Option<CellCoord>,
    modifiers: Modifiers,
    /// Whether this gesture's pre-gesture state is on the history stack.
    recorded: bool,
}

/// Runtime canvas state.
#[derive(Debug, Clone)]
pub struct CanvasSession {
    layers: LayerSet,
    history: HistoryStack,
    brushes: HashMap<BrushKind, BrushState>,
    active_brush: Option<BrushKind>,
    active_layer: String,
    paint_color: CellColor,
    metrics: GridMetrics,
    /// Top-left of the drawing surface in pointer space.
    origin: Point,
    pointer: PointerState,
    /// Paint commands not yet rendered by the host.
    display: DisplayList,
}

impl Default for CanvasSession {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

impl CanvasSession {
    /// Create a session from a config.
    ///
    /// Panics on values `SessionConfig::validate` rejects.
    pub fn new(config: &SessionConfig) -> Self {
        let size = GridSize::new(config.grid_width, config.grid_height);
        let metrics = GridMetrics::new(size, config.zoom).with_seam_overlap(config.seam_overlap);
        let layers = LayerSet::with_defaults(size, &config.drawing_layer);
        let history = HistoryStack::new(layers.clone(), config.max_undo_history);
        let brushes = BrushKind::ALL
            .into_iter()
            .map(|kind| (kind, kind.default_state()))
            .collect();

        log::info!(
            "Canvas session created: {}x{} grid, zoom {}",
            size.width,
            size.height,
            config.zoom
        );

        let mut session = Self {
            layers,
            history,
            brushes,
            active_brush: config.active_brush,
            active_layer: config.drawing_layer.clone(),
            paint_color: config.paint_color,
            metrics,
            origin: Point::ZERO,
            pointer: PointerState::default(),
            display: DisplayList::new(metrics.surface_rect()),
        };
        session.queue_repaint(metrics.surface_rect());
        session
    }

    // --- Pointer and key events ---

    /// Route a pointer event to the matching handler.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position, modifiers } => self.on_pointer_down(position, modifiers),
            PointerEvent::Move { position } => self.on_pointer_move(position),
            PointerEvent::Up => self.on_pointer_up(),
        }
    }

    /// Begin a gesture and dispatch the press.
    pub fn on_pointer_down(&mut self, position: Point, modifiers: Modifiers) {
        if self.pointer.down {
            log::debug!("Pointer down while a gesture is active; ignoring");
            return;
        }
        let cell = self.cell_at(position);
        self.pointer = PointerState {
            down: true,
            start: Some(cell),
            last: Some(cell),
            modifiers,
            recorded: false,
        };
        log::debug!("Gesture started at ({}, {})", cell.x, cell.y);
        self.dispatch(cell, GesturePhase::Press);
    }

    /// Pointer moved: hold while down, hover otherwise.
    pub fn on_pointer_move(&mut self, position: Point) {
        let cell = self.cell_at(position);
        self.pointer.last = Some(cell);
        let phase = if self.pointer.down {
            GesturePhase::Hold
        } else {
            GesturePhase::Hover
        };
        self.dispatch(cell, phase);
    }

    /// End the current gesture.
    pub fn on_pointer_up(&mut self) {
        if !self.pointer.down {
            return;
        }
        self.pointer.down = false;
        self.pointer.modifiers = Modifiers::default();
        log::debug!("Gesture ended");
        if let Some(cell) = self.pointer.last {
            self.dispatch(cell, GesturePhase::Release);
        }
    }

    /// Run a key command. Returns whether it changed anything.
    pub fn on_key_command(&mut self, command: KeyCommand) -> bool {
        match command {
            KeyCommand::Undo => self.undo(),
            KeyCommand::ClearLayer => self.clear_active_layer(),
        }
    }

    /// Restore the layers to their state before the last gesture.
    ///
    /// Ignored while a gesture is active or when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if self.pointer.down {
            log::debug!("Undo ignored during an active gesture");
            return false;
        }
        let Some(snapshot) = self.history.undo() else {
            log::debug!("Nothing to undo");
            return false;
        };
        assert_eq!(
            snapshot.size(),
            self.layers.size(),
            "history snapshot does not match the grid size"
        );

        self.layers = snapshot;
        let mut painter = Painter::new(&self.metrics, &mut self.display);
        painter.clear(&mut self.layers, PREVIEW_LAYER);
        log::info!("Undo performed, {} entries left", self.history.len());
        true
    }

    /// Clear the active drawing layer as an undoable step.
    pub fn clear_active_layer(&mut self) -> bool {
        if self.pointer.down || !self.layers.contains(&self.active_layer) {
            return false;
        }
        self.history.begin_gesture(&self.layers);
        let mut painter = Painter::new(&self.metrics, &mut self.display);
        painter.clear(&mut self.layers, &self.active_layer);
        log::info!("Cleared layer '{}'", self.active_layer);
        true
    }

    // --- Settings ---

    /// Change the zoom level and repaint everything.
    pub fn set_zoom(&mut self, zoom: f64) {
        let old_surface = self.metrics.surface_rect();
        self.metrics.set_zoom(zoom);
        log::debug!("Zoom set to {}", zoom);
        self.queue_repaint(old_surface);
    }

    /// Rebuild every layer at a new grid size.
    ///
    /// Cell contents and history are discarded; layer names and order are
    /// kept. An active gesture is abandoned.
    pub fn set_grid_size(&mut self, width: u32, height: u32) {
        let size = GridSize::new(width, height);
        let old_surface = self.metrics.surface_rect();
        self.layers.rebuild(size);
        self.metrics.grid = size;
        self.history.reset(self.layers.clone());
        self.pointer = PointerState::default();
        log::info!("Grid rebuilt at {}x{}", width, height);
        self.queue_repaint(old_surface);
    }

    /// Set the top-left of the drawing surface in pointer space.
    pub fn set_canvas_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Choose the layer strokes commit to. The name need not exist.
    pub fn set_active_layer(&mut self, name: &str) {
        self.active_layer = name.to_string();
    }

    /// Choose the brush; `None` stops brush dispatch.
    pub fn set_active_brush(&mut self, kind: Option<BrushKind>) {
        if self.active_brush == kind {
            return;
        }
        self.active_brush = kind;
        // Drop the previous brush's cursor.
        let mut painter = Painter::new(&self.metrics, &mut self.display);
        painter.clear(&mut self.layers, PREVIEW_LAYER);
    }

    /// Set a brush property by name. Unknown names and properties the brush
    /// does not read are ignored; returns whether the value was stored.
    pub fn set_brush_property(
        &mut self,
        kind: BrushKind,
        name: &str,
        value: PropertyValue,
    ) -> bool {
        let property = match name.parse() {
            Ok(property) => property,
            Err(e) => {
                log::debug!("{}; ignoring", e);
                return false;
            }
        };
        self.brushes
            .entry(kind)
            .or_insert_with(|| kind.default_state())
            .set(property, value)
    }

    pub fn set_paint_color(&mut self, color: CellColor) {
        self.paint_color = color;
    }

    // --- Layer management ---

    /// Add an empty drawing layer beneath the preview layer.
    ///
    /// Recorded in history. Returns false if the name is taken.
    pub fn add_layer(&mut self, name: &str) -> bool {
        if self.layers.contains(name) {
            return false;
        }
        self.history.begin_gesture(&self.layers);
        self.layers.insert_below(name, PREVIEW_LAYER);
        let mut painter = Painter::new(&self.metrics, &mut self.display);
        painter.repaint(&self.layers);
        true
    }

    /// Remove a drawing layer. The preview layer cannot be removed.
    ///
    /// Recorded in history.
    pub fn remove_layer(&mut self, name: &str) -> bool {
        if name == PREVIEW_LAYER || !self.layers.contains(name) {
            return false;
        }
        self.history.begin_gesture(&self.layers);
        self.layers.remove(name);
        let mut painter = Painter::new(&self.metrics, &mut self.display);
        painter.repaint(&self.layers);
        true
    }

    // --- Rendering ---

    /// Hand every paint command queued since the last render to the host.
    pub fn render(&mut self, sink: &mut dyn PaintSink) {
        self.display.drain_into(sink);
    }

    /// Clear the host surface and blit every layer, discarding queued
    /// commands.
    pub fn render_full(&mut self, sink: &mut dyn PaintSink) {
        self.display = DisplayList::new(self.metrics.surface_rect());
        Painter::new(&self.metrics, sink).repaint(&self.layers);
    }

    // --- Accessors ---

    pub fn layers(&self) -> &LayerSet {
        &self.layers
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.get(name)
    }

    /// Layer names in composite order.
    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.names()
    }

    pub fn active_layer(&self) -> &str {
        &self.active_layer
    }

    pub fn active_brush(&self) -> Option<BrushKind> {
        self.active_brush
    }

    pub fn brush_state(&self, kind: BrushKind) -> Option<&BrushState> {
        self.brushes.get(&kind)
    }

    pub fn paint_color(&self) -> CellColor {
        self.paint_color
    }

    pub fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    pub fn grid_size(&self) -> GridSize {
        self.metrics.grid
    }

    pub fn zoom(&self) -> f64 {
        self.metrics.zoom
    }

    pub fn canvas_origin(&self) -> Point {
        self.origin
    }

    /// Whether the pointer is held.
    pub fn is_gesture_active(&self) -> bool {
        self.pointer.down
    }

    pub fn can_undo(&self) -> bool {
        !self.pointer.down && self.history.can_undo()
    }

    /// History entries, baseline included.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Paint commands waiting for `render`.
    pub fn pending_commands(&self) -> &DisplayList {
        &self.display
    }

    // --- Internals ---

    fn cell_at(&self, position: Point) -> CellCoord {
        self.metrics.cell_of(position, self.origin)
    }

    fn dispatch(&mut self, cell: CellCoord, phase: GesturePhase) {
        let Some(kind) = self.active_brush else {
            log::trace!("No active brush; skipping dispatch");
            return;
        };
        let Some(state) = self.brushes.get(&kind) else {
            return;
        };
        // Snapshot once per gesture, before the first brush that can commit.
        if self.pointer.down && !self.pointer.recorded {
            self.history.begin_gesture(&self.layers);
            self.pointer.recorded = true;
        }
        let gesture = Gesture {
            cell,
            phase,
            start: self.pointer.start,
            active_layer: &self.active_layer,
            color: self.paint_color,
            modifiers: self.pointer.modifiers,
        };
        let mut painter = Painter::new(&self.metrics, &mut self.display);
        brushes::dispatch(state, &gesture, &mut self.layers, &mut painter);
    }

    /// Queue a full repaint, clearing both the previous and current surface
    /// extents.
    fn queue_repaint(&mut self, previous_surface: Rect) {
        let surface = self.metrics.surface_rect();
        self.display.set_surface(surface);
        self.display.clear_rect(previous_surface.union(surface));
        Painter::new(&self.metrics, &mut self.display).refresh_all(&self.layers);
    }
}
