//! Layers of cells and the ordered set composited for display.

use crate::color::CellColor;
use crate::grid::{CellCoord, GridSize};
use std::collections::HashMap;
use std::sync::Arc;

/// Name of the transient brush preview layer.
pub const PREVIEW_LAYER: &str = "brush";

/// Name of the default drawing layer.
pub const DEFAULT_LAYER: &str = "layer 1";

/// A full grid of cells.
///
/// Cell storage is shared copy-on-write between clones, so snapshotting a
/// layer is cheap while later writes never reach the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    size: GridSize,
    /// Row-major cells, `y * width + x`.
    cells: Arc<Vec<CellColor>>,
}

impl Layer {
    /// Create a layer with every cell `EMPTY`.
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: Arc::new(vec![CellColor::EMPTY; size.cell_count()]),
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        self.size
            .contains(x, y)
            .then(|| y as usize * self.size.width as usize + x as usize)
    }

    /// Read a cell, or `None` when out of range.
    pub fn get(&self, x: u32, y: u32) -> Option<CellColor> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Write a cell. Out-of-range coordinates are silently ignored.
    pub fn set(&mut self, x: u32, y: u32, color: CellColor) {
        if let Some(i) = self.index(x, y) {
            if self.cells[i] != color {
                Arc::make_mut(&mut self.cells)[i] = color;
            }
        }
    }

    /// Reset every cell to `EMPTY`.
    pub fn clear(&mut self) {
        self.fill(CellColor::EMPTY);
    }

    /// Set every cell to one color.
    pub fn fill(&mut self, color: CellColor) {
        if self.cells.iter().any(|&c| c != color) {
            self.cells = Arc::new(vec![color; self.size.cell_count()]);
        }
    }

    /// Whether every cell is `EMPTY`.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(CellColor::is_empty)
    }

    /// All cells with their coordinates, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, CellColor)> + '_ {
        let width = self.size.width;
        self.cells.iter().enumerate().map(move |(i, &color)| {
            let i = i as u32;
            (CellCoord::new(i % width, i / width), color)
        })
    }

    /// Cells that are not `EMPTY`.
    pub fn painted_cells(&self) -> impl Iterator<Item = (CellCoord, CellColor)> + '_ {
        self.cells().filter(|(_, color)| !color.is_empty())
    }

    /// Whether two layers share their cell storage.
    pub fn shares_storage_with(&self, other: &Layer) -> bool {
        Arc::ptr_eq(&self.cells, &other.cells)
    }
}

/// Ordered, keyed collection of layers.
///
/// Later layers composite on top of earlier ones. Every layer has the set's
/// grid size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSet {
    size: GridSize,
    layers: HashMap<String, Layer>,
    /// Composite order (bottom to top).
    order: Vec<String>,
}

impl LayerSet {
    /// Create an empty set for a grid size.
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            layers: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// The drawing layer plus the preview layer on top.
    pub fn with_defaults(size: GridSize, drawing_layer: &str) -> Self {
        let mut set = Self::new(size);
        set.insert(drawing_layer, Layer::new(size));
        set.insert(PREVIEW_LAYER, Layer::new(size));
        set
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Insert a layer at the top, replacing any layer with the same name in
    /// place.
    ///
    /// Panics if the layer was built for a different grid size.
    pub fn insert(&mut self, name: &str, layer: Layer) {
        assert_eq!(
            layer.size(),
            self.size,
            "layer '{name}' does not match the grid size"
        );
        if self.layers.insert(name.to_string(), layer).is_none() {
            self.order.push(name.to_string());
        }
    }

    /// Insert a new empty layer just below `anchor`, or on top when the
    /// anchor is missing. Returns false if the name is taken.
    pub fn insert_below(&mut self, name: &str, anchor: &str) -> bool {
        if self.layers.contains_key(name) {
            return false;
        }
        let pos = self
            .order
            .iter()
            .position(|n| n == anchor)
            .unwrap_or(self.order.len());
        self.layers.insert(name.to_string(), Layer::new(self.size));
        self.order.insert(pos, name.to_string());
        true
    }

    /// Remove a layer by name.
    pub fn remove(&mut self, name: &str) -> Option<Layer> {
        self.order.retain(|n| n != name);
        self.layers.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Layer> {
        self.layers.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Layer> {
        self.layers.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.layers.contains_key(name)
    }

    /// Layer names in composite order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Layers in composite order (bottom to top).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Layer)> {
        self.order
            .iter()
            .filter_map(|name| self.layers.get(name).map(|l| (name.as_str(), l)))
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Replace every layer with an empty one of a new size, keeping names
    /// and order.
    pub fn rebuild(&mut self, size: GridSize) {
        self.size = size;
        for layer in self.layers.values_mut() {
            *layer = Layer::new(size);
        }
    }
}
