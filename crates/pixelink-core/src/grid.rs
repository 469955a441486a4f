//! Grid geometry: mapping between pointer space and discrete cells.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Integer address of a cell in the pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: u32,
    pub y: u32,
}

impl CellCoord {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Dimensions of the pixel grid, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    /// Create a grid size. Both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "grid must have at least one cell, got {width}x{height}"
        );
        Self { width, height }
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether the coordinate addresses a cell inside the grid.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Aspect ratio of the grid (width over height).
    pub fn pixel_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// Map a pointer position to the cell under it.
///
/// The cell width is `(zoom * pixel_ratio) / grid_width`; the result is
/// `floor(|pointer - origin| / cell_width)` per axis. No clamping is done,
/// so the returned cell may lie outside the grid.
pub fn cell_of(
    pointer: Point,
    origin: Point,
    zoom: f64,
    pixel_ratio: f64,
    grid_width: u32,
) -> CellCoord {
    let cell_width = (zoom * pixel_ratio) / grid_width as f64;
    let local = pointer - origin;
    // `as` saturates for values beyond u32::MAX.
    CellCoord {
        x: (local.x.abs() / cell_width).floor() as u32,
        y: (local.y.abs() / cell_width).floor() as u32,
    }
}

/// Device-space geometry of the canvas at the current zoom.
///
/// The drawing surface is `zoom * pixel_ratio` wide and `zoom` high, so every
/// cell is a square of `cell_width()` device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridMetrics {
    /// Grid dimensions in cells.
    pub grid: GridSize,
    /// Height of the drawing surface in device pixels.
    pub zoom: f64,
    /// Extra device pixels added to each painted cell to hide seams.
    pub seam_overlap: f64,
}

impl GridMetrics {
    /// Create metrics for a grid at a zoom level.
    pub fn new(grid: GridSize, zoom: f64) -> Self {
        assert_valid_zoom(zoom);
        Self {
            grid,
            zoom,
            seam_overlap: 1.0,
        }
    }

    /// Set the seam overlap.
    pub fn with_seam_overlap(mut self, seam_overlap: f64) -> Self {
        self.seam_overlap = seam_overlap;
        self
    }

    /// Grid aspect ratio.
    pub fn pixel_ratio(&self) -> f64 {
        self.grid.pixel_ratio()
    }

    /// Width of one cell in device pixels.
    pub fn cell_width(&self) -> f64 {
        (self.zoom * self.pixel_ratio()) / self.grid.width as f64
    }

    /// Size of the whole drawing surface in device pixels.
    pub fn surface_size(&self) -> Size {
        Size::new(self.zoom * self.pixel_ratio(), self.zoom)
    }

    /// The whole drawing surface.
    pub fn surface_rect(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.surface_size())
    }

    /// Device rectangle painted for a cell, including the seam overlap.
    pub fn cell_rect(&self, cell: CellCoord) -> Rect {
        let width = self.cell_width();
        Rect::from_origin_size(
            Point::new(cell.x as f64 * width, cell.y as f64 * width),
            Size::new(width + self.seam_overlap, width + self.seam_overlap),
        )
    }

    /// Map a pointer position to a cell, given the surface origin.
    pub fn cell_of(&self, pointer: Point, origin: Point) -> CellCoord {
        cell_of(
            pointer,
            origin,
            self.zoom,
            self.pixel_ratio(),
            self.grid.width,
        )
    }

    /// Change the zoom level.
    pub fn set_zoom(&mut self, zoom: f64) {
        assert_valid_zoom(zoom);
        self.zoom = zoom;
    }
}

fn assert_valid_zoom(zoom: f64) {
    assert!(
        zoom.is_finite() && zoom > 0.0,
        "zoom must be positive and finite, got {zoom}"
    );
}
