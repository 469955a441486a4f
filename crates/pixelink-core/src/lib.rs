//! Pixelink Core Library
//!
//! Platform-agnostic layer, brush and history logic for the Pixelink pixel
//! art canvas. The host supplies a [`PaintSink`] and forwards pointer and key
//! events to a [`CanvasSession`].

pub mod brushes;
pub mod color;
pub mod config;
pub mod error;
pub mod fill;
pub mod grid;
pub mod history;
pub mod input;
pub mod layer;
pub mod paint;
pub mod session;

pub use brushes::{BrushKind, BrushProperty, BrushState, GesturePhase, PropertyValue};
pub use color::CellColor;
pub use config::SessionConfig;
pub use error::{CanvasError, CanvasResult};
pub use fill::{flood_fill, replace_color};
pub use grid::{CellCoord, GridMetrics, GridSize, cell_of};
pub use history::{HistoryStack, MAX_UNDO_HISTORY};
pub use input::{KeyCommand, Modifiers, PointerEvent};
pub use layer::{DEFAULT_LAYER, Layer, LayerSet, PREVIEW_LAYER};
pub use paint::{DisplayList, PaintCommand, PaintSink, Painter};
pub use session::CanvasSession;
