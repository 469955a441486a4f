//! Text dumps of layers and the rendered surface.

use pixelink_core::{CanvasSession, CellColor, CellCoord, GridSize, Layer};
use pixelink_render::FrameBuffer;
use std::fmt::Write;

const EMPTY_CELL: &str = ".";

/// One line per grid row; cells as `#rrggbbaa`, `.` when transparent.
fn format_cells(size: GridSize, color_at: impl Fn(CellCoord) -> Option<CellColor>) -> String {
    let mut out = String::new();
    for y in 0..size.height {
        let row: Vec<String> = (0..size.width)
            .map(|x| match color_at(CellCoord::new(x, y)) {
                Some(color) if !color.is_empty() => HexColor(color).to_string(),
                _ => EMPTY_CELL.to_string(),
            })
            .collect();
        let _ = writeln!(out, "{}", row.join(" "));
    }
    out
}

struct HexColor(CellColor);

impl std::fmt::Display for HexColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let CellColor { r, g, b, a } = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

/// Stored cells of one layer.
pub fn format_layer(layer: &Layer) -> String {
    format_cells(layer.size(), |cell| layer.get(cell.x, cell.y))
}

/// What the device shows at each cell center.
pub fn format_surface(session: &CanvasSession, target: &FrameBuffer) -> String {
    format_cells(session.grid_size(), |cell| target.sample_cell(session.metrics(), cell))
}

/// Full report: the active layer followed by the rendered surface.
pub fn report(session: &CanvasSession, target: &FrameBuffer) -> String {
    let mut out = String::new();
    match session.layer(session.active_layer()) {
        Some(layer) => {
            let _ = writeln!(out, "layer '{}':", session.active_layer());
            out.push_str(&format_layer(layer));
        }
        None => {
            let _ = writeln!(out, "layer '{}': (missing)", session.active_layer());
        }
    }
    out.push_str("surface:\n");
    out.push_str(&format_surface(session, target));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_layer() {
        let mut layer = Layer::new(GridSize::new(3, 2));
        layer.set(1, 0, CellColor::RED);
        layer.set(2, 1, CellColor::new(0, 0, 255, 128));
        assert_eq!(format_layer(&layer), ". #ff0000ff .\n. . #0000ff80\n");
    }

    #[test]
    fn test_report_missing_layer() {
        let mut session = CanvasSession::default();
        session.set_active_layer("ghost");
        let fb = FrameBuffer::for_metrics(session.metrics());
        let text = report(&session, &fb);
        assert!(text.starts_with("layer 'ghost': (missing)\nsurface:\n"));
        assert_eq!(text.lines().count(), 2 + 16);
    }
}
