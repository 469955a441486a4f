//! In-memory RGBA framebuffer.

use kurbo::{Rect, Size};
use pixelink_core::{CellColor, CellCoord, GridMetrics, PaintSink};

/// Software paint target with straight-alpha RGBA pixels.
///
/// A pixel is covered by a rectangle when its center lies inside it. Fills
/// blend source-over; clears reset to transparent.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<CellColor>,
}

impl FrameBuffer {
    /// Create a transparent framebuffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![CellColor::EMPTY; width as usize * height as usize],
        }
    }

    /// Create a framebuffer covering a drawing surface, rounding up.
    pub fn for_surface(size: Size) -> Self {
        let (width, height) = surface_pixels(size);
        Self::new(width, height)
    }

    /// Create a framebuffer for the surface of some grid metrics.
    pub fn for_metrics(metrics: &GridMetrics) -> Self {
        Self::for_surface(metrics.surface_size())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Resize to fit a surface. Contents are discarded when the size changes.
    pub fn resize(&mut self, size: Size) {
        let (width, height) = surface_pixels(size);
        if (width, height) == (self.width, self.height) {
            return;
        }
        log::debug!("Framebuffer resized to {}x{}", width, height);
        *self = Self::new(width, height);
    }

    /// Read one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<CellColor> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Color shown at the center of a grid cell.
    pub fn sample_cell(&self, metrics: &GridMetrics, cell: CellCoord) -> Option<CellColor> {
        let width = metrics.cell_width();
        let x = (cell.x as f64 + 0.5) * width;
        let y = (cell.y as f64 + 0.5) * width;
        self.pixel(x.floor() as u32, y.floor() as u32)
    }

    /// Whether every pixel is transparent.
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(CellColor::is_empty)
    }

    /// Raw pixels, row-major.
    pub fn pixels(&self) -> &[CellColor] {
        &self.pixels
    }

    /// Pixel index ranges covered by a rectangle, clipped to the buffer.
    fn covered(&self, rect: Rect) -> Option<(std::ops::Range<usize>, std::ops::Range<usize>)> {
        let span = |lo: f64, hi: f64, limit: u32| {
            let start = (lo - 0.5).ceil().max(0.0);
            let end = (hi - 0.5).ceil().min(limit as f64);
            (start < end).then(|| start as usize..end as usize)
        };
        let rect = rect.abs();
        Some((
            span(rect.x0, rect.x1, self.width)?,
            span(rect.y0, rect.y1, self.height)?,
        ))
    }
}

impl PaintSink for FrameBuffer {
    fn fill_rect(&mut self, rect: Rect, color: CellColor) {
        if color.a == 0 {
            return;
        }
        let Some((xs, ys)) = self.covered(rect) else {
            return;
        };
        let width = self.width as usize;
        for y in ys {
            for x in xs.clone() {
                let dst = &mut self.pixels[y * width + x];
                *dst = source_over(color, *dst);
            }
        }
    }

    fn clear_rect(&mut self, rect: Rect) {
        let Some((xs, ys)) = self.covered(rect) else {
            return;
        };
        let width = self.width as usize;
        for y in ys {
            self.pixels[y * width + xs.start..y * width + xs.end].fill(CellColor::EMPTY);
        }
    }
}

fn surface_pixels(size: Size) -> (u32, u32) {
    (size.width.max(0.0).ceil() as u32, size.height.max(0.0).ceil() as u32)
}

/// Straight-alpha source-over compositing.
fn source_over(src: CellColor, dst: CellColor) -> CellColor {
    if src.a == 255 || dst.a == 0 {
        return src;
    }
    let sa = src.a as f64 / 255.0;
    let da = dst.a as f64 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    let channel = |s: u8, d: u8| {
        let c = (s as f64 * sa + d as f64 * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };
    CellColor::new(
        channel(src.r, dst.r),
        channel(src.g, dst.g),
        channel(src.b, dst.b),
        (out_a * 255.0).round() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use pixelink_core::{
        BrushKind, CanvasSession, DEFAULT_LAYER, KeyCommand, Modifiers, SessionConfig,
    };

    #[test]
    fn test_fill_covers_pixel_centers() {
        let mut fb = FrameBuffer::new(10, 10);
        fb.fill_rect(Rect::new(1.4, 2.0, 3.6, 3.0), CellColor::RED);

        // Centers 1.5, 2.5 and 3.5 lie in [1.4, 3.6); only row 2 is covered.
        assert_eq!(fb.pixel(0, 2), Some(CellColor::EMPTY));
        assert_eq!(fb.pixel(1, 2), Some(CellColor::RED));
        assert_eq!(fb.pixel(3, 2), Some(CellColor::RED));
        assert_eq!(fb.pixel(4, 2), Some(CellColor::EMPTY));
        assert_eq!(fb.pixel(1, 3), Some(CellColor::EMPTY));
        assert_eq!(fb.pixels().iter().filter(|c| !c.is_empty()).count(), 3);
    }

    #[test]
    fn test_fill_is_clipped() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.fill_rect(Rect::new(-10.0, -10.0, 100.0, 2.0), CellColor::BLUE);
        assert_eq!(fb.pixel(3, 1), Some(CellColor::BLUE));
        assert_eq!(fb.pixel(0, 2), Some(CellColor::EMPTY));
        assert_eq!(fb.pixel(4, 0), None);
    }

    #[test]
    fn test_source_over_blends_translucent() {
        let mut fb = FrameBuffer::new(1, 1);
        let full = Rect::new(0.0, 0.0, 1.0, 1.0);
        fb.fill_rect(full, CellColor::BLACK);
        fb.fill_rect(full, CellColor::new(255, 255, 255, 128));

        let px = fb.pixel(0, 0).unwrap();
        assert_eq!(px.a, 255);
        assert_eq!((px.r, px.g, px.b), (128, 128, 128));
    }

    #[test]
    fn test_translucent_over_transparent_keeps_source() {
        let mut fb = FrameBuffer::new(1, 1);
        fb.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), CellColor::INDICATOR);
        assert_eq!(fb.pixel(0, 0), Some(CellColor::INDICATOR));
    }

    #[test]
    fn test_clear_rect() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), CellColor::GREEN);
        fb.clear_rect(Rect::new(0.0, 0.0, 2.0, 4.0));
        assert_eq!(fb.pixel(1, 3), Some(CellColor::EMPTY));
        assert_eq!(fb.pixel(2, 0), Some(CellColor::GREEN));

        fb.clear_rect(Rect::new(0.0, 0.0, 4.0, 4.0));
        assert!(fb.is_blank());
    }

    #[test]
    fn test_resize_discards_contents() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), CellColor::RED);
        fb.resize(Size::new(2.0, 2.0));
        assert!(!fb.is_blank());

        fb.resize(Size::new(4.5, 3.0));
        assert_eq!((fb.width(), fb.height()), (5, 3));
        assert!(fb.is_blank());
    }

    fn session_4x4(brush: BrushKind) -> CanvasSession {
        CanvasSession::new(&SessionConfig {
            grid_width: 4,
            grid_height: 4,
            active_brush: Some(brush),
            ..SessionConfig::default()
        })
    }

    fn at(x: u32, y: u32) -> Point {
        Point::new((x as f64 + 0.5) * 25.0, (y as f64 + 0.5) * 25.0)
    }

    /// Cells that show on the device, row by row.
    fn visible(fb: &FrameBuffer, session: &CanvasSession) -> Vec<(CellCoord, CellColor)> {
        let size = session.grid_size();
        (0..size.height)
            .flat_map(|y| (0..size.width).map(move |x| CellCoord::new(x, y)))
            .filter_map(|cell| {
                let color = fb.sample_cell(session.metrics(), cell)?;
                (!color.is_empty()).then_some((cell, color))
            })
            .collect()
    }

    #[test]
    fn test_session_pencil_shows_on_device() {
        let mut session = session_4x4(BrushKind::Pencil);
        let mut fb = FrameBuffer::for_metrics(session.metrics());
        assert_eq!((fb.width(), fb.height()), (100, 100));

        session.on_pointer_down(at(1, 1), Modifiers::default());
        session.on_pointer_up();
        session.render(&mut fb);

        // Drawing cell and cursor coincide.
        assert_eq!(visible(&fb, &session), vec![(CellCoord::new(1, 1), CellColor::RED)]);
    }

    #[test]
    fn test_session_eraser_removes_from_device() {
        let mut session = session_4x4(BrushKind::Bucket);
        let mut fb = FrameBuffer::for_metrics(session.metrics());
        session.on_pointer_down(at(0, 0), Modifiers::default());
        session.on_pointer_up();
        session.render(&mut fb);
        assert_eq!(visible(&fb, &session).len(), 16);

        session.set_active_brush(Some(BrushKind::Eraser));
        session.on_pointer_down(at(3, 3), Modifiers::default());
        session.on_pointer_up();
        session.on_pointer_move(Point::new(500.0, 500.0));
        session.render(&mut fb);

        let shown = visible(&fb, &session);
        assert_eq!(shown.len(), 15);
        assert!(shown.iter().all(|(cell, _)| *cell != CellCoord::new(3, 3)));
        assert_eq!(session.layer(DEFAULT_LAYER).unwrap().get(3, 3), Some(CellColor::EMPTY));
    }

    #[test]
    fn test_session_undo_restores_device() {
        let mut session = session_4x4(BrushKind::Pencil);
        let mut fb = FrameBuffer::for_metrics(session.metrics());
        session.on_pointer_down(at(0, 0), Modifiers::default());
        session.on_pointer_move(at(1, 0));
        session.on_pointer_up();
        session.render(&mut fb);
        assert_eq!(visible(&fb, &session).len(), 2);

        assert!(session.on_key_command(KeyCommand::Undo));
        session.render(&mut fb);
        assert!(fb.is_blank());
    }

    #[test]
    fn test_session_zoom_matches_render_full() {
        let mut session = session_4x4(BrushKind::Pencil);
        let mut fb = FrameBuffer::for_metrics(session.metrics());
        session.on_pointer_down(at(2, 1), Modifiers::default());
        session.on_pointer_up();
        session.render(&mut fb);

        session.set_zoom(40.0);
        fb.resize(session.metrics().surface_size());
        session.render(&mut fb);

        let mut fresh = FrameBuffer::for_metrics(session.metrics());
        session.render_full(&mut fresh);
        assert_eq!(fb, fresh);
        assert_eq!(fb.sample_cell(session.metrics(), CellCoord::new(2, 1)), Some(CellColor::RED));
    }
}
