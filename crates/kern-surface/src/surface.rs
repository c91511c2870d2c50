//! Surface controller: backing-store lifecycle and canvas primitives.

use thiserror::Error;

use raster_core::{Color, Painter, PainterError, TextProvider};

/// Grid cell edge in logical pixels.
pub const DEFAULT_GRID_CELL: f32 = 20.0;

/// Pointer shape the host should show over the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorIcon {
    Default,
    /// Text-entry I-beam.
    Text,
}

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error(transparent)]
    Raster(#[from] PainterError),
}

/// A raster surface addressed in logical pixels, backed by a buffer at
/// `logical size × device pixel ratio` resolution.
///
/// The surface is keyboard-focusable and advertises a text cursor; hosts
/// are expected to honor both hints and to suppress their native focus
/// decoration.
pub struct Surface {
    painter: Painter,
    focusable: bool,
}

impl Surface {
    /// Allocate the backing buffer. Failing to obtain a raster context is
    /// fatal; there is no degraded mode.
    pub fn new(logical_width: f32, logical_height: f32, scale: f32) -> Result<Self, SurfaceError> {
        let painter = Painter::new(logical_width, logical_height, scale)?;
        Ok(Self {
            painter,
            focusable: true,
        })
    }

    /// Reallocate the backing buffer at a new logical size, keeping the
    /// scale. The old buffer is discarded, so callers must follow with a
    /// full repaint.
    pub fn resize(&mut self, logical_width: f32, logical_height: f32) -> Result<(), SurfaceError> {
        let scale = self.painter.scale();
        self.painter = Painter::new(logical_width, logical_height, scale)?;
        tracing::trace!(logical_width, logical_height, scale, "surface resized");
        Ok(())
    }

    /// Fill the surface with its background color.
    pub fn clear(&mut self) {
        self.painter.fill(Color::white());
    }

    /// Paint the light alignment grid. Purely visual; never hit-tested.
    pub fn draw_grid(&mut self, cell_size: f32) {
        if cell_size <= 0.0 {
            return;
        }
        let grid = Color::rgba(221, 221, 221, 255);
        let (w, h) = self.logical_size();

        let mut x = 0.0;
        while x <= w {
            self.painter.stroke_line([x, 0.0], [x, h], 0.5, grid);
            x += cell_size;
        }
        let mut y = 0.0;
        while y <= h {
            self.painter.stroke_line([0.0, y], [w, y], 0.5, grid);
            y += cell_size;
        }
    }

    /// Draw one line of text with its left edge at `origin[0]` and its
    /// baseline at `origin[1]`, both logical. Glyphs advance by their own
    /// width plus `letter_spacing` logical px.
    pub fn draw_text_run(
        &mut self,
        origin: [f32; 2],
        text: &str,
        size: f32,
        color: Color,
        letter_spacing: f32,
        provider: &dyn TextProvider,
    ) {
        let scale = self.painter.scale();
        let size_px = size * scale;
        let mut pen_x = origin[0] * scale;
        let pen_y = origin[1] * scale;

        for ch in text.chars() {
            let glyph = provider.rasterize(ch, size_px);
            self.painter.blit_glyph([pen_x, pen_y], &glyph, color);
            pen_x += glyph.advance + letter_spacing * scale;
        }
    }

    /// Stroke a straight line in logical coordinates.
    pub fn stroke_line(&mut self, from: [f32; 2], to: [f32; 2], width: f32, color: Color) {
        self.painter.stroke_line(from, to, width, color);
    }

    /// Stroke a rectangle outline in logical coordinates.
    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, width: f32, color: Color) {
        self.painter.stroke_rect(x, y, w, h, width, color);
    }

    #[inline]
    pub fn logical_size(&self) -> (f32, f32) {
        (self.painter.logical_width(), self.painter.logical_height())
    }

    #[inline]
    pub fn physical_size(&self) -> (u32, u32) {
        (self.painter.physical_width(), self.painter.physical_height())
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.painter.scale()
    }

    /// Premultiplied RGBA8 frame contents for export collaborators.
    #[inline]
    pub fn frame_data(&self) -> &[u8] {
        self.painter.data()
    }

    /// One physical pixel, premultiplied RGBA8.
    #[inline]
    pub fn pixel(&self, px: u32, py: u32) -> Option<[u8; 4]> {
        self.painter.pixel(px, py)
    }

    #[inline]
    pub fn cursor_icon(&self) -> CursorIcon {
        CursorIcon::Text
    }

    #[inline]
    pub fn is_focusable(&self) -> bool {
        self.focusable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raster_core::BoxProvider;

    #[test]
    fn resize_recreates_the_backing_store() {
        let mut s = Surface::new(100.0, 50.0, 2.0).unwrap();
        assert_eq!(s.physical_size(), (200, 100));
        s.resize(30.0, 40.0).unwrap();
        assert_eq!(s.physical_size(), (60, 80));
        assert_eq!(s.logical_size(), (30.0, 40.0));
        assert_eq!(s.scale(), 2.0);
    }

    #[test]
    fn grid_marks_lines_but_leaves_cell_interiors_clear() {
        let mut s = Surface::new(40.0, 40.0, 1.0).unwrap();
        s.clear();
        let blank = s.frame_data().to_vec();
        s.draw_grid(DEFAULT_GRID_CELL);
        assert_ne!(s.frame_data(), &blank[..]);
        // Center of a cell stays the background color.
        assert_eq!(s.pixel(10, 10), Some([255, 255, 255, 255]));
    }

    #[test]
    fn nonpositive_grid_cell_is_a_noop() {
        let mut s = Surface::new(40.0, 40.0, 1.0).unwrap();
        s.clear();
        let blank = s.frame_data().to_vec();
        s.draw_grid(0.0);
        assert_eq!(s.frame_data(), &blank[..]);
    }

    #[test]
    fn text_run_puts_ink_above_the_baseline() {
        let mut s = Surface::new(100.0, 100.0, 1.0).unwrap();
        s.clear();
        let p = BoxProvider::default();
        s.draw_text_run([10.0, 50.0], "ab", 20.0, Color::black(), 0.0, &p);
        // Box glyphs sit directly on the baseline; probe inside the first box.
        assert_eq!(s.pixel(12, 45), Some([0, 0, 0, 255]));
        // Below the baseline stays clear.
        assert_eq!(s.pixel(12, 55), Some([255, 255, 255, 255]));
    }

    #[test]
    fn surface_asks_for_a_text_cursor_and_focus() {
        let s = Surface::new(10.0, 10.0, 1.0).unwrap();
        assert_eq!(s.cursor_icon(), CursorIcon::Text);
        assert!(s.is_focusable());
    }
}
