//! CPU painter over a `tiny-skia` pixmap.
//!
//! All drawing is authored in logical (CSS-like) pixels; a uniform device
//! pixel ratio transform maps them onto the physical backing buffer, so a
//! 2x surface gets crisp output without callers doing their own scaling.

use thiserror::Error;
use tiny_skia::{Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use crate::color::Color;
use crate::dpi::sanitize_scale;
use crate::text::RasterizedGlyph;

#[derive(Debug, Error)]
pub enum PainterError {
    #[error("no raster context available for a {width}x{height} surface")]
    ContextUnavailable { width: u32, height: u32 },
}

/// Raster drawing target with a fixed device-pixel-ratio transform.
pub struct Painter {
    pixmap: Pixmap,
    scale: f32,
    logical_width: f32,
    logical_height: f32,
}

impl Painter {
    /// Allocate a backing buffer of `logical size × scale` physical pixels.
    ///
    /// Degenerate logical sizes are clamped to one physical pixel rather
    /// than rejected; allocation failure itself is fatal.
    pub fn new(logical_width: f32, logical_height: f32, scale: f32) -> Result<Self, PainterError> {
        let scale = sanitize_scale(scale);
        let pw = (logical_width * scale).round().max(1.0) as u32;
        let ph = (logical_height * scale).round().max(1.0) as u32;
        let pixmap = Pixmap::new(pw, ph).ok_or(PainterError::ContextUnavailable {
            width: pw,
            height: ph,
        })?;
        Ok(Self {
            pixmap,
            scale,
            logical_width,
            logical_height,
        })
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[inline]
    pub fn logical_width(&self) -> f32 {
        self.logical_width
    }

    #[inline]
    pub fn logical_height(&self) -> f32 {
        self.logical_height
    }

    #[inline]
    pub fn physical_width(&self) -> u32 {
        self.pixmap.width()
    }

    #[inline]
    pub fn physical_height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Flood-fill the whole buffer.
    pub fn fill(&mut self, color: Color) {
        let [r, g, b, a] = color.to_srgba_u8();
        self.pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
    }

    /// Fill an axis-aligned rectangle given in logical pixels.
    /// Non-positive extents are a no-op.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let Some(rect) = Rect::from_xywh(x, y, w, h) else {
            return;
        };
        let paint = solid_paint(color);
        self.pixmap
            .fill_rect(rect, &paint, self.transform(), None);
    }

    /// Stroke a straight line segment given in logical pixels.
    pub fn stroke_line(&mut self, from: [f32; 2], to: [f32; 2], width: f32, color: Color) {
        let mut pb = PathBuilder::new();
        pb.move_to(from[0], from[1]);
        pb.line_to(to[0], to[1]);
        let Some(path) = pb.finish() else {
            return;
        };
        let paint = solid_paint(color);
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, self.transform(), None);
    }

    /// Stroke a rectangle outline given in logical pixels.
    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, width: f32, color: Color) {
        let Some(rect) = Rect::from_xywh(x, y, w, h) else {
            return;
        };
        let path = PathBuilder::from_rect(rect);
        let paint = solid_paint(color);
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, self.transform(), None);
    }

    /// Composite a glyph coverage mask. The pen position is in physical
    /// pixels on the baseline; the glyph's own offset places the mask.
    pub fn blit_glyph(&mut self, pen: [f32; 2], glyph: &RasterizedGlyph, color: Color) {
        if glyph.width == 0 || glyph.height == 0 {
            return;
        }
        let [r, g, b, a] = color.to_srgba_u8();
        let (cr, cg, cb, ca) = (
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        );

        let pw = self.pixmap.width() as i32;
        let ph = self.pixmap.height() as i32;
        let x0 = (pen[0] + glyph.offset[0]).round() as i32;
        let y0 = (pen[1] + glyph.offset[1]).round() as i32;
        let data = self.pixmap.data_mut();

        for row in 0..glyph.height as i32 {
            let py = y0 + row;
            if py < 0 || py >= ph {
                continue;
            }
            for col in 0..glyph.width as i32 {
                let px = x0 + col;
                if px < 0 || px >= pw {
                    continue;
                }
                let cov =
                    glyph.coverage[(row as u32 * glyph.width + col as u32) as usize] as f32 / 255.0;
                if cov <= 0.0 {
                    continue;
                }

                // Source-over in premultiplied space.
                let sa = ca * cov;
                let (sr, sg, sb) = (cr * sa, cg * sa, cb * sa);
                let i = ((py * pw + px) * 4) as usize;
                let inv = 1.0 - sa;
                data[i] = ((sr + data[i] as f32 / 255.0 * inv) * 255.0 + 0.5) as u8;
                data[i + 1] = ((sg + data[i + 1] as f32 / 255.0 * inv) * 255.0 + 0.5) as u8;
                data[i + 2] = ((sb + data[i + 2] as f32 / 255.0 * inv) * 255.0 + 0.5) as u8;
                data[i + 3] = ((sa + data[i + 3] as f32 / 255.0 * inv) * 255.0 + 0.5) as u8;
            }
        }
    }

    /// Premultiplied RGBA8 frame contents, row-major physical pixels.
    #[inline]
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// One physical pixel as premultiplied RGBA8, or `None` out of bounds.
    pub fn pixel(&self, px: u32, py: u32) -> Option<[u8; 4]> {
        if px >= self.pixmap.width() || py >= self.pixmap.height() {
            return None;
        }
        let i = ((py * self.pixmap.width() + px) * 4) as usize;
        let d = self.pixmap.data();
        Some([d[i], d[i + 1], d[i + 2], d[i + 3]])
    }

    #[inline]
    fn transform(&self) -> Transform {
        Transform::from_scale(self.scale, self.scale)
    }
}

fn solid_paint(color: Color) -> Paint<'static> {
    let [r, g, b, a] = color.to_srgba_u8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backing_is_scaled_by_device_pixel_ratio() {
        let p = Painter::new(100.0, 50.0, 2.0).unwrap();
        assert_eq!(p.physical_width(), 200);
        assert_eq!(p.physical_height(), 100);
        assert_eq!(p.logical_width(), 100.0);
    }

    #[test]
    fn degenerate_sizes_clamp_to_one_pixel() {
        let p = Painter::new(0.0, 0.0, 1.0).unwrap();
        assert_eq!(p.physical_width(), 1);
        assert_eq!(p.physical_height(), 1);
    }

    #[test]
    fn logical_rect_lands_on_physical_pixels() {
        let mut p = Painter::new(10.0, 10.0, 2.0).unwrap();
        p.fill(Color::white());
        p.fill_rect(2.0, 2.0, 4.0, 4.0, Color::black());
        // Logical (3, 3) is physical (6, 6), inside the filled rect.
        assert_eq!(p.pixel(6, 6), Some([0, 0, 0, 255]));
        // Logical (8, 8) is outside it.
        assert_eq!(p.pixel(16, 16), Some([255, 255, 255, 255]));
    }

    #[test]
    fn zero_extent_rect_is_a_noop() {
        let mut p = Painter::new(10.0, 10.0, 1.0).unwrap();
        p.fill(Color::white());
        let before = p.data().to_vec();
        p.fill_rect(2.0, 2.0, 0.0, 5.0, Color::black());
        p.fill_rect(2.0, 2.0, -3.0, 5.0, Color::black());
        assert_eq!(p.data(), &before[..]);
    }

    #[test]
    fn glyph_blit_is_clipped_to_the_buffer() {
        let mut p = Painter::new(4.0, 4.0, 1.0).unwrap();
        p.fill(Color::white());
        let glyph = RasterizedGlyph {
            width: 8,
            height: 8,
            coverage: vec![255; 64],
            offset: [0.0, -8.0],
            advance: 8.0,
        };
        p.blit_glyph([-2.0, 10.0], &glyph, Color::black());
        assert_eq!(p.pixel(0, 3), Some([0, 0, 0, 255]));
    }

    #[test]
    fn opaque_glyph_blit_replaces_destination() {
        let mut p = Painter::new(4.0, 4.0, 1.0).unwrap();
        p.fill(Color::white());
        let glyph = RasterizedGlyph {
            width: 2,
            height: 2,
            coverage: vec![255; 4],
            offset: [0.0, -2.0],
            advance: 2.0,
        };
        p.blit_glyph([1.0, 3.0], &glyph, Color::black());
        assert_eq!(p.pixel(1, 1), Some([0, 0, 0, 255]));
        assert_eq!(p.pixel(0, 0), Some([255, 255, 255, 255]));
    }
}
