//! Text measurement and glyph rasterization.
//!
//! The engine draws text as 8-bit coverage masks composited onto the raster
//! surface. [`FontProvider`] wraps a parsed `fontdue` face (discovered via
//! `fontdb` or supplied as bytes); [`BoxProvider`] is a deterministic
//! fallback with fixed metrics that keeps the canvas usable when no font
//! can be resolved.

use std::sync::Mutex;

use hashbrown::HashMap;
use thiserror::Error;

/// Vertical metrics for a line of text at a given pixel size.
#[derive(Clone, Copy, Debug)]
pub struct LineMetrics {
    /// Distance from the baseline to the top of the tallest glyphs, in px.
    pub ascent: f32,
    /// Distance from the baseline down to the lowest descenders, in px (positive).
    pub descent: f32,
    /// Extra leading suggested by the face, in px.
    pub line_gap: f32,
}

impl LineMetrics {
    /// Glyph height: ascent plus descent.
    #[inline]
    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// A single rasterized glyph: an 8-bit coverage mask plus placement data.
#[derive(Clone, Debug)]
pub struct RasterizedGlyph {
    pub width: u32,
    pub height: u32,
    /// Row-major coverage, `width * height` bytes. Empty for whitespace.
    pub coverage: Vec<u8>,
    /// Mask placement relative to the pen position on the baseline (y-down).
    pub offset: [f32; 2],
    /// Horizontal pen advance, in px.
    pub advance: f32,
}

/// Source of glyph masks and font metrics for one face.
pub trait TextProvider {
    /// Horizontal advance of `ch` at `size` px.
    fn advance(&self, ch: char, size: f32) -> f32;

    /// Rasterize `ch` at `size` px. Whitespace yields an empty mask with
    /// advance only.
    fn rasterize(&self, ch: char, size: f32) -> RasterizedGlyph;

    /// Vertical metrics for a line at `size` px.
    fn line_metrics(&self, size: f32) -> LineMetrics;

    /// Advance width of a whole run at `size` px.
    fn measure(&self, text: &str, size: f32) -> f32 {
        text.chars().map(|c| self.advance(c, size)).sum()
    }
}

#[derive(Debug, Error)]
pub enum FontError {
    #[error("font data could not be parsed: {0}")]
    Parse(&'static str),
    #[error("no font face matches family {family:?}")]
    NoMatch { family: String },
}

#[derive(Clone, Hash, PartialEq, Eq)]
struct GlyphKey {
    ch: char,
    size_bits: u32,
}

/// A `fontdue`-backed provider with a per-face glyph cache.
///
/// Rasterization cost dominates redraws, so masks are cached keyed by
/// (char, size bits), the same keying the layout caches use for f32 sizes.
pub struct FontProvider {
    font: fontdue::Font,
    cache: Mutex<HashMap<GlyphKey, RasterizedGlyph>>,
}

const GLYPH_CACHE_MAX: usize = 2048;

impl FontProvider {
    /// Parse a face from raw font bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, FontError> {
        let font = fontdue::Font::from_bytes(data, fontdue::FontSettings::default())
            .map_err(FontError::Parse)?;
        Ok(Self {
            font,
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// Discover a face through the system font database.
    ///
    /// `weight` follows the CSS 100–900 scale. Falls back to any sans-serif
    /// face when the named family is absent.
    pub fn from_system(family: &str, weight: u16, italic: bool) -> Result<Self, FontError> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();

        let query = fontdb::Query {
            families: &[fontdb::Family::Name(family), fontdb::Family::SansSerif],
            weight: fontdb::Weight(weight),
            stretch: fontdb::Stretch::Normal,
            style: if italic {
                fontdb::Style::Italic
            } else {
                fontdb::Style::Normal
            },
        };
        let id = db.query(&query).ok_or_else(|| FontError::NoMatch {
            family: family.to_string(),
        })?;
        let loaded = db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| FontError::NoMatch {
                family: family.to_string(),
            })?;

        let (data, index) = loaded;
        let settings = fontdue::FontSettings {
            collection_index: index,
            ..Default::default()
        };
        let font = fontdue::Font::from_bytes(data, settings).map_err(FontError::Parse)?;
        Ok(Self {
            font,
            cache: Mutex::new(HashMap::new()),
        })
    }
}

impl TextProvider for FontProvider {
    fn advance(&self, ch: char, size: f32) -> f32 {
        self.font.metrics(ch, size).advance_width
    }

    fn rasterize(&self, ch: char, size: f32) -> RasterizedGlyph {
        let key = GlyphKey {
            ch,
            size_bits: size.to_bits(),
        };
        {
            let cache = self.cache.lock().unwrap();
            if let Some(glyph) = cache.get(&key) {
                return glyph.clone();
            }
        }

        let (metrics, coverage) = self.font.rasterize(ch, size);
        let glyph = RasterizedGlyph {
            width: metrics.width as u32,
            height: metrics.height as u32,
            coverage,
            offset: [
                metrics.xmin as f32,
                -(metrics.height as i32 + metrics.ymin) as f32,
            ],
            advance: metrics.advance_width,
        };

        let mut cache = self.cache.lock().unwrap();
        if cache.len() >= GLYPH_CACHE_MAX * 2 && !cache.contains_key(&key) {
            cache.clear();
        }
        cache.insert(key, glyph.clone());
        glyph
    }

    fn line_metrics(&self, size: f32) -> LineMetrics {
        match self.font.horizontal_line_metrics(size) {
            Some(m) => LineMetrics {
                ascent: m.ascent,
                descent: (-m.descent).max(0.0),
                line_gap: m.line_gap,
            },
            // Estimate when the face carries no horizontal metrics.
            None => LineMetrics {
                ascent: size * 0.8,
                descent: size * 0.2,
                line_gap: 0.0,
            },
        }
    }
}

/// Fallback provider rendering plain box glyphs with fixed metrics.
///
/// Fully deterministic and independent of any font asset, which also makes
/// it the measuring stick for layout tests.
#[derive(Clone, Copy, Debug)]
pub struct BoxProvider {
    /// Advance per glyph as a fraction of the pixel size.
    pub advance_em: f32,
}

impl Default for BoxProvider {
    fn default() -> Self {
        Self { advance_em: 0.5 }
    }
}

impl TextProvider for BoxProvider {
    fn advance(&self, _ch: char, size: f32) -> f32 {
        size * self.advance_em
    }

    fn rasterize(&self, ch: char, size: f32) -> RasterizedGlyph {
        let advance = size * self.advance_em;
        if ch.is_whitespace() {
            return RasterizedGlyph {
                width: 0,
                height: 0,
                coverage: Vec::new(),
                offset: [0.0, 0.0],
                advance,
            };
        }

        let w = (advance * 0.8).round().max(1.0) as u32;
        let h = (size * 0.6).round().max(1.0) as u32;
        RasterizedGlyph {
            width: w,
            height: h,
            coverage: vec![255; (w * h) as usize],
            offset: [(advance * 0.1).round(), -(h as f32)],
            advance,
        }
    }

    fn line_metrics(&self, size: f32) -> LineMetrics {
        LineMetrics {
            ascent: size * 0.8,
            descent: size * 0.2,
            line_gap: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_provider_measures_by_char_count() {
        let p = BoxProvider::default();
        assert_eq!(p.measure("abcd", 10.0), 20.0);
        assert_eq!(p.measure("", 10.0), 0.0);
    }

    #[test]
    fn box_provider_whitespace_has_advance_but_no_mask() {
        let p = BoxProvider::default();
        let g = p.rasterize(' ', 16.0);
        assert_eq!(g.width, 0);
        assert!(g.coverage.is_empty());
        assert_eq!(g.advance, 8.0);
    }

    #[test]
    fn box_provider_glyphs_sit_on_the_baseline() {
        let p = BoxProvider::default();
        let g = p.rasterize('x', 20.0);
        assert_eq!(g.offset[1], -(g.height as f32));
        assert_eq!(g.coverage.len(), (g.width * g.height) as usize);
    }

    #[test]
    fn line_metrics_height_adds_up() {
        let m = BoxProvider::default().line_metrics(10.0);
        assert_eq!(m.height(), 10.0);
    }
}
