//! Text style attributes applied to the canvas text block.

use raster_core::Color;

/// CSS-style font weight on the 100–900 scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const BOLD: FontWeight = FontWeight(700);

    /// Parse a weight keyword or numeric value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(Self::NORMAL),
            "bold" => Some(Self::BOLD),
            _ => s.parse::<u16>().ok().map(FontWeight),
        }
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Visual attributes for the text block. Immutable per frame; the owner
/// passes a fresh value with every `draw` call.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font_family: String,
    /// Logical px.
    pub font_size: f32,
    pub font_weight: FontWeight,
    pub italic: bool,
    pub underline: bool,
    /// Extra logical px inserted after each glyph.
    pub letter_spacing: f32,
    /// Per-line height in logical px. When `None`, the line height is
    /// derived as 1.2x the measured glyph height.
    pub line_height: Option<f32>,
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "Inter".to_string(),
            font_size: 48.0,
            font_weight: FontWeight::NORMAL,
            italic: false,
            underline: false,
            letter_spacing: 0.0,
            line_height: None,
            color: Color::black(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_parsing_accepts_keywords_and_numbers() {
        assert_eq!(FontWeight::parse("bold"), Some(FontWeight::BOLD));
        assert_eq!(FontWeight::parse("normal"), Some(FontWeight(400)));
        assert_eq!(FontWeight::parse("550"), Some(FontWeight(550)));
        assert_eq!(FontWeight::parse("heavy"), None);
    }

    #[test]
    fn default_style_is_black_regular_text() {
        let s = TextStyle::default();
        assert_eq!(s.font_weight, FontWeight::NORMAL);
        assert_eq!(s.color, Color::black());
        assert!(!s.italic && !s.underline);
        assert!(s.line_height.is_none());
    }
}
