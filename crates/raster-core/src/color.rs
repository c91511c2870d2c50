use palette::{FromColor, LinSrgba, Srgba};

/// Linear premultiplied RGBA color, the working representation for
/// compositing. Construction goes through sRGB so UI code can keep using
/// familiar 0..255 channel values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Convenience alias matching the rgba(...) shape widely used in UI code.
    #[inline]
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_srgba_u8([r, g, b, a])
    }

    /// Create from sRGB u8 RGBA (premultiplied in linear space).
    #[inline]
    pub fn from_srgba_u8(c: [u8; 4]) -> Self {
        let s = Srgba::new(
            c[0] as f32 / 255.0,
            c[1] as f32 / 255.0,
            c[2] as f32 / 255.0,
            c[3] as f32 / 255.0,
        );
        let lin: LinSrgba = LinSrgba::from_color(s);
        Self {
            r: lin.red * lin.alpha,
            g: lin.green * lin.alpha,
            b: lin.blue * lin.alpha,
            a: lin.alpha,
        }
    }

    /// Convert back to sRGB u8 RGBA (unpremultiplied).
    pub fn to_srgba_u8(&self) -> [u8; 4] {
        let (r, g, b) = if self.a > 0.0001 {
            (self.r / self.a, self.g / self.a, self.b / self.a)
        } else {
            (0.0, 0.0, 0.0)
        };

        let lin = LinSrgba::new(r, g, b, self.a);
        let srgb: Srgba = Srgba::from_color(lin);

        [
            (srgb.red * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.green * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.blue * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.alpha * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }

    /// Parse a CSS-style hex color: `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        let byte = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        match digits.len() {
            6 => Some(Self::from_srgba_u8([byte(0)?, byte(2)?, byte(4)?, 255])),
            8 => Some(Self::from_srgba_u8([byte(0)?, byte(2)?, byte(4)?, byte(6)?])),
            _ => None,
        }
    }

    #[inline]
    pub fn black() -> Self {
        Self::rgba(0, 0, 0, 255)
    }

    #[inline]
    pub fn white() -> Self {
        Self::rgba(255, 255, 255, 255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_roundtrip_preserves_channels() {
        let c = Color::rgba(221, 34, 120, 255);
        assert_eq!(c.to_srgba_u8(), [221, 34, 120, 255]);
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(Color::from_hex("#000000"), Some(Color::black()));
        assert_eq!(Color::from_hex("#ffffffff"), Some(Color::white()));
        assert_eq!(Color::from_hex("bad"), None);
        assert_eq!(Color::from_hex("#12345"), None);
    }

    #[test]
    fn premultiplied_is_scaled_by_alpha() {
        let c = Color::rgba(255, 255, 255, 0);
        assert_eq!(c.r, 0.0);
        assert_eq!(c.a, 0.0);
    }
}
