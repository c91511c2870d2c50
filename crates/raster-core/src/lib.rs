//! raster-core: Core types for the CPU raster text engine.

mod color;
mod dpi;
mod painter;
mod text;

pub use color::Color;
pub use dpi::{sanitize_scale, snap_to_device};
pub use painter::{Painter, PainterError};
pub use text::{
    BoxProvider, FontError, FontProvider, LineMetrics, RasterizedGlyph, TextProvider,
};
