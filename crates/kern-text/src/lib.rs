//! kern-text: Word-wrap layout and text measurement for the canvas engine.

pub mod graphemes;
pub mod measure;
pub mod wrap;

pub use graphemes::pop_last_grapheme;
pub use measure::spaced_width;
pub use wrap::{WrappedText, wrap_text};
