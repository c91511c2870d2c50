//! kern-canvas: A DOM-free rich-text canvas with in-place editing.
//!
//! The centerpiece is [`TextCanvas`]: it owns one raster surface, lays out
//! wrapped text at the surface center, and switches into text-entry mode
//! when the user clicks the text region. While editing, keystrokes mutate a
//! working buffer that is rendered with a blinking caret; every change is
//! pushed to a single registered observer.

pub mod caret;
pub mod editor;
pub mod events;
pub mod fonts;
pub mod hit;
pub mod style;
pub mod typography;

pub use caret::{BLINK_INTERVAL, CaretBlink};
pub use editor::{CanvasError, PLACEHOLDER_TEXT, TextCanvas, TextChangeCallback, WRAP_WIDTH_RATIO};
pub use events::{EventResult, KeyCode, KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use fonts::{FontKey, FontLibrary, FontResolver, SingleFont};
pub use hit::EDIT_HIT_RADIUS;
pub use style::{FontWeight, TextStyle};
pub use typography::Typography;
