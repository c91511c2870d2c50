//! kern-surface: The drawing surface the canvas engine paints onto.

mod surface;

pub use surface::{CursorIcon, DEFAULT_GRID_CELL, Surface, SurfaceError};
