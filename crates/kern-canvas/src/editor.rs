//! The canvas text engine: frame state, edit mode, and the render pipeline.

use std::time::Duration;

use thiserror::Error;

use kern_surface::{DEFAULT_GRID_CELL, Surface, SurfaceError};
use kern_text::{pop_last_grapheme, spaced_width, wrap_text};
use raster_core::Color;

use crate::caret::CaretBlink;
use crate::events::{EventResult, KeyCode, KeyEvent, PointerEvent};
use crate::fonts::FontResolver;
use crate::hit;
use crate::style::TextStyle;

/// Fraction of the surface's logical width available to the text block.
pub const WRAP_WIDTH_RATIO: f32 = 0.8;

/// Shown when there is no committed text and nothing is being edited.
/// Display only; the owner's text value is never mutated to this.
pub const PLACEHOLDER_TEXT: &str = "Type something...";

const UNDERLINE_OFFSET: f32 = 3.0;
const CARET_WIDTH: f32 = 2.0;
const EDIT_BOX_PADDING: f32 = 4.0;

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// The single observer notified with the updated buffer on every keystroke.
pub type TextChangeCallback = Box<dyn FnMut(&str)>;

/// Edit-mode state. The working buffer and the blink timer live inside the
/// `Editing` variant, so both exist exactly while editing and re-entering
/// edit mode retires the previous timer by construction.
enum EditState {
    Idle,
    Editing { buffer: String, blink: CaretBlink },
}

/// A rich-text canvas with in-place editing.
///
/// The owner pushes state in with [`draw`](Self::draw) and receives text
/// changes through the registered callback. While
/// [`is_in_edit_mode`](Self::is_in_edit_mode) returns `true` the owner must
/// skip upstream `draw` calls, so a stale re-render cannot race the user's
/// keystrokes; even if it does call, the buffer remains the render source.
pub struct TextCanvas {
    surface: Surface,
    fonts: Box<dyn FontResolver>,
    text: String,
    style: Option<TextStyle>,
    position: [f32; 2],
    state: EditState,
    focused: bool,
    text_change: Option<TextChangeCallback>,
}

impl TextCanvas {
    /// Create the engine bound to a fresh surface. Fails when the raster
    /// context cannot be allocated; there is no degraded mode.
    pub fn new(
        logical_width: f32,
        logical_height: f32,
        scale: f32,
        fonts: Box<dyn FontResolver>,
    ) -> Result<Self, CanvasError> {
        let surface = Surface::new(logical_width, logical_height, scale)?;
        Ok(Self {
            surface,
            fonts,
            text: String::new(),
            style: None,
            position: [0.0, 0.0],
            state: EditState::Idle,
            focused: false,
            text_change: None,
        })
    }

    /// Register the text-change observer. One observer, replacing any
    /// previous registration.
    pub fn on_text_change(&mut self, callback: TextChangeCallback) {
        self.text_change = Some(callback);
    }

    /// Record `text`/`style` as the current frame state and repaint.
    ///
    /// Owners must consult [`is_in_edit_mode`](Self::is_in_edit_mode) before
    /// calling this from upstream state changes and skip the call while it
    /// returns `true`.
    pub fn draw(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        self.text = text.to_string();
        self.style = Some(style.clone());
        self.position = [x, y];
        self.redraw();
    }

    /// Reallocate the surface and repaint in full; the old backing buffer
    /// is discarded by the resize.
    pub fn resize(&mut self, logical_width: f32, logical_height: f32) -> Result<(), CanvasError> {
        self.surface.resize(logical_width, logical_height)?;
        self.redraw();
        Ok(())
    }

    /// Fill the surface with its background. Composable primitive, also the
    /// first stage of [`redraw`](Self::redraw).
    pub fn clear(&mut self) {
        self.surface.clear();
    }

    /// Paint the alignment grid. Composable primitive.
    pub fn draw_grid(&mut self, cell_size: f32) {
        self.surface.draw_grid(cell_size);
    }

    #[inline]
    pub fn is_in_edit_mode(&self) -> bool {
        matches!(self.state, EditState::Editing { .. })
    }

    /// The committed text (unchanged by edit-mode keystrokes until the
    /// owner re-commits through `draw`).
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The anchor recorded by the last `draw` call.
    #[inline]
    pub fn position(&self) -> [f32; 2] {
        self.position
    }

    /// Whether the surface holds keyboard focus.
    #[inline]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    #[inline]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Repaint the current frame state. Idempotent: with unchanged state,
    /// repeated calls produce identical pixels.
    pub fn redraw(&mut self) {
        self.surface.clear();
        self.surface.draw_grid(DEFAULT_GRID_CELL);

        let Some(style) = self.style.clone() else {
            return;
        };

        let source = match &self.state {
            EditState::Editing { buffer, .. } => buffer.clone(),
            EditState::Idle if self.text.is_empty() => PLACEHOLDER_TEXT.to_string(),
            EditState::Idle => self.text.clone(),
        };

        let provider = self.fonts.resolve(&style);
        let (w, h) = self.surface.logical_size();
        let max_width = w * WRAP_WIDTH_RATIO;
        let wrapped = wrap_text(provider.as_ref(), &source, style.font_size, max_width);

        let metrics = provider.line_metrics(style.font_size);
        let line_height = style.line_height.unwrap_or(metrics.height() * 1.2);
        let total_height = wrapped.lines.len() as f32 * line_height;
        let top = h * 0.5 - total_height * 0.5;

        let mut caret_pos = [w * 0.5, top + metrics.ascent];
        let mut block_left = f32::INFINITY;
        let mut block_right = f32::NEG_INFINITY;

        for (i, line) in wrapped.lines.iter().enumerate() {
            let line_width =
                spaced_width(provider.as_ref(), line, style.font_size, style.letter_spacing);
            let x = (w - line_width) * 0.5;
            let baseline = top + i as f32 * line_height + metrics.ascent;

            self.surface.draw_text_run(
                [x, baseline],
                line,
                style.font_size,
                style.color,
                style.letter_spacing,
                provider.as_ref(),
            );

            if style.underline {
                let y = baseline + UNDERLINE_OFFSET;
                self.surface
                    .stroke_line([x, y], [x + line_width, y], 1.0, style.color);
            }

            block_left = block_left.min(x);
            block_right = block_right.max(x + line_width);
            caret_pos = [x + line_width, baseline];
        }

        if let EditState::Editing { blink, .. } = &self.state {
            if block_right > block_left {
                self.surface.stroke_rect(
                    block_left - EDIT_BOX_PADDING,
                    top - EDIT_BOX_PADDING,
                    block_right - block_left + 2.0 * EDIT_BOX_PADDING,
                    total_height + 2.0 * EDIT_BOX_PADDING,
                    1.0,
                    Color::rgba(63, 130, 246, 255),
                );
            }
            if blink.visible() {
                let text_height = metrics.height();
                let cx = raster_core::snap_to_device(caret_pos[0], self.surface.scale());
                self.surface.stroke_line(
                    [cx, caret_pos[1] - text_height],
                    [cx, caret_pos[1]],
                    CARET_WIDTH,
                    style.color,
                );
            }
        }
    }

    /// Route a pointer press. A click in the text region enters edit mode;
    /// any click while editing commits and exits, even inside the region.
    pub fn handle_pointer_down(&mut self, event: PointerEvent) -> EventResult {
        if self.is_in_edit_mode() {
            self.exit_edit_mode();
            return EventResult::Handled;
        }

        let point = hit::to_logical(event.x, event.y, event.display_size, &self.surface);
        if hit::hits_text_region(&self.surface, point) {
            self.enter_edit_mode();
            EventResult::Handled
        } else {
            EventResult::Ignored
        }
    }

    /// Route a key press. Only meaningful while editing; `Handled` tells
    /// the host to swallow the event so Backspace/Enter defaults never run.
    pub fn handle_key(&mut self, event: KeyEvent) -> EventResult {
        if !self.is_in_edit_mode() {
            return EventResult::Ignored;
        }
        match event.key {
            KeyCode::Escape => {
                self.exit_edit_mode();
                EventResult::Handled
            }
            KeyCode::Backspace => self.mutate_buffer(pop_last_grapheme),
            KeyCode::Enter => self.mutate_buffer(|buffer| {
                buffer.push('\n');
                true
            }),
            KeyCode::Char(c) if !c.is_control() => self.mutate_buffer(move |buffer| {
                buffer.push(c);
                true
            }),
            _ => EventResult::Ignored,
        }
    }

    /// The surface lost keyboard focus; commits any edit in progress.
    pub fn handle_focus_lost(&mut self) {
        self.focused = false;
        if self.is_in_edit_mode() {
            self.exit_edit_mode();
        }
    }

    /// Advance the caret blink. Returns `true` when the frame was repainted.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let toggled = match &mut self.state {
            EditState::Editing { blink, .. } => blink.tick(delta),
            EditState::Idle => false,
        };
        if toggled {
            self.redraw();
        }
        toggled
    }

    fn enter_edit_mode(&mut self) {
        tracing::debug!(seed_len = self.text.len(), "entering text edit mode");
        // Assigning the variant drops any previous blink timer before the
        // replacement starts counting.
        self.state = EditState::Editing {
            buffer: self.text.clone(),
            blink: CaretBlink::new(),
        };
        self.focused = true;
        self.redraw();
    }

    fn exit_edit_mode(&mut self) {
        tracing::debug!("leaving text edit mode");
        self.state = EditState::Idle;
        self.redraw();
    }

    /// Apply `mutate` to the edit buffer; on change, reset the blink phase,
    /// notify the observer, and repaint. State mutation strictly precedes
    /// the repaint.
    fn mutate_buffer(&mut self, mutate: impl FnOnce(&mut String) -> bool) -> EventResult {
        let updated = match &mut self.state {
            EditState::Editing { buffer, blink } => {
                if mutate(buffer) {
                    blink.reset();
                    Some(buffer.clone())
                } else {
                    None
                }
            }
            EditState::Idle => return EventResult::Ignored,
        };

        if let Some(text) = updated {
            if let Some(callback) = self.text_change.as_mut() {
                callback(&text);
            }
            self.redraw();
        }
        EventResult::Handled
    }
}
