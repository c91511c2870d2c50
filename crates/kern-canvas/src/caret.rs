//! Caret blink state for the text-entry mode.

use std::time::Duration;

/// Blink period: visibility toggles once per interval.
pub const BLINK_INTERVAL: Duration = Duration::from_millis(530);

/// Blink phase for the insertion caret.
///
/// One instance lives inside the editing state and nowhere else, so
/// constructing a fresh one on edit-mode entry both resets the phase and
/// retires the previous timer.
#[derive(Clone, Copy, Debug)]
pub struct CaretBlink {
    visible: bool,
    elapsed: Duration,
}

impl CaretBlink {
    /// New timer with the caret showing.
    pub fn new() -> Self {
        Self {
            visible: true,
            elapsed: Duration::ZERO,
        }
    }

    /// Advance the timer. Returns `true` when visibility toggled and the
    /// caller must repaint.
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.elapsed += delta;
        let mut toggled = false;
        while self.elapsed >= BLINK_INTERVAL {
            self.elapsed -= BLINK_INTERVAL;
            self.visible = !self.visible;
            toggled = true;
        }
        toggled
    }

    /// Make the caret visible and restart the phase (call after edits).
    pub fn reset(&mut self) {
        self.visible = true;
        self.elapsed = Duration::ZERO;
    }

    #[inline]
    pub fn visible(&self) -> bool {
        self.visible
    }
}

impl Default for CaretBlink {
    fn default() -> Self {
        Self::new()
    }
}
