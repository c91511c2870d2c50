//! Shared typography state.
//!
//! One explicitly-owned value holding the committed text and the active
//! style. The application shell owns it and hands references to whichever
//! panel needs to read or mutate it; there is no ambient global.

use crate::editor::PLACEHOLDER_TEXT;
use crate::style::TextStyle;

#[derive(Clone, Debug, PartialEq)]
pub struct Typography {
    pub text: String,
    pub style: TextStyle,
}

impl Typography {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Apply a partial style update in place.
    pub fn update_style(&mut self, update: impl FnOnce(&mut TextStyle)) {
        update(&mut self.style);
    }
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            text: PLACEHOLDER_TEXT.to_string(),
            style: TextStyle::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_style_updates_keep_the_rest() {
        let mut t = Typography::default();
        t.update_style(|s| s.underline = true);
        assert!(t.style.underline);
        assert_eq!(t.style.font_size, TextStyle::default().font_size);
    }
}
