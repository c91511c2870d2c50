//! Font resolution for the canvas.
//!
//! The style names a family/weight/slant; something has to turn that into a
//! glyph source. [`FontLibrary`] discovers faces through the system font
//! database and caches them per key; [`SingleFont`] pins one host-supplied
//! face (the uploaded-font case) regardless of style.

use std::sync::Arc;

use hashbrown::HashMap;

use raster_core::{BoxProvider, FontProvider, TextProvider};

use crate::style::TextStyle;

/// Cache key identifying a resolved face.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct FontKey {
    pub family: String,
    pub weight: u16,
    pub italic: bool,
}

impl FontKey {
    pub fn of(style: &TextStyle) -> Self {
        Self {
            family: style.font_family.clone(),
            weight: style.font_weight.0,
            italic: style.italic,
        }
    }
}

/// Maps a style to the glyph source used to measure and rasterize it.
pub trait FontResolver {
    fn resolve(&mut self, style: &TextStyle) -> Arc<dyn TextProvider + Send + Sync>;
}

/// System-font resolver with a per-key cache.
///
/// When no face matches, resolution falls back to box glyphs with a logged
/// warning instead of failing the frame; the cache remembers the outcome
/// either way so the lookup cost is paid once per key.
pub struct FontLibrary {
    cache: HashMap<FontKey, Arc<dyn TextProvider + Send + Sync>>,
    fallback: Arc<dyn TextProvider + Send + Sync>,
}

impl FontLibrary {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            fallback: Arc::new(BoxProvider::default()),
        }
    }
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl FontResolver for FontLibrary {
    fn resolve(&mut self, style: &TextStyle) -> Arc<dyn TextProvider + Send + Sync> {
        let key = FontKey::of(style);
        if let Some(provider) = self.cache.get(&key) {
            return provider.clone();
        }

        let provider: Arc<dyn TextProvider + Send + Sync> =
            match FontProvider::from_system(&key.family, key.weight, key.italic) {
                Ok(p) => Arc::new(p),
                Err(err) => {
                    tracing::warn!(?err, family = %key.family, "font resolution failed, using box glyphs");
                    self.fallback.clone()
                }
            };
        self.cache.insert(key, provider.clone());
        provider
    }
}

/// Resolver pinned to one face, e.g. a font the user uploaded.
pub struct SingleFont {
    provider: Arc<dyn TextProvider + Send + Sync>,
}

impl SingleFont {
    pub fn new(provider: Arc<dyn TextProvider + Send + Sync>) -> Self {
        Self { provider }
    }
}

impl FontResolver for SingleFont {
    fn resolve(&mut self, _style: &TextStyle) -> Arc<dyn TextProvider + Send + Sync> {
        self.provider.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_key_captures_the_selection_axes() {
        let mut style = TextStyle::default();
        let a = FontKey::of(&style);
        style.italic = true;
        let b = FontKey::of(&style);
        assert_ne!(a, b);
        assert_eq!(a.weight, 400);
    }

    #[test]
    fn single_font_ignores_the_style() {
        let mut resolver = SingleFont::new(Arc::new(BoxProvider::default()));
        let regular = resolver.resolve(&TextStyle::default());
        let mut bold = TextStyle::default();
        bold.font_weight = crate::style::FontWeight::BOLD;
        let emphasized = resolver.resolve(&bold);
        assert!(Arc::ptr_eq(&regular, &emphasized));
    }
}
