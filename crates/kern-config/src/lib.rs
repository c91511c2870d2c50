//! Kern configuration system.
//!
//! Loads editor settings from `kern.toml`. Every field has a default so a
//! partial (or absent) file is fine; parse failures are surfaced as typed
//! errors and the lenient loader falls back to defaults with a warning.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct KernConfig {
    /// Drawing surface settings.
    pub canvas: CanvasSection,
    /// Default text style.
    pub style: StyleSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CanvasSection {
    /// Logical width in px.
    pub width: u32,
    /// Logical height in px.
    pub height: u32,
    /// Device pixel ratio.
    pub scale: f32,
    /// Grid cell edge in logical px; `None` uses the engine default.
    pub grid_cell: Option<f32>,
}

impl Default for CanvasSection {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            scale: 1.0,
            grid_cell: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StyleSection {
    /// Font family name resolved against the system database.
    pub family: String,
    /// Font size in logical px.
    pub size: f32,
    /// CSS-scale weight (100-900) or a keyword ("normal", "bold").
    pub weight: String,
    pub italic: bool,
    pub underline: bool,
    /// Extra logical px after each glyph.
    pub letter_spacing: f32,
    /// Per-line height in logical px; `None` derives it from glyph metrics.
    pub line_height: Option<f32>,
    /// Hex text color, `#rrggbb` or `#rrggbbaa`.
    pub color: String,
}

impl Default for StyleSection {
    fn default() -> Self {
        Self {
            family: "Inter".to_string(),
            size: 48.0,
            weight: "normal".to_string(),
            italic: false,
            underline: false,
            letter_spacing: 0.0,
            line_height: None,
            color: "#000000".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl KernConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Load configuration, falling back to defaults when the file is
    /// missing or malformed. Malformed files are logged, not fatal.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(error) => {
                tracing::warn!(?error, ?path, "failed to load config, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_all_defaults() {
        let config: KernConfig = toml::from_str("").unwrap();
        assert_eq!(config, KernConfig::default());
        assert_eq!(config.canvas.width, 800);
        assert_eq!(config.style.color, "#000000");
    }

    #[test]
    fn partial_sections_fill_in_the_rest() {
        let config: KernConfig = toml::from_str(
            r#"
            [canvas]
            width = 1024

            [style]
            family = "Space Grotesk"
            underline = true
            line_height = 64.0
            "#,
        )
        .unwrap();
        assert_eq!(config.canvas.width, 1024);
        assert_eq!(config.canvas.height, 600);
        assert_eq!(config.style.family, "Space Grotesk");
        assert!(config.style.underline);
        assert_eq!(config.style.line_height, Some(64.0));
        assert_eq!(config.style.weight, "normal");
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = toml::from_str::<KernConfig>("canvas = 3").unwrap_err();
        let _ = ConfigError::from(err);
    }
}
