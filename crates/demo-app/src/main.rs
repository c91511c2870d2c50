//! Headless demo: drives the canvas engine through a draw, edit, commit
//! session and writes each stage out as a PNG.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use kern_canvas::{
    FontLibrary, FontWeight, KeyCode, KeyEvent, PointerEvent, TextCanvas, TextStyle,
};
use kern_config::{KernConfig, StyleSection};
use kern_surface::Surface;
use raster_core::Color;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = KernConfig::load_or_default("kern.toml");
    let style = style_from(&config.style);
    let width = config.canvas.width as f32;
    let height = config.canvas.height as f32;

    let mut canvas = TextCanvas::new(
        width,
        height,
        config.canvas.scale,
        Box::new(FontLibrary::new()),
    )?;
    canvas.on_text_change(Box::new(|text| tracing::info!(text, "text changed")));

    canvas.draw(
        "Hello from the kern canvas",
        width * 0.5,
        height * 0.5,
        &style,
    );
    save_frame(canvas.surface(), "frame-idle.png")?;

    // Click the text, type a little, let the caret blink through one cycle.
    canvas.handle_pointer_down(PointerEvent::left_at(width * 0.5, height * 0.5));
    for ch in ", edited".chars() {
        canvas.handle_key(KeyEvent::plain(KeyCode::Char(ch)));
    }
    canvas.tick(Duration::from_millis(530));
    canvas.tick(Duration::from_millis(530));
    save_frame(canvas.surface(), "frame-editing.png")?;

    // Escape ends the session; the display reverts to the committed text.
    canvas.handle_key(KeyEvent::plain(KeyCode::Escape));
    save_frame(canvas.surface(), "frame-committed.png")?;

    Ok(())
}

fn style_from(section: &StyleSection) -> TextStyle {
    TextStyle {
        font_family: section.family.clone(),
        font_size: section.size,
        font_weight: FontWeight::parse(&section.weight).unwrap_or_default(),
        italic: section.italic,
        underline: section.underline,
        letter_spacing: section.letter_spacing,
        line_height: section.line_height,
        color: Color::from_hex(&section.color).unwrap_or_else(Color::black),
    }
}

/// Write the surface contents as a straight-alpha PNG.
fn save_frame(surface: &Surface, path: &str) -> Result<()> {
    let (w, h) = surface.physical_size();
    let mut rgba = surface.frame_data().to_vec();
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u32;
        if a > 0 && a < 255 {
            for c in &mut px[..3] {
                *c = ((*c as u32 * 255 + a / 2) / a).min(255) as u8;
            }
        }
    }
    let image = image::RgbaImage::from_raw(w, h, rgba).context("frame buffer size mismatch")?;
    image
        .save(path)
        .with_context(|| format!("failed to write {path}"))?;
    tracing::info!(path, "wrote frame");
    Ok(())
}
