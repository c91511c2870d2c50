//! Pointer hit testing for the editable text region.

use kern_surface::Surface;

/// Radius, in logical px around the surface center, that counts as
/// "clicked the text". A coarse approximation, not per-glyph testing.
pub const EDIT_HIT_RADIUS: f32 = 100.0;

/// Convert a pointer position in displayed coordinates to logical surface
/// coordinates, correcting for the displayed-size vs backing-size ratio and
/// the device pixel ratio.
pub fn to_logical(
    x: f32,
    y: f32,
    display_size: Option<[f32; 2]>,
    surface: &Surface,
) -> [f32; 2] {
    match display_size {
        Some([dw, dh]) if dw > 0.0 && dh > 0.0 => {
            let (pw, ph) = surface.physical_size();
            let scale = surface.scale();
            [
                x * (pw as f32 / dw) / scale,
                y * (ph as f32 / dh) / scale,
            ]
        }
        _ => [x, y],
    }
}

/// Whether a logical-space point falls inside the editable text region.
pub fn hits_text_region(surface: &Surface, point: [f32; 2]) -> bool {
    let (w, h) = surface.logical_size();
    let dx = point[0] - w * 0.5;
    let dy = point[1] - h * 0.5;
    (dx * dx + dy * dy).sqrt() <= EDIT_HIT_RADIUS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_radius_arbitrates_entry() {
        let s = Surface::new(800.0, 600.0, 1.0).unwrap();
        // Distance ~53.9 from (400, 300).
        assert!(hits_text_region(&s, [450.0, 320.0]));
        // Distance 150.
        assert!(!hits_text_region(&s, [550.0, 300.0]));
    }

    #[test]
    fn displayed_coordinates_rescale_to_logical() {
        let s = Surface::new(800.0, 600.0, 2.0).unwrap();
        // Surface displayed at half its logical size: physical 1600x1200,
        // displayed 400x300, so a displayed click at (200, 150) is the
        // logical center.
        let p = to_logical(200.0, 150.0, Some([400.0, 300.0]), &s);
        assert_eq!(p, [400.0, 300.0]);
    }

    #[test]
    fn missing_display_size_means_one_to_one() {
        let s = Surface::new(800.0, 600.0, 2.0).unwrap();
        assert_eq!(to_logical(10.0, 20.0, None, &s), [10.0, 20.0]);
    }
}
