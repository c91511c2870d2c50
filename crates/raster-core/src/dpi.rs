/// Minimal DPI helpers used across the engine to keep scaling consistent.
///
/// Callers provide the platform scale factor (logical→physical) as `f32`;
/// nothing here depends on a windowing layer.

/// Clamp a device pixel ratio to a usable value.
#[inline]
pub fn sanitize_scale(scale: f32) -> f32 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

/// Snap a coordinate to the nearest device pixel for crisp edges at a given scale factor.
#[inline]
pub fn snap_to_device(v: f32, scale_factor: f32) -> f32 {
    let sf = sanitize_scale(scale_factor);
    (v * sf).round() / sf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bogus_scales_become_identity() {
        assert_eq!(sanitize_scale(0.0), 1.0);
        assert_eq!(sanitize_scale(f32::NAN), 1.0);
        assert_eq!(sanitize_scale(2.0), 2.0);
    }

    #[test]
    fn snapping_lands_on_device_pixels() {
        assert_eq!(snap_to_device(1.3, 2.0), 1.5);
        assert_eq!(snap_to_device(1.3, 1.0), 1.0);
    }
}
