use nalgebra::Vector3;

/// Normalizes an over-bright linear color by its largest channel.
///
/// Colors stay in [0, 1]^3 without shifting hue the way a plain per-channel
/// clamp would.
pub fn max_to_one(color: Vector3<f32>) -> Vector3<f32> {
    let max = color.x.max(color.y).max(color.z);
    if max > 1.0 { color / max } else { color }
}

/// Converts linear RGB to sRGB (gamma correction), applied when the color
/// buffer leaves the pipeline.
pub fn linear_to_srgb(color: Vector3<f32>) -> Vector3<f32> {
    let gamma = 1.0 / 2.2;
    Vector3::new(color.x.powf(gamma), color.y.powf(gamma), color.z.powf(gamma))
}

/// Remaps `value` from [input_min, input_max] to [0, 1], unclamped.
///
/// Used by the depth-buffer visualization to spread the narrow usable depth
/// band into a visible grayscale range.
pub fn remap(value: f32, input_min: f32, input_max: f32) -> f32 {
    (value - input_min) / (input_max - input_min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn max_to_one_leaves_in_range_colors_untouched() {
        let c = Vector3::new(0.2, 0.5, 1.0);
        assert_eq!(max_to_one(c), c);
    }

    #[test]
    fn max_to_one_scales_by_largest_channel() {
        let c = max_to_one(Vector3::new(2.0, 1.0, 0.5));
        assert_relative_eq!(c.x, 1.0);
        assert_relative_eq!(c.y, 0.5);
        assert_relative_eq!(c.z, 0.25);
    }

    #[test]
    fn remap_spreads_band() {
        assert_relative_eq!(remap(0.995, 0.995, 1.0), 0.0);
        assert_relative_eq!(remap(1.0, 0.995, 1.0), 1.0);
        assert_relative_eq!(remap(0.9975, 0.995, 1.0), 0.5, epsilon = 1e-4);
    }
}
