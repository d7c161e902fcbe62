use crate::utils::pixel::RGB;

/// Linear two-color gradient keyed by a scalar in [0.0, 1.0].
#[derive(Debug, Clone, Copy)]
pub struct ColorGradient {
    start: RGB,
    end: RGB,
}

impl ColorGradient {
    pub fn new(start: RGB, end: RGB) -> Self {
        Self { start, end }
    }

    /// Per-channel linear blend. `t` is clamped first; 0 and 1 return the
    /// endpoints exactly. Output is always fully opaque.
    pub fn interpolate(&self, t: f64) -> RGB {
        let t = t.clamp(0.0, 1.0);
        // start*(1-t) + end*t keeps both endpoints exact
        let blend = |a: f64, b: f64| a * (1.0 - t) + b * t;
        RGB {
            r: blend(self.start.r, self.end.r),
            g: blend(self.start.g, self.end.g),
            b: blend(self.start.b, self.end.b),
            a: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_to_blue() -> ColorGradient {
        ColorGradient::new(RGB::from_u8(255, 0, 0, 255), RGB::from_u8(0, 0, 255, 255))
    }

    #[test]
    fn test_endpoints_are_exact() {
        let gradient = red_to_blue();
        let start = gradient.interpolate(0.0);
        let end = gradient.interpolate(1.0);

        assert_eq!((start.r, start.g, start.b), (1.0, 0.0, 0.0));
        assert_eq!((end.r, end.g, end.b), (0.0, 0.0, 1.0));
    }

    #[test]
    fn test_t_is_clamped() {
        let gradient = red_to_blue();
        assert_eq!(gradient.interpolate(-3.0), gradient.interpolate(0.0));
        assert_eq!(gradient.interpolate(42.0), gradient.interpolate(1.0));
    }

    #[test]
    fn test_midpoint_blend() {
        let mid = red_to_blue().interpolate(0.5);
        assert_eq!((mid.r, mid.g, mid.b), (0.5, 0.0, 0.5));
    }

    #[test]
    fn test_channels_are_monotonic() {
        let gradient = ColorGradient::new(RGB::from_u8(10, 200, 0, 255), RGB::from_u8(240, 20, 128, 255));
        let samples: Vec<RGB> = (0..=100).map(|i| gradient.interpolate(i as f64 / 100.0)).collect();
        for pair in samples.windows(2) {
            assert!(pair[1].r >= pair[0].r);
            assert!(pair[1].g <= pair[0].g);
            assert!(pair[1].b >= pair[0].b);
        }
    }

    #[test]
    fn test_output_is_opaque() {
        let gradient = ColorGradient::new(RGB::from_u8(0, 0, 0, 0), RGB::from_u8(255, 255, 255, 0));
        assert_eq!(gradient.interpolate(0.3).a, 1.0);
    }
}
