use crate::{
    error::{BlockDitherError, Result},
    pass::Pass,
    texture::TextureMut,
    utils::{grid::BlockGrid, num::quantize_channel, pixel::RGB},
};

/// Floyd–Steinberg kernel: (dx, dy) offsets in sub-block steps, weight.
/// Weights sum to 16/16, so an interior sub-block conserves its error mass.
const FLOYD_STEINBERG: [(isize, isize, f64); 4] = [
    (1, 0, 7.0 / 16.0),
    (-1, 1, 3.0 / 16.0),
    (0, 1, 5.0 / 16.0),
    (1, 1, 1.0 / 16.0),
];

/// Second pipeline pass: quantize sub-blocks in place and diffuse the
/// rounding error forward in raster order.
///
/// Each sub-block is represented by its top-left corner pixel, not an
/// average over its area; diffusion writes land on corner pixels of
/// sub-blocks visited later, steering their quantization.
pub struct ErrorDiffusion {
    sub_size: usize,
    steps: u32,
}

impl ErrorDiffusion {
    pub fn new(block_size: u32, dither_divisor: u32, quantize_steps: u32) -> Result<Self> {
        if block_size == 0 {
            return Err(BlockDitherError::InvalidParameter(
                "block_size must be at least 1".to_string(),
            ));
        }
        if dither_divisor == 0 {
            return Err(BlockDitherError::InvalidParameter(
                "dither_divisor must be at least 1".to_string(),
            ));
        }
        if quantize_steps == 0 {
            return Err(BlockDitherError::InvalidParameter(
                "quantize_steps must be at least 1".to_string(),
            ));
        }

        let sub_size = (block_size / dither_divisor) as usize;
        if sub_size < 1 {
            return Err(BlockDitherError::InvalidParameter(format!(
                "block_size {} / dither_divisor {} leaves sub-blocks under one pixel",
                block_size, dither_divisor
            )));
        }

        Ok(Self {
            sub_size,
            steps: quantize_steps,
        })
    }

    /// Snap every color channel to one of `steps + 1` levels, opaque.
    fn quantize(&self, color: &RGB) -> RGB {
        RGB {
            r: quantize_channel(color.r, self.steps).clamp(0.0, 1.0),
            g: quantize_channel(color.g, self.steps).clamp(0.0, 1.0),
            b: quantize_channel(color.b, self.steps).clamp(0.0, 1.0),
            a: 1.0,
        }
    }
}

impl Pass for ErrorDiffusion {
    fn apply<C: TextureMut<Inner = RGB>>(&mut self, canvas: &mut C) {
        let (width, height) = canvas.shape();
        let sub = self.sub_size;
        let buffer = canvas.as_mut();

        for (x0, y0, w, h) in BlockGrid::new(width, height, sub) {
            // earlier diffusion writes may have left the corner out of
            // range; it is clamped the moment it becomes a current color
            let current = buffer[y0 * width + x0].clamped();
            let quantized = self.quantize(&current);

            for y in y0..y0 + h {
                let row_start = y * width + x0;
                buffer[row_start..row_start + w].fill(quantized);
            }

            let error = current.channel_error(&quantized);
            diffuse(buffer, width, height, x0, y0, sub, &error);
        }
    }
}

/// Add one sub-block's weighted quantization error onto the corner pixels
/// of its four downstream neighbors. Off-canvas targets are dropped, losing
/// that share of the error mass.
fn diffuse(
    buffer: &mut [RGB],
    width: usize,
    height: usize,
    x0: usize,
    y0: usize,
    sub: usize,
    error: &RGB,
) {
    for (dx, dy, weight) in FLOYD_STEINBERG {
        let tx = x0 as isize + dx * sub as isize;
        let ty = y0 as isize + dy * sub as isize;
        if tx < 0 || ty < 0 || tx >= width as isize || ty >= height as isize {
            continue;
        }
        buffer[ty as usize * width + tx as usize].accumulate(error, weight);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::Texture;

    fn gray(value: f64) -> RGB {
        RGB {
            r: value,
            g: value,
            b: value,
            a: 1.0,
        }
    }

    #[test]
    fn test_new_rejects_degenerate_parameters() {
        assert!(ErrorDiffusion::new(0, 5, 3).is_err());
        assert!(ErrorDiffusion::new(15, 0, 3).is_err());
        assert!(ErrorDiffusion::new(15, 5, 0).is_err());
        // 4 / 5 floors to zero pixels per sub-block
        assert!(matches!(
            ErrorDiffusion::new(4, 5, 3),
            Err(BlockDitherError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_sub_size_floors() {
        // 13 / 5 = 2 remainder 3; the remainder stays irregular by design
        let pass = ErrorDiffusion::new(13, 5, 3).unwrap();
        assert_eq!(pass.sub_size, 2);
    }

    #[test]
    fn test_diffuse_interior_conserves_error_mass() {
        let width = 5;
        let height = 5;
        let mut buffer = vec![RGB::default(); width * height];
        let error = RGB {
            r: 0.16,
            g: -0.5,
            b: 1.0,
            a: 1.0,
        };

        diffuse(&mut buffer, width, height, 2, 2, 1, &error);

        let sum_r: f64 = buffer.iter().map(|p| p.r).sum();
        let sum_g: f64 = buffer.iter().map(|p| p.g).sum();
        let sum_b: f64 = buffer.iter().map(|p| p.b).sum();
        assert!((sum_r - error.r).abs() < 1e-12);
        assert!((sum_g - error.g).abs() < 1e-12);
        assert!((sum_b - error.b).abs() < 1e-12);

        // exact per-target weights
        assert_eq!(buffer[2 * width + 3].r, error.r * 7.0 / 16.0);
        assert_eq!(buffer[3 * width + 1].r, error.r * 3.0 / 16.0);
        assert_eq!(buffer[3 * width + 2].r, error.r * 5.0 / 16.0);
        assert_eq!(buffer[3 * width + 3].r, error.r * 1.0 / 16.0);
    }

    #[test]
    fn test_diffuse_drops_every_target_at_bottom_right_corner() {
        let width = 4;
        let height = 4;
        let mut buffer = vec![RGB::default(); width * height];

        diffuse(&mut buffer, width, height, 3, 3, 1, &gray(0.7));

        assert!(buffer.iter().all(|p| *p == RGB::default()));
    }

    #[test]
    fn test_diffuse_clips_left_edge() {
        let width = 4;
        let height = 4;
        let mut buffer = vec![RGB::default(); width * height];
        let error = gray(0.32);

        // anchor on the left edge loses the 3/16 down-left target
        diffuse(&mut buffer, width, height, 0, 0, 1, &error);

        let received: f64 = buffer.iter().map(|p| p.r).sum();
        assert!((received - error.r * 13.0 / 16.0).abs() < 1e-12);
    }

    #[test]
    fn test_first_sub_block_quantizes_flat_value_directly() {
        // no prior error has reached (0, 0), so it quantizes the raw fill
        let mut canvas = Texture::filled(4, 4, gray(0.5));
        let mut pass = ErrorDiffusion::new(5, 5, 3).unwrap();
        pass.apply(&mut canvas);

        let first = canvas.as_ref()[0];
        assert_eq!(first.r, 2.0 / 3.0);
        assert_eq!(first.g, 2.0 / 3.0);
        assert_eq!(first.b, 2.0 / 3.0);
    }

    #[test]
    fn test_every_pixel_ends_on_a_quantization_level() {
        // each sub-block is overwritten by its own fill after any diffusion
        // writes into it, so only discrete levels survive the pass
        let steps = 3;
        let mut canvas = Texture::filled(9, 7, gray(0.37));
        let mut pass = ErrorDiffusion::new(10, 5, steps).unwrap();
        pass.apply(&mut canvas);

        let levels: Vec<f64> = (0..=steps).map(|l| l as f64 / steps as f64).collect();
        for pixel in canvas.as_ref() {
            for channel in [pixel.r, pixel.g, pixel.b] {
                assert!(
                    levels.iter().any(|l| (channel - l).abs() < 1e-9),
                    "channel {} is not on a level",
                    channel
                );
            }
            assert_eq!(pixel.a, 1.0);
        }
    }

    #[test]
    fn test_irregular_trailing_sub_blocks_are_filled() {
        // 7 wide with sub_size 2 leaves a 1-wide trailing column
        let mut canvas = Texture::filled(7, 7, gray(0.9));
        let mut pass = ErrorDiffusion::new(10, 5, 1).unwrap();
        pass.apply(&mut canvas);

        for pixel in canvas.as_ref() {
            assert!(pixel.r == 0.0 || pixel.r == 1.0);
        }
    }

    #[test]
    fn test_diffused_error_steers_later_sub_blocks() {
        // a mid gray slightly under the top level: the first sub-block
        // rounds up, pushing negative error right; the neighbor then rounds
        // down where it alone would have rounded up as well
        let mut canvas = Texture::filled(2, 1, gray(0.5));
        let mut pass = ErrorDiffusion::new(1, 1, 1).unwrap();
        pass.apply(&mut canvas);

        let pixels = canvas.as_ref();
        assert_eq!(pixels[0].r, 1.0);
        // 0.5 + (0.5 - 1.0) * 7/16 = 0.28125, rounds to 0
        assert_eq!(pixels[1].r, 0.0);
    }
}
