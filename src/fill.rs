use itertools::Itertools;
use multiversion::multiversion;
use rayon::prelude::*;

use crate::{
    error::{BlockDitherError, Result},
    gradient::ColorGradient,
    noise::NoiseField,
    pass::Pass,
    texture::{TextureMut, TextureShape},
    utils::{grid::BlockGrid, pixel::RGB},
};

/// Strategy for the gradient fill pass.
///
/// Blocks never interact, so the pass can split freely across rows; the
/// dithering pass that follows cannot.
#[derive(Debug, Clone, Copy)]
pub enum FillStrategy {
    Seq,
    Par,
}

impl FillStrategy {
    pub fn auto(shape_hint: TextureShape) -> Self {
        let (width, height) = shape_hint;
        let count = width * height;

        if width < 450 || count < 202_500 {
            return FillStrategy::Seq;
        }
        FillStrategy::Par
    }
}

/// First pipeline pass: paint the canvas in uniform-colored blocks, one
/// coherent-noise sample per block anchor mapped through the gradient.
pub struct BlockFill<'n> {
    noise: &'n NoiseField,
    gradient: ColorGradient,
    block_size: usize,
    noise_scale: f64,
    strategy: FillStrategy,
}

impl<'n> BlockFill<'n> {
    pub fn new(
        noise: &'n NoiseField,
        gradient: ColorGradient,
        block_size: u32,
        noise_scale: f64,
        strategy: FillStrategy,
    ) -> Result<Self> {
        if block_size == 0 {
            return Err(BlockDitherError::InvalidParameter(
                "block_size must be at least 1".to_string(),
            ));
        }
        if !noise_scale.is_finite() {
            return Err(BlockDitherError::InvalidParameter(format!(
                "noise_scale must be finite, got {}",
                noise_scale
            )));
        }

        Ok(Self {
            noise,
            gradient,
            block_size: block_size as usize,
            noise_scale,
            strategy,
        })
    }

    /// Color of the block anchored at pixel coordinates (x0, y0).
    fn sample_block(&self, x0: usize, y0: usize) -> RGB {
        let value = self
            .noise
            .sample(x0 as f64 * self.noise_scale, y0 as f64 * self.noise_scale);
        self.gradient.interpolate(value)
    }

    /// One color per block, raster order, `columns` per block row.
    fn block_colors(&self, width: usize, height: usize) -> Vec<RGB> {
        let grid = BlockGrid::new(width, height, self.block_size);
        match self.strategy {
            FillStrategy::Seq => grid
                .map(|(x0, y0, _, _)| self.sample_block(x0, y0))
                .collect_vec(),
            FillStrategy::Par => {
                let (columns, block) = (grid.columns(), self.block_size);
                (0..grid.columns() * grid.rows())
                    .into_par_iter()
                    .map(|idx| self.sample_block(idx % columns * block, idx / columns * block))
                    .collect()
            }
        }
    }
}

impl Pass for BlockFill<'_> {
    fn apply<C: TextureMut<Inner = RGB>>(&mut self, canvas: &mut C) {
        let (width, height) = canvas.shape();
        let block = self.block_size;
        let columns = BlockGrid::new(width, height, block).columns();
        let colors = self.block_colors(width, height);
        let out = canvas.as_mut();

        match self.strategy {
            FillStrategy::Seq => out.chunks_mut(width).enumerate().for_each(|(y, row)| {
                let colors_row = &colors[y / block * columns..][..columns];
                fill_row(row, colors_row, block);
            }),
            FillStrategy::Par => out.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
                let colors_row = &colors[y / block * columns..][..columns];
                fill_row(row, colors_row, block);
            }),
        }
    }
}

// the trailing chunk is shorter where the block grid overhangs the canvas,
// which is exactly the required edge clipping
#[multiversion(targets("x86_64+avx512f", "x86_64+avx2", "x86_64+sse2"))]
fn fill_row(row: &mut [RGB], colors: &[RGB], block: usize) {
    row.chunks_mut(block)
        .zip(colors)
        .for_each(|(span, color)| span.fill(*color));
}
