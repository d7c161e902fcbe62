use crate::{
    config::GenerateConfig,
    dither::ErrorDiffusion,
    error::Result,
    fill::{BlockFill, FillStrategy},
    gradient::ColorGradient,
    noise::NoiseField,
    pass::Pass,
    texture::Texture,
    utils::pixel::RGB,
};

pub mod config;
pub mod dither;
pub mod error;
pub mod fill;
pub mod generator;
pub mod gradient;
pub mod noise;
pub mod pass;
pub mod texture;
pub mod utils;

#[cfg(test)]
mod tests;

/// Run one full generation: the gradient block fill followed by the
/// error-diffusion dither, over one freshly allocated canvas.
///
/// All parameters are validated before the canvas exists, so an error
/// means no pixel was ever written.
pub fn run(config: &GenerateConfig, noise: &NoiseField) -> Result<Texture<RGB>> {
    config.validate()?;

    let gradient = ColorGradient::new(config.start_color, config.end_color);
    let strategy = FillStrategy::auto((
        config.canvas_width as usize,
        config.canvas_height as usize,
    ));
    let mut fill = BlockFill::new(
        noise,
        gradient,
        config.block_size,
        config.noise_scale,
        strategy,
    )?;
    let mut dither = ErrorDiffusion::new(
        config.block_size,
        config.dither_divisor,
        config.quantize_steps,
    )?;

    let mut canvas = Texture::new(config.canvas_width, config.canvas_height);
    fill.apply(&mut canvas);
    dither.apply(&mut canvas);

    Ok(canvas)
}

pub mod prelude {
    pub use crate::config::GenerateConfig;
    pub use crate::generator::{Generator, GeneratorState};
    pub use crate::noise::NoiseField;
    pub use crate::run;
    pub use crate::texture::{Texture, TextureMut, TextureRef};
    pub use crate::utils::pixel::RGB;
}
