use rand::Rng;

use crate::{config::GenerateConfig, texture::Texture, utils::pixel::RGB};

pub fn rand_color(rng: &mut rand::rngs::ThreadRng) -> u8 {
    rng.random::<u8>()
}

pub fn rand_rgb(rng: &mut rand::rngs::ThreadRng) -> RGB {
    RGB::from_u8(
        rand_color(rng),
        rand_color(rng),
        rand_color(rng),
        255,
    )
}

pub fn gen_random_canvas(width: u32, height: u32) -> Texture<RGB> {
    let mut rng = rand::rng();
    let pixels: Vec<RGB> = (0..(width * height)).map(|_| rand_rgb(&mut rng)).collect();
    Texture::from_slice(width, height, &pixels)
}

/// Red-to-blue scenario config on a small canvas, fully deterministic.
pub fn scenario_config() -> GenerateConfig {
    GenerateConfig {
        canvas_width: 20,
        canvas_height: 20,
        block_size: 5,
        noise_scale: 0.0,
        start_color: RGB::from_u8(255, 0, 0, 255),
        end_color: RGB::from_u8(0, 0, 255, 255),
        dither_divisor: 5,
        quantize_steps: 3,
        seed: 42,
    }
}
