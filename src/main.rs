use std::env;

use blockdither::{config::GenerateConfig, noise::NoiseField, run, utils};

fn main() {
    let args: Vec<String> = env::args().collect();

    let config_path = &args[1];
    let output_path = &args[2];

    let config = GenerateConfig::read_config(config_path).unwrap();
    let noise = NoiseField::seeded(config.seed);
    let canvas = run(&config, &noise).unwrap();

    utils::image::write_texture(&canvas, output_path, image::ImageFormat::Png).unwrap();
}
