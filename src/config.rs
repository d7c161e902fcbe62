use std::{
    fs::File,
    io::{Read, Write},
};

use json::JsonValue;
use rand::Rng;

use crate::{
    error::{BlockDitherError, Result},
    utils::pixel::RGB,
};

pub const DEFAULT_BLOCK_SIZE: u32 = 15;
pub const DEFAULT_NOISE_SCALE: f64 = 0.01;
pub const DEFAULT_DITHER_DIVISOR: u32 = 5;
pub const DEFAULT_QUANTIZE_STEPS: u32 = 3;
pub const DEFAULT_START_COLOR: &str = "#ff99c7";
pub const DEFAULT_END_COLOR: &str = "#09360b";

/// All parameters of one generation. Supplied once per run and immutable
/// for its duration.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Side of one gradient block, in pixels. Recommended range [5, 100].
    pub block_size: u32,
    /// Multiplier from pixel coordinates to noise space.
    /// Recommended range [0.001, 0.1].
    pub noise_scale: f64,
    pub start_color: RGB,
    pub end_color: RGB,
    /// Sub-blocks per block side for the dithering pass.
    pub dither_divisor: u32,
    /// Per-channel quantization steps; yields `quantize_steps + 1` levels.
    pub quantize_steps: u32,
    /// Noise table seed; fixing it makes the generation reproducible.
    pub seed: u32,
}

impl GenerateConfig {
    fn to_config(json_string: String) -> Result<GenerateConfig> {
        let parsed = json::parse(json_string.as_str())
            .map_err(|e| BlockDitherError::Config(format!("not valid JSON: {}", e)))?;

        let canvas_width = match parsed["canvas_width"].as_u32() {
            Some(val) => val,
            None => return config_error("Couldn't parse canvas_width"),
        };
        let canvas_height = match parsed["canvas_height"].as_u32() {
            Some(val) => val,
            None => return config_error("Couldn't parse canvas_height"),
        };

        let block_size = match &parsed["block_size"] {
            JsonValue::Null => DEFAULT_BLOCK_SIZE,
            value => match value.as_u32() {
                Some(val) => val,
                None => return config_error("Couldn't parse block_size"),
            },
        };
        let noise_scale = match &parsed["noise_scale"] {
            JsonValue::Null => DEFAULT_NOISE_SCALE,
            value => match value.as_f64() {
                Some(val) => val,
                None => return config_error("Couldn't parse noise_scale"),
            },
        };
        let dither_divisor = match &parsed["dither_divisor"] {
            JsonValue::Null => DEFAULT_DITHER_DIVISOR,
            value => match value.as_u32() {
                Some(val) => val,
                None => return config_error("Couldn't parse dither_divisor"),
            },
        };
        let quantize_steps = match &parsed["quantize_steps"] {
            JsonValue::Null => DEFAULT_QUANTIZE_STEPS,
            value => match value.as_u32() {
                Some(val) => val,
                None => return config_error("Couldn't parse quantize_steps"),
            },
        };

        let start_color = match parsed["start_color"].as_str() {
            Some(hex) => RGB::from_hex(hex)?,
            None if parsed["start_color"].is_null() => RGB::from_hex(DEFAULT_START_COLOR)?,
            None => return config_error("Couldn't parse start_color"),
        };
        let end_color = match parsed["end_color"].as_str() {
            Some(hex) => RGB::from_hex(hex)?,
            None if parsed["end_color"].is_null() => RGB::from_hex(DEFAULT_END_COLOR)?,
            None => return config_error("Couldn't parse end_color"),
        };

        let seed = match &parsed["seed"] {
            JsonValue::Null => rand::rng().random::<u32>(),
            value => match value.as_u32() {
                Some(val) => val,
                None => return config_error("Couldn't parse seed"),
            },
        };

        Ok(GenerateConfig {
            canvas_width,
            canvas_height,
            block_size,
            noise_scale,
            start_color,
            end_color,
            dither_divisor,
            quantize_steps,
            seed,
        })
    }

    fn to_json(config: &GenerateConfig) -> String {
        let mut data = json::JsonValue::new_object();

        data["canvas_width"] = config.canvas_width.into();
        data["canvas_height"] = config.canvas_height.into();
        data["block_size"] = config.block_size.into();
        data["noise_scale"] = config.noise_scale.into();
        data["start_color"] = format!("#{}", config.start_color.to_hex()).into();
        data["end_color"] = format!("#{}", config.end_color.to_hex()).into();
        data["dither_divisor"] = config.dither_divisor.into();
        data["quantize_steps"] = config.quantize_steps.into();
        data["seed"] = config.seed.into();

        data.to_string()
    }

    pub fn read_config(path: &String) -> Result<GenerateConfig> {
        let mut file = File::open(path)?;
        let mut buff: Vec<u8> = Vec::new();
        let _ = file.read_to_end(&mut buff)?;

        let json_string = String::from_utf8(buff)
            .map_err(|e| BlockDitherError::Config(format!("config is not UTF-8: {}", e)))?;

        GenerateConfig::to_config(json_string)
    }

    pub fn write_config(&self, path: String) -> Result<()> {
        let string = GenerateConfig::to_json(self);
        let mut file = File::create(path)?;
        file.write_all(string.as_bytes())?;
        Ok(())
    }

    /// Every InvalidParameter check, in one place, before any allocation
    /// or pixel write.
    pub fn validate(&self) -> Result<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return invalid_parameter("canvas dimensions must be at least 1x1");
        }
        if self.block_size == 0 {
            return invalid_parameter("block_size must be at least 1");
        }
        if !self.noise_scale.is_finite() {
            return invalid_parameter("noise_scale must be finite");
        }
        if self.dither_divisor == 0 {
            return invalid_parameter("dither_divisor must be at least 1");
        }
        if self.quantize_steps == 0 {
            return invalid_parameter("quantize_steps must be at least 1");
        }
        if self.block_size / self.dither_divisor == 0 {
            return invalid_parameter("block_size / dither_divisor leaves sub-blocks under one pixel");
        }
        Ok(())
    }
}

fn config_error(msg: &str) -> Result<GenerateConfig> {
    Err(BlockDitherError::Config(String::from(msg)))
}

fn invalid_parameter(msg: &str) -> Result<()> {
    Err(BlockDitherError::InvalidParameter(String::from(msg)))
}
