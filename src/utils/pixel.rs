use std::fmt::Display;

use crate::error::{BlockDitherError, Result};

// values are defined in a range [0.0, 1.0]; dithering may push them
// transiently outside that range, readers clamp
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub struct RGB {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl RGB {
    pub fn from_u8(r: u8, g: u8, b: u8, a: u8) -> RGB {
        RGB {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    /// Parse a `#rrggbb` hex string, full opacity.
    pub fn from_hex(string: &str) -> Result<RGB> {
        let clean_string = string.trim().to_lowercase().replace("#", "");
        if clean_string.len() != 6 {
            return Err(BlockDitherError::Config(format!(
                "expected a #rrggbb color, got {:?}",
                string
            )));
        }

        let channel = |range: std::ops::Range<usize>| -> Result<f64> {
            u32::from_str_radix(&clean_string[range], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|e| BlockDitherError::Config(format!("bad hex color {:?}: {}", string, e)))
        };

        Ok(RGB {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
            a: 1.0,
        })
    }

    pub fn to_hex(&self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Clamp and round out to byte channels. The raw buffer is allowed to
    /// hold out-of-range values, so every reader goes through this.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let quantize = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }

    /// Copy with every color channel clamped back to [0.0, 1.0].
    pub fn clamped(&self) -> RGB {
        RGB {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    /// Per-channel difference against `other`, color channels only.
    /// Alpha carries no error.
    pub fn channel_error(&self, other: &RGB) -> RGB {
        RGB {
            r: self.r - other.r,
            g: self.g - other.g,
            b: self.b - other.b,
            a: 1.0,
        }
    }

    /// Accumulate a weighted share of diffused error into the color
    /// channels. No clamping here; see [RGB::clamped].
    pub fn accumulate(&mut self, error: &RGB, factor: f64) {
        self.r += error.r * factor;
        self.g += error.g * factor;
        self.b += error.b * factor;
    }
}

impl Display for RGB {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
