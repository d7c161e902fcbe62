use noise::{NoiseFn, Perlin};

/// Deterministic 2D coherent noise source, sampled on [0.0, 1.0].
///
/// The Perlin permutation table is built once at construction and never
/// mutated afterwards; the field is shared by reference across generations.
#[derive(Debug, Clone)]
pub enum NoiseField {
    /// Perlin gradient noise over a seeded permutation table
    Perlin(Perlin),
    /// The same value everywhere. Degenerate field for flat fills.
    Constant(f64),
}

impl NoiseField {
    pub fn seeded(seed: u32) -> Self {
        NoiseField::Perlin(Perlin::new(seed))
    }

    pub fn constant(value: f64) -> Self {
        NoiseField::Constant(value.clamp(0.0, 1.0))
    }

    /// Sample the field at a point. Pure; any finite coordinates are valid.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        match self {
            // Perlin yields [-1, 1], remap to the unit range
            NoiseField::Perlin(perlin) => (perlin.get([x, y]) * 0.5 + 0.5).clamp(0.0, 1.0),
            NoiseField::Constant(value) => *value,
        }
    }
}
