use crate::{
    config::GenerateConfig, error::Result, noise::NoiseField, texture::Texture,
    utils::pixel::RGB,
};

/// Trigger state of a [Generator].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    Idle,
    Generating,
}

/// Explicit start/stop trigger around the synchronous pipeline.
///
/// `start` arms exactly one generation; `step` runs it to completion and
/// auto-returns to Idle. A generation cannot be interrupted once `step`
/// begins, so `stop` only has effect before the next `step`.
///
/// Owns the noise field, which is built once and shared by reference with
/// every run.
pub struct Generator {
    noise: NoiseField,
    state: GeneratorState,
}

impl Generator {
    pub fn new(noise: NoiseField) -> Self {
        Self {
            noise,
            state: GeneratorState::Idle,
        }
    }

    pub fn seeded(seed: u32) -> Self {
        Generator::new(NoiseField::seeded(seed))
    }

    pub fn state(&self) -> GeneratorState {
        self.state
    }

    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    /// Arm one generation. No-op while already armed.
    pub fn start(&mut self) {
        self.state = GeneratorState::Generating;
    }

    /// Disarm before the next [Generator::step].
    pub fn stop(&mut self) {
        self.state = GeneratorState::Idle;
    }

    /// Run one full generation if armed, returning the finished canvas.
    /// Returns `Ok(None)` when idle. The state returns to Idle whether the
    /// run produced an image or failed validation.
    pub fn step(&mut self, config: &GenerateConfig) -> Result<Option<Texture<RGB>>> {
        if self.state != GeneratorState::Generating {
            return Ok(None);
        }

        let result = crate::run(config, &self.noise);
        self.state = GeneratorState::Idle;
        result.map(Some)
    }
}
