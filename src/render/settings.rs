//! Tunables of the caster and compositor.
use std::f32::consts::TAU;

use serde::Deserialize;

use crate::render::pixel::Pixel;

/// Upper bound on `max_range / step`, the samples one ray may take.
pub const MAX_MARCH_STEPS: usize = 10_000_000;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidSetting {
    #[error("{name} must be a finite number above zero, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("field of view must lie strictly between 0 and 2π, got {0}")]
    FieldOfView(f32),
    #[error("max_range / step asks for {steps} samples per ray, at most {max} allowed")]
    TooManySteps { steps: f32, max: usize },
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Ray marching increment, in map units.
    pub step: f32,
    /// Rays stop after this many map units without a hit.
    pub max_range: f32,
    /// Backward nudge along the ray's x component used to tell which face was hit.
    pub face_probe: f32,
    /// Wall columns are capped at `max_column_scale * height` pixels.
    pub max_column_scale: f32,
    pub background: Pixel,
    pub trace_color: Pixel,
    pub player_color: Pixel,
    pub actor_color: Pixel,
    pub marker_size: i32,
    pub palette_seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            step: 0.01,
            max_range: 20.0,
            face_probe: 0.01,
            max_column_scale: 16.0,
            background: Pixel::rgb(60, 60, 60),
            trace_color: Pixel::rgb(170, 170, 170),
            player_color: Pixel::RED,
            actor_color: Pixel::rgb(255, 220, 0),
            marker_size: 4,
            palette_seed: 123456,
        }
    }
}

impl RenderConfig {
    /// Rejects values the caster cannot march with: zero, negative or
    /// non-finite lengths, and ranges needing more than [`MAX_MARCH_STEPS`].
    pub fn check(&self) -> Result<(), InvalidSetting> {
        let positive = |name: &'static str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(InvalidSetting::NotPositive { name, value })
            }
        };
        positive("step", self.step)?;
        positive("max_range", self.max_range)?;
        positive("face_probe", self.face_probe)?;
        positive("max_column_scale", self.max_column_scale)?;

        let steps = self.max_range / self.step;
        if steps > MAX_MARCH_STEPS as f32 {
            return Err(InvalidSetting::TooManySteps { steps, max: MAX_MARCH_STEPS });
        }
        Ok(())
    }
}

/// A usable horizontal field of view lies in `(0, 2π)`.
pub fn check_fov(fov: f32) -> Result<(), InvalidSetting> {
    if fov.is_finite() && fov > 0.0 && fov < TAU {
        Ok(())
    } else {
        Err(InvalidSetting::FieldOfView(fov))
    }
}
