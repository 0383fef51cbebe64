//! Tunable configuration, loadable from JSON.
//!
//! Every field has a default from `constants`, so a config file only needs
//! the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Half-open uniform sampling range `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn check(&self, field: &'static str) -> Result<(), ConfigError> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min >= self.max {
            return Err(ConfigError::Invalid {
                field,
                reason: format!("expected min < max, got [{}, {})", self.min, self.max),
            });
        }
        Ok(())
    }
}

/// Per-star random parameter ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationParams {
    pub size: Range,
    pub opacity: Range,
    pub twinkle_speed: Range,
}

impl Default for PopulationParams {
    fn default() -> Self {
        Self {
            size: Range::new(STAR_SIZE_MIN, STAR_SIZE_MAX),
            opacity: Range::new(STAR_OPACITY_MIN, STAR_OPACITY_MAX),
            twinkle_speed: Range::new(TWINKLE_SPEED_MIN, TWINKLE_SPEED_MAX),
        }
    }
}

/// Scroll velocity estimator gains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VelocityParams {
    pub k_scroll: f64,
    pub k_lerp: f64,
    pub k_decay: f64,
}

impl Default for VelocityParams {
    fn default() -> Self {
        Self {
            k_scroll: K_SCROLL,
            k_lerp: K_LERP,
            k_decay: K_DECAY,
        }
    }
}

/// Frame renderer parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParams {
    pub twinkle_rate: f64,
    pub streak_gain: f64,
    pub streak_max_px: f64,
    pub streak_threshold_px: f64,
    pub streak_mid_stop: f32,
    pub streak_mid_alpha: f64,
    pub glow_size_threshold: f64,
    pub glow_radius_factor: f64,
    pub glow_alpha: f64,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            twinkle_rate: TWINKLE_RATE,
            streak_gain: STREAK_GAIN,
            streak_max_px: STREAK_MAX_PX,
            streak_threshold_px: STREAK_THRESHOLD_PX,
            streak_mid_stop: STREAK_MID_STOP,
            streak_mid_alpha: STREAK_MID_ALPHA,
            glow_size_threshold: GLOW_SIZE_THRESHOLD,
            glow_radius_factor: GLOW_RADIUS_FACTOR,
            glow_alpha: GLOW_ALPHA,
        }
    }
}

impl RenderParams {
    /// Streak length in pixels for a given speed, clamped to `streak_max_px`.
    pub fn streak_length(&self, speed: f64) -> f64 {
        (speed * self.streak_gain).min(self.streak_max_px)
    }
}

/// Complete star field configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarFieldConfig {
    /// RNG seed. Same seed = same population.
    pub seed: u64,
    pub star_count: usize,
    /// World height in viewport heights. Must be >= 1.
    pub virtual_height_multiplier: f64,
    /// Culling margin in world units.
    pub overscan: f64,
    /// Elapsed-time increment per frame (seconds).
    pub frame_step_secs: f64,
    pub population: PopulationParams,
    pub velocity: VelocityParams,
    pub render: RenderParams,
}

impl Default for StarFieldConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            star_count: STAR_COUNT,
            virtual_height_multiplier: VIRTUAL_HEIGHT_MULTIPLIER,
            overscan: OVERSCAN,
            frame_step_secs: FRAME_STEP_SECS,
            population: PopulationParams::default(),
            velocity: VelocityParams::default(),
            render: RenderParams::default(),
        }
    }
}

impl StarFieldConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a JSON config string.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every invariant the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.star_count == 0 {
            return Err(invalid("star_count", "must be at least 1"));
        }
        if !(self.virtual_height_multiplier >= 1.0) {
            return Err(invalid(
                "virtual_height_multiplier",
                format!("must be >= 1, got {}", self.virtual_height_multiplier),
            ));
        }
        if !(self.overscan >= 0.0) {
            return Err(invalid("overscan", "must be non-negative"));
        }
        if !(self.frame_step_secs > 0.0) {
            return Err(invalid("frame_step_secs", "must be positive"));
        }

        let pop = &self.population;
        pop.size.check("population.size")?;
        pop.opacity.check("population.opacity")?;
        pop.twinkle_speed.check("population.twinkle_speed")?;
        if pop.size.min <= 0.0 {
            return Err(invalid("population.size", "star size must be > 0"));
        }
        if pop.opacity.min <= 0.0 || pop.opacity.max > 1.0 {
            return Err(invalid("population.opacity", "opacity must lie in (0, 1]"));
        }

        let vel = &self.velocity;
        if !(vel.k_lerp > 0.0 && vel.k_lerp <= 1.0) {
            return Err(invalid("velocity.k_lerp", "must lie in (0, 1]"));
        }
        if !(vel.k_decay >= 0.0 && vel.k_decay < 1.0) {
            return Err(invalid("velocity.k_decay", "must lie in [0, 1)"));
        }
        if !vel.k_scroll.is_finite() {
            return Err(invalid("velocity.k_scroll", "must be finite"));
        }

        let render = &self.render;
        if !(render.streak_max_px >= 0.0) {
            return Err(invalid("render.streak_max_px", "must be non-negative"));
        }
        if !(0.0..=1.0).contains(&render.streak_mid_stop) {
            return Err(invalid("render.streak_mid_stop", "must lie in [0, 1]"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
