//! Game settings and tuning
//!
//! Defaults mirror `crate::consts`. Hosts may override any field from JSON;
//! missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Firework and particle tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireworkTuning {
    /// Upward travel per update (pixels)
    pub ascent_rate: f32,
    /// Explosion altitude band, measured from the top of the field (pixels)
    pub explode_min_y: f32,
    pub explode_max_y: f32,
    /// Rockets that climb to this height without exploding are dropped
    pub ceiling_y: f32,
    /// Base firework count per trigger, inclusive range
    pub base_count_min: u32,
    pub base_count_max: u32,
    /// Hard cap on fireworks per trigger
    pub max_fireworks: u32,
    /// Particles per explosion, half-open range
    pub particles_min: u32,
    pub particles_max: u32,
    /// Initial particle speed band (pixels per update)
    pub speed_min: f32,
    pub speed_max: f32,
    /// Particle lifetime band (updates)
    pub life_min: u32,
    pub life_max: u32,
    /// Constant downward drift per update
    pub gravity: f32,
    /// Velocity multiplier per update
    pub friction: f32,
}

impl Default for FireworkTuning {
    fn default() -> Self {
        Self {
            ascent_rate: 3.0,
            explode_min_y: 60.0,
            explode_max_y: 120.0,
            ceiling_y: 50.0,
            base_count_min: 3,
            base_count_max: 5,
            max_fireworks: MAX_FIREWORKS,
            particles_min: 30,
            particles_max: 50,
            speed_min: 2.0,
            speed_max: 5.0,
            life_min: 60,
            life_max: 90,
            gravity: 0.1,
            friction: 0.98,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Grid side length in cells
    pub grid_size: i32,
    /// Cell size in pixels
    pub cell_size: f32,
    /// Creature tick period (ms)
    pub tick_period_ms: f64,
    /// Score per food
    pub food_reward: u64,
    /// Foods per firework trigger
    pub foods_per_trigger: u32,
    /// Random food placements before the deterministic scan
    pub food_spawn_attempts: u32,
    pub fireworks: FireworkTuning,
    /// Hex colors used for rockets and particles
    pub palette: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            cell_size: CELL_SIZE,
            tick_period_ms: TICK_PERIOD_MS,
            food_reward: FOOD_REWARD,
            foods_per_trigger: FOODS_PER_TRIGGER,
            food_spawn_attempts: FOOD_SPAWN_ATTEMPTS,
            fireworks: FireworkTuning::default(),
            palette: PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!(
            "Loaded settings: {}x{} grid, {} ms tick",
            settings.grid_size,
            settings.grid_size,
            settings.tick_period_ms
        );
        Ok(settings)
    }

    /// Serialize settings to JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Play field side length in pixels
    pub fn field_size(&self) -> f32 {
        self.grid_size as f32 * self.cell_size
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let fw = &self.fireworks;
        let problem = if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            Some(format!(
                "grid_size {} outside {}..={}",
                self.grid_size, MIN_GRID_SIZE, MAX_GRID_SIZE
            ))
        } else if self.cell_size <= 0.0 {
            Some("cell_size must be positive".to_string())
        } else if self.tick_period_ms <= 0.0 {
            Some("tick_period_ms must be positive".to_string())
        } else if self.foods_per_trigger == 0 {
            Some("foods_per_trigger must be at least 1".to_string())
        } else if self.palette.is_empty() {
            Some("palette must not be empty".to_string())
        } else if !(fw.friction > 0.0 && fw.friction < 1.0) {
            Some(format!("friction {} outside (0, 1)", fw.friction))
        } else if fw.base_count_min == 0 || fw.base_count_min > fw.base_count_max {
            Some("base firework count range is empty".to_string())
        } else if fw.max_fireworks == 0 {
            Some("max_fireworks must be at least 1".to_string())
        } else if fw.particles_min == 0 || fw.particles_min >= fw.particles_max {
            Some("particle count range is empty".to_string())
        } else if fw.life_min == 0 || fw.life_min >= fw.life_max {
            Some("particle life range is empty".to_string())
        } else if fw.speed_min >= fw.speed_max {
            Some("particle speed range is empty".to_string())
        } else if fw.explode_min_y >= fw.explode_max_y {
            Some("explosion altitude band is empty".to_string())
        } else if fw.ascent_rate <= 0.0 {
            Some("ascent_rate must be positive".to_string())
        } else {
            None
        };

        match problem {
            Some(msg) => {
                log::warn!("Rejected settings: {}", msg);
                Err(SettingsError::Invalid(msg))
            }
            None => Ok(()),
        }
    }
}
