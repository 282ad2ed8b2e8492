//! Data-driven game balance
//!
//! Loaded from a JSON file (or defaults). Every field has a default so partial
//! files are accepted.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to load or validate a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Enemies ===
    /// Smallest size an enemy can spawn at
    pub min_size: f32,
    /// Largest size an enemy can spawn at
    pub max_size: f32,
    /// Slowest an enemy can move (world units/s)
    pub min_speed: f32,
    /// Fastest an enemy can move (world units/s)
    pub max_speed: f32,
    /// Unscaled enemy collider size, used for the off-screen spawn margin
    pub collider_size: Vec2,
    /// Live enemies kept on screen during a round
    pub num_enemies: usize,

    // === Player ===
    /// Player size at round start
    pub original_scale: f32,
    /// Size gained per enemy eaten
    pub growth: f32,
    /// Player movement speed (world units/s)
    pub player_speed: f32,
    /// Keep the player inside the screen walls
    pub confine_player: bool,

    // === Round ===
    /// Points needed to win
    pub win_threshold: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            min_size: 0.1,
            max_size: 0.5,
            min_speed: 0.1,
            max_speed: 10.0,
            collider_size: Vec2::ONE,
            num_enemies: 10,

            original_scale: 1.0,
            growth: 0.1,
            player_speed: 1.0,
            confine_player: true,

            win_threshold: 1,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON string
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check ranges and counts
    pub fn validate(&self) -> Result<(), TuningError> {
        let scalars = [
            ("min_size", self.min_size),
            ("max_size", self.max_size),
            ("min_speed", self.min_speed),
            ("max_speed", self.max_speed),
            ("collider_size.x", self.collider_size.x),
            ("collider_size.y", self.collider_size.y),
            ("original_scale", self.original_scale),
            ("growth", self.growth),
            ("player_speed", self.player_speed),
        ];
        if let Some((name, _)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TuningError::Invalid(format!("{name} must be finite")));
        }

        if self.min_size <= 0.0 {
            return Err(TuningError::Invalid("min_size must be positive".into()));
        }
        if self.min_size > self.max_size {
            return Err(TuningError::Invalid(format!(
                "min_size {} exceeds max_size {}",
                self.min_size, self.max_size
            )));
        }
        if self.min_speed < 0.0 {
            return Err(TuningError::Invalid("min_speed must not be negative".into()));
        }
        if self.min_speed > self.max_speed {
            return Err(TuningError::Invalid(format!(
                "min_speed {} exceeds max_speed {}",
                self.min_speed, self.max_speed
            )));
        }
        if self.collider_size.cmple(Vec2::ZERO).any() {
            return Err(TuningError::Invalid("collider_size must be positive".into()));
        }
        if self.original_scale <= 0.0 {
            return Err(TuningError::Invalid("original_scale must be positive".into()));
        }
        if self.growth < 0.0 {
            return Err(TuningError::Invalid("growth must not be negative".into()));
        }
        if self.num_enemies == 0 {
            return Err(TuningError::Invalid("num_enemies must be at least 1".into()));
        }
        if self.win_threshold == 0 {
            return Err(TuningError::Invalid("win_threshold must be at least 1".into()));
        }
        Ok(())
    }
}
