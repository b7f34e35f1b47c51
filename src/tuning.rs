//! Data-driven game balance
//!
//! Every gameplay constant the rules read at runtime lives in [`Tuning`].
//! Defaults come from [`crate::consts`]; a host can override any subset from
//! JSON, missing fields fall back to the defaults.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating a [`Tuning`]
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// Reading the tuning file failed
    Io { path: String, message: String },
    /// The JSON document could not be decoded
    Parse { message: String },
    /// A field holds a value the rules cannot work with
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "cannot read tuning file {path}: {message}"),
            Self::Parse { message } => write!(f, "invalid tuning json: {message}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning field `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
        }
    }
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Viewport width used for horizontal wrap by self-driven sessions
    pub game_width: f32,
    /// Player spawn point (platform 0 sits here)
    pub player_spawn: Vec2,

    // === Platforms ===
    pub platform_count: usize,
    pub platform_x_min: i32,
    pub platform_x_max: i32,
    /// Vertical distance between initial platforms
    pub platform_stride: f32,
    pub recycle_margin: f32,
    pub min_gap: i32,
    pub max_gap: i32,

    // === Pickups ===
    pub pickup_roll_max: i32,
    pub pickup_roll_threshold: i32,
    pub pickup_pool_size: usize,

    // === Session ===
    pub fall_margin: f32,

    // === Player ===
    pub jump_velocity: f32,
    pub horizontal_speed: f32,
    /// Only read by the headless arcade collaborator
    pub gravity: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            game_width: GAME_WIDTH,
            player_spawn: PLAYER_SPAWN,

            platform_count: PLATFORM_COUNT,
            platform_x_min: PLATFORM_X_MIN,
            platform_x_max: PLATFORM_X_MAX,
            platform_stride: PLATFORM_STRIDE,
            recycle_margin: RECYCLE_MARGIN,
            min_gap: MIN_GAP,
            max_gap: MAX_GAP,

            pickup_roll_max: PICKUP_ROLL_MAX,
            pickup_roll_threshold: PICKUP_ROLL_THRESHOLD,
            pickup_pool_size: PICKUP_POOL_SIZE,

            fall_margin: FALL_MARGIN,

            jump_velocity: JUMP_VELOCITY,
            horizontal_speed: HORIZONTAL_SPEED,
            gravity: GRAVITY,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a JSON tuning file from disk
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| TuningError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Probability that a recycle event spawns a pickup
    pub fn pickup_chance(&self) -> f64 {
        let max = i64::from(self.pickup_roll_max);
        let outcomes = max + 1;
        if outcomes <= 0 {
            return 0.0;
        }
        let winners = (max - i64::from(self.pickup_roll_threshold)).clamp(0, outcomes);
        winners as f64 / outcomes as f64
    }

    /// Reject values the rules cannot work with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn check(ok: bool, field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            if ok {
                Ok(())
            } else {
                Err(TuningError::Invalid { field, reason })
            }
        }

        check(self.game_width > 0.0, "game_width", "must be positive")?;
        check(self.platform_count > 0, "platform_count", "at least one platform is required")?;
        check(
            self.platform_x_min <= self.platform_x_max,
            "platform_x_min",
            "must not exceed platform_x_max",
        )?;
        check(self.platform_stride > 0.0, "platform_stride", "must be positive")?;
        check(self.recycle_margin > 0.0, "recycle_margin", "must be positive")?;
        check(self.min_gap >= 0, "min_gap", "must not be negative")?;
        check(self.min_gap <= self.max_gap, "min_gap", "must not exceed max_gap")?;
        check(self.pickup_roll_max >= 0, "pickup_roll_max", "must not be negative")?;
        check(
            self.pickup_roll_threshold >= -1,
            "pickup_roll_threshold",
            "must not be below -1",
        )?;
        check(self.fall_margin >= 0.0, "fall_margin", "must not be negative")?;
        check(self.jump_velocity < 0.0, "jump_velocity", "must point upward (negative)")?;
        check(self.horizontal_speed >= 0.0, "horizontal_speed", "must not be negative")?;
        check(self.gravity > 0.0, "gravity", "must be positive")?;
        Ok(())
    }
}
