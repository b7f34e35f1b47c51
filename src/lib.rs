//! Bunny Hop - an endless vertical platformer core
//!
//! Core modules:
//! - `sim`: Frame-driven gameplay rules (platform recycling, pickups, session state)
//! - `tuning`: Data-driven game balance
//! - `highscores`: Best-run leaderboard
//! - `headless`: Self-playing session runner used by the native binary
//! - `web`: Browser host binding (wasm32 only)

pub mod headless;
pub mod highscores;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::HighScores;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Frame timestep used by the headless runner (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Logical viewport dimensions (world units)
    pub const GAME_WIDTH: f32 = 480.0;
    pub const GAME_HEIGHT: f32 = 640.0;

    /// Display sizes (texture size * scale)
    pub const PLAYER_SIZE: Vec2 = Vec2::new(48.0, 76.0);
    pub const PLATFORM_SIZE: Vec2 = Vec2::new(152.0, 38.0);
    pub const PICKUP_SIZE: Vec2 = Vec2::new(32.0, 40.0);

    /// Player spawn point; platform 0 is placed here too
    pub const PLAYER_SPAWN: Vec2 = Vec2::new(240.0, 320.0);

    /// Platform pool and initial layout
    pub const PLATFORM_COUNT: usize = 5;
    pub const PLATFORM_X_MIN: i32 = 80;
    pub const PLATFORM_X_MAX: i32 = 400;
    pub const PLATFORM_STRIDE: f32 = 150.0;

    /// A platform this far below the camera top is recycled
    pub const RECYCLE_MARGIN: f32 = 700.0;
    /// Gap above the camera top for a recycled platform (inclusive)
    pub const MIN_GAP: i32 = 50;
    pub const MAX_GAP: i32 = 80;

    /// Pickup spawns when a roll in [0, PICKUP_ROLL_MAX] exceeds the threshold (5/11)
    pub const PICKUP_ROLL_MAX: i32 = 10;
    pub const PICKUP_ROLL_THRESHOLD: i32 = 5;
    pub const PICKUP_POOL_SIZE: usize = 8;

    /// Distance below the lowest platform that ends the session
    pub const FALL_MARGIN: f32 = 200.0;

    /// Player movement (units/s, negative y is up)
    pub const JUMP_VELOCITY: f32 = -400.0;
    pub const HORIZONTAL_SPEED: f32 = 200.0;
    /// Gravity used by the headless arcade collaborator (units/s²)
    pub const GRAVITY: f32 = 200.0;

    pub const GAME_OVER_TEXT: &str = "GAME OVER";

    /// Undrained session events kept before the oldest are dropped
    pub const MAX_PENDING_EVENTS: usize = 256;
}

/// Wrap an x coordinate onto a horizontal cylinder.
///
/// Positions inside `[-half_width, game_width + half_width)` are returned
/// unchanged; anything outside is shifted by whole periods of
/// `game_width + 2 * half_width`, so `game_width + half_width` lands exactly on
/// `-half_width` and wrapping twice is a no-op.
///
/// The overshoot is kept rather than snapped to the opposite edge:
/// `game_width + half_width + 10` lands on `-half_width + 10`.
#[inline]
pub fn wrap_x(x: f32, half_width: f32, game_width: f32) -> f32 {
    let right = game_width + half_width;
    if x >= -half_width && x < right {
        return x;
    }
    let period = game_width + 2.0 * half_width;
    let wrapped = (x + half_width).rem_euclid(period) - half_width;
    // rem_euclid can round up to the full period for tiny negative offsets
    if wrapped >= right { -half_width } else { wrapped }
}
