//! Space Race - A lane-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, warnings, missiles, collisions)
//! - `renderer`: WebGPU rendering pipeline
//! - `persistence`: Key-value storage (LocalStorage on web, in-memory elsewhere)
//! - `tuning`: Data-driven layout and game balance

pub mod highscores;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::{HighScores, normalize_pilot_name};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
///
/// Timing values are in milliseconds. These define the warning/spawn cadence
/// the player learns to read, so they are not part of `Tuning`.
pub mod consts {
    /// Time between warning visibility toggles
    pub const FLASH_INTERVAL_MS: f64 = 180.0;
    /// Toggles before the missile is released (3 full blinks)
    pub const FLASH_COUNT: u32 = 6;

    /// Minimum delay between waves
    pub const WAVE_MIN_MS: f64 = 900.0;
    /// Random extra delay added on top of `WAVE_MIN_MS`
    pub const WAVE_JITTER_MS: f64 = 900.0;

    /// Converts speed units into pixels per millisecond
    pub const TIME_SCALE: f32 = 0.06;
    /// Score gained per millisecond survived
    pub const SCORE_PER_MS: f64 = 0.02;

    /// Missile radius range [min, min + jitter)
    pub const MISSILE_RADIUS_MIN: f32 = 22.0;
    pub const MISSILE_RADIUS_JITTER: f32 = 8.0;
    /// Extra speed added to the base scroll speed, [0, jitter)
    pub const MISSILE_SPEED_JITTER: f32 = 1.4;
    /// Missiles enter above the top edge
    pub const MISSILE_SPAWN_Y: f32 = -40.0;
    /// Missiles are dropped once this far below the bottom edge
    pub const DESPAWN_MARGIN: f32 = 60.0;

    /// Player box scale factors (relative to nominal ship size)
    pub const PLAYER_HALF_WIDTH_SCALE: f32 = 0.35;
    pub const PLAYER_HALF_HEIGHT_SCALE: f32 = 0.45;
    /// Missile body size relative to its radius
    pub const MISSILE_BODY_WIDTH_SCALE: f32 = 0.9;
    pub const MISSILE_BODY_HEIGHT_SCALE: f32 = 2.4;
    /// Missile box scale factor (relative to body size)
    pub const MISSILE_HALF_SCALE: f32 = 0.45;

    /// Player ship sits this far above the bottom edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 90.0;
    /// Period of the scrolling lane-divider dashes
    pub const TRACK_DASH_PERIOD: f32 = 40.0;
}
