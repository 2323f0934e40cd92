//! Brick Runner - a single-level side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile physics, collisions, world state)
//! - `platform`: Host-side seams (pressed keys, frame and countdown driver)
//! - `settings`: Data-driven tuning and key bindings

pub mod platform;
pub mod settings;
pub mod sim;

pub use platform::{FrameDriver, Key, KeyBindings, KeySet};
pub use settings::{Settings, Tuning};

/// Game configuration constants
pub mod consts {
    /// Edge length of one grid cell, in world pixels
    pub const TILE_SIZE: f32 = 32.0;

    /// Level extent in grid cells
    pub const LEVEL_COLUMNS: u32 = 212;
    pub const LEVEL_ROWS: u32 = 15;

    /// Level extent in world pixels
    pub const LEVEL_WIDTH: f32 = LEVEL_COLUMNS as f32 * TILE_SIZE;
    pub const LEVEL_HEIGHT: f32 = LEVEL_ROWS as f32 * TILE_SIZE;

    /// Row every pipe stands on (top edge of the ground strip)
    pub const PIPE_BASE_ROW: i32 = 13;

    /// Frame pacing baseline (60 Hz)
    pub const FRAME_MS: f32 = 16.67;
    /// Countdown period
    pub const CLOCK_PERIOD_MS: f32 = 1000.0;

    /// Player spawn: left edge, and the floor the feet rest on
    pub const SPAWN_X: f32 = 100.0;
    pub const SPAWN_FLOOR_Y: f32 = PIPE_BASE_ROW as f32 * TILE_SIZE;

    /// Player sizes
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const SMALL_HEIGHT: f32 = 32.0;
    pub const BIG_HEIGHT: f32 = 64.0;

    /// Score awards
    pub const SCORE_BRICK: u64 = 50;
    pub const SCORE_STOMP: u64 = 100;
    pub const SCORE_COIN_BLOCK: u64 = 200;
    pub const SCORE_GROWTH: u64 = 1000;

    /// Session start values
    pub const START_LIVES: u8 = 3;
    pub const START_CLOCK: u32 = 400;

    /// Horizontal speed of a freshly spawned growth item
    pub const POWER_UP_SPEED: f32 = 2.0;

    /// Tolerance for the resting-contact check
    pub const CONTACT_EPSILON: f32 = 1e-3;
}

/// Horizontal camera offset keeping the player a third of the way into the view.
///
/// Levels narrower than the viewport pin the camera at 0.
#[inline]
pub fn viewport_offset(player_x: f32, viewport_width: f32, level_width: f32) -> f32 {
    (player_x - viewport_width / 3.0)
        .min(level_width - viewport_width)
        .max(0.0)
}
