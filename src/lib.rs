//! Expense Runner - simulation core for a side-scrolling arcade runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `session`: Host-facing lifecycle, input buffering and HUD publication
//! - `tuning`: Data-driven spawn balance
//! - `highscores`: In-memory session leaderboard

pub mod highscores;
pub mod session;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use session::{Hud, Session};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical playfield size (the renderer scales this)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 450.0;

    /// Floor level (top edge of the ground strip)
    pub const GROUND_Y: f32 = CANVAS_HEIGHT - 60.0;
    /// How far below the floor a foot may sink and still be snapped back up.
    /// Anything deeper is a fall through a pit.
    pub const GROUND_TOLERANCE: f32 = 30.0;

    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.6;
    /// Upward velocity applied on jump (pixels/tick)
    pub const JUMP_FORCE: f32 = -14.0;
    /// Bounce after a stomp, as a fraction of JUMP_FORCE
    pub const STOMP_BOUNCE: f32 = 0.8;
    /// Upward knockback after a survivable hit
    pub const HIT_KNOCKBACK: f32 = -6.0;
    /// Jumps allowed before touching the ground again
    pub const MAX_JUMPS: u8 = 2;

    /// World scroll speed (pixels/tick)
    pub const GAME_SPEED_START: f32 = 5.0;
    pub const GAME_SPEED_MAX: f32 = 12.0;
    pub const SPEED_STEP: f32 = 0.5;
    pub const SPEED_RAMP_INTERVAL: u64 = 600;
    /// Distance units gained per pixel scrolled
    pub const DISTANCE_PER_PIXEL: f32 = 0.01;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_START_X: f32 = 100.0;
    pub const INITIAL_LIVES: u8 = 3;
    /// Post-hit grace period (ticks)
    pub const INVINCIBILITY_TICKS: u32 = 90;
    /// Shield power-up duration (ticks, ~5s at 60 Hz)
    pub const SHIELD_TICKS: u32 = 300;

    /// Score awards
    pub const STOMP_SCORE: u64 = 20;
    pub const PROJECTILE_KILL_SCORE: u64 = 5;
    pub const COIN_VALUE: u64 = 10;

    /// Entity sizes
    pub const ENEMY_SIZE: f32 = 50.0;
    pub const COIN_SIZE: f32 = 25.0;
    pub const SHIELD_SIZE: f32 = 30.0;
    pub const PROJECTILE_WIDTH: f32 = 20.0;
    pub const PROJECTILE_HEIGHT: f32 = 10.0;
    pub const PROJECTILE_SPEED: f32 = 15.0;

    /// Nominal host frame rate, only used for cosmetic oscillation
    pub const FRAMES_PER_SECOND: f32 = 60.0;
    /// Clouds kept alive for the parallax layer
    pub const CLOUD_COUNT: usize = 8;
}
