//! The Chosen - a themed Flappy Bird clone
//!
//! Core modules:
//! - `sim`: the per-tick game simulation (actor, obstacles, scoring, difficulty)
//! - `driver`: the menu/countdown/play/game-over state machine
//! - `theme`: the closed set of themes and their loaded assets
//! - `tui`: terminal frontend (half-block pixel rendering, keyboard and mouse)
//! - `audio`: synthesized sound cues

pub mod audio;
pub mod clock;
pub mod config;
pub mod driver;
pub mod error;
pub mod input;
pub mod menu;
pub mod sim;
pub mod theme;
pub mod tui;

pub use config::Config;
pub use driver::{Driver, Frontend, GameState, Scene};
pub use error::{AssetError, ConfigError, Error};
pub use theme::{Theme, ThemeAssets};

/// Default tuning values
pub mod consts {
    /// Play field (background) dimensions
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Actor box and spawn column
    pub const ACTOR_SIZE: f32 = 30.0;
    pub const SPAWN_X: f32 = 50.0;

    /// Per-tick downward acceleration
    pub const GRAVITY: f32 = 0.5;
    /// Vertical velocity set by a jump (negative is up)
    pub const JUMP_VELOCITY: f32 = -7.0;

    /// Obstacle geometry
    pub const OBSTACLE_WIDTH: f32 = 80.0;
    pub const GAP_HEIGHT: f32 = 150.0;
    pub const PITCH: f32 = 250.0;
    pub const MIN_LIVE_OBSTACLES: usize = 3;
    /// Inclusive range for the top edge of a gap
    pub const GAP_TOP_MIN: i32 = 150;
    pub const GAP_TOP_MAX: i32 = 350;

    /// Difficulty ramp
    pub const BASE_SPEED: f32 = 2.0;
    pub const SPEED_INCREMENT: f32 = 0.05;
    pub const MAX_SPEED: f32 = 6.0;
    pub const MIN_SCORE_FOR_SPEED: u32 = 10;

    /// Fixed step rate
    pub const FRAME_RATE: u32 = 60;
    pub const COUNTDOWN_BEATS: u8 = 3;
    pub const BEAT_MILLIS: u64 = 1000;
}
