//! City Runner - A side-scrolling endless runner
//!
//! Core modules:
//! - `sim`: Per-tick simulation (runner physics, spawning, collisions, scoring)
//! - `app`: Screen state machine (menu, city select, shop, play, pause, game over)
//! - `economy`: High score, coin balance and owned characters
//! - `persistence`: Save record codec with atomic writes
//! - `renderer`: Snapshot handed to external renderers
//! - `platform`: Input intents and fixed-step clock

pub mod app;
pub mod audio;
pub mod economy;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{App, Screen};
pub use economy::{EconomyError, EconomyStore};
pub use settings::Settings;

/// Game configuration constants
///
/// Units are playfield pixels and simulation ticks. Velocities are per tick.
pub mod consts {
    /// Fixed simulation rate
    pub const TICK_RATE_HZ: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 1024.0;
    pub const SCREEN_HEIGHT: f32 = 768.0;
    /// Y coordinate of the running surface (y grows downward)
    pub const GROUND_Y: f32 = SCREEN_HEIGHT - 100.0;

    /// Runner defaults
    pub const RUNNER_X: f32 = 100.0;
    pub const RUNNER_WIDTH: f32 = 30.0;
    pub const RUNNER_HEIGHT: f32 = 40.0;
    pub const MAX_JUMPS: u8 = 2;
    pub const GRAVITY: f32 = 0.5;
    /// Upward impulse (negative is up)
    pub const JUMP_IMPULSE: f32 = -10.0;
    pub const RUN_ANIMATION_SPEED: f32 = 0.2;
    pub const RUN_ANIMATION_FRAMES: f32 = 4.0;

    /// Shield granted by the shield-chance capability
    pub const SHIELD_DURATION_TICKS: u32 = 180;
    pub const SHIELD_CHANCE: f32 = 0.1;

    /// Scroll speed ramp
    pub const BASE_SCROLL_SPEED: f32 = 5.0;
    pub const SCROLL_SPEED_STEP: f32 = 0.25;
    pub const SCROLL_RAMP_TICKS: u64 = 500;

    /// Obstacle geometry
    pub const OBSTACLE_MIN_WIDTH: i32 = 25;
    pub const OBSTACLE_MAX_WIDTH: i32 = 45;
    pub const OBSTACLE_MIN_HEIGHT: i32 = 35;
    pub const OBSTACLE_MAX_HEIGHT: i32 = 55;
    pub const OBSTACLE_ELEVATION_CHANCE: f32 = 0.3;
    /// Only obstacles taller than this may be elevated
    pub const OBSTACLE_ELEVATION_MIN_HEIGHT: f32 = 40.0;
    pub const OBSTACLE_MIN_LIFT: i32 = 10;
    pub const OBSTACLE_MAX_LIFT: i32 = 20;

    /// Obstacle spawn interval used for the very first obstacle of a run
    pub const FIRST_OBSTACLE_MIN_TICKS: u32 = 60;
    pub const FIRST_OBSTACLE_MAX_TICKS: u32 = 180;

    /// Coins
    pub const COIN_SIZE: f32 = 15.0;
    pub const COIN_MIN_GAP_TICKS: u32 = 30;
    pub const COIN_SPAWN_CHANCE: f32 = 0.1;
    pub const COIN_MIN_Y: i32 = 100;
    pub const COIN_ANIMATION_SPEED: f32 = 0.2;
    pub const COIN_ANIMATION_FRAMES: f32 = 8.0;

    /// Clouds (decorative)
    pub const CLOUD_INTERVAL_TICKS: u32 = 100;
    pub const CLOUD_MIN_Y: i32 = 50;
    pub const CLOUD_MAX_Y: i32 = 150;
    pub const CLOUD_MIN_WIDTH: i32 = 50;
    pub const CLOUD_MAX_WIDTH: i32 = 100;
    pub const CLOUD_MIN_SPEED: f32 = 1.0;
    pub const CLOUD_MAX_SPEED: f32 = 3.0;
}
