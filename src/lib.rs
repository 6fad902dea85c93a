//! Pong Goal - a single-screen Pong variant with goal zones
//!
//! Core modules:
//! - `sim`: Game state, update step, collisions, menu state machine
//! - `renderer`: Scene building and the wgpu pipeline
//! - `audio`: Sound bank and the fire-and-forget audio thread
//! - `input`: Keyboard mapping and held-key sampling
//! - `scheduler`: Frame pacing
//! - `settings`: Presentation settings

pub mod app;
pub mod audio;
pub mod error;
pub mod input;
pub mod renderer;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use error::StartupError;
pub use settings::{FramePacing, Settings};

/// Game configuration constants
pub mod consts {
    /// Playfield size in pixels
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 600;

    /// Paddle defaults
    pub const PADDLE_WIDTH: i32 = 20;
    pub const PADDLE_HEIGHT: i32 = 100;
    /// Gap between a paddle and its side of the screen
    pub const PADDLE_INSET: i32 = 20;
    /// Pixels per tick while a movement key is held
    pub const PADDLE_SPEED: i32 = 5;

    /// Ball defaults
    pub const BALL_RADIUS: i32 = 10;
    pub const BALL_SPEED_X: f32 = 8.0;
    pub const BALL_SPEED_Y: f32 = 8.0;
    /// Cosmetic spin, degrees per tick
    pub const BALL_SPIN_PER_TICK: f32 = 0.1;

    /// Goal zones sit on the side walls, centered vertically
    pub const GOAL_WIDTH: i32 = 10;
    pub const GOAL_HEIGHT: i32 = 300;

    /// One simulation tick per 10 ms frame
    pub const FRAME_DELAY_MS: u64 = 10;
    /// Fixed timestep in seconds, matching the frame delay
    pub const SIM_DT: f32 = FRAME_DELAY_MS as f32 / 1000.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play freezes for one second after every serve
    pub const SERVE_PAUSE_TICKS: u32 = 100;
}
