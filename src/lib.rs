//! Canvas Pong - a single-screen match against a reactive AI paddle
//!
//! Core modules:
//! - `sim`: Match simulation (ball motion, bounces, scoring, difficulty)
//! - `renderer`: WebGPU rendering of a match snapshot
//! - `platform`: Browser/native platform abstraction
//! - `settings`: Device class and speed presets

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{DeviceClass, SpeedPreset};
pub use sim::{MatchSnapshot, MatchState, StepOutcome, Winner};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const WIDTH: f32 = 400.0;
    pub const HEIGHT: f32 = 600.0;

    /// Paddle dimensions
    pub const PADDLE_WIDTH: f32 = 60.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Half the paddle width; also the distance from each goal edge at which
    /// the paddle check kicks in
    pub const PADDLE_DIFF: f32 = 30.0;
    /// Fixed vertical positions of the paddles
    pub const PADDLE_TOP_Y: f32 = 10.0;
    pub const PADDLE_BOTTOM_Y: f32 = 580.0;
    /// Starting x for both paddles
    pub const PADDLE_START_X: f32 = 170.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 5.0;
    /// Vertical speed after every goal (negative = toward the player)
    pub const RESET_VERTICAL_SPEED: f32 = -3.0;
    /// Vertical speed cap applied on paddle hits
    pub const MAX_VERTICAL_SPEED: f32 = 5.0;
    /// Vertical speed added per paddle hit once the player has moved
    pub const HIT_SPEED_GAIN: f32 = 1.0;
    /// Horizontal speed per pixel of offset from the paddle center
    pub const DEFLECTION_FACTOR: f32 = 0.3;

    /// AI speed once the player's returns saturate vertical speed
    pub const BOOSTED_AI_SPEED: f32 = 6.0;

    /// First side to this many points wins
    pub const WINNING_SCORE: u32 = 7;

    /// Viewports at most this wide use the mobile preset
    pub const MOBILE_MAX_WIDTH: f32 = 600.0;
}
