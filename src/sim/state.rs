//! Match state and core simulation types
//!
//! Everything a match mutates lives in one owned `MatchState`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::{DeviceClass, SpeedPreset};

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Built but not started yet
    NotStarted,
    /// Ball in play
    Running,
    /// A side reached the winning score
    MatchOver,
}

/// Which end of the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// AI paddle
    Top,
    /// Pointer-controlled paddle
    Bottom,
}

/// Winner of a finished match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Player,
    Computer,
}

impl Winner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Winner::Player => "Player",
            Winner::Computer => "Computer",
        }
    }
}

/// Something that happened during a step (for logging and sound hooks)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    WallBounce,
    PaddleHit { side: Side },
    /// `scorer` is the side that won the point
    Goal { scorer: Side },
    /// AI paddle sped up after the player's return hit the speed cap
    AiBoosted { ai_speed: f32 },
    MatchOver { winner: Winner },
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// `vel.y` is inverted: each step moves `pos.y` by `-vel.y`
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(vertical_speed: f32) -> Self {
        Self {
            pos: Self::center(),
            vel: Vec2::new(0.0, vertical_speed),
            radius: BALL_RADIUS,
        }
    }

    /// Playfield center
    #[inline]
    pub fn center() -> Vec2 {
        Vec2::new(WIDTH / 2.0, HEIGHT / 2.0)
    }
}

/// A paddle rectangle; only `x` moves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    pub fn new(side: Side) -> Self {
        let y = match side {
            Side::Top => PADDLE_TOP_Y,
            Side::Bottom => PADDLE_BOTTOM_Y,
        };
        Self {
            x: PADDLE_START_X,
            y,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }

    /// Largest valid x
    #[inline]
    pub fn max_x(&self) -> f32 {
        WIDTH - self.width
    }

    /// Set x, clamped to the playfield
    pub fn set_x(&mut self, x: f32) {
        self.x = x.clamp(0.0, self.max_x());
    }

    /// Horizontal center
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + PADDLE_DIFF
    }

    /// Step a fixed distance toward `target_x`.
    ///
    /// No easing: the paddle overshoots and corrects every tick once it
    /// reaches the target, which gives the AI its jitter.
    pub fn chase(&mut self, target_x: f32, speed: f32) {
        if self.center_x() < target_x {
            self.set_x(self.x + speed);
        } else {
            self.set_x(self.x - speed);
        }
    }
}

/// Returned by `MatchState::start_new_match`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchStart {
    /// True when a previous match left an end-of-match overlay to remove
    pub dismiss_overlay: bool,
}

/// Read-only view of a match for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub width: f32,
    pub height: f32,
    pub ball_pos: Vec2,
    pub ball_radius: f32,
    pub top: Paddle,
    pub bottom: Paddle,
    pub player_score: u32,
    pub computer_score: u32,
    pub winning_score: u32,
    pub phase: MatchPhase,
}

/// Complete match state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub ball: Ball,
    /// AI paddle
    pub top: Paddle,
    /// Player paddle
    pub bottom: Paddle,
    pub player_score: u32,
    pub computer_score: u32,
    /// Set by the first pointer move; gates AI movement and ball drift
    pub player_moved: bool,
    /// Set when the player paddle returns the ball; cleared on every goal
    pub paddle_contact: bool,
    pub phase: MatchPhase,
    /// No previous match has been played (so there is no overlay to remove)
    pub is_first_match: bool,
    /// AI paddle speed (pixels per tick)
    pub ai_speed: f32,
    /// Preset the match was built from
    pub preset: SpeedPreset,
}

impl MatchState {
    /// Create a fresh, not yet started match
    pub fn new(preset: SpeedPreset) -> Self {
        Self {
            ball: Ball::new(preset.initial_vertical_speed),
            top: Paddle::new(Side::Top),
            bottom: Paddle::new(Side::Bottom),
            player_score: 0,
            computer_score: 0,
            player_moved: false,
            paddle_contact: false,
            phase: MatchPhase::NotStarted,
            is_first_match: true,
            ai_speed: preset.ai_speed,
            preset,
        }
    }

    /// Create a match using the preset for a device class
    pub fn for_device(device: DeviceClass) -> Self {
        Self::new(device.preset())
    }

    /// Reinitialize from the stored preset and start playing
    pub fn start_new_match(&mut self) -> MatchStart {
        let dismiss_overlay = !self.is_first_match;
        *self = Self::new(self.preset);
        self.is_first_match = false;
        self.phase = MatchPhase::Running;
        log::info!(
            "Match started (vertical speed {}, AI speed {})",
            self.ball.vel.y,
            self.ai_speed
        );
        MatchStart { dismiss_overlay }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == MatchPhase::Running
    }

    #[inline]
    pub fn is_match_over(&self) -> bool {
        self.phase == MatchPhase::MatchOver
    }

    /// Recenter the ball after a goal
    pub fn reset_ball(&mut self) {
        self.ball.pos = Ball::center();
        self.ball.vel = Vec2::new(0.0, RESET_VERTICAL_SPEED);
        self.paddle_contact = false;
    }

    /// Winner, if either side has reached the winning score
    pub fn winner(&self) -> Option<Winner> {
        if self.player_score == WINNING_SCORE {
            Some(Winner::Player)
        } else if self.computer_score == WINNING_SCORE {
            Some(Winner::Computer)
        } else {
            None
        }
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            width: WIDTH,
            height: HEIGHT,
            ball_pos: self.ball.pos,
            ball_radius: self.ball.radius,
            top: self.top,
            bottom: self.bottom,
            player_score: self.player_score,
            computer_score: self.computer_score,
            winning_score: WINNING_SCORE,
            phase: self.phase,
        }
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(SpeedPreset::default())
    }
}
