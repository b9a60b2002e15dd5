//! Match simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One owned `MatchState`, no globals
//! - One discrete step per frame, no time deltas
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{accelerate, deflection, wall_bounce, within_span};
pub use state::{
    Ball, MatchEvent, MatchPhase, MatchSnapshot, MatchStart, MatchState, Paddle, Side, Winner,
};
pub use tick::{StepOutcome, on_pointer_move, step};
