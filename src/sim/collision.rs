//! Collision checks and bounce response
//!
//! Everything is axis-aligned: side walls reflect horizontal velocity and the
//! paddles are tested by horizontal span only, once the ball has crossed the
//! paddle threshold near a goal edge.

use super::state::{Ball, Paddle};
use crate::consts::{DEFLECTION_FACTOR, MAX_VERTICAL_SPEED, PADDLE_DIFF};

/// Reflect horizontal velocity off the side walls.
///
/// Only reflects when the ball is outside a wall *and* still heading further
/// out, so a ball that has already been turned around is left alone.
/// Returns true on a bounce.
pub fn wall_bounce(ball: &mut Ball, width: f32) -> bool {
    let out_left = ball.pos.x < 0.0 && ball.vel.x < 0.0;
    let out_right = ball.pos.x > width && ball.vel.x > 0.0;
    if out_left || out_right {
        ball.vel.x = -ball.vel.x;
        true
    } else {
        false
    }
}

/// Whether `x` lies strictly inside the paddle's horizontal span
#[inline]
pub fn within_span(x: f32, paddle: &Paddle) -> bool {
    x > paddle.x && x < paddle.x + paddle.width
}

/// Horizontal speed after a strike, proportional to the offset from the
/// paddle center
#[inline]
pub fn deflection(ball_x: f32, paddle: &Paddle) -> f32 {
    let trajectory_x = ball_x - (paddle.x + PADDLE_DIFF);
    trajectory_x * DEFLECTION_FACTOR
}

/// Add `gain` to a vertical speed and clamp its magnitude to the cap.
///
/// Returns the new speed and whether the cap was exceeded.
pub fn accelerate(speed: f32, gain: f32) -> (f32, bool) {
    let boosted = speed + gain;
    if boosted > MAX_VERTICAL_SPEED {
        (MAX_VERTICAL_SPEED, true)
    } else if boosted < -MAX_VERTICAL_SPEED {
        (-MAX_VERTICAL_SPEED, true)
    } else {
        (boosted, false)
    }
}
