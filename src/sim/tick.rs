//! Per-frame simulation step
//!
//! Advances a running match by one tick: ball motion, bounces, goals, AI
//! movement and the win check, in that order.

use super::collision::{accelerate, deflection, wall_bounce, within_span};
use super::state::{MatchEvent, MatchPhase, MatchSnapshot, MatchState, Side, Winner};
use crate::consts::*;

/// Result of a single step
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// State after the step
    pub snapshot: MatchSnapshot,
    /// Events raised during the step, in order
    pub events: Vec<MatchEvent>,
    /// Set on the step that ends the match, never again afterwards
    pub winner: Option<Winner>,
}

/// Pointer moved over the playfield.
///
/// `pointer_x` is in page coordinates and `playfield_left` is the page x of
/// the playfield's left edge. The paddle is centered under the pointer and
/// clamped to the playfield. Only a running match records that the player
/// has moved.
pub fn on_pointer_move(state: &mut MatchState, pointer_x: f32, playfield_left: f32) {
    let target = pointer_x - playfield_left - PADDLE_DIFF;
    state.bottom.set_x(target);
    if state.is_running() && !state.player_moved {
        state.player_moved = true;
        log::debug!("Player moved, AI engaged");
    }
}

/// Advance the match by one tick. Does nothing unless the match is running.
pub fn step(state: &mut MatchState) -> StepOutcome {
    let mut events = Vec::new();

    if !state.is_running() {
        return StepOutcome {
            snapshot: state.snapshot(),
            events,
            winner: None,
        };
    }

    move_ball(state);

    if wall_bounce(&mut state.ball, WIDTH) {
        events.push(MatchEvent::WallBounce);
    }

    check_bottom(state, &mut events);
    check_top(state, &mut events);
    move_ai(state);

    let winner = state.winner();
    if let Some(winner) = winner {
        state.phase = MatchPhase::MatchOver;
        events.push(MatchEvent::MatchOver { winner });
        log::info!(
            "{} wins {}-{}",
            winner.as_str(),
            state.player_score,
            state.computer_score
        );
    }

    StepOutcome {
        snapshot: state.snapshot(),
        events,
        winner,
    }
}

fn move_ball(state: &mut MatchState) {
    state.ball.pos.y -= state.ball.vel.y;
    // No drift until the player has returned the ball since the last goal
    if state.player_moved && state.paddle_contact {
        state.ball.pos.x += state.ball.vel.x;
    }
}

/// Player paddle, or a goal for the computer
fn check_bottom(state: &mut MatchState, events: &mut Vec<MatchEvent>) {
    let ball = &mut state.ball;
    // Checked every tick past the threshold, whatever the direction: a ball
    // still inside the band after a bounce is struck again
    if ball.pos.y <= HEIGHT - PADDLE_DIFF {
        return;
    }

    if within_span(ball.pos.x, &state.bottom) {
        state.paddle_contact = true;
        if state.player_moved {
            let (speed, capped) = accelerate(ball.vel.y, -HIT_SPEED_GAIN);
            ball.vel.y = speed;
            if capped && state.ai_speed != BOOSTED_AI_SPEED {
                state.ai_speed = BOOSTED_AI_SPEED;
                events.push(MatchEvent::AiBoosted {
                    ai_speed: state.ai_speed,
                });
                log::debug!("Vertical speed capped, AI speed now {}", state.ai_speed);
            }
        }
        ball.vel.y = -ball.vel.y;
        ball.vel.x = deflection(ball.pos.x, &state.bottom);
        events.push(MatchEvent::PaddleHit { side: Side::Bottom });
    } else if ball.pos.y > HEIGHT {
        state.reset_ball();
        state.computer_score += 1;
        events.push(MatchEvent::Goal { scorer: Side::Top });
        log::debug!(
            "Computer scores ({}-{})",
            state.player_score,
            state.computer_score
        );
    }
}

/// AI paddle, or a goal for the player
fn check_top(state: &mut MatchState, events: &mut Vec<MatchEvent>) {
    let ball = &mut state.ball;
    if ball.pos.y >= PADDLE_DIFF {
        return;
    }

    if within_span(ball.pos.x, &state.top) {
        if state.player_moved {
            let (speed, _) = accelerate(ball.vel.y, HIT_SPEED_GAIN);
            ball.vel.y = speed;
        }
        ball.vel.y = -ball.vel.y;
        events.push(MatchEvent::PaddleHit { side: Side::Top });
    } else if ball.pos.y < 0.0 {
        state.reset_ball();
        state.player_score += 1;
        events.push(MatchEvent::Goal {
            scorer: Side::Bottom,
        });
        log::debug!(
            "Player scores ({}-{})",
            state.player_score,
            state.computer_score
        );
    }
}

fn move_ai(state: &mut MatchState) {
    if state.player_moved {
        state.top.chase(state.ball.pos.x, state.ai_speed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{DeviceClass, SpeedPreset};
    use glam::Vec2;
    use proptest::prelude::*;

    fn running(device: DeviceClass) -> MatchState {
        let mut state = MatchState::for_device(device);
        state.start_new_match();
        state
    }

    #[test]
    fn test_first_step_desktop() {
        let mut state = running(DeviceClass::Desktop);
        assert_eq!(state.ball.vel.y, -1.0);
        assert_eq!(state.ai_speed, 3.0);

        let out = step(&mut state);
        assert_eq!(out.snapshot.ball_pos, Vec2::new(200.0, 301.0));
        assert_eq!(out.snapshot.top.x, 170.0);
        assert!(out.events.is_empty());
        assert!(out.winner.is_none());
    }

    #[test]
    fn test_step_inert_before_start() {
        let mut state = MatchState::for_device(DeviceClass::Desktop);
        let out = step(&mut state);
        assert_eq!(out.snapshot.ball_pos, Vec2::new(200.0, 300.0));
        assert_eq!(out.snapshot.phase, MatchPhase::NotStarted);
    }

    #[test]
    fn test_pointer_move_centers_and_clamps() {
        let mut state = running(DeviceClass::Desktop);
        // Playfield starts 760px into the page
        on_pointer_move(&mut state, 760.0 + 100.0, 760.0);
        assert_eq!(state.bottom.x, 70.0);
        assert!(state.player_moved);

        on_pointer_move(&mut state, 700.0, 760.0);
        assert_eq!(state.bottom.x, 0.0);
        on_pointer_move(&mut state, 2000.0, 760.0);
        assert_eq!(state.bottom.x, 340.0);
    }

    #[test]
    fn test_pointer_move_before_start_only_clamps() {
        let mut state = MatchState::for_device(DeviceClass::Desktop);
        on_pointer_move(&mut state, 1000.0, 0.0);
        assert_eq!(state.bottom.x, 340.0);
        assert!(!state.player_moved);
    }

    #[test]
    fn test_ai_waits_for_player() {
        let mut state = running(DeviceClass::Mobile);
        state.ball.pos.x = 350.0;
        for _ in 0..10 {
            step(&mut state);
        }
        assert_eq!(state.top.x, 170.0);

        on_pointer_move(&mut state, 200.0, 0.0);
        step(&mut state);
        assert_eq!(state.top.x, 174.0);
    }

    #[test]
    fn test_dead_center_hit() {
        let mut state = running(DeviceClass::Desktop);
        on_pointer_move(&mut state, 200.0, 0.0);
        assert_eq!(state.bottom.x, 170.0);
        state.ball.pos = Vec2::new(200.0, 568.0);
        state.ball.vel = Vec2::new(0.0, -3.0);

        let out = step(&mut state);
        assert_eq!(state.ball.vel.x, 0.0);
        assert_eq!(state.ball.vel.y, 4.0);
        assert!(state.paddle_contact);
        assert!(out.events.contains(&MatchEvent::PaddleHit { side: Side::Bottom }));
    }

    #[test]
    fn test_hit_without_player_move_keeps_speed() {
        let mut state = running(DeviceClass::Desktop);
        state.ball.pos = Vec2::new(200.0, 570.0);
        step(&mut state);
        assert_eq!(state.ball.vel.y, 1.0);
        assert_eq!(state.ai_speed, 3.0);
    }

    #[test]
    fn test_off_center_hit_deflects_and_drifts() {
        let mut state = running(DeviceClass::Desktop);
        on_pointer_move(&mut state, 200.0, 0.0);
        state.ball.pos = Vec2::new(220.0, 569.0);
        state.ball.vel = Vec2::new(0.0, -2.0);

        step(&mut state);
        assert!((state.ball.vel.x - 6.0).abs() < 1e-5);
        assert_eq!(state.ball.vel.y, 3.0);

        step(&mut state);
        assert!((state.ball.pos.x - 226.0).abs() < 1e-4);
        assert_eq!(state.ball.pos.y, 568.0);
    }

    #[test]
    fn test_player_cap_boosts_ai() {
        let mut state = running(DeviceClass::Desktop);
        on_pointer_move(&mut state, 200.0, 0.0);
        state.ball.pos = Vec2::new(200.0, 566.0);
        state.ball.vel = Vec2::new(0.0, -5.0);

        let out = step(&mut state);
        assert_eq!(state.ball.vel.y, 5.0);
        assert_eq!(state.ai_speed, BOOSTED_AI_SPEED);
        assert!(out.events.contains(&MatchEvent::AiBoosted { ai_speed: 6.0 }));
    }

    #[test]
    fn test_reaching_cap_exactly_does_not_boost() {
        let mut state = running(DeviceClass::Desktop);
        on_pointer_move(&mut state, 200.0, 0.0);
        state.ball.pos = Vec2::new(200.0, 567.0);
        state.ball.vel = Vec2::new(0.0, -4.0);

        step(&mut state);
        assert_eq!(state.ball.vel.y, 5.0);
        assert_eq!(state.ai_speed, 3.0);
    }

    #[test]
    fn test_ai_cap_never_boosts() {
        let mut state = running(DeviceClass::Desktop);
        on_pointer_move(&mut state, 200.0, 0.0);
        state.top.x = 170.0;
        state.ball.pos = Vec2::new(200.0, 34.0);
        state.ball.vel = Vec2::new(0.0, 5.0);

        let out = step(&mut state);
        assert_eq!(state.ball.vel.y, -5.0);
        assert_eq!(state.ai_speed, 3.0);
        assert!(out.events.contains(&MatchEvent::PaddleHit { side: Side::Top }));
        // AI hits do not count as player contact
        assert!(!state.paddle_contact);
    }

    #[test]
    fn test_computer_scores_on_miss() {
        let mut state = running(DeviceClass::Desktop);
        state.ball.pos = Vec2::new(10.0, 599.0);
        state.ball.vel = Vec2::new(0.0, -3.0);

        let out = step(&mut state);
        assert_eq!(state.computer_score, 1);
        assert_eq!(state.player_score, 0);
        assert_eq!(state.ball.pos, Vec2::new(200.0, 300.0));
        assert_eq!(state.ball.vel.y, RESET_VERTICAL_SPEED);
        assert!(!state.paddle_contact);
        assert!(out.events.contains(&MatchEvent::Goal { scorer: Side::Top }));
    }

    #[test]
    fn test_player_scores_past_ai() {
        let mut state = running(DeviceClass::Desktop);
        state.top.x = 300.0;
        state.paddle_contact = true;
        state.ball.pos = Vec2::new(20.0, 2.0);
        state.ball.vel = Vec2::new(0.0, 3.0);

        step(&mut state);
        assert_eq!(state.player_score, 1);
        assert_eq!(state.ball.pos, Vec2::new(200.0, 300.0));
        assert!(!state.paddle_contact);
    }

    #[test]
    fn test_late_save_strikes_again_inside_band() {
        let mut state = running(DeviceClass::Desktop);
        state.ball.pos = Vec2::new(300.0, 590.0);
        state.ball.vel = Vec2::new(0.0, -3.0);
        on_pointer_move(&mut state, 300.0, 0.0);
        assert_eq!(state.bottom.x, 270.0);

        step(&mut state);
        assert_eq!(state.ball.pos.y, 593.0);
        assert_eq!(state.ball.vel.y, 4.0);

        // Still below the threshold with the paddle underneath
        let out = step(&mut state);
        assert_eq!(state.ball.pos.y, 589.0);
        assert_eq!(state.ball.vel.y, -3.0);
        assert!(out.events.contains(&MatchEvent::PaddleHit { side: Side::Bottom }));
        assert_eq!(state.computer_score, 0);
    }

    #[test]
    fn test_ball_between_threshold_and_edge_waits() {
        let mut state = running(DeviceClass::Desktop);
        state.ball.pos = Vec2::new(10.0, 580.0);
        state.ball.vel = Vec2::new(0.0, -3.0);
        step(&mut state);
        assert_eq!(state.ball.pos.y, 583.0);
        assert_eq!(state.computer_score, 0);
    }

    #[test]
    fn test_match_over_once() {
        let mut state = running(DeviceClass::Desktop);
        state.computer_score = WINNING_SCORE - 1;
        state.ball.pos = Vec2::new(10.0, 599.0);
        state.ball.vel = Vec2::new(0.0, -3.0);

        let out = step(&mut state);
        assert_eq!(out.winner, Some(Winner::Computer));
        assert!(state.is_match_over());
        assert!(out.events.contains(&MatchEvent::MatchOver {
            winner: Winner::Computer
        }));

        let before = state.snapshot();
        for _ in 0..100 {
            let out = step(&mut state);
            assert!(out.winner.is_none());
        }
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_player_wins() {
        let mut state = running(DeviceClass::Mobile);
        state.player_score = WINNING_SCORE - 1;
        state.top.x = 300.0;
        state.ball.pos = Vec2::new(20.0, 1.0);
        state.ball.vel = Vec2::new(0.0, 2.0);

        let out = step(&mut state);
        assert_eq!(out.winner, Some(Winner::Player));
        assert_eq!(out.snapshot.player_score, 7);
    }

    #[test]
    fn test_restart_after_match_over() {
        let mut state = running(DeviceClass::Desktop);
        state.computer_score = WINNING_SCORE - 1;
        state.ball.pos = Vec2::new(10.0, 599.0);
        state.ball.vel = Vec2::new(0.0, -3.0);
        step(&mut state);
        assert!(state.is_match_over());

        let start = state.start_new_match();
        assert!(start.dismiss_overlay);
        assert_eq!(state.computer_score, 0);
        assert_eq!(state.preset, SpeedPreset::DESKTOP);
        step(&mut state);
        assert_eq!(state.ball.pos.y, 301.0);
    }

    proptest! {
        #[test]
        fn prop_match_invariants(
            device in prop_oneof![Just(DeviceClass::Desktop), Just(DeviceClass::Mobile)],
            pointers in prop::collection::vec(prop::option::of(-200.0f32..800.0), 1..3000),
        ) {
            let mut state = running(device);
            let mut finished = false;
            let mut final_scores = (0, 0);

            for pointer in pointers {
                if let Some(x) = pointer {
                    on_pointer_move(&mut state, x, 0.0);
                }
                let out = step(&mut state);

                for paddle in [state.top, state.bottom] {
                    prop_assert!(paddle.x >= 0.0 && paddle.x <= WIDTH - PADDLE_WIDTH);
                }
                prop_assert!(state.ball.vel.y.abs() <= MAX_VERTICAL_SPEED);
                if !(state.player_moved && state.paddle_contact) {
                    prop_assert_eq!(state.ball.vel.x, 0.0);
                }
                prop_assert!(state.player_score <= WINNING_SCORE);
                prop_assert!(state.computer_score <= WINNING_SCORE);

                let at_threshold = state.player_score == WINNING_SCORE
                    || state.computer_score == WINNING_SCORE;
                prop_assert_eq!(state.is_match_over(), at_threshold);

                if finished {
                    prop_assert!(out.winner.is_none());
                    prop_assert_eq!((state.player_score, state.computer_score), final_scores);
                } else if out.winner.is_some() {
                    finished = true;
                    final_scores = (state.player_score, state.computer_score);
                }

                if out.events.iter().any(|e| matches!(e, MatchEvent::Goal { .. })) {
                    prop_assert_eq!(state.ball.pos, Vec2::new(WIDTH / 2.0, HEIGHT / 2.0));
                    prop_assert!(!state.paddle_contact);
                }
            }
        }
    }
}
