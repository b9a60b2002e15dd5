//! Scene assembly: match snapshot to triangles

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::{MatchSnapshot, Paddle};

/// Segments used for the ball circle
const BALL_SEGMENTS: u32 = 20;
/// Centerline dash length (gap is the same)
const DASH: f32 = 4.0;
const LINE_THICKNESS: f32 = 1.0;
/// Score positions (baselines), relative to the centerline
const SCORE_X: f32 = 10.0;
const COMPUTER_SCORE_ABOVE: f32 = 30.0;
const PLAYER_SCORE_BELOW: f32 = 50.0;

fn paddle(p: &Paddle) -> Vec<Vertex> {
    shapes::rect(p.x, p.y, p.width, p.height, colors::PADDLE)
}

/// Build the full frame in playfield pixels, back to front
pub fn build(snap: &MatchSnapshot) -> Vec<Vertex> {
    let mid = snap.height / 2.0;
    let mut vertices = shapes::rect(0.0, 0.0, snap.width, snap.height, colors::FIELD);

    vertices.extend(paddle(&snap.top));
    vertices.extend(paddle(&snap.bottom));
    vertices.extend(shapes::dashed_hline(
        mid,
        0.0,
        snap.width,
        DASH,
        LINE_THICKNESS,
        colors::CENTER_LINE,
    ));
    vertices.extend(shapes::circle(
        snap.ball_pos,
        snap.ball_radius,
        colors::BALL,
        BALL_SEGMENTS,
    ));
    vertices.extend(shapes::number(
        snap.computer_score,
        Vec2::new(SCORE_X, mid - COMPUTER_SCORE_ABOVE),
        colors::SCORE,
    ));
    vertices.extend(shapes::number(
        snap.player_score,
        Vec2::new(SCORE_X, mid + PLAYER_SCORE_BELOW),
        colors::SCORE,
    ));

    vertices
}
