//! Shape generation for 2D primitives
//!
//! All shapes are emitted in playfield pixels (origin top-left, y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Score glyph size (roughly a 32px font)
pub const DIGIT_WIDTH: f32 = 14.0;
pub const DIGIT_HEIGHT: f32 = 24.0;
pub const DIGIT_STROKE: f32 = 3.0;
pub const DIGIT_SPACING: f32 = 6.0;

/// Seven-segment masks, bit order a b c d e f g (top, upper right, lower
/// right, bottom, lower left, upper left, middle)
const SEGMENTS: [u8; 10] = [
    0b011_1111, // 0
    0b000_0110, // 1
    0b101_1011, // 2
    0b100_1111, // 3
    0b110_0110, // 4
    0b110_1101, // 5
    0b111_1101, // 6
    0b000_0111, // 7
    0b111_1111, // 8
    0b110_1111, // 9
];

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> Vec<Vertex> {
    let (x2, y2) = (x + w, y + h);
    vec![
        Vertex::new(x, y, color),
        Vertex::new(x2, y, color),
        Vertex::new(x, y2, color),
        Vertex::new(x, y2, color),
        Vertex::new(x2, y, color),
        Vertex::new(x2, y2, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Horizontal dashed line centered on `y`, equal dash and gap lengths
pub fn dashed_hline(
    y: f32,
    x_start: f32,
    x_end: f32,
    dash: f32,
    thickness: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    if dash <= 0.0 {
        return vertices;
    }

    let mut x = x_start;
    while x < x_end {
        let len = dash.min(x_end - x);
        vertices.extend(rect(x, y - thickness / 2.0, len, thickness, color));
        x += dash * 2.0;
    }

    vertices
}

/// A single seven-segment digit whose bottom-left corner sits at `origin`
/// (text baseline). Values above 9 draw nothing.
pub fn digit(value: u32, origin: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let Some(&mask) = SEGMENTS.get(value as usize) else {
        return Vec::new();
    };

    let (w, h, s) = (DIGIT_WIDTH, DIGIT_HEIGHT, DIGIT_STROKE);
    let left = origin.x;
    let top = origin.y - h;
    let mid = top + (h - s) / 2.0;
    let half = (h + s) / 2.0;

    // (x, y, w, h) per segment in a..g order
    let bars = [
        (left, top, w, s),
        (left + w - s, top, s, half),
        (left + w - s, mid, s, half),
        (left, origin.y - s, w, s),
        (left, mid, s, half),
        (left, top, s, half),
        (left, mid, w, s),
    ];

    let mut vertices = Vec::with_capacity(bars.len() * 6);
    for (i, (x, y, bw, bh)) in bars.into_iter().enumerate() {
        if mask & (1 << i) != 0 {
            vertices.extend(rect(x, y, bw, bh, color));
        }
    }
    vertices
}

/// A non-negative number drawn left to right from `origin` (baseline)
pub fn number(value: u32, origin: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let text = value.to_string();
    let mut vertices = Vec::new();
    let mut x = origin.x;
    for ch in text.chars() {
        if let Some(d) = ch.to_digit(10) {
            vertices.extend(digit(d, Vec2::new(x, origin.y), color));
        }
        x += DIGIT_WIDTH + DIGIT_SPACING;
    }
    vertices
}
