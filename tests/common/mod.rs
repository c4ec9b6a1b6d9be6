//! Common test utilities for integration tests.

#![allow(dead_code)]

use slint::Color;
use slint_node_link::{DrawCommand, PathType, Point, PortSide};

/// The four real port sides, in table order.
pub const SIDES: [PortSide; 4] = [PortSide::Top, PortSide::Bottom, PortSide::Left, PortSide::Right];

pub const PATH_TYPES: [PathType; 3] = [PathType::Bezier, PathType::LLine, PathType::Straight];

pub fn p(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

pub fn link_color() -> Color {
    Color::from_rgb_u8(100, 180, 255)
}

/// Whether every segment of `points` is horizontal or vertical.
pub fn is_axis_aligned(points: &[Point]) -> bool {
    points.windows(2).all(|pair| pair[0].x == pair[1].x || pair[0].y == pair[1].y)
}

/// Number of arrowheads in a recorded paint; every arrowhead is one fill.
pub fn arrow_count(commands: &[DrawCommand]) -> usize {
    commands.iter().filter(|c| **c == DrawCommand::Fill).count()
}

/// Number of strokes in a recorded paint.
pub fn stroke_count(commands: &[DrawCommand]) -> usize {
    commands.iter().filter(|c| **c == DrawCommand::Stroke).count()
}

/// Whether every `Save` in the recording is matched by a later `Restore`.
pub fn saves_balanced(commands: &[DrawCommand]) -> bool {
    let mut depth = 0i32;
    for command in commands {
        match command {
            DrawCommand::Save => depth += 1,
            DrawCommand::Restore => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return false;
        }
    }
    depth == 0
}

/// Tips of all arrowheads in a recorded paint.
///
/// An arrowhead path is `MoveTo(left) LineTo(tip) LineTo(right) LineTo(left)`.
pub fn arrow_tips(commands: &[DrawCommand]) -> Vec<Point> {
    commands
        .windows(5)
        .filter_map(|w| match w {
            [
                DrawCommand::MoveTo(left),
                DrawCommand::LineTo(tip),
                DrawCommand::LineTo(_),
                DrawCommand::LineTo(close),
                DrawCommand::SetLineDash(dash),
            ]
                if left == close && dash.is_empty() =>
            {
                Some(*tip)
            }
            _ => None,
        })
        .collect()
}
