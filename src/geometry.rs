//! Value types shared by the link calculator, hit tester and renderer.
//!
//! The view layer reports port sides, path types, directions and line styles as
//! plain integers; the `From<i32>` conversions here map unknown codes to a
//! harmless fallback instead of failing.

use std::ops::{Add, Mul, Sub};

/// Clearance used for curve control handles and straight-line port offsets.
pub const PORT_CLEARANCE: f32 = 100.0;

/// A 2D point in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Angle of this vector in radians, as `atan2(y, x)`.
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Point::new(x, y)
    }
}

impl From<Point> for (f32, f32) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    fn mul(self, factor: f32) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}

/// Side of a node a link endpoint attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PortSide {
    Top,
    Bottom,
    Left,
    Right,
    #[default]
    None,
}

impl PortSide {
    /// Outward offset of [`PORT_CLEARANCE`] units away from the node.
    pub fn margin_vector(self) -> Point {
        match self {
            PortSide::Top => Point::new(0.0, -PORT_CLEARANCE),
            PortSide::Bottom => Point::new(0.0, PORT_CLEARANCE),
            PortSide::Left => Point::new(-PORT_CLEARANCE, 0.0),
            PortSide::Right => Point::new(PORT_CLEARANCE, 0.0),
            PortSide::None => Point::ZERO,
        }
    }

    /// Unit vector pointing into the node through this side.
    ///
    /// Endpoint arrowheads point along this vector.
    pub fn arrow_direction(self) -> Point {
        match self {
            PortSide::Top => Point::new(0.0, 1.0),
            PortSide::Bottom => Point::new(0.0, -1.0),
            PortSide::Left => Point::new(1.0, 0.0),
            PortSide::Right => Point::new(-1.0, 0.0),
            PortSide::None => Point::ZERO,
        }
    }
}

impl From<i32> for PortSide {
    fn from(code: i32) -> Self {
        match code {
            0 => PortSide::Top,
            1 => PortSide::Bottom,
            2 => PortSide::Left,
            3 => PortSide::Right,
            _ => PortSide::None,
        }
    }
}

/// Shape of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathType {
    /// Cubic bezier between the ports.
    #[default]
    Bezier,
    /// Orthogonal polyline.
    LLine,
    /// Direct segment with short port stubs.
    Straight,
}

impl From<i32> for PathType {
    fn from(code: i32) -> Self {
        match code {
            1 => PathType::LLine,
            2 => PathType::Straight,
            _ => PathType::Bezier,
        }
    }
}

/// Which arrowheads a link carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    None,
    Forward,
    Bidirectional,
}

impl From<i32> for Direction {
    fn from(code: i32) -> Self {
        match code {
            1 => Direction::Forward,
            2 => Direction::Bidirectional,
            _ => Direction::None,
        }
    }
}

/// Stroke pattern of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    /// Dash pattern passed to the drawing surface. Empty means solid.
    pub fn dash_pattern(self) -> &'static [f32] {
        match self {
            LineStyle::Solid => &[],
            LineStyle::Dashed => &[5.0, 2.0],
            LineStyle::Dotted => &[1.0, 2.0],
        }
    }
}

impl From<i32> for LineStyle {
    fn from(code: i32) -> Self {
        match code {
            1 => LineStyle::Dashed,
            2 => LineStyle::Dotted,
            _ => LineStyle::Solid,
        }
    }
}
