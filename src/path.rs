use crate::geometry::Point;

/// Cubic bezier curve of a link
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: Point, // Start point
    pub p1: Point, // Control point 1
    pub p2: Point, // Control point 2
    pub p3: Point, // End point
}

impl CubicBezier {
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Build a curve from a `[start, cp1, cp2, end]` control point sequence.
    ///
    /// Returns `None` when fewer than four points are given.
    pub fn from_control_points(points: &[Point]) -> Option<Self> {
        match points {
            [p0, p1, p2, p3, ..] => Some(Self::new(*p0, *p1, *p2, *p3)),
            _ => None,
        }
    }

    /// Evaluate the bezier curve at parameter t (0.0 to 1.0)
    pub fn eval(&self, t: f32) -> Point {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        let x = mt3 * self.p0.x
            + 3.0 * mt2 * t * self.p1.x
            + 3.0 * mt * t2 * self.p2.x
            + t3 * self.p3.x;
        let y = mt3 * self.p0.y
            + 3.0 * mt2 * t * self.p1.y
            + 3.0 * mt * t2 * self.p2.y
            + t3 * self.p3.y;

        Point::new(x, y)
    }

    /// First derivative of the curve at parameter t
    ///
    /// The result is a direction vector, not a position.
    pub fn derivative(&self, t: f32) -> Point {
        let mt = 1.0 - t;
        let a = -3.0 * mt * mt;
        let b = 3.0 * (mt * mt - 2.0 * t * mt);
        let c = 3.0 * (2.0 * t * mt - t * t);
        let d = 3.0 * t * t;

        Point::new(
            a * self.p0.x + b * self.p1.x + c * self.p2.x + d * self.p3.x,
            a * self.p0.y + b * self.p1.y + c * self.p2.y + d * self.p3.y,
        )
    }

    /// SVG path command for this curve (e.g. "M 10 20 C 60 20 90 80 140 80")
    pub fn to_path_commands(&self) -> String {
        format!(
            "M {} {} C {} {} {} {} {} {}",
            self.p0.x, self.p0.y, self.p1.x, self.p1.y, self.p2.x, self.p2.y, self.p3.x, self.p3.y
        )
    }
}

/// Generate SVG path commands for a polyline through `points`
///
/// Returns an empty string for fewer than two points.
pub fn polyline_commands(points: &[Point]) -> String {
    let Some((first, rest)) = points.split_first() else {
        return String::new();
    };
    if rest.is_empty() {
        return String::new();
    }

    let mut commands = format!("M {} {}", first.x, first.y);
    for p in rest {
        commands.push_str(&format!(" L {} {}", p.x, p.y));
    }
    commands
}
