use crate::cubic::solve_cubic;
use crate::geometry::{PathType, Point};
use crate::path::CubicBezier;

/// Number of intervals the curve is sampled at (51 samples, t step 0.02).
pub const CURVE_SAMPLES: u32 = 50;

/// Vertical slack of the exact curve test.
pub const CURVE_Y_TOLERANCE: f32 = 5.0;

/// Trait for link geometry data needed for hit-testing
pub trait LinkGeometry {
    fn id(&self) -> i32;
    fn path_type(&self) -> PathType;
    fn control_points(&self) -> Vec<Point>;
}

/// Check whether `(x, y)` lies on a link.
///
/// # Arguments
/// * `x`, `y` - Position to test
/// * `tolerance` - Pick distance; orthogonal links use twice this as box margin
/// * `points` - Control points from [`calculate_control_points`](crate::calculate_control_points)
/// * `path_type` - Shape the points describe
///
/// Sequences too short for their shape never match.
pub fn is_point_on_link(
    x: f32,
    y: f32,
    tolerance: f32,
    points: &[Point],
    path_type: PathType,
) -> bool {
    match path_type {
        PathType::LLine => {
            let margin = tolerance * 2.0;
            points
                .windows(2)
                .any(|pair| is_position_on_line(x, y, pair[0], pair[1], margin))
        }
        PathType::Straight => is_position_on_straight_line(x, y, points, tolerance),
        PathType::Bezier => {
            let Some(bezier) = CubicBezier::from_control_points(points) else {
                return false;
            };
            let target = Point::new(x, y);
            (0..=CURVE_SAMPLES).any(|i| {
                let t = i as f32 / CURVE_SAMPLES as f32;
                bezier.eval(t).distance(target) < tolerance
            })
        }
    }
}

/// Exact curve test: solve `x(t) = x` and compare `y(t)` at each root in `[0, 1]`.
///
/// Accepts when some root lands within [`CURVE_Y_TOLERANCE`] of `position.y`.
pub fn is_point_on_curve(
    position: Point,
    start: Point,
    cp1: Point,
    cp2: Point,
    end: Point,
) -> bool {
    let (x0, x1, x2, x3) = (start.x as f64, cp1.x as f64, cp2.x as f64, end.x as f64);

    let a = -x0 + 3.0 * x1 - 3.0 * x2 + x3;
    let b = 3.0 * x0 - 6.0 * x1 + 3.0 * x2;
    let c = -3.0 * x0 + 3.0 * x1;
    let d = x0 - position.x as f64;

    let bezier = CubicBezier::new(start, cp1, cp2, end);
    solve_cubic(a, b, c, d)
        .into_iter()
        .filter(|t| (0.0..=1.0).contains(t))
        .any(|t| {
            let y = bezier.eval(t as f32).y;
            y <= position.y + CURVE_Y_TOLERANCE && y >= position.y - CURVE_Y_TOLERANCE
        })
}

/// Check whether `(x, y)` lies in the box spanned by two points, grown by `margin`.
pub fn is_position_on_line(x: f32, y: f32, first: Point, second: Point, margin: f32) -> bool {
    let in_x = (x >= first.x - margin && x <= second.x + margin)
        || (x <= first.x + margin && x >= second.x - margin);
    let in_y = (y >= first.y - margin && y <= second.y + margin)
        || (y <= first.y + margin && y >= second.y - margin);
    in_x && in_y
}

/// Straight link test: the two port stubs as boxes, the middle span along its slope.
pub fn is_position_on_straight_line(x: f32, y: f32, points: &[Point], margin: f32) -> bool {
    let [p0, p1, p2, p3, ..] = points else {
        return false;
    };

    if is_position_on_line(x, y, *p0, *p1, margin) || is_position_on_line(x, y, *p2, *p3, margin) {
        return true;
    }

    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;

    if dx.abs() >= 10.0 && dy.abs() >= 10.0 && (dy / dx).abs() >= 0.05 {
        // Sloped span: residuals against the line through p1 and p2
        let slope = dy / dx;
        let y_in_line = slope * (x - p2.x) + p2.y;
        let x_in_line = (y - p2.y + slope * p2.x) / slope;

        (x - x_in_line).abs() <= margin && (y - y_in_line).abs() <= margin
    } else {
        // Horizontal, vertical or nearly so
        is_position_on_line(x, y, *p1, *p2, margin)
    }
}

/// Find the first link at the given position
///
/// Returns the ID of the first link whose path passes within `tolerance`, or `None`.
pub fn find_link_at<L, I>(x: f32, y: f32, links: I, tolerance: f32) -> Option<i32>
where
    L: LinkGeometry,
    I: IntoIterator<Item = L>,
{
    links
        .into_iter()
        .find(|link| is_point_on_link(x, y, tolerance, &link.control_points(), link.path_type()))
        .map(|link| link.id())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    struct TestLink {
        id: i32,
        path_type: PathType,
        points: Vec<Point>,
    }

    impl LinkGeometry for &TestLink {
        fn id(&self) -> i32 { self.id }
        fn path_type(&self) -> PathType { self.path_type }
        fn control_points(&self) -> Vec<Point> { self.points.clone() }
    }

    fn arc() -> Vec<Point> {
        vec![p(0.0, 0.0), p(0.0, 100.0), p(100.0, -100.0), p(100.0, 0.0)]
    }

    // ========================================================================
    // Bezier - sampling
    // ========================================================================

    #[test]
    fn test_bezier_hit_at_sampled_midpoint() {
        let mid = CubicBezier::from_control_points(&arc()).unwrap().eval(0.5);
        assert!(is_point_on_link(mid.x, mid.y, 1.0, &arc(), PathType::Bezier));
    }

    #[test]
    fn test_bezier_hit_at_endpoints() {
        assert!(is_point_on_link(0.0, 0.0, 1.0, &arc(), PathType::Bezier));
        assert!(is_point_on_link(100.0, 0.0, 1.0, &arc(), PathType::Bezier));
    }

    #[test]
    fn test_bezier_miss_far_away() {
        assert!(!is_point_on_link(50.0, 300.0, 5.0, &arc(), PathType::Bezier));
    }

    #[test]
    fn test_bezier_tolerance_is_strict() {
        let dot = [p(0.0, 0.0); 4];
        // Exactly at tolerance distance does not count
        assert!(!is_point_on_link(0.0, -10.0, 10.0, &dot, PathType::Bezier));
        assert!(is_point_on_link(0.0, -9.9, 10.0, &dot, PathType::Bezier));
    }

    #[test]
    fn test_bezier_too_few_points_never_match() {
        assert!(!is_point_on_link(0.0, 0.0, 10.0, &[p(0.0, 0.0), p(1.0, 1.0)], PathType::Bezier));
        assert!(!is_point_on_link(0.0, 0.0, 10.0, &[], PathType::Bezier));
    }

    // ========================================================================
    // Bezier - exact root check
    // ========================================================================

    #[test]
    fn test_exact_curve_hit_on_curve() {
        let pts = arc();
        let on = CubicBezier::from_control_points(&pts).unwrap().eval(0.3);
        assert!(is_point_on_curve(on, pts[0], pts[1], pts[2], pts[3]));
    }

    #[test]
    fn test_exact_curve_accepts_within_five_units() {
        let pts = arc();
        let on = CubicBezier::from_control_points(&pts).unwrap().eval(0.7);
        assert!(is_point_on_curve(p(on.x, on.y + 4.0), pts[0], pts[1], pts[2], pts[3]));
        assert!(!is_point_on_curve(p(on.x, on.y + 8.0), pts[0], pts[1], pts[2], pts[3]));
    }

    #[test]
    fn test_exact_curve_rejects_outside_x_range() {
        let pts = arc();
        assert!(!is_point_on_curve(p(150.0, 0.0), pts[0], pts[1], pts[2], pts[3]));
        assert!(!is_point_on_curve(p(-20.0, 0.0), pts[0], pts[1], pts[2], pts[3]));
    }

    // ========================================================================
    // L-line
    // ========================================================================

    #[test]
    fn test_l_line_hit_within_expanded_box() {
        let pts = [p(0.0, 0.0), p(0.0, -5.0), p(0.0, -5.0), p(100.0, -5.0)];
        assert!(is_point_on_link(50.0, 0.0, 5.0, &pts, PathType::LLine));
    }

    #[test]
    fn test_l_line_margin_is_twice_tolerance() {
        let pts = [p(0.0, 0.0), p(100.0, 0.0)];
        assert!(is_point_on_link(50.0, 9.5, 5.0, &pts, PathType::LLine));
        assert!(!is_point_on_link(50.0, 10.5, 5.0, &pts, PathType::LLine));
    }

    #[test]
    fn test_l_line_segments_in_either_direction() {
        let pts = [p(100.0, 0.0), p(100.0, -80.0), p(0.0, -80.0)];
        assert!(is_point_on_link(40.0, -78.0, 2.0, &pts, PathType::LLine));
        assert!(is_point_on_link(101.0, -40.0, 2.0, &pts, PathType::LLine));
        assert!(!is_point_on_link(40.0, -40.0, 2.0, &pts, PathType::LLine));
    }

    #[test]
    fn test_l_line_single_point_never_matches() {
        assert!(!is_point_on_link(0.0, 0.0, 5.0, &[p(0.0, 0.0)], PathType::LLine));
    }

    // ========================================================================
    // Straight
    // ========================================================================

    #[test]
    fn test_straight_sloped_span() {
        let pts = [p(0.0, 0.0), p(0.0, 0.0), p(100.0, 100.0), p(100.0, 100.0)];
        assert!(is_point_on_link(50.0, 51.0, 2.0, &pts, PathType::Straight));
        assert!(!is_point_on_link(50.0, 60.0, 2.0, &pts, PathType::Straight));
    }

    #[test]
    fn test_straight_sloped_span_tests_the_whole_line() {
        let pts = [p(0.0, 0.0), p(0.0, 0.0), p(100.0, 100.0), p(100.0, 100.0)];
        // Residuals only: a point on the line's extension past the span still counts
        assert!(is_point_on_link(300.0, 300.0, 2.0, &pts, PathType::Straight));
        assert!(is_point_on_link(-50.0, -49.0, 2.0, &pts, PathType::Straight));
        assert!(!is_point_on_link(300.0, 310.0, 2.0, &pts, PathType::Straight));
    }

    #[test]
    fn test_straight_near_horizontal_span_uses_box() {
        let pts = [p(0.0, 0.0), p(0.0, 0.0), p(200.0, 4.0), p(200.0, 4.0)];
        assert!(is_point_on_link(120.0, 5.0, 2.0, &pts, PathType::Straight));
        assert!(!is_point_on_link(120.0, 9.0, 2.0, &pts, PathType::Straight));
    }

    #[test]
    fn test_straight_port_stub_hit() {
        let pts = [p(0.0, 0.0), p(0.0, 10.0), p(200.0, 40.0), p(200.0, 50.0)];
        assert!(is_point_on_link(1.0, 5.0, 2.0, &pts, PathType::Straight));
        assert!(is_point_on_link(199.0, 45.0, 2.0, &pts, PathType::Straight));
    }

    #[test]
    fn test_straight_too_few_points_never_match() {
        let pts = [p(0.0, 0.0), p(10.0, 0.0), p(20.0, 0.0)];
        assert!(!is_point_on_link(5.0, 0.0, 2.0, &pts, PathType::Straight));
    }

    // ========================================================================
    // find_link_at()
    // ========================================================================

    #[test]
    fn test_find_link_at_first_hit_wins() {
        let a = TestLink {
            id: 1,
            path_type: PathType::LLine,
            points: vec![p(0.0, 0.0), p(100.0, 0.0)],
        };
        let b = TestLink {
            id: 2,
            path_type: PathType::LLine,
            points: vec![p(0.0, 2.0), p(100.0, 2.0)],
        };
        let links = [&a, &b];

        assert_eq!(find_link_at(50.0, 1.0, links, 2.0), Some(1));
        assert_eq!(find_link_at(50.0, 200.0, links, 2.0), None);
    }

    #[test]
    fn test_find_link_at_empty_list() {
        let links: Vec<&TestLink> = vec![];
        assert_eq!(find_link_at(50.0, 50.0, links, 10.0), None);
    }
}
