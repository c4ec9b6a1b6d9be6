//! Control point calculation for the three link shapes.
//!
//! The result of [`calculate_control_points`] always starts at the link's
//! start point and ends at its end point:
//!
//! - [`PathType::Bezier`]: `[start, cp1, cp2, end]`
//! - [`PathType::LLine`]: `[start, ...bends, end]`, every segment axis-aligned
//! - [`PathType::Straight`]: `[start, corrected_start, corrected_end, end]`

use crate::geometry::{Direction, PathType, Point, PortSide};

/// Clearance of orthogonal routes from the node they leave or enter.
pub const ROUTING_MARGIN: f32 = 20.0;

/// Fraction of the port clearance used as the stub of a straight link.
pub const STRAIGHT_CLEARANCE_FACTOR: f32 = 0.1;

/// Calculate control points for a link of the given type.
///
/// # Arguments
/// * `start`, `end` - Link endpoints (port centers)
/// * `direction` - Arrowheads carried by the link; straight links only add port stubs
///   where an arrowhead needs room
/// * `path_type` - Shape of the link
/// * `input_side`, `output_side` - Port sides at `start` and `end`
pub fn calculate_control_points(
    start: Point,
    end: Point,
    direction: Direction,
    path_type: PathType,
    input_side: PortSide,
    output_side: PortSide,
) -> Vec<Point> {
    match path_type {
        PathType::Bezier => bezier_control_points(start, end, input_side, output_side),
        PathType::LLine => l_line_control_points(start, end, input_side, output_side),
        PathType::Straight => {
            straight_control_points(start, end, input_side, output_side, direction)
        }
    }
}

/// Control handles extend [`PORT_CLEARANCE`](crate::geometry::PORT_CLEARANCE) units out of
/// each port.
pub fn bezier_control_points(
    start: Point,
    end: Point,
    input_side: PortSide,
    output_side: PortSide,
) -> Vec<Point> {
    let cp1 = start + input_side.margin_vector();
    let cp2 = end + output_side.margin_vector();
    vec![start, cp1, cp2, end]
}

/// Straight links get a short stub out of a port only where an arrowhead sits.
pub fn straight_control_points(
    start: Point,
    end: Point,
    input_side: PortSide,
    output_side: PortSide,
    direction: Direction,
) -> Vec<Point> {
    let start_factor = if direction == Direction::Bidirectional {
        STRAIGHT_CLEARANCE_FACTOR
    } else {
        0.0
    };
    let end_factor = if direction == Direction::None {
        0.0
    } else {
        STRAIGHT_CLEARANCE_FACTOR
    };

    let corrected_start = start + input_side.margin_vector() * start_factor;
    let corrected_end = end + output_side.margin_vector() * end_factor;
    vec![start, corrected_start, corrected_end, end]
}

/// Orthogonal routing between two ports.
///
/// Routes are computed left to right; when `end` lies left of `start` the
/// endpoints and sides are swapped for the lookup and the result is reversed
/// again, so the returned sequence always runs from `start` to `end`.
pub fn l_line_control_points(
    start: Point,
    end: Point,
    input_side: PortSide,
    output_side: PortSide,
) -> Vec<Point> {
    let swapped = end.x - start.x < 0.0;
    let route = if swapped {
        Route::new(end, start)
    } else {
        Route::new(start, end)
    };
    let (input_side, output_side) = if swapped {
        (output_side, input_side)
    } else {
        (input_side, output_side)
    };

    let mut points = Vec::with_capacity(6);
    points.push(route.start);
    points.extend(
        bends(route.dy, input_side, output_side)
            .iter()
            .map(|bend| route.resolve(bend)),
    );
    points.push(route.end);

    if swapped {
        points.reverse();
    }
    points
}

/// Canonical (left to right) endpoints plus the derived routing distances.
#[derive(Debug, Clone, Copy)]
struct Route {
    start: Point,
    end: Point,
    dx: f32,
    dy: f32,
    /// Horizontal travel used for the mid line; the margin when both ports share an x.
    delta: f32,
}

impl Route {
    fn new(start: Point, end: Point) -> Self {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let delta = if dx == 0.0 { ROUTING_MARGIN } else { dx };
        Self { start, end, dx, dy, delta }
    }

    fn resolve(&self, bend: &Bend) -> Point {
        Point::new(
            self.coord(bend.x, self.start.x, self.end.x),
            self.coord(bend.y, self.start.y, self.end.y),
        )
    }

    fn coord(&self, c: Coord, start: f32, end: f32) -> f32 {
        let base = match c.anchor {
            Anchor::Start => start,
            Anchor::End => end,
        };
        let offset = match c.offset {
            Offset::Zero => 0.0,
            Offset::Margin => ROUTING_MARGIN,
            Offset::NegMargin => -ROUTING_MARGIN,
            Offset::HalfDelta => self.delta / 2.0,
            Offset::HalfDx => self.dx / 2.0,
            Offset::HalfDy => self.dy / 2.0,
        };
        base + offset
    }
}

#[derive(Debug, Clone, Copy)]
enum Anchor {
    Start,
    End,
}

#[derive(Debug, Clone, Copy)]
enum Offset {
    Zero,
    Margin,
    NegMargin,
    HalfDelta,
    HalfDx,
    HalfDy,
}

/// One coordinate of a bend: an endpoint's coordinate plus an offset.
#[derive(Debug, Clone, Copy)]
struct Coord {
    anchor: Anchor,
    offset: Offset,
}

#[derive(Debug, Clone, Copy)]
struct Bend {
    x: Coord,
    y: Coord,
}

const fn at(anchor: Anchor, offset: Offset) -> Coord {
    Coord { anchor, offset }
}

const fn b(x: Coord, y: Coord) -> Bend {
    Bend { x, y }
}

// x coordinates
const SX: Coord = at(Anchor::Start, Offset::Zero);
const SX_M: Coord = at(Anchor::Start, Offset::Margin);
const SX_NM: Coord = at(Anchor::Start, Offset::NegMargin);
const SX_HALF: Coord = at(Anchor::Start, Offset::HalfDelta);
const SX_HALF_DX: Coord = at(Anchor::Start, Offset::HalfDx);
const EX: Coord = at(Anchor::End, Offset::Zero);
const EX_M: Coord = at(Anchor::End, Offset::Margin);

// y coordinates
const SY: Coord = at(Anchor::Start, Offset::Zero);
const SY_M: Coord = at(Anchor::Start, Offset::Margin);
const SY_NM: Coord = at(Anchor::Start, Offset::NegMargin);
const SY_HALF_DY: Coord = at(Anchor::Start, Offset::HalfDy);
const EY: Coord = at(Anchor::End, Offset::Zero);
const EY_M: Coord = at(Anchor::End, Offset::Margin);
const EY_NM: Coord = at(Anchor::End, Offset::NegMargin);

type Bends = &'static [Bend];

/// Bends when the end is level with or above the start (`dy <= 0`),
/// indexed by `[input side][output side]` in Top, Bottom, Left, Right order.
const ROUTES_UP: [[Bends; 4]; 4] = [
    // Top
    [
        &[b(SX, EY_NM), b(EX, EY_NM)],
        &[b(SX, SY_NM), b(EX, SY_NM)],
        &[b(SX, EY)],
        &[b(SX, SY_NM), b(EX_M, SY_NM), b(EX_M, EY)],
    ],
    // Bottom
    [
        &[b(SX, SY_M), b(SX_HALF, SY_M), b(SX_HALF, EY_NM), b(EX, EY_NM)],
        &[b(SX, SY_M), b(EX, SY_M)],
        &[b(SX, SY_M), b(SX_M, SY_M), b(SX_M, EY)],
        &[b(SX, SY_M), b(EX_M, SY_M), b(EX_M, EY)],
    ],
    // Left
    [
        &[b(SX_NM, SY), b(SX_NM, EY_NM), b(EX, EY_NM)],
        &[b(SX_NM, SY), b(SX_NM, SY_M), b(EX, SY_M)],
        &[b(SX_NM, SY), b(SX_NM, EY)],
        &[b(SX_NM, SY), b(SX_NM, SY_M), b(EX_M, SY_M), b(EX_M, EY)],
    ],
    // Right
    [
        &[b(SX_M, SY), b(SX_M, EY_NM), b(EX, EY_NM)],
        &[b(EX, SY)],
        &[b(SX_HALF, SY), b(SX_HALF, EY)],
        &[b(EX_M, SY), b(EX_M, EY)],
    ],
];

/// Bends when the end is below the start (`dy > 0`).
const ROUTES_DOWN: [[Bends; 4]; 4] = [
    // Top
    [
        &[b(SX, SY_NM), b(EX, SY_NM)],
        &[b(SX, SY_NM), b(SX_HALF, SY_NM), b(SX_HALF, EY_M), b(EX, EY_M)],
        &[b(SX, SY_NM), b(SX_HALF, SY_NM), b(SX_HALF, EY)],
        &[b(SX, SY_NM), b(EX_M, SY_NM), b(EX_M, EY)],
    ],
    // Bottom
    [
        &[b(SX, SY_M), b(EX, SY_M)],
        &[b(SX, EY_M), b(EX, EY_M)],
        &[b(SX, EY)],
        &[b(SX, SY_M), b(EX_M, SY_M), b(EX_M, EY)],
    ],
    // Left
    [
        &[b(SX_NM, SY), b(SX_NM, EY_NM), b(EX, EY_NM)],
        &[b(SX_NM, SY), b(SX_NM, EY_M), b(EX, EY_M)],
        &[b(SX_NM, SY), b(SX_NM, EY)],
        &[b(SX_NM, SY), b(SX_NM, SY_HALF_DY), b(EX_M, SY_HALF_DY), b(EX_M, EY)],
    ],
    // Right
    [
        &[b(EX, SY)],
        &[b(SX_M, SY), b(SX_M, EY_M), b(EX, EY_M)],
        &[b(SX_HALF_DX, SY), b(SX_HALF_DX, EY)],
        &[b(EX_M, SY), b(EX_M, EY)],
    ],
];

/// Right to Top with the end only slightly below the start: loop over the start node.
const RIGHT_TO_TOP_SHALLOW: Bends = &[b(SX_M, SY), b(SX_M, SY_NM), b(EX, SY_NM)];

/// Rise below which a Right to Top route loops over the start node.
const SHALLOW_DROP: f32 = 10.0;

fn side_index(side: PortSide) -> Option<usize> {
    match side {
        PortSide::Top => Some(0),
        PortSide::Bottom => Some(1),
        PortSide::Left => Some(2),
        PortSide::Right => Some(3),
        PortSide::None => None,
    }
}

fn bends(dy: f32, input_side: PortSide, output_side: PortSide) -> Bends {
    let (Some(input), Some(output)) = (side_index(input_side), side_index(output_side)) else {
        return &[];
    };

    if dy <= 0.0 {
        ROUTES_UP[input][output]
    } else if input_side == PortSide::Right && output_side == PortSide::Top && dy < SHALLOW_DROP {
        RIGHT_TO_TOP_SHALLOW
    } else {
        ROUTES_DOWN[input][output]
    }
}
