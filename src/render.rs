//! Painting links onto a [`DrawingSurface`].
//!
//! [`create_link`] strokes the link body, then draws direction arrowheads.
//! Paint goes through a [`PaintSession`]: each step checks that the surface is
//! still live before running, any failure ends the current phase, and saved
//! state is restored when the session is dropped. A surface that dies mid-paint
//! is an expected condition, logged at debug level and otherwise ignored.

use std::f32::consts::FRAC_PI_6;

use slint::Color;

use crate::geometry::{Direction, LineStyle, PathType, Point, PortSide};
use crate::path::CubicBezier;
use crate::surface::{DrawingSurface, SurfaceError};

/// Shadow blur of a selected link.
pub const SELECTION_GLOW_BLUR: f32 = 10.0;

/// Minimum tangent component at the curve midpoint for a mid-curve arrowhead.
pub const CURVE_ARROW_MARGIN: f32 = 100.0;

/// Added to the arrowhead length to get the minimum segment extent for a mid-segment arrowhead.
pub const SEGMENT_ARROW_PADDING: f32 = 10.0;

/// Half the opening angle of an arrowhead.
const ARROW_WING_ANGLE: f32 = FRAC_PI_6;

/// Exclusive access to a surface for one paint pass.
///
/// Tracks outstanding `save`s and restores them on drop while the surface is
/// still live; errors during that cleanup are ignored.
pub struct PaintSession<'a, S: DrawingSurface + ?Sized> {
    surface: &'a mut S,
    saved: usize,
}

impl<'a, S: DrawingSurface + ?Sized> PaintSession<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        Self { surface, saved: 0 }
    }

    /// Run a group of commands if the surface is live.
    ///
    /// The first failing command short-circuits the rest of the group.
    pub fn step<F>(&mut self, op: F) -> Result<(), SurfaceError>
    where
        F: FnOnce(&mut S) -> Result<(), SurfaceError>,
    {
        if !self.surface.is_live() {
            return Err(SurfaceError::Lost);
        }
        op(&mut *self.surface)
    }

    pub fn save(&mut self) -> Result<(), SurfaceError> {
        self.step(|s| s.save())?;
        self.saved += 1;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<(), SurfaceError> {
        self.step(|s| s.restore())?;
        self.saved = self.saved.saturating_sub(1);
        Ok(())
    }
}

impl<S: DrawingSurface + ?Sized> Drop for PaintSession<'_, S> {
    fn drop(&mut self) {
        while self.saved > 0 && self.surface.is_live() {
            if self.surface.restore().is_err() {
                break;
            }
            self.saved -= 1;
        }
    }
}

impl<S: DrawingSurface + ?Sized> std::fmt::Debug for PaintSession<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaintSession")
            .field("live", &self.surface.is_live())
            .field("saved", &self.saved)
            .finish()
    }
}

/// Paint a link and its direction arrowheads.
///
/// # Arguments
/// * `surface` - Target surface; painting stops quietly if it dies
/// * `start` - Semantic start of the link, used to orient arrowheads
/// * `control_points` - Points from [`calculate_control_points`](crate::calculate_control_points)
/// * `is_selected` - Adds a glow in the link color
/// * `color`, `style`, `line_width` - Stroke appearance
/// * `direction` - Which arrowheads to draw
/// * `path_type` - Shape the points describe
/// * `arrow_head_length` - Length of arrowhead wings
/// * `input_side`, `output_side` - Port sides orienting the endpoint arrowheads
#[allow(clippy::too_many_arguments)]
pub fn create_link<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    start: Point,
    control_points: &[Point],
    is_selected: bool,
    color: Color,
    direction: Direction,
    style: LineStyle,
    path_type: PathType,
    line_width: f32,
    arrow_head_length: f32,
    input_side: PortSide,
    output_side: PortSide,
) {
    let _span = tracing::trace_span!(
        "create_link",
        ?path_type,
        ?direction,
        points = control_points.len()
    )
    .entered();

    if control_points.is_empty() {
        tracing::trace!("no control points, nothing to paint");
        return;
    }

    let link = LinkPaint {
        start,
        control_points,
        is_selected,
        color,
        direction,
        style,
        path_type,
        line_width,
        arrow_head_length,
        input_side,
        output_side,
    };

    let body = link.paint_body(&mut PaintSession::new(&mut *surface));
    if let Err(err) = body {
        tracing::debug!(error = %err, "link body paint aborted");
        return;
    }

    if let Err(err) = link.paint_direction(&mut PaintSession::new(surface)) {
        tracing::debug!(error = %err, "arrowhead paint aborted");
    }
}

/// Draw a filled arrowhead with its tip at `target`, pointing along `angle` (radians).
pub fn draw_arrow<S: DrawingSurface + ?Sized>(
    session: &mut PaintSession<'_, S>,
    target: Point,
    angle: f32,
    color: Color,
    head_length: f32,
) -> Result<(), SurfaceError> {
    let wing = |a: f32| {
        Point::new(target.x - head_length * a.cos(), target.y - head_length * a.sin())
    };
    let left = wing(angle - ARROW_WING_ANGLE);
    let right = wing(angle + ARROW_WING_ANGLE);

    session.step(|s| {
        s.begin_path()?;
        s.move_to(left)?;
        s.line_to(target)?;
        s.line_to(right)?;
        s.line_to(left)
    })?;

    // Arrowheads are always solid
    session.step(|s| {
        s.set_line_dash(&[])?;
        s.set_fill_color(color)?;
        s.fill()?;
        s.set_stroke_color(color)?;
        s.stroke()
    })
}

struct LinkPaint<'p> {
    start: Point,
    control_points: &'p [Point],
    is_selected: bool,
    color: Color,
    direction: Direction,
    style: LineStyle,
    path_type: PathType,
    line_width: f32,
    arrow_head_length: f32,
    input_side: PortSide,
    output_side: PortSide,
}

impl LinkPaint<'_> {
    fn paint_body<S: DrawingSurface + ?Sized>(
        &self,
        session: &mut PaintSession<'_, S>,
    ) -> Result<(), SurfaceError> {
        session.step(|s| s.reset())?;
        session.save()?;
        session.step(|s| {
            s.set_line_width(self.line_width)?;
            s.begin_path()
        })?;

        let points = self.control_points;
        match self.path_type {
            PathType::Bezier => session.step(|s| trace_curve(s, points))?,
            PathType::LLine | PathType::Straight => session.step(|s| trace_polyline(s, points))?,
        }

        session.step(|s| {
            s.set_stroke_color(self.color)?;
            if self.is_selected {
                s.set_shadow(self.color, SELECTION_GLOW_BLUR)?;
            }
            s.set_line_dash(self.style.dash_pattern())?;
            s.stroke()
        })?;

        session.restore()
    }

    fn paint_direction<S: DrawingSurface + ?Sized>(
        &self,
        session: &mut PaintSession<'_, S>,
    ) -> Result<(), SurfaceError> {
        let (Some(&first), Some(&last)) = (self.control_points.first(), self.control_points.last())
        else {
            return Ok(());
        };

        // Sequences may run from either end; the arrowheads follow the semantic start
        let forward = first == self.start;
        let (head, tail) = if forward { (last, first) } else { (first, last) };

        match self.direction {
            Direction::None => Ok(()),
            Direction::Forward => {
                self.endpoint_arrow(session, head, self.output_side)?;
                self.mid_arrows(session, forward)
            }
            Direction::Bidirectional => {
                self.endpoint_arrow(session, head, self.output_side)?;
                self.endpoint_arrow(session, tail, self.input_side)
            }
        }
    }

    fn endpoint_arrow<S: DrawingSurface + ?Sized>(
        &self,
        session: &mut PaintSession<'_, S>,
        target: Point,
        side: PortSide,
    ) -> Result<(), SurfaceError> {
        let angle = side.arrow_direction().angle();
        draw_arrow(session, target, angle, self.color, self.arrow_head_length)
    }

    fn mid_arrows<S: DrawingSurface + ?Sized>(
        &self,
        session: &mut PaintSession<'_, S>,
        forward: bool,
    ) -> Result<(), SurfaceError> {
        match self.path_type {
            PathType::Bezier => {
                let Some(bezier) = CubicBezier::from_control_points(self.control_points) else {
                    return Ok(());
                };
                let middle = bezier.eval(0.5);
                let tangent = bezier.derivative(0.5);
                if tangent.x.abs() > CURVE_ARROW_MARGIN || tangent.y.abs() > CURVE_ARROW_MARGIN {
                    let angle = tangent.angle();
                    draw_arrow(session, middle, angle, self.color, self.arrow_head_length)?;
                }
                Ok(())
            }
            PathType::LLine | PathType::Straight => {
                let margin = SEGMENT_ARROW_PADDING + self.arrow_head_length;
                for pair in self.control_points.windows(2) {
                    let (from, to) = if forward { (pair[0], pair[1]) } else { (pair[1], pair[0]) };
                    let delta = to - from;
                    if delta.x.abs() > margin || delta.y.abs() > margin {
                        let target = from.midpoint(to);
                        let head = self.arrow_head_length;
                        draw_arrow(session, target, delta.angle(), self.color, head)?;
                    }
                }
                Ok(())
            }
        }
    }
}

fn trace_curve<S: DrawingSurface + ?Sized>(
    s: &mut S,
    points: &[Point],
) -> Result<(), SurfaceError> {
    let Some(bezier) = CubicBezier::from_control_points(points) else {
        return Ok(());
    };
    s.move_to(bezier.p0)?;
    s.cubic_to(bezier.p1, bezier.p2, bezier.p3)
}

fn trace_polyline<S: DrawingSurface + ?Sized>(
    s: &mut S,
    points: &[Point],
) -> Result<(), SurfaceError> {
    let Some((first, rest)) = points.split_first() else {
        return Ok(());
    };
    if rest.is_empty() {
        return Ok(());
    }
    s.move_to(*first)?;
    for p in rest {
        s.line_to(*p)?;
    }
    Ok(())
}
