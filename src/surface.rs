//! The immediate-mode drawing surface links are painted onto.
//!
//! A surface can die between frames (its view item is destroyed). Every
//! command is therefore fallible, and [`DrawingSurface::is_live`] lets the
//! renderer check before issuing the next one.

use crate::geometry::Point;
use slint::Color;

/// Failure of a drawing command.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SurfaceError {
    /// The surface is no longer live.
    #[error("drawing surface is no longer live")]
    Lost,
    /// The surface rejected a command.
    #[error("drawing surface rejected command: {0}")]
    Backend(String),
}

/// A 2D canvas with path and paint state, in the style of an HTML canvas context.
pub trait DrawingSurface {
    /// Whether the surface can still accept commands.
    fn is_live(&self) -> bool;

    /// Clear the surface and reset all state.
    fn reset(&mut self) -> Result<(), SurfaceError>;
    fn save(&mut self) -> Result<(), SurfaceError>;
    fn restore(&mut self) -> Result<(), SurfaceError>;

    fn set_line_width(&mut self, width: f32) -> Result<(), SurfaceError>;
    fn set_stroke_color(&mut self, color: Color) -> Result<(), SurfaceError>;
    fn set_fill_color(&mut self, color: Color) -> Result<(), SurfaceError>;
    fn set_shadow(&mut self, color: Color, blur: f32) -> Result<(), SurfaceError>;
    /// Empty pattern means solid.
    fn set_line_dash(&mut self, pattern: &[f32]) -> Result<(), SurfaceError>;

    fn begin_path(&mut self) -> Result<(), SurfaceError>;
    fn move_to(&mut self, p: Point) -> Result<(), SurfaceError>;
    fn line_to(&mut self, p: Point) -> Result<(), SurfaceError>;
    fn cubic_to(&mut self, cp1: Point, cp2: Point, end: Point) -> Result<(), SurfaceError>;

    fn fill(&mut self) -> Result<(), SurfaceError>;
    fn stroke(&mut self) -> Result<(), SurfaceError>;
}

/// A single command issued to a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Reset,
    Save,
    Restore,
    SetLineWidth(f32),
    SetStrokeColor(Color),
    SetFillColor(Color),
    SetShadow { color: Color, blur: f32 },
    SetLineDash(Vec<f32>),
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    CubicTo { cp1: Point, cp2: Point, end: Point },
    Fill,
    Stroke,
}

/// Surface that records commands instead of drawing them.
///
/// Useful for snapshot tests and for replaying paint onto another backend.
/// A command budget simulates a surface that dies mid-paint.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    /// Commands accepted over the surface's lifetime, drained or not
    accepted: usize,
    budget: Option<usize>,
    killed: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface that dies after accepting `commands` commands.
    pub fn live_for(commands: usize) -> Self {
        Self { budget: Some(commands), ..Self::default() }
    }

    /// Kill the surface; all further commands fail.
    pub fn kill(&mut self) {
        self.killed = true;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    fn record(&mut self, command: DrawCommand) -> Result<(), SurfaceError> {
        if !self.is_live() {
            return Err(SurfaceError::Lost);
        }
        self.commands.push(command);
        self.accepted += 1;
        Ok(())
    }
}

impl DrawingSurface for RecordingSurface {
    fn is_live(&self) -> bool {
        !self.killed && self.budget.map_or(true, |budget| self.accepted < budget)
    }

    fn reset(&mut self) -> Result<(), SurfaceError> {
        self.record(DrawCommand::Reset)
    }

    fn save(&mut self) -> Result<(), SurfaceError> {
        self.record(DrawCommand::Save)
    }

    fn restore(&mut self) -> Result<(), SurfaceError> {
        self.record(DrawCommand::Restore)
    }

    fn set_line_width(&mut self, width: f32) -> Result<(), SurfaceError> {
        self.record(DrawCommand::SetLineWidth(width))
    }

    fn set_stroke_color(&mut self, color: Color) -> Result<(), SurfaceError> {
        self.record(DrawCommand::SetStrokeColor(color))
    }

    fn set_fill_color(&mut self, color: Color) -> Result<(), SurfaceError> {
        self.record(DrawCommand::SetFillColor(color))
    }

    fn set_shadow(&mut self, color: Color, blur: f32) -> Result<(), SurfaceError> {
        self.record(DrawCommand::SetShadow { color, blur })
    }

    fn set_line_dash(&mut self, pattern: &[f32]) -> Result<(), SurfaceError> {
        self.record(DrawCommand::SetLineDash(pattern.to_vec()))
    }

    fn begin_path(&mut self) -> Result<(), SurfaceError> {
        self.record(DrawCommand::BeginPath)
    }

    fn move_to(&mut self, p: Point) -> Result<(), SurfaceError> {
        self.record(DrawCommand::MoveTo(p))
    }

    fn line_to(&mut self, p: Point) -> Result<(), SurfaceError> {
        self.record(DrawCommand::LineTo(p))
    }

    fn cubic_to(&mut self, cp1: Point, cp2: Point, end: Point) -> Result<(), SurfaceError> {
        self.record(DrawCommand::CubicTo { cp1, cp2, end })
    }

    fn fill(&mut self) -> Result<(), SurfaceError> {
        self.record(DrawCommand::Fill)
    }

    fn stroke(&mut self) -> Result<(), SurfaceError> {
        self.record(DrawCommand::Stroke)
    }
}
