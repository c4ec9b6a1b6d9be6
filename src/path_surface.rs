//! A [`DrawingSurface`] that produces Slint `Path` data.
//!
//! Slint has no immediate-mode canvas; links are drawn as `Path` elements whose
//! `commands` property takes an SVG path string. [`PathCommandSurface`]
//! collects the renderer's commands into such strings, one [`PathLayer`] per
//! painted (filled and/or stroked) path.
//!
//! ```slint
//! for layer in link-layers : Path {
//!     commands: layer.commands;
//!     stroke: layer.stroke;
//!     stroke-width: layer.line-width * 1px;
//!     fill: layer.fill;
//! }
//! ```

use crate::geometry::Point;
use crate::surface::{DrawingSurface, SurfaceError};
use slint::{Color, SharedString};

/// Selection glow of a layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Color,
    pub blur: f32,
}

/// One painted path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathLayer {
    pub commands: SharedString,
    pub stroke: Option<Color>,
    pub fill: Option<Color>,
    pub line_width: f32,
    pub dash: Vec<f32>,
    pub glow: Option<Glow>,
}

#[derive(Debug, Clone, PartialEq)]
struct PaintState {
    line_width: f32,
    stroke: Color,
    fill: Color,
    dash: Vec<f32>,
    glow: Option<Glow>,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            stroke: Color::from_rgb_u8(0, 0, 0),
            fill: Color::from_rgb_u8(0, 0, 0),
            dash: Vec::new(),
            glow: None,
        }
    }
}

/// Collects painted paths as Slint path command strings.
pub struct PathCommandSurface {
    layers: Vec<PathLayer>,
    path: String,
    state: PaintState,
    stack: Vec<PaintState>,
    liveness: Box<dyn Fn() -> bool>,
}

impl Default for PathCommandSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PathCommandSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathCommandSurface")
            .field("layers", &self.layers)
            .field("path", &self.path)
            .field("state", &self.state)
            .field("stack", &self.stack)
            .finish_non_exhaustive()
    }
}

impl PathCommandSurface {
    /// A surface that is always live.
    pub fn new() -> Self {
        Self::with_liveness(|| true)
    }

    /// A surface whose liveness is decided by `liveness`.
    pub fn with_liveness(liveness: impl Fn() -> bool + 'static) -> Self {
        Self {
            layers: Vec::new(),
            path: String::new(),
            state: PaintState::default(),
            stack: Vec::new(),
            liveness: Box::new(liveness),
        }
    }

    /// A surface that lives as long as the component behind `handle`.
    pub fn bound_to<C: slint::ComponentHandle + 'static>(handle: slint::Weak<C>) -> Self {
        Self::with_liveness(move || handle.upgrade().is_some())
    }

    /// Layers painted since the last reset, bottom first.
    pub fn layers(&self) -> &[PathLayer] {
        &self.layers
    }

    pub fn take_layers(&mut self) -> Vec<PathLayer> {
        std::mem::take(&mut self.layers)
    }

    fn check(&self) -> Result<(), SurfaceError> {
        if (self.liveness)() {
            Ok(())
        } else {
            Err(SurfaceError::Lost)
        }
    }

    fn push_command(&mut self, command: std::fmt::Arguments<'_>) -> Result<(), SurfaceError> {
        self.check()?;
        if !self.path.is_empty() {
            self.path.push(' ');
        }
        self.path.push_str(&command.to_string());
        Ok(())
    }

    fn current_commands(&self) -> SharedString {
        SharedString::from(self.path.as_str())
    }
}

impl DrawingSurface for PathCommandSurface {
    fn is_live(&self) -> bool {
        (self.liveness)()
    }

    fn reset(&mut self) -> Result<(), SurfaceError> {
        self.check()?;
        self.layers.clear();
        self.path.clear();
        self.state = PaintState::default();
        self.stack.clear();
        Ok(())
    }

    fn save(&mut self) -> Result<(), SurfaceError> {
        self.check()?;
        self.stack.push(self.state.clone());
        Ok(())
    }

    fn restore(&mut self) -> Result<(), SurfaceError> {
        self.check()?;
        // Unbalanced restore is a no-op, as on a canvas
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
        Ok(())
    }

    fn set_line_width(&mut self, width: f32) -> Result<(), SurfaceError> {
        self.check()?;
        self.state.line_width = width;
        Ok(())
    }

    fn set_stroke_color(&mut self, color: Color) -> Result<(), SurfaceError> {
        self.check()?;
        self.state.stroke = color;
        Ok(())
    }

    fn set_fill_color(&mut self, color: Color) -> Result<(), SurfaceError> {
        self.check()?;
        self.state.fill = color;
        Ok(())
    }

    fn set_shadow(&mut self, color: Color, blur: f32) -> Result<(), SurfaceError> {
        self.check()?;
        self.state.glow = Some(Glow { color, blur });
        Ok(())
    }

    fn set_line_dash(&mut self, pattern: &[f32]) -> Result<(), SurfaceError> {
        self.check()?;
        self.state.dash = pattern.to_vec();
        Ok(())
    }

    fn begin_path(&mut self) -> Result<(), SurfaceError> {
        self.check()?;
        self.path.clear();
        Ok(())
    }

    fn move_to(&mut self, p: Point) -> Result<(), SurfaceError> {
        self.push_command(format_args!("M {} {}", p.x, p.y))
    }

    fn line_to(&mut self, p: Point) -> Result<(), SurfaceError> {
        self.push_command(format_args!("L {} {}", p.x, p.y))
    }

    fn cubic_to(&mut self, cp1: Point, cp2: Point, end: Point) -> Result<(), SurfaceError> {
        self.push_command(format_args!(
            "C {} {} {} {} {} {}",
            cp1.x, cp1.y, cp2.x, cp2.y, end.x, end.y
        ))
    }

    fn fill(&mut self) -> Result<(), SurfaceError> {
        self.check()?;
        self.layers.push(PathLayer {
            commands: self.current_commands(),
            stroke: None,
            fill: Some(self.state.fill),
            line_width: self.state.line_width,
            dash: self.state.dash.clone(),
            glow: self.state.glow,
        });
        Ok(())
    }

    fn stroke(&mut self) -> Result<(), SurfaceError> {
        self.check()?;
        let commands = self.current_commands();

        // Fill then stroke of the same path is one layer
        if let Some(last) = self.layers.last_mut() {
            if last.stroke.is_none() && last.commands == commands {
                last.stroke = Some(self.state.stroke);
                last.line_width = self.state.line_width;
                last.dash = self.state.dash.clone();
                return Ok(());
            }
        }

        self.layers.push(PathLayer {
            commands,
            stroke: Some(self.state.stroke),
            fill: None,
            line_width: self.state.line_width,
            dash: self.state.dash.clone(),
            glow: self.state.glow,
        });
        Ok(())
    }
}
