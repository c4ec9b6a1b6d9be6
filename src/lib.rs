//! # Slint Node Link
//!
//! Link geometry for visual graph editors: routing, hit-testing and painting
//! of the connections between node ports.
//!
//! ## Features
//!
//! - **Three link shapes** - Bezier curves, orthogonal L-lines and straight lines
//! - **Port-aware routing** - Links leave and enter ports on the side they sit on
//! - **Hit-testing** - Pick links at screen coordinates, per shape
//! - **Defensive painting** - Paint onto any [`DrawingSurface`]; a surface that
//!   dies mid-paint stops the paint quietly
//! - **Slint output** - [`PathCommandSurface`] turns paint into `Path` commands
//!
//! ## Quick Start
//!
//! ```ignore
//! use slint_node_link::*;
//!
//! let start = Point::new(250.0, 150.0);
//! let end = Point::new(400.0, 250.0);
//! let points = calculate_control_points(
//!     start, end, Direction::Forward, PathType::LLine, PortSide::Right, PortSide::Left,
//! );
//!
//! if is_point_on_link(mouse_x, mouse_y, 5.0, &points, PathType::LLine) {
//!     // clicked the link
//! }
//!
//! let mut surface = PathCommandSurface::new();
//! create_link(
//!     &mut surface, start, &points, false, color, Direction::Forward,
//!     LineStyle::Solid, PathType::LLine, 2.0, 10.0, PortSide::Right, PortSide::Left,
//! );
//! ```
//!
//! ## Modules
//!
//! - [`control_points`] - Control points per link shape
//! - [`cubic`] - Real roots of cubic polynomials
//! - [`hit_test`] - Point-on-link tests and link picking
//! - [`surface`] / [`render`] - Drawing surface abstraction and link painting
//! - [`path_surface`] - Slint path output
//! - [`links`] - Link descriptors and a per-frame link scene

pub mod control_points;
pub mod cubic;
pub mod geometry;
pub mod hit_test;
pub mod links;
pub mod path;
pub mod path_surface;
pub mod render;
pub mod surface;

// Re-export types and functions
pub use control_points::calculate_control_points;
pub use cubic::solve_cubic;
pub use geometry::{Direction, LineStyle, PathType, Point, PortSide};
pub use hit_test::{find_link_at, is_point_on_curve, is_point_on_link, LinkGeometry};
pub use links::{LinkDescriptor, LinkLayers, LinkScene};
pub use path::{polyline_commands, CubicBezier};
pub use path_surface::{Glow, PathCommandSurface, PathLayer};
pub use render::{create_link, draw_arrow, PaintSession};
pub use surface::{DrawCommand, DrawingSurface, RecordingSurface, SurfaceError};
