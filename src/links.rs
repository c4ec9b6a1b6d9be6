//! Link descriptors and per-frame link painting.
//!
//! [`LinkDescriptor`] bundles everything needed to route, pick and paint one
//! link. [`LinkScene`] keeps a set of them, repaints them into Slint path
//! layers and answers pick queries.
//!
//! # Example
//!
//! ```ignore
//! use slint_node_link::{Direction, LinkDescriptor, LinkScene, PathType, Point, PortSide};
//! use slint::Color;
//!
//! let color = Color::from_rgb_u8(100, 180, 255);
//! let mut scene = LinkScene::new();
//! scene.add(
//!     LinkDescriptor::new(1, Point::new(250.0, 150.0), Point::new(400.0, 250.0), color)
//!         .with_sides(PortSide::Right, PortSide::Left)
//!         .with_path_type(PathType::LLine)
//!         .with_direction(Direction::Forward),
//! );
//!
//! // Bind once - auto-syncs on every update
//! let model = Rc::new(VecModel::<LinkLayer>::default());
//! scene.bind_model(model.clone(), |id, layer| LinkLayer {
//!     id,
//!     commands: layer.commands.clone(),
//!     stroke: layer.stroke.unwrap_or_default().into(),
//!     fill: layer.fill.unwrap_or_default().into(),
//!     width: layer.line_width,
//! });
//! window.set_link_layers(ModelRc::from(model));
//!
//! // After node moves or selection changes
//! scene.update();
//! ```

use crate::control_points::calculate_control_points;
use crate::geometry::{Direction, LineStyle, PathType, Point, PortSide};
use crate::hit_test::{find_link_at, is_point_on_link, LinkGeometry};
use crate::path::{polyline_commands, CubicBezier};
use crate::path_surface::{PathCommandSurface, PathLayer};
use crate::render::create_link;
use crate::surface::DrawingSurface;
use slint::{Color, Model, SharedString, VecModel};
use std::rc::Rc;

/// Everything needed to route and paint one link.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkDescriptor {
    pub id: i32,
    pub start: Point,
    pub end: Point,
    /// Port side at `start`
    pub input_side: PortSide,
    /// Port side at `end`
    pub output_side: PortSide,
    pub path_type: PathType,
    pub direction: Direction,
    pub line_style: LineStyle,
    pub color: Color,
    pub line_width: f32,
    pub arrow_head_length: f32,
    pub selected: bool,
}

impl LinkDescriptor {
    /// Create a forward bezier link from a right-side port to a left-side port.
    pub fn new(id: i32, start: Point, end: Point, color: Color) -> Self {
        Self {
            id,
            start,
            end,
            input_side: PortSide::Right,
            output_side: PortSide::Left,
            path_type: PathType::Bezier,
            direction: Direction::Forward,
            line_style: LineStyle::Solid,
            color,
            line_width: 2.0,
            arrow_head_length: 10.0,
            selected: false,
        }
    }

    /// Create a link with default white color.
    pub fn with_default_color(id: i32, start: Point, end: Point) -> Self {
        Self::new(id, start, end, Color::from_rgb_u8(255, 255, 255))
    }

    pub fn with_sides(mut self, input_side: PortSide, output_side: PortSide) -> Self {
        self.input_side = input_side;
        self.output_side = output_side;
        self
    }

    pub fn with_path_type(mut self, path_type: PathType) -> Self {
        self.path_type = path_type;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_line_style(mut self, line_style: LineStyle) -> Self {
        self.line_style = line_style;
        self
    }

    pub fn with_line_width(mut self, line_width: f32) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn with_arrow_head_length(mut self, arrow_head_length: f32) -> Self {
        self.arrow_head_length = arrow_head_length;
        self
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Control points of this link, computed fresh on every call.
    pub fn control_points(&self) -> Vec<Point> {
        calculate_control_points(
            self.start,
            self.end,
            self.direction,
            self.path_type,
            self.input_side,
            self.output_side,
        )
    }

    /// Whether `(x, y)` lies on this link within `tolerance`.
    pub fn contains_point(&self, x: f32, y: f32, tolerance: f32) -> bool {
        is_point_on_link(x, y, tolerance, &self.control_points(), self.path_type)
    }

    /// SVG path commands of the link body alone, for a plain Slint `Path`.
    pub fn path_commands(&self) -> SharedString {
        let points = self.control_points();
        let commands = match self.path_type {
            PathType::Bezier => CubicBezier::from_control_points(&points)
                .map(|curve| curve.to_path_commands())
                .unwrap_or_default(),
            PathType::LLine | PathType::Straight => polyline_commands(&points),
        };
        commands.into()
    }

    /// Paint this link onto `surface`.
    pub fn paint<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        create_link(
            surface,
            self.start,
            &self.control_points(),
            self.selected,
            self.color,
            self.direction,
            self.line_style,
            self.path_type,
            self.line_width,
            self.arrow_head_length,
            self.input_side,
            self.output_side,
        );
    }
}

impl LinkGeometry for &LinkDescriptor {
    fn id(&self) -> i32 {
        self.id
    }

    fn path_type(&self) -> PathType {
        self.path_type
    }

    fn control_points(&self) -> Vec<Point> {
        LinkDescriptor::control_points(self)
    }
}

/// Painted layers of one link.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkLayers {
    pub id: i32,
    pub layers: Vec<PathLayer>,
}

/// Internal trait for auto-syncing to Slint models.
trait ModelSyncer {
    fn sync(&self, links: &[LinkLayers]);
}

/// Concrete implementation of ModelSyncer for a specific row type.
struct ConcreteModelSyncer<P, F> {
    model: Rc<VecModel<P>>,
    constructor: F,
}

impl<P, F> ModelSyncer for ConcreteModelSyncer<P, F>
where
    P: Clone + 'static,
    F: Fn(i32, &PathLayer) -> P,
{
    fn sync(&self, links: &[LinkLayers]) {
        let rows = links
            .iter()
            .flat_map(|link| link.layers.iter().map(move |layer| (link.id, layer)));

        // Update existing rows or add new ones
        let mut count = 0;
        for (i, (id, layer)) in rows.enumerate() {
            let item = (self.constructor)(id, layer);
            if i < self.model.row_count() {
                self.model.set_row_data(i, item);
            } else {
                self.model.push(item);
            }
            count = i + 1;
        }
        // Remove excess rows
        while self.model.row_count() > count {
            self.model.remove(self.model.row_count() - 1);
        }
    }
}

/// Keeps a set of links and their painted layers.
///
/// Every link is painted onto its own canvas: the surface is reset before each
/// link and its layers collected afterwards.
pub struct LinkScene {
    links: Vec<LinkDescriptor>,
    painted: Vec<LinkLayers>,
    surface: PathCommandSurface,
    syncer: Option<Box<dyn ModelSyncer>>,
}

impl Default for LinkScene {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LinkScene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkScene")
            .field("links", &self.links)
            .field("painted", &self.painted)
            .field("bound", &self.syncer.is_some())
            .finish_non_exhaustive()
    }
}

impl LinkScene {
    /// Create a scene painting onto an always-live surface.
    pub fn new() -> Self {
        Self::with_surface(PathCommandSurface::new())
    }

    /// Create a scene painting onto `surface`, e.g. one from
    /// [`PathCommandSurface::bound_to`].
    pub fn with_surface(surface: PathCommandSurface) -> Self {
        Self {
            links: Vec::new(),
            painted: Vec::new(),
            surface,
            syncer: None,
        }
    }

    /// Bind to a Slint model for automatic synchronization.
    ///
    /// After binding, every call to [`update`](Self::update) rewrites the model
    /// with one row per painted layer, in paint order.
    ///
    /// # Arguments
    ///
    /// * `model` - The VecModel to sync to
    /// * `constructor` - Function to create rows from (link id, layer)
    pub fn bind_model<P, F>(&mut self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(i32, &PathLayer) -> P + 'static,
    {
        self.syncer = Some(Box::new(ConcreteModelSyncer { model, constructor }));
    }

    /// Add a link. Its layers are produced on the next [`update`](Self::update).
    pub fn add(&mut self, link: LinkDescriptor) {
        self.links.push(link);
    }

    /// Remove a link by ID.
    ///
    /// Returns `true` if a link was removed.
    pub fn remove(&mut self, id: i32) -> bool {
        let len_before = self.links.len();
        self.links.retain(|link| link.id != id);
        self.links.len() != len_before
    }

    /// Remove all links.
    pub fn clear(&mut self) {
        self.links.clear();
        self.painted.clear();
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn links(&self) -> &[LinkDescriptor] {
        &self.links
    }

    pub fn find(&self, id: i32) -> Option<&LinkDescriptor> {
        self.links.iter().find(|l| l.id == id)
    }

    pub fn find_mut(&mut self, id: i32) -> Option<&mut LinkDescriptor> {
        self.links.iter_mut().find(|l| l.id == id)
    }

    /// Mark exactly one link as selected, or none.
    pub fn select(&mut self, id: Option<i32>) {
        for link in &mut self.links {
            link.selected = Some(link.id) == id;
        }
    }

    /// Layers from the last [`update`](Self::update).
    pub fn painted(&self) -> &[LinkLayers] {
        &self.painted
    }

    /// Repaint every link.
    ///
    /// Stops early if the surface dies; links painted so far are kept.
    pub fn update(&mut self) {
        self.painted.clear();

        for link in &self.links {
            if !self.surface.is_live() {
                tracing::debug!(
                    remaining = self.links.len() - self.painted.len(),
                    "surface lost, link update stopped"
                );
                break;
            }
            link.paint(&mut self.surface);
            self.painted.push(LinkLayers {
                id: link.id,
                layers: self.surface.take_layers(),
            });
        }

        // Auto-sync to bound model if present
        if let Some(syncer) = &self.syncer {
            syncer.sync(&self.painted);
        }
    }

    /// Find the first link passing within `tolerance` of `(x, y)`.
    pub fn link_at(&self, x: f32, y: f32, tolerance: f32) -> Option<i32> {
        find_link_at(x, y, self.links.iter(), tolerance)
    }
}
