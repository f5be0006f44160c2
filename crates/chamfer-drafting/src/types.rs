//! Core types for the 2D chamfer schematic.

use serde::{Deserialize, Serialize};

/// A 2D drawing point in millimetres, Y up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate (along the part axis).
    pub x: f64,
    /// Y coordinate (radial).
    pub y: f64,
}

impl Point2D {
    /// Create a new 2D point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Distance to another point.
    pub fn distance(&self, other: &Self) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Midpoint between this point and another.
    pub fn midpoint(&self, other: &Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Point offset by `len` along the direction `angle_deg` (CCW from +X).
    pub fn polar(&self, angle_deg: f64, len: f64) -> Self {
        let a = angle_deg.to_radians();
        Self::new(self.x + len * a.cos(), self.y + len * a.sin())
    }
}

impl Default for Point2D {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// Drawing layer. Each layer maps to one DXF layer and one SVG class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// Shoulder and stub outline.
    Body,
    /// The conical chamfer face.
    Chamfer,
    /// Axis centerline (dashed).
    Center,
    /// Dimension lines, arrowheads and labels.
    Dim,
    /// Angle arc, reference line and label.
    Angle,
}

impl Layer {
    /// All layers in drawing order.
    pub const ALL: [Layer; 5] = [
        Layer::Body,
        Layer::Chamfer,
        Layer::Center,
        Layer::Dim,
        Layer::Angle,
    ];

    /// Layer name as written to DXF and SVG.
    pub fn name(&self) -> &'static str {
        match self {
            Layer::Body => "BODY",
            Layer::Chamfer => "CHAMFER",
            Layer::Center => "CENTER",
            Layer::Dim => "DIM",
            Layer::Angle => "ANGLE",
        }
    }

    /// AutoCAD color index.
    pub fn aci_color(&self) -> u8 {
        match self {
            Layer::Body => 7,
            Layer::Chamfer => 1,
            Layer::Center => 8,
            Layer::Dim => 5,
            Layer::Angle => 3,
        }
    }

    /// Whether the layer draws with the dashed linetype.
    pub fn is_dashed(&self) -> bool {
        matches!(self, Layer::Center)
    }
}

/// A drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    /// Straight segment.
    Line {
        /// Start point.
        start: Point2D,
        /// End point.
        end: Point2D,
        /// Layer.
        layer: Layer,
    },
    /// Open or closed polyline.
    Polyline {
        /// Vertices in order.
        points: Vec<Point2D>,
        /// Whether the last vertex connects back to the first.
        closed: bool,
        /// Layer.
        layer: Layer,
    },
    /// Circular arc, counter-clockwise from `start_angle` to `end_angle` (degrees).
    Arc {
        /// Arc center.
        center: Point2D,
        /// Arc radius.
        radius: f64,
        /// Start angle in degrees.
        start_angle: f64,
        /// End angle in degrees.
        end_angle: f64,
        /// Layer.
        layer: Layer,
    },
    /// Single-line text, centered horizontally on `position`.
    Text {
        /// Anchor point (baseline center).
        position: Point2D,
        /// Text content.
        text: String,
        /// Cap height in millimetres.
        height: f64,
        /// Layer.
        layer: Layer,
    },
}

impl Entity {
    /// Layer of this entity.
    pub fn layer(&self) -> Layer {
        match self {
            Entity::Line { layer, .. }
            | Entity::Polyline { layer, .. }
            | Entity::Arc { layer, .. }
            | Entity::Text { layer, .. } => *layer,
        }
    }

    /// Axis-aligned bounds `(min, max)`. Arcs use their full circle and
    /// text uses an estimated width.
    pub fn bounds(&self) -> (Point2D, Point2D) {
        match self {
            Entity::Line { start, end, .. } => (
                Point2D::new(start.x.min(end.x), start.y.min(end.y)),
                Point2D::new(start.x.max(end.x), start.y.max(end.y)),
            ),
            Entity::Polyline { points, .. } => {
                let mut min = Point2D::new(f64::INFINITY, f64::INFINITY);
                let mut max = Point2D::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
                for p in points {
                    min.x = min.x.min(p.x);
                    min.y = min.y.min(p.y);
                    max.x = max.x.max(p.x);
                    max.y = max.y.max(p.y);
                }
                (min, max)
            }
            Entity::Arc { center, radius, .. } => (
                Point2D::new(center.x - radius, center.y - radius),
                Point2D::new(center.x + radius, center.y + radius),
            ),
            Entity::Text {
                position,
                text,
                height,
                ..
            } => {
                let half_width = 0.3 * height * text.chars().count() as f64;
                (
                    Point2D::new(position.x - half_width, position.y),
                    Point2D::new(position.x + half_width, position.y + height),
                )
            }
        }
    }
}
