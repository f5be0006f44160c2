//! Schematic construction from a solved chamfer.
//!
//! The part is drawn as a side profile: a shoulder of diameter `D`, the
//! conical chamfer, then a short stub at the programmed `D1`. The axis runs
//! along +X with the chamfer start at `x = shoulder_length`.

use chamfer_kernel::{AngleConvention, ChamferError, ChamferResult};
use serde::{Deserialize, Serialize};

use crate::types::{Entity, Layer, Point2D};

/// Drawing sizes in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchematicSettings {
    /// Length of the shoulder drawn before the chamfer.
    pub shoulder_length: f64,
    /// Length of the stub drawn after the chamfer.
    pub stub_length: f64,
    /// Distance from the outline to each dimension line.
    pub dimension_gap: f64,
    /// Arrowhead length.
    pub arrow_size: f64,
    /// Label text height.
    pub text_height: f64,
}

impl Default for SchematicSettings {
    fn default() -> Self {
        Self {
            shoulder_length: 10.0,
            stub_length: 8.0,
            dimension_gap: 4.0,
            arrow_size: 1.0,
            text_height: 1.8,
        }
    }
}

impl SchematicSettings {
    /// Validate settings.
    pub fn validate(&self) -> chamfer_kernel::Result<()> {
        let sizes = [
            ("shoulder_length", self.shoulder_length),
            ("stub_length", self.stub_length),
            ("dimension_gap", self.dimension_gap),
            ("arrow_size", self.arrow_size),
            ("text_height", self.text_height),
        ];
        for (name, value) in sizes {
            if value <= 0.0 || !value.is_finite() {
                return Err(ChamferError::InvalidSettings(format!(
                    "{name} must be positive"
                )));
            }
        }
        Ok(())
    }
}

/// A chamfer schematic: an ordered list of layered entities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schematic {
    /// Entities in drawing order.
    pub entities: Vec<Entity>,
}

impl Schematic {
    /// Create an empty schematic.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the schematic for a solved chamfer.
    ///
    /// The chamfer face uses the programmed `D1`/`L1`, so a compensated
    /// result is drawn at its corrected end point.
    pub fn from_result(result: &ChamferResult, settings: &SchematicSettings) -> Self {
        let spec = &result.spec;
        let r0 = spec.d / 2.0;
        let r1 = result.programmed_d1() / 2.0;
        let l1 = result.programmed_l1();

        let a = settings.shoulder_length;
        let b = a + l1;
        let end = b + settings.stub_length;
        let gap = settings.dimension_gap;
        let th = settings.text_height;

        let mut s = Self::new();

        // Outline
        s.rectangle(0.0, a, r0, Layer::Body);
        s.push(Entity::Polyline {
            points: vec![
                Point2D::new(a, r0),
                Point2D::new(b, r1),
                Point2D::new(b, -r1),
                Point2D::new(a, -r0),
            ],
            closed: true,
            layer: Layer::Chamfer,
        });
        s.rectangle(b, end, r1, Layer::Body);

        let overshoot = gap / 2.0;
        s.push(Entity::Line {
            start: Point2D::new(-overshoot, 0.0),
            end: Point2D::new(end + overshoot, 0.0),
            layer: Layer::Center,
        });

        // L1 along the top
        let top = r0.max(r1) + gap;
        s.extension(Point2D::new(a, r0), Point2D::new(a, top + gap * 0.25));
        s.extension(Point2D::new(b, r1), Point2D::new(b, top + gap * 0.25));
        s.dimension(
            Point2D::new(a, top),
            Point2D::new(b, top),
            format!("{:.3}", l1),
            Point2D::new(a, top + th * 0.4).midpoint(&Point2D::new(b, top + th * 0.4)),
            settings,
        );

        // D to the left of the shoulder
        let xd = -gap;
        s.extension(Point2D::new(0.0, r0), Point2D::new(xd - gap * 0.25, r0));
        s.extension(Point2D::new(0.0, -r0), Point2D::new(xd - gap * 0.25, -r0));
        s.dimension(
            Point2D::new(xd, -r0),
            Point2D::new(xd, r0),
            format!("Ø{:.3}", spec.d),
            Point2D::new(xd - th * 0.4 - th * 2.0, -th / 2.0),
            settings,
        );

        // D1 to the right of the stub
        let xd1 = end + gap;
        s.extension(Point2D::new(end, r1), Point2D::new(xd1 + gap * 0.25, r1));
        s.extension(Point2D::new(end, -r1), Point2D::new(xd1 + gap * 0.25, -r1));
        s.dimension(
            Point2D::new(xd1, -r1),
            Point2D::new(xd1, r1),
            format!("Ø{:.3}", result.programmed_d1()),
            Point2D::new(xd1 + th * 0.4 + th * 2.0, -th / 2.0),
            settings,
        );

        s.angle_mark(Point2D::new(a, r0), Point2D::new(b, r1), spec.angle, spec.convention, settings);

        s
    }

    /// Append an entity.
    pub fn push(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Entities on one layer.
    pub fn on_layer(&self, layer: Layer) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.layer() == layer)
    }

    /// Number of entities on one layer.
    pub fn count(&self, layer: Layer) -> usize {
        self.on_layer(layer).count()
    }

    /// Text of every label, in drawing order.
    pub fn labels(&self) -> Vec<&str> {
        self.entities
            .iter()
            .filter_map(|e| match e {
                Entity::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Bounds `(min, max)` over all entities, or `None` if empty.
    pub fn bounds(&self) -> Option<(Point2D, Point2D)> {
        self.entities.iter().map(Entity::bounds).reduce(|(amin, amax), (bmin, bmax)| {
            (
                Point2D::new(amin.x.min(bmin.x), amin.y.min(bmin.y)),
                Point2D::new(amax.x.max(bmax.x), amax.y.max(bmax.y)),
            )
        })
    }

    fn rectangle(&mut self, x0: f64, x1: f64, r: f64, layer: Layer) {
        self.push(Entity::Polyline {
            points: vec![
                Point2D::new(x0, -r),
                Point2D::new(x1, -r),
                Point2D::new(x1, r),
                Point2D::new(x0, r),
            ],
            closed: true,
            layer,
        });
    }

    fn extension(&mut self, from: Point2D, to: Point2D) {
        self.push(Entity::Line {
            start: from,
            end: to,
            layer: Layer::Dim,
        });
    }

    fn dimension(
        &mut self,
        p: Point2D,
        q: Point2D,
        label: String,
        label_at: Point2D,
        settings: &SchematicSettings,
    ) {
        self.push(Entity::Line {
            start: p,
            end: q,
            layer: Layer::Dim,
        });
        self.push(arrowhead(p, q, settings.arrow_size));
        self.push(arrowhead(q, p, settings.arrow_size));
        self.push(Entity::Text {
            position: label_at,
            text: label,
            height: settings.text_height,
            layer: Layer::Dim,
        });
    }

    /// Arc between the reference direction and the chamfer line at `vertex`.
    ///
    /// The reference is the axis direction for a face angle and the radial
    /// direction for an axis angle, so the arc spans the angle as entered.
    fn angle_mark(
        &mut self,
        vertex: Point2D,
        far: Point2D,
        angle: f64,
        convention: AngleConvention,
        settings: &SchematicSettings,
    ) {
        let chamfer_dir = (far.y - vertex.y).atan2(far.x - vertex.x).to_degrees();
        let reference_dir = match convention {
            AngleConvention::FaceAngle => 0.0,
            AngleConvention::AxisAngle => 90.0_f64.copysign(chamfer_dir),
        };
        let radius = (0.6 * vertex.distance(&far)).max(2.0 * settings.arrow_size);

        self.push(Entity::Line {
            start: vertex,
            end: vertex.polar(reference_dir, radius * 1.3),
            layer: Layer::Angle,
        });
        self.push(Entity::Arc {
            center: vertex,
            radius,
            start_angle: reference_dir.min(chamfer_dir),
            end_angle: reference_dir.max(chamfer_dir),
            layer: Layer::Angle,
        });

        let bisector = (reference_dir + chamfer_dir) / 2.0;
        let mut label_at = vertex.polar(bisector, radius + settings.text_height * 1.5);
        label_at.y -= settings.text_height / 2.0;
        self.push(Entity::Text {
            position: label_at,
            text: format!("{:.1}°", angle),
            height: settings.text_height,
            layer: Layer::Angle,
        });
    }
}

/// Filled triangular arrowhead with its tip at `tip`, pointing away from `tail`.
fn arrowhead(tip: Point2D, tail: Point2D, size: f64) -> Entity {
    let len = tip.distance(&tail).max(f64::EPSILON);
    let ux = (tip.x - tail.x) / len;
    let uy = (tip.y - tail.y) / len;
    let base = Point2D::new(tip.x - ux * size, tip.y - uy * size);
    let half = size / 3.0;
    Entity::Polyline {
        points: vec![
            tip,
            Point2D::new(base.x - uy * half, base.y + ux * half),
            Point2D::new(base.x + uy * half, base.y - ux * half),
        ],
        closed: true,
        layer: Layer::Dim,
    }
}
