//! SVG rendering of a schematic.

use crate::schematic::Schematic;
use crate::types::{Entity, Layer, Point2D};

/// Space around the drawing in millimetres.
const MARGIN: f64 = 3.0;

const STYLE: &str = "\
  .BODY { stroke: #222; stroke-width: 0.35; fill: #eee; }\n\
  .CHAMFER { stroke: #c62828; stroke-width: 0.5; fill: #ffcdd2; }\n\
  .CENTER { stroke: #777; stroke-width: 0.18; fill: none; stroke-dasharray: 4 1 1 1; }\n\
  .DIM { stroke: #1565c0; stroke-width: 0.18; fill: none; }\n\
  polygon.DIM { fill: #1565c0; }\n\
  .ANGLE { stroke: #2e7d32; stroke-width: 0.25; fill: none; }\n\
  text { stroke: none; font-family: sans-serif; text-anchor: middle; }\n\
  text.DIM { fill: #1565c0; }\n\
  text.ANGLE { fill: #2e7d32; }\n";

/// Maps drawing coordinates (Y up) to SVG user units (Y down).
struct Frame {
    min_x: f64,
    max_y: f64,
}

impl Frame {
    fn map(&self, p: &Point2D) -> (f64, f64) {
        (p.x - self.min_x + MARGIN, self.max_y - p.y + MARGIN)
    }
}

impl Schematic {
    /// Render the schematic as a standalone SVG document sized in millimetres.
    pub fn to_svg(&self) -> String {
        let (min, max) = self
            .bounds()
            .unwrap_or((Point2D::ORIGIN, Point2D::new(1.0, 1.0)));
        let width = max.x - min.x + 2.0 * MARGIN;
        let height = max.y - min.y + 2.0 * MARGIN;
        let frame = Frame {
            min_x: min.x,
            max_y: max.y,
        };

        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.2}mm\" height=\"{height:.2}mm\" viewBox=\"0 0 {width:.2} {height:.2}\">\n"
        );
        svg.push_str("<style>\n");
        svg.push_str(STYLE);
        svg.push_str("</style>\n");

        for layer in Layer::ALL {
            svg.push_str(&format!("<g id=\"{}\">\n", layer.name()));
            for entity in self.on_layer(layer) {
                svg.push_str(&render_entity(entity, &frame));
            }
            svg.push_str("</g>\n");
        }

        svg.push_str("</svg>\n");
        svg
    }
}

fn render_entity(entity: &Entity, frame: &Frame) -> String {
    let class = entity.layer().name();
    match entity {
        Entity::Line { start, end, .. } => {
            let (x1, y1) = frame.map(start);
            let (x2, y2) = frame.map(end);
            format!(
                "  <line class=\"{class}\" x1=\"{x1:.3}\" y1=\"{y1:.3}\" x2=\"{x2:.3}\" y2=\"{y2:.3}\"/>\n"
            )
        }
        Entity::Polyline { points, closed, .. } => {
            let pts: Vec<String> = points
                .iter()
                .map(|p| {
                    let (x, y) = frame.map(p);
                    format!("{x:.3},{y:.3}")
                })
                .collect();
            let tag = if *closed { "polygon" } else { "polyline" };
            format!("  <{tag} class=\"{class}\" points=\"{}\"/>\n", pts.join(" "))
        }
        Entity::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            ..
        } => {
            let (sx, sy) = frame.map(&center.polar(*start_angle, *radius));
            let (ex, ey) = frame.map(&center.polar(*end_angle, *radius));
            let large = if (end_angle - start_angle).rem_euclid(360.0) > 180.0 {
                1
            } else {
                0
            };
            // Counter-clockwise with Y up is sweep-flag 0 once Y is flipped.
            format!(
                "  <path class=\"{class}\" d=\"M{sx:.3},{sy:.3} A{radius:.3},{radius:.3} 0 {large} 0 {ex:.3},{ey:.3}\"/>\n"
            )
        }
        Entity::Text {
            position,
            text,
            height,
            ..
        } => {
            let (x, y) = frame.map(position);
            format!(
                "  <text class=\"{class}\" x=\"{x:.3}\" y=\"{y:.3}\" font-size=\"{height:.2}\">{}</text>\n",
                escape(text)
            )
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
