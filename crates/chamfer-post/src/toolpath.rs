//! Lathe toolpath for a single chamfer pass.

use chamfer_kernel::ChamferResult;
use serde::{Deserialize, Serialize};

use crate::post::format_trimmed;
use crate::PostSettings;

/// One block of a lathe program. X values are diameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LatheSegment {
    /// Operator comment.
    Comment(String),
    /// Rapid positioning (G00).
    Rapid {
        /// Target diameter (mm).
        x: f64,
        /// Target Z (mm).
        z: f64,
    },
    /// Linear feed move (G01). Absent axes keep their position.
    Linear {
        /// Target diameter (mm).
        x: Option<f64>,
        /// Target Z (mm).
        z: Option<f64>,
        /// Feed per revolution (mm/rev).
        feed: Option<f64>,
    },
}

/// An ordered list of lathe blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatheToolpath {
    /// Blocks in execution order.
    pub segments: Vec<LatheSegment>,
}

impl LatheToolpath {
    /// Create an empty toolpath.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block.
    pub fn push(&mut self, seg: LatheSegment) {
        self.segments.push(seg);
    }
}

/// Build the chamfer pass for a solved chamfer.
///
/// The tool rapids to a clearance point outside the larger diameter, feeds
/// to the face, moves out to `D` and then cuts the cone down to the
/// programmed `D1` at `-L1`.
pub fn chamfer_toolpath(result: &ChamferResult, settings: &PostSettings) -> LatheToolpath {
    let spec = &result.spec;
    let x_end = result.programmed_d1();
    let z_end = -result.programmed_l1();
    let z_face = result
        .correction
        .map(|c| (-c.delta_z).max(0.0))
        .unwrap_or(0.0);

    let mut path = LatheToolpath::new();

    let mode = match result.tool_radius {
        Some(r) if result.is_compensated() => format!(
            "CHAMFER WITH TOOL NOSE RADIUS COMPENSATION R={} mm",
            format_trimmed(r)
        ),
        _ => "CHAMFER WITHOUT TOOL NOSE RADIUS COMPENSATION".to_string(),
    };
    path.push(LatheSegment::Comment(mode));
    path.push(LatheSegment::Comment(format!(
        "D={:.3} D1={:.3} ANGLE={:.1} {} L1={:.3}",
        spec.d,
        spec.d1,
        spec.angle,
        spec.convention.to_string().to_uppercase(),
        spec.l1
    )));

    path.push(LatheSegment::Rapid {
        x: spec.d.max(x_end) + settings.clearance,
        z: settings.approach_z,
    });
    path.push(LatheSegment::Linear {
        x: None,
        z: Some(z_face),
        feed: Some(settings.feed),
    });
    path.push(LatheSegment::Linear {
        x: Some(spec.d),
        z: Some(z_face),
        feed: None,
    });
    path.push(LatheSegment::Linear {
        x: Some(x_end),
        z: Some(z_end),
        feed: None,
    });

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chamfer_kernel::{calculate, ChamferInput, ChamferSettings, DiameterOrdering};

    fn last_move(path: &LatheToolpath) -> (f64, f64) {
        match path.segments.last() {
            Some(LatheSegment::Linear {
                x: Some(x),
                z: Some(z),
                ..
            }) => (*x, *z),
            other => panic!("expected a full linear move, got {:?}", other),
        }
    }

    #[test]
    fn test_uncompensated_path() {
        let input = ChamferInput::new(Some(20.0), None, Some(45.0), Some(2.0));
        let result = calculate(&input, &ChamferSettings::default()).unwrap();
        let path = chamfer_toolpath(&result, &PostSettings::default());

        assert_eq!(path.segments.len(), 6);
        assert!(matches!(path.segments[0], LatheSegment::Comment(_)));
        assert!(matches!(path.segments[1], LatheSegment::Comment(_)));
        assert_eq!(
            path.segments[2],
            LatheSegment::Rapid { x: 25.0, z: 2.0 }
        );
        let (x, z) = last_move(&path);
        assert_relative_eq!(x, 16.0, epsilon = 1e-12);
        assert_relative_eq!(z, -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_compensated_path_ends_at_corrected_point() {
        let input = ChamferInput::new(Some(20.0), None, Some(45.0), Some(2.0)).with_tool_radius(0.4);
        let result = calculate(&input, &ChamferSettings::default()).unwrap();
        let path = chamfer_toolpath(&result, &PostSettings::default());

        let (x, z) = last_move(&path);
        assert_relative_eq!(x, result.programmed_d1(), epsilon = 1e-12);
        assert_relative_eq!(z, -result.programmed_l1(), epsilon = 1e-12);
        match &path.segments[0] {
            LatheSegment::Comment(text) => assert!(text.contains("R=0.4 mm")),
            other => panic!("expected comment, got {:?}", other),
        }
    }

    #[test]
    fn test_clearance_clears_larger_diameter() {
        let settings = ChamferSettings {
            ordering: DiameterOrdering::Distinct,
            ..Default::default()
        };
        let input = ChamferInput::new(Some(16.0), Some(20.0), None, Some(2.0));
        let result = calculate(&input, &settings).unwrap();
        let path = chamfer_toolpath(&result, &PostSettings::default());
        assert_eq!(path.segments[2], LatheSegment::Rapid { x: 25.0, z: 2.0 });
    }
}
