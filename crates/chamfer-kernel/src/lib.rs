#![warn(missing_docs)]

//! Conical chamfer geometry for lathe-turned parts.
//!
//! A chamfer between a start diameter `D` and an end diameter `D1` is fully
//! described by any three of `D`, `D1`, the chamfer angle and the axial length
//! `L1`. This crate solves for the fourth and, optionally, corrects the
//! programmed end point for the nose radius of the turning tool.
//!
//! # Example
//!
//! ```
//! use chamfer_kernel::{calculate, ChamferInput, ChamferSettings};
//!
//! // D = 20, 45° from the face, L1 = 2: solve for D1
//! let input = ChamferInput::new(Some(20.0), None, Some(45.0), Some(2.0))
//!     .with_tool_radius(0.4);
//!
//! let result = calculate(&input, &ChamferSettings::default()).unwrap();
//! assert!((result.spec.d1 - 16.0).abs() < 1e-9);
//! assert!(result.programmed_d1() < result.spec.d1);
//! ```

pub mod compensation;
mod error;
pub mod input;
pub mod solver;
mod types;
pub mod validate;

// Re-exports
pub use compensation::{compensate, compensate_with, CompensationStrategy};
pub use error::{ChamferError, Result};
pub use input::parse_number;
pub use solver::solve;
pub use types::{
    AngleConvention, ChamferInput, ChamferResult, ChamferSpec, DiameterOrdering,
    OverconstrainedPolicy, RadiusCorrection, SolvedField,
};
pub use validate::validate;

use serde::{Deserialize, Serialize};

/// Policies applied when validating and solving.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChamferSettings {
    /// Convention the caller's angle is expressed in.
    pub convention: AngleConvention,
    /// Accepted ordering of `D` and `D1`.
    pub ordering: DiameterOrdering,
    /// Nose radius compensation strategy.
    pub compensation: CompensationStrategy,
    /// Behaviour when all four parameters are supplied.
    pub overconstrained: OverconstrainedPolicy,
}

impl Default for ChamferSettings {
    fn default() -> Self {
        Self {
            convention: AngleConvention::FaceAngle,
            ordering: DiameterOrdering::Decreasing,
            compensation: CompensationStrategy::ClosedForm,
            overconstrained: OverconstrainedPolicy::RecomputeD1,
        }
    }
}

impl ChamferSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if let OverconstrainedPolicy::Verify { tolerance } = self.overconstrained {
            if tolerance < 0.0 || !tolerance.is_finite() {
                return Err(ChamferError::InvalidSettings(
                    "overconstrained tolerance must be a finite value >= 0".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Validate, solve and compensate in one step.
///
/// Compensation is applied only when `input.tool_radius` is greater than zero;
/// a zero or negative radius solves without it.
pub fn calculate(input: &ChamferInput, settings: &ChamferSettings) -> Result<ChamferResult> {
    settings.validate()?;
    validate(input, settings)?;

    let spec = solve(input, settings.convention, settings.overconstrained)?;

    let tool_radius = input.tool_radius.filter(|r| *r > 0.0);
    let correction = tool_radius
        .map(|r| compensate_with(settings.compensation, spec.d1, spec.l1, spec.beta(), r));

    tracing::debug!(
        solved = %spec.solved,
        d = spec.d,
        d1 = spec.d1,
        angle = spec.angle,
        l1 = spec.l1,
        compensated = correction.is_some(),
        "chamfer calculated"
    );

    Ok(ChamferResult {
        spec,
        correction,
        tool_radius,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_settings_default() {
        let settings = ChamferSettings::default();
        assert_eq!(settings.convention, AngleConvention::FaceAngle);
        assert_eq!(settings.ordering, DiameterOrdering::Decreasing);
        assert_eq!(settings.compensation, CompensationStrategy::ClosedForm);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_serialization() {
        let settings = ChamferSettings {
            convention: AngleConvention::AxisAngle,
            overconstrained: OverconstrainedPolicy::Verify { tolerance: 0.01 },
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"axis\""));
        assert!(json.contains("\"verify\""));
        let parsed: ChamferSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_settings_partial_json_uses_defaults() {
        let parsed: ChamferSettings = serde_json::from_str(r#"{"ordering":"distinct"}"#).unwrap();
        assert_eq!(parsed.ordering, DiameterOrdering::Distinct);
        assert_eq!(parsed.convention, AngleConvention::FaceAngle);
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let settings = ChamferSettings {
            overconstrained: OverconstrainedPolicy::Verify { tolerance: -1.0 },
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ChamferError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_calculate_without_radius() {
        let input = ChamferInput::new(Some(20.0), None, Some(45.0), Some(2.0));
        let result = calculate(&input, &ChamferSettings::default()).unwrap();
        assert!(!result.is_compensated());
        assert_relative_eq!(result.programmed_d1(), 16.0, epsilon = 1e-12);
        assert_relative_eq!(result.programmed_l1(), 2.0);
    }

    #[test]
    fn test_calculate_zero_radius_is_uncompensated() {
        let input = ChamferInput::new(Some(20.0), None, Some(45.0), Some(2.0)).with_tool_radius(0.0);
        let result = calculate(&input, &ChamferSettings::default()).unwrap();
        assert!(!result.is_compensated());
        assert_eq!(result.tool_radius, None);
    }

    #[test]
    fn test_calculate_negative_radius_is_uncompensated() {
        let input = ChamferInput::new(Some(20.0), None, Some(45.0), Some(2.0)).with_tool_radius(-0.4);
        let result = calculate(&input, &ChamferSettings::default()).unwrap();
        assert!(result.correction.is_none());
        assert_eq!(result.tool_radius, None);
        assert_relative_eq!(result.programmed_d1(), 16.0, epsilon = 1e-12);
        assert!(compensate(16.0, 2.0, 45.0, -0.4).is_identity());
    }

    #[test]
    fn test_calculate_with_radius() {
        let input = ChamferInput::new(None, Some(16.0), Some(45.0), Some(2.0)).with_tool_radius(0.4);
        let result = calculate(&input, &ChamferSettings::default()).unwrap();
        let correction = result.correction.unwrap();
        let k = 1.0 / (1.0 + 45f64.to_radians().sin());
        assert_relative_eq!(correction.delta_z, 0.4 * k, epsilon = 1e-12);
        assert_relative_eq!(correction.delta_x, -0.8 * k, epsilon = 1e-12);
        assert_relative_eq!(result.programmed_d1(), 16.0 - 0.8 * k, epsilon = 1e-12);
        assert_relative_eq!(result.programmed_l1(), 2.0 + 0.4 * k, epsilon = 1e-12);
        assert_eq!(result.tool_radius, Some(0.4));
    }

    #[test]
    fn test_calculate_uses_face_beta_for_axis_input() {
        let settings = ChamferSettings {
            convention: AngleConvention::AxisAngle,
            ..Default::default()
        };
        let input = ChamferInput::new(Some(20.0), None, Some(60.0), Some(2.0)).with_tool_radius(0.4);
        let result = calculate(&input, &settings).unwrap();
        let expected = compensate(result.spec.d1, 2.0, 30.0, 0.4);
        let correction = result.correction.unwrap();
        assert_relative_eq!(correction.delta_x, expected.delta_x, epsilon = 1e-12);
        assert_relative_eq!(correction.delta_z, expected.delta_z, epsilon = 1e-12);
    }

    #[test]
    fn test_calculate_legacy_strategy() {
        let settings = ChamferSettings {
            compensation: CompensationStrategy::LegacyTable,
            ..Default::default()
        };
        let input = ChamferInput::new(Some(20.0), None, Some(30.0), Some(2.0)).with_tool_radius(1.0);
        let correction = calculate(&input, &settings).unwrap().correction.unwrap();
        assert_eq!(correction.strategy, CompensationStrategy::LegacyTable);
        assert_relative_eq!(correction.delta_x, -1.465, epsilon = 1e-12);
        assert_relative_eq!(correction.delta_z, 0.4225, epsilon = 1e-12);
    }

    #[test]
    fn test_calculate_reports_gate_errors() {
        let input = ChamferInput::new(Some(16.0), Some(20.0), None, Some(2.0));
        assert!(matches!(
            calculate(&input, &ChamferSettings::default()),
            Err(ChamferError::DegenerateDiameters { .. })
        ));

        let permissive = ChamferSettings {
            ordering: DiameterOrdering::Distinct,
            ..Default::default()
        };
        let result = calculate(&input, &permissive).unwrap();
        assert!(result.spec.delta_r < 0.0);
        assert_relative_eq!(result.spec.angle, 45.0, epsilon = 1e-12);
    }
}
