//! Closed-form solver for the four chamfer parameters.
//!
//! The chamfer is fully determined by any three of `D`, `D1`, angle and `L1`.
//! All trigonometry runs on the canonical face-measured angle β:
//!
//! ```text
//! ΔR = (D − D1) / 2 = L1 · tan β
//! ```

use crate::error::{ChamferError, Result};
use crate::types::{AngleConvention, ChamferInput, ChamferSpec, OverconstrainedPolicy, SolvedField};

/// Solve the missing chamfer parameter.
///
/// `input` must carry at least three of the four geometric values. With all
/// four present, `policy` decides whether the supplied `D1` is recomputed or
/// checked.
///
/// The angle and length are guarded before any division, so out-of-range
/// input gives an error instead of NaN.
pub fn solve(
    input: &ChamferInput,
    convention: AngleConvention,
    policy: OverconstrainedPolicy,
) -> Result<ChamferSpec> {
    let given = input.given_count();
    if given < 3 {
        return Err(ChamferError::InsufficientParameters { given });
    }

    let beta = match input.angle {
        Some(angle) => Some(checked_beta(angle, convention)?),
        None => None,
    };
    if let Some(l1) = input.l1 {
        if l1 <= 0.0 || !l1.is_finite() {
            return Err(ChamferError::NonPositiveLength(l1));
        }
    }

    let spec = match (input.d, input.d1, input.angle.zip(beta), input.l1) {
        (None, Some(d1), Some((angle, beta)), Some(l1)) => {
            tracing::debug!(d1, angle, l1, "solving for D");
            let delta_r = l1 * tan_deg(beta);
            let d = checked_positive(SolvedField::D, d1 + 2.0 * delta_r)?;
            ChamferSpec {
                d,
                d1,
                angle,
                l1,
                delta_r,
                convention,
                solved: SolvedField::D,
                overconstrained: false,
            }
        }
        (Some(d), None, Some((angle, beta)), Some(l1)) => {
            tracing::debug!(d, angle, l1, "solving for D1");
            let delta_r = l1 * tan_deg(beta);
            let d1 = checked_positive(SolvedField::D1, d - 2.0 * delta_r)?;
            ChamferSpec {
                d,
                d1,
                angle,
                l1,
                delta_r,
                convention,
                solved: SolvedField::D1,
                overconstrained: false,
            }
        }
        (Some(d), Some(d1), None, Some(l1)) => {
            tracing::debug!(d, d1, l1, "solving for angle");
            let delta_r = (d - d1) / 2.0;
            let beta = (delta_r.abs() / l1).atan().to_degrees();
            if !(beta > 0.0 && beta < 90.0) {
                return Err(ChamferError::SolvedOutOfRange {
                    field: SolvedField::Angle,
                    value: convention.from_beta(beta),
                });
            }
            ChamferSpec {
                d,
                d1,
                angle: convention.from_beta(beta),
                l1,
                delta_r,
                convention,
                solved: SolvedField::Angle,
                overconstrained: false,
            }
        }
        (Some(d), Some(d1), Some((angle, beta)), None) => {
            tracing::debug!(d, d1, angle, "solving for L1");
            let delta_r = (d - d1) / 2.0;
            let l1 = checked_positive(SolvedField::L1, delta_r.abs() / tan_deg(beta))?;
            ChamferSpec {
                d,
                d1,
                angle,
                l1,
                delta_r,
                convention,
                solved: SolvedField::L1,
                overconstrained: false,
            }
        }
        (Some(d), Some(d1), Some((angle, beta)), Some(l1)) => {
            let computed = d - 2.0 * l1 * tan_deg(beta);
            let d1 = match policy {
                OverconstrainedPolicy::RecomputeD1 => {
                    tracing::warn!(given = d1, computed, "all four parameters given, recomputing D1");
                    checked_positive(SolvedField::D1, computed)?
                }
                // D1 is checked, not solved; the result still tags it.
                OverconstrainedPolicy::Verify { tolerance } => {
                    if (computed - d1).abs() > tolerance {
                        return Err(ChamferError::Inconsistent {
                            given: d1,
                            computed,
                        });
                    }
                    d1
                }
            };
            ChamferSpec {
                d,
                d1,
                angle,
                l1,
                delta_r: (d - d1) / 2.0,
                convention,
                solved: SolvedField::D1,
                overconstrained: true,
            }
        }
        _ => return Err(ChamferError::InsufficientParameters { given }),
    };

    Ok(spec)
}

/// Convert a caller angle to β and reject values outside (0, 90).
fn checked_beta(angle: f64, convention: AngleConvention) -> Result<f64> {
    let beta = convention.to_beta(angle);
    if beta > 0.0 && beta < 90.0 {
        Ok(beta)
    } else {
        Err(ChamferError::AngleOutOfRange(angle))
    }
}

fn checked_positive(field: SolvedField, value: f64) -> Result<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ChamferError::SolvedOutOfRange { field, value })
    }
}

fn tan_deg(degrees: f64) -> f64 {
    degrees.to_radians().tan()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const FACE: AngleConvention = AngleConvention::FaceAngle;
    const AXIS: AngleConvention = AngleConvention::AxisAngle;

    fn solve_default(input: ChamferInput, convention: AngleConvention) -> ChamferSpec {
        solve(&input, convention, OverconstrainedPolicy::default()).unwrap()
    }

    #[test]
    fn test_missing_d1() {
        let spec = solve_default(ChamferInput::new(Some(20.0), None, Some(45.0), Some(2.0)), FACE);
        assert_eq!(spec.solved, SolvedField::D1);
        assert_relative_eq!(spec.delta_r, 2.0, epsilon = 1e-12);
        assert_relative_eq!(spec.d1, 16.0, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_angle() {
        let spec = solve_default(ChamferInput::new(Some(20.0), Some(16.0), None, Some(2.0)), FACE);
        assert_eq!(spec.solved, SolvedField::Angle);
        assert_relative_eq!(spec.delta_r, 2.0);
        assert_relative_eq!(spec.angle, 45.0, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_d_axis_convention() {
        let spec = solve_default(ChamferInput::new(None, Some(16.0), Some(45.0), Some(2.0)), AXIS);
        assert_eq!(spec.solved, SolvedField::D);
        assert_relative_eq!(spec.beta(), 45.0);
        assert_relative_eq!(spec.delta_r, 2.0, epsilon = 1e-12);
        assert_relative_eq!(spec.d, 20.0, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_l1() {
        let spec = solve_default(ChamferInput::new(Some(30.0), Some(24.0), Some(30.0), None), FACE);
        assert_eq!(spec.solved, SolvedField::L1);
        assert_relative_eq!(spec.delta_r, 3.0);
        assert_relative_eq!(spec.l1, 3.0 / 30f64.to_radians().tan(), epsilon = 1e-12);
    }

    #[test]
    fn test_angle_solved_in_axis_convention() {
        let spec = solve_default(ChamferInput::new(Some(20.0), Some(18.0), None, Some(1.0)), AXIS);
        // ΔR = 1, L1 = 1: β = 45°, axis angle 45°.
        assert_relative_eq!(spec.angle, 45.0, epsilon = 1e-12);

        let spec = solve_default(ChamferInput::new(Some(20.0), Some(18.0), None, Some(3f64.sqrt())), AXIS);
        // tan β = 1/√3: β = 30°, axis angle 60°.
        assert_relative_eq!(spec.beta(), 30.0, epsilon = 1e-9);
        assert_relative_eq!(spec.angle, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_round_trip_all_branches() {
        let cases = [(20.0, 45.0, 2.0), (50.0, 30.0, 4.5), (8.0, 10.0, 0.75), (120.0, 75.0, 1.2)];
        for (d, angle, l1) in cases {
            let d1 = d - 2.0 * l1 * tan_deg(angle);
            let inputs = [
                ChamferInput::new(None, Some(d1), Some(angle), Some(l1)),
                ChamferInput::new(Some(d), None, Some(angle), Some(l1)),
                ChamferInput::new(Some(d), Some(d1), None, Some(l1)),
                ChamferInput::new(Some(d), Some(d1), Some(angle), None),
            ];
            for input in inputs {
                let spec = solve_default(input, FACE);
                let back = solve_default(
                    ChamferInput::new(Some(spec.d), None, Some(spec.angle), Some(spec.l1)),
                    FACE,
                );
                assert_relative_eq!(back.d1, d1, max_relative = 1e-9);
            }
        }
    }

    #[test]
    fn test_convention_symmetry() {
        for a in [10.0, 30.0, 45.0, 60.0, 80.0] {
            let face = solve_default(ChamferInput::new(Some(40.0), None, Some(a), Some(1.5)), FACE);
            let axis = solve_default(ChamferInput::new(Some(40.0), None, Some(90.0 - a), Some(1.5)), AXIS);
            assert_relative_eq!(face.d1, axis.d1, epsilon = 1e-9);
            assert_relative_eq!(face.delta_r, axis.delta_r, epsilon = 1e-9);
            assert_relative_eq!(face.beta(), axis.beta(), epsilon = 1e-9);

            let face = solve_default(ChamferInput::new(Some(40.0), Some(face.d1), None, Some(1.5)), FACE);
            let axis = solve_default(ChamferInput::new(Some(40.0), Some(axis.d1), None, Some(1.5)), AXIS);
            assert_relative_eq!(face.angle, a, epsilon = 1e-9);
            assert_relative_eq!(axis.angle, 90.0 - a, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_overconstrained_recompute() {
        let input = ChamferInput::new(Some(20.0), Some(10.0), Some(45.0), Some(2.0));
        let spec = solve_default(input, FACE);
        assert!(spec.overconstrained);
        assert_eq!(spec.solved, SolvedField::D1);
        assert_relative_eq!(spec.d1, 16.0, epsilon = 1e-12);
        assert_relative_eq!(spec.delta_r, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_overconstrained_verify() {
        let policy = OverconstrainedPolicy::Verify { tolerance: 1e-6 };
        let consistent = ChamferInput::new(Some(20.0), Some(16.0), Some(45.0), Some(2.0));
        let spec = solve(&consistent, FACE, policy).unwrap();
        assert!(spec.overconstrained);
        assert_eq!(spec.solved, SolvedField::D1);
        assert_eq!(spec.d1, 16.0);

        // Within tolerance the supplied D1 is kept, not replaced.
        let loose = OverconstrainedPolicy::Verify { tolerance: 0.01 };
        let near = ChamferInput::new(Some(20.0), Some(16.005), Some(45.0), Some(2.0));
        let spec = solve(&near, FACE, loose).unwrap();
        assert_eq!(spec.d1, 16.005);
        assert_eq!(spec.solved, SolvedField::D1);

        let inconsistent = ChamferInput::new(Some(20.0), Some(10.0), Some(45.0), Some(2.0));
        match solve(&inconsistent, FACE, policy) {
            Err(ChamferError::Inconsistent { given, computed }) => {
                assert_eq!(given, 10.0);
                assert_relative_eq!(computed, 16.0, epsilon = 1e-12);
            }
            other => panic!("expected Inconsistent, got {:?}", other),
        }
    }

    #[test]
    fn test_insufficient() {
        let input = ChamferInput::new(Some(20.0), None, None, Some(2.0));
        assert!(matches!(
            solve(&input, FACE, OverconstrainedPolicy::default()),
            Err(ChamferError::InsufficientParameters { given: 2 })
        ));
    }

    #[test]
    fn test_angle_guard() {
        for angle in [0.0, 90.0, -5.0, 120.0, f64::NAN] {
            let input = ChamferInput::new(Some(20.0), None, Some(angle), Some(2.0));
            assert!(matches!(
                solve(&input, FACE, OverconstrainedPolicy::default()),
                Err(ChamferError::AngleOutOfRange(_))
            ));
        }
        // 90 in axis convention is β = 0.
        let input = ChamferInput::new(Some(20.0), None, Some(90.0), Some(2.0));
        assert!(solve(&input, AXIS, OverconstrainedPolicy::default()).is_err());
    }

    #[test]
    fn test_length_guard() {
        let input = ChamferInput::new(Some(20.0), Some(16.0), None, Some(0.0));
        assert!(matches!(
            solve(&input, FACE, OverconstrainedPolicy::default()),
            Err(ChamferError::NonPositiveLength(_))
        ));
    }

    #[test]
    fn test_solved_diameter_out_of_range() {
        // 2·ΔR = 2·5·tan 80° ≈ 56.7 > D
        let input = ChamferInput::new(Some(20.0), None, Some(80.0), Some(5.0));
        assert!(matches!(
            solve(&input, FACE, OverconstrainedPolicy::default()),
            Err(ChamferError::SolvedOutOfRange {
                field: SolvedField::D1,
                ..
            })
        ));
    }

    #[test]
    fn test_equal_diameters_have_no_angle() {
        let input = ChamferInput::new(Some(20.0), Some(20.0), None, Some(2.0));
        assert!(matches!(
            solve(&input, FACE, OverconstrainedPolicy::default()),
            Err(ChamferError::SolvedOutOfRange {
                field: SolvedField::Angle,
                ..
            })
        ));
    }

    #[test]
    fn test_reversed_diameters_give_magnitudes() {
        let angle = solve_default(ChamferInput::new(Some(16.0), Some(20.0), None, Some(2.0)), FACE);
        assert_relative_eq!(angle.delta_r, -2.0);
        assert_relative_eq!(angle.angle, 45.0, epsilon = 1e-12);

        let length = solve_default(ChamferInput::new(Some(16.0), Some(20.0), Some(45.0), None), FACE);
        assert_relative_eq!(length.delta_r, -2.0);
        assert_relative_eq!(length.l1, 2.0, epsilon = 1e-12);
    }
}
