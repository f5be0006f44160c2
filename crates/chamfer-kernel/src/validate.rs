//! Input validation run before the solver.
//!
//! Checks are applied in a fixed order so the first problem a user needs to
//! fix is the one reported.

use crate::error::{ChamferError, Result};
use crate::types::{ChamferInput, DiameterOrdering, SolvedField};
use crate::ChamferSettings;

/// Validate raw input against the settings' policies.
pub fn validate(input: &ChamferInput, settings: &ChamferSettings) -> Result<()> {
    let given = input.given_count();
    if given < 3 {
        return Err(ChamferError::InsufficientParameters { given });
    }

    if let Some(angle) = input.angle {
        if !(angle > 0.0 && angle < 90.0) {
            return Err(ChamferError::AngleOutOfRange(angle));
        }
    }

    for (field, value) in [(SolvedField::D, input.d), (SolvedField::D1, input.d1)] {
        if let Some(value) = value {
            if value <= 0.0 || !value.is_finite() {
                return Err(ChamferError::NonPositiveDiameter { field, value });
            }
        }
    }

    if let (Some(d), Some(d1)) = (input.d, input.d1) {
        check_ordering(d, d1, settings.ordering)?;
    }

    if let Some(l1) = input.l1 {
        if l1 <= 0.0 || !l1.is_finite() {
            return Err(ChamferError::NonPositiveLength(l1));
        }
    }

    // r <= 0 switches compensation off; only non-finite values are errors.
    if let Some(radius) = input.tool_radius {
        if !radius.is_finite() {
            return Err(ChamferError::InvalidToolRadius(radius));
        }
    }

    Ok(())
}

/// Check a diameter pair against an ordering policy.
pub fn check_ordering(d: f64, d1: f64, ordering: DiameterOrdering) -> Result<()> {
    let ok = match ordering {
        DiameterOrdering::Decreasing => d > d1,
        DiameterOrdering::Distinct => d != d1,
    };
    if ok {
        Ok(())
    } else {
        Err(ChamferError::DegenerateDiameters { d, d1, ordering })
    }
}
