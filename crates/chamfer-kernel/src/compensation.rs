//! Tool nose radius compensation.
//!
//! A turning insert has a rounded tip, so the point that actually touches a
//! conical face is not the nominal tool point. The correction moves the
//! programmed end of the chamfer so the rounded tip cuts the intended cone.
//!
//! Two strategies are available:
//!
//! - [`CompensationStrategy::ClosedForm`] (default): with
//!   `k = 1 / (1 + sin β)`, `ΔZ = r·k` and `ΔX = −2·tan β·r·k`.
//! - [`CompensationStrategy::LegacyTable`]: piecewise-linear interpolation over
//!   shop-floor calibration ratios at six angles, clamped outside them. Kept
//!   for reproducing programs made with the older tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::RadiusCorrection;

/// Calibration points `(beta, ΔX / r)` for the legacy table strategy.
pub const LEGACY_DELTA_X_TABLE: [(f64, f64); 6] = [
    (15.0, -0.465),
    (30.0, -1.465),
    (45.0, -1.1725),
    (55.0, -0.96),
    (60.0, -0.845),
    (75.0, -1.7375),
];

/// Calibration points `(beta, ΔZ / r)` for the legacy table strategy.
pub const LEGACY_DELTA_Z_TABLE: [(f64, f64); 6] = [
    (15.0, 0.8675),
    (30.0, 0.4225),
    (45.0, 0.585),
    (55.0, 0.685),
    (60.0, 0.7325),
    (75.0, 0.2325),
];

/// How the nose radius offsets are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompensationStrategy {
    /// `k = 1 / (1 + sin β)` contact model.
    #[default]
    ClosedForm,
    /// Interpolated calibration tables.
    LegacyTable,
}

impl CompensationStrategy {
    /// Offsets `(ΔX, ΔZ)` for a tool of radius `tool_radius` at face angle `beta` (degrees).
    pub fn offsets(self, beta: f64, tool_radius: f64) -> (f64, f64) {
        match self {
            CompensationStrategy::ClosedForm => {
                let k = blend_factor(beta);
                let delta_z = tool_radius * k;
                let delta_x = -2.0 * beta.to_radians().tan() * tool_radius * k;
                (delta_x, delta_z)
            }
            CompensationStrategy::LegacyTable => (
                interpolate(beta, &LEGACY_DELTA_X_TABLE) * tool_radius,
                interpolate(beta, &LEGACY_DELTA_Z_TABLE) * tool_radius,
            ),
        }
    }
}

impl fmt::Display for CompensationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompensationStrategy::ClosedForm => write!(f, "closed_form"),
            CompensationStrategy::LegacyTable => write!(f, "legacy_table"),
        }
    }
}

impl FromStr for CompensationStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "closed_form" => Ok(CompensationStrategy::ClosedForm),
            "legacy_table" | "table" => Ok(CompensationStrategy::LegacyTable),
            other => Err(format!(
                "unknown compensation strategy '{other}' (expected closed_form or legacy_table)"
            )),
        }
    }
}

/// Blending factor `k = 1 / (1 + sin β)`.
///
/// Tends to 1 as β → 0° and to 0.5 as β → 90°.
pub fn blend_factor(beta: f64) -> f64 {
    1.0 / (1.0 + beta.to_radians().sin())
}

/// Compensate with the default closed-form strategy.
pub fn compensate(d1: f64, l1: f64, beta: f64, tool_radius: f64) -> RadiusCorrection {
    compensate_with(CompensationStrategy::ClosedForm, d1, l1, beta, tool_radius)
}

/// Compensate with an explicit strategy.
///
/// A non-positive radius yields the identity correction. `beta` is not
/// range-checked here.
pub fn compensate_with(
    strategy: CompensationStrategy,
    d1: f64,
    l1: f64,
    beta: f64,
    tool_radius: f64,
) -> RadiusCorrection {
    if tool_radius <= 0.0 {
        return RadiusCorrection::identity(d1, l1, strategy);
    }

    let (delta_x, delta_z) = strategy.offsets(beta, tool_radius);
    tracing::debug!(%strategy, beta, tool_radius, delta_x, delta_z, "nose radius compensation");

    RadiusCorrection {
        delta_x,
        delta_z,
        corrected_d1: d1 + delta_x,
        corrected_l1: l1 + delta_z,
        strategy,
    }
}

/// Linear interpolation over a table sorted by angle, clamped at both ends.
fn interpolate(angle: f64, table: &[(f64, f64)]) -> f64 {
    let (first, last) = match (table.first(), table.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return 0.0,
    };
    if angle <= first.0 {
        return first.1;
    }
    if angle >= last.0 {
        return last.1;
    }

    for pair in table.windows(2) {
        let (a0, v0) = pair[0];
        let (a1, v1) = pair[1];
        if angle >= a0 && angle <= a1 {
            let t = (angle - a0) / (a1 - a0);
            return v0 + t * (v1 - v0);
        }
    }

    0.0
}
