//! Core types for chamfer geometry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::compensation::CompensationStrategy;

/// How the chamfer angle is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AngleConvention {
    /// Measured from the part face, perpendicular to the rotation axis.
    #[default]
    #[serde(rename = "face")]
    FaceAngle,
    /// Measured from the rotation axis.
    #[serde(rename = "axis")]
    AxisAngle,
}

impl AngleConvention {
    /// Convert an angle in this convention to the canonical face-measured beta.
    pub fn to_beta(self, angle: f64) -> f64 {
        match self {
            AngleConvention::FaceAngle => angle,
            AngleConvention::AxisAngle => 90.0 - angle,
        }
    }

    /// Convert a canonical beta back into this convention.
    ///
    /// The conversion is its own inverse, but the two directions are kept
    /// apart so call sites read in the direction they convert.
    pub fn from_beta(self, beta: f64) -> f64 {
        match self {
            AngleConvention::FaceAngle => beta,
            AngleConvention::AxisAngle => 90.0 - beta,
        }
    }
}

impl fmt::Display for AngleConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AngleConvention::FaceAngle => write!(f, "face"),
            AngleConvention::AxisAngle => write!(f, "axis"),
        }
    }
}

impl FromStr for AngleConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "face" | "face-angle" => Ok(AngleConvention::FaceAngle),
            "axis" | "axis-angle" => Ok(AngleConvention::AxisAngle),
            other => Err(format!("unknown angle convention '{other}' (expected face or axis)")),
        }
    }
}

/// Which of the four chamfer parameters a solve produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolvedField {
    /// Start diameter.
    D,
    /// End diameter.
    D1,
    /// Chamfer angle.
    Angle,
    /// Axial chamfer length.
    L1,
}

impl fmt::Display for SolvedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolvedField::D => write!(f, "D"),
            SolvedField::D1 => write!(f, "D1"),
            SolvedField::Angle => write!(f, "angle"),
            SolvedField::L1 => write!(f, "L1"),
        }
    }
}

/// Accepted ordering between start and end diameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiameterOrdering {
    /// `D > D1`: the chamfer always steps down.
    #[default]
    Decreasing,
    /// `D != D1`: either direction, only a cylinder is rejected.
    Distinct,
}

/// What to do when all four parameters are supplied.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum OverconstrainedPolicy {
    /// Discard the supplied D1 and recompute it from D, angle and L1.
    #[default]
    RecomputeD1,
    /// Recompute D1 and reject the input if it disagrees with the supplied one.
    Verify {
        /// Largest accepted difference in mm.
        tolerance: f64,
    },
}

/// Raw chamfer parameters as supplied by a caller.
///
/// Exactly one of the four geometric values is expected to be `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChamferInput {
    /// Start diameter (mm).
    pub d: Option<f64>,
    /// End diameter (mm).
    pub d1: Option<f64>,
    /// Chamfer angle in the caller's convention (degrees).
    pub angle: Option<f64>,
    /// Axial chamfer length (mm).
    pub l1: Option<f64>,
    /// Tool nose radius (mm). `None` disables compensation.
    pub tool_radius: Option<f64>,
}

impl ChamferInput {
    /// Create an input from the four geometric values.
    pub fn new(d: Option<f64>, d1: Option<f64>, angle: Option<f64>, l1: Option<f64>) -> Self {
        Self {
            d,
            d1,
            angle,
            l1,
            tool_radius: None,
        }
    }

    /// Enable nose radius compensation with the given radius.
    pub fn with_tool_radius(mut self, radius: f64) -> Self {
        self.tool_radius = Some(radius);
        self
    }

    /// Number of geometric values present.
    pub fn given_count(&self) -> usize {
        [self.d, self.d1, self.angle, self.l1]
            .iter()
            .filter(|v| v.is_some())
            .count()
    }

    /// The parameter that is absent, or `None` when all four are present.
    ///
    /// When more than one is absent the first in `D, D1, angle, L1` order is
    /// returned.
    pub fn missing(&self) -> Option<SolvedField> {
        if self.d.is_none() {
            Some(SolvedField::D)
        } else if self.d1.is_none() {
            Some(SolvedField::D1)
        } else if self.angle.is_none() {
            Some(SolvedField::Angle)
        } else if self.l1.is_none() {
            Some(SolvedField::L1)
        } else {
            None
        }
    }
}

/// A fully determined conical chamfer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChamferSpec {
    /// Start diameter (mm).
    pub d: f64,
    /// End diameter (mm).
    pub d1: f64,
    /// Chamfer angle in `convention` (degrees).
    pub angle: f64,
    /// Axial chamfer length (mm).
    pub l1: f64,
    /// Radial half-span `(d - d1) / 2` (mm).
    pub delta_r: f64,
    /// Convention `angle` is expressed in.
    pub convention: AngleConvention,
    /// Which parameter was computed.
    ///
    /// With all four supplied (`overconstrained`) this is always `D1`: the
    /// field recomputed under `RecomputeD1`, or the field checked under
    /// `Verify`, where the supplied value is kept.
    pub solved: SolvedField,
    /// All four parameters were supplied.
    pub overconstrained: bool,
}

impl ChamferSpec {
    /// Canonical face-measured angle in degrees.
    pub fn beta(&self) -> f64 {
        self.convention.to_beta(self.angle)
    }

    /// The same chamfer with its angle expressed in another convention.
    pub fn in_convention(&self, convention: AngleConvention) -> Self {
        Self {
            angle: convention.from_beta(self.beta()),
            convention,
            ..*self
        }
    }
}

/// Offsets applied to the programmed end point by a rounded tool tip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusCorrection {
    /// Diameter offset applied to D1 (mm).
    pub delta_x: f64,
    /// Length offset applied to L1 (mm).
    pub delta_z: f64,
    /// `d1 + delta_x`.
    pub corrected_d1: f64,
    /// `l1 + delta_z`.
    pub corrected_l1: f64,
    /// Strategy that produced the offsets.
    pub strategy: CompensationStrategy,
}

impl RadiusCorrection {
    /// The no-op correction.
    pub fn identity(d1: f64, l1: f64, strategy: CompensationStrategy) -> Self {
        Self {
            delta_x: 0.0,
            delta_z: 0.0,
            corrected_d1: d1,
            corrected_l1: l1,
            strategy,
        }
    }

    /// Check if the correction changes nothing.
    pub fn is_identity(&self) -> bool {
        self.delta_x == 0.0 && self.delta_z == 0.0
    }
}

/// Solved chamfer plus optional nose radius correction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChamferResult {
    /// Solved geometry.
    pub spec: ChamferSpec,
    /// Present when compensation is active.
    pub correction: Option<RadiusCorrection>,
    /// Tool nose radius used for the correction (mm).
    pub tool_radius: Option<f64>,
}

impl ChamferResult {
    /// Whether nose radius compensation is applied.
    pub fn is_compensated(&self) -> bool {
        self.correction.is_some()
    }

    /// End diameter to program: corrected when compensating.
    pub fn programmed_d1(&self) -> f64 {
        self.correction
            .map(|c| c.corrected_d1)
            .unwrap_or(self.spec.d1)
    }

    /// Chamfer length to program: corrected when compensating.
    pub fn programmed_l1(&self) -> f64 {
        self.correction
            .map(|c| c.corrected_l1.abs())
            .unwrap_or(self.spec.l1)
    }
}
