//! Error types for chamfer calculation.

use thiserror::Error;

use crate::types::{DiameterOrdering, SolvedField};

/// Errors that can occur while validating or solving a chamfer.
#[derive(Error, Debug)]
pub enum ChamferError {
    /// Fewer than three of the four chamfer parameters were supplied.
    #[error("enter any 3 of the 4 parameters (D, D1, angle, L1); got {given}")]
    InsufficientParameters {
        /// How many parameters were present.
        given: usize,
    },

    /// Angle outside the open interval (0, 90).
    #[error("angle must satisfy 0° < angle < 90°, got {0}°")]
    AngleOutOfRange(f64),

    /// Start and end diameters violate the configured ordering policy.
    #[error("{}", degenerate_message(.d, .d1, .ordering))]
    DegenerateDiameters {
        /// Start diameter.
        d: f64,
        /// End diameter.
        d1: f64,
        /// Policy that rejected the pair.
        ordering: DiameterOrdering,
    },

    /// Chamfer length is zero or negative.
    #[error("chamfer length L1 must be positive, got {0}")]
    NonPositiveLength(f64),

    /// A supplied diameter is zero or negative.
    #[error("diameter {field} must be positive, got {value}")]
    NonPositiveDiameter {
        /// Offending parameter.
        field: SolvedField,
        /// Offending value.
        value: f64,
    },

    /// Tool nose radius is not finite.
    #[error("tool nose radius must be a finite number, got {0}")]
    InvalidToolRadius(f64),

    /// All four parameters were given and they disagree.
    #[error("overconstrained input: D1 = {given} disagrees with D1 = {computed:.6} from D, angle and L1")]
    Inconsistent {
        /// D1 as supplied.
        given: f64,
        /// D1 recomputed from the other three.
        computed: f64,
    },

    /// The solved parameter is not physically meaningful.
    #[error("solved {field} = {value} is out of range")]
    SolvedOutOfRange {
        /// Parameter that was solved.
        field: SolvedField,
        /// Value that came out.
        value: f64,
    },

    /// A numeric field could not be parsed.
    #[error("cannot parse {input:?} as a number")]
    Parse {
        /// Raw text that failed to parse.
        input: String,
    },

    /// Invalid settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

fn degenerate_message(d: &f64, d1: &f64, ordering: &DiameterOrdering) -> String {
    match ordering {
        DiameterOrdering::Decreasing => format!(
            "start diameter D must be greater than end diameter D1 (D = {d}, D1 = {d1})"
        ),
        DiameterOrdering::Distinct => {
            format!("diameters D and D1 must differ (D = {d}, D1 = {d1})")
        }
    }
}

impl ChamferError {
    /// Whether this error is a prompt for more input rather than a rejection.
    pub fn is_guidance(&self) -> bool {
        matches!(self, ChamferError::InsufficientParameters { .. })
    }
}

/// Result type for chamfer operations.
pub type Result<T> = std::result::Result<T, ChamferError>;
