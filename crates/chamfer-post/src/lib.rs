#![warn(missing_docs)]

//! Lathe G-code for solved chamfers.
//!
//! A solved [`ChamferResult`] is turned into a short
//! [`LatheToolpath`] (rapid to clearance, feed to the face, cut the cone) and
//! then written out by a [`PostProcessor`].
//!
//! # Example
//!
//! ```
//! use chamfer_kernel::{calculate, ChamferInput, ChamferSettings};
//! use chamfer_post::{generate_gcode, PostSettings};
//!
//! let input = ChamferInput::new(Some(20.0), None, Some(45.0), Some(2.0));
//! let result = calculate(&input, &ChamferSettings::default()).unwrap();
//!
//! let gcode = generate_gcode(&result, &PostSettings::default());
//! assert!(gcode.contains("X16.000 Z-2.000;"));
//! ```

pub mod flavor;
pub mod post;
pub mod toolpath;

pub use flavor::GcodeFlavor;
pub use post::{format_coord, LathePost, PostProcessor, PostState};
pub use toolpath::{chamfer_toolpath, LatheSegment, LatheToolpath};

use chamfer_kernel::{ChamferError, ChamferResult};
use serde::{Deserialize, Serialize};

/// Settings for the chamfer program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostSettings {
    /// Radial clearance added to the larger diameter for the rapid (mm on diameter).
    pub clearance: f64,
    /// Z of the rapid approach point (mm).
    pub approach_z: f64,
    /// Feed per revolution for the cut (mm/rev).
    pub feed: f64,
    /// Controller flavor.
    pub flavor: GcodeFlavor,
    /// Program name written by flavors that have a header.
    pub program_name: String,
}

impl Default for PostSettings {
    fn default() -> Self {
        Self {
            clearance: 5.0,
            approach_z: 2.0,
            feed: 0.1,
            flavor: GcodeFlavor::Generic,
            program_name: "chamfer".into(),
        }
    }
}

impl PostSettings {
    /// Validate settings.
    pub fn validate(&self) -> chamfer_kernel::Result<()> {
        if self.clearance < 0.0 || !self.clearance.is_finite() {
            return Err(ChamferError::InvalidSettings(
                "clearance must be a finite value >= 0".into(),
            ));
        }
        if self.feed <= 0.0 || !self.feed.is_finite() {
            return Err(ChamferError::InvalidSettings("feed must be positive".into()));
        }
        if !self.approach_z.is_finite() {
            return Err(ChamferError::InvalidSettings(
                "approach_z must be finite".into(),
            ));
        }
        Ok(())
    }
}

/// Build and post the chamfer program in one step.
pub fn generate_gcode(result: &ChamferResult, settings: &PostSettings) -> String {
    let toolpath = chamfer_toolpath(result, settings);
    LathePost::new(settings.flavor).generate(&settings.program_name, &toolpath)
}

/// Comment block shown in place of a program when input is rejected.
pub fn guidance_block(message: &str, flavor: GcodeFlavor) -> String {
    let lines = [
        "Enter any 3 parameters:",
        "- start diameter D",
        "- end diameter D1",
        "- chamfer angle",
        "- chamfer length L1",
    ];

    let mut out = format!("{}\n\n", flavor.comment(message));
    for line in lines {
        out.push_str(&flavor.comment(line));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chamfer_kernel::{calculate, AngleConvention, ChamferInput, ChamferSettings};

    fn solve(input: ChamferInput) -> ChamferResult {
        calculate(&input, &ChamferSettings::default()).unwrap()
    }

    #[test]
    fn test_settings_default() {
        let settings = PostSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.flavor, GcodeFlavor::Generic);
    }

    #[test]
    fn test_settings_validation() {
        let bad_feed = PostSettings {
            feed: 0.0,
            ..Default::default()
        };
        assert!(bad_feed.validate().is_err());

        let bad_clearance = PostSettings {
            clearance: -1.0,
            ..Default::default()
        };
        assert!(bad_clearance.validate().is_err());
    }

    #[test]
    fn test_uncompensated_program() {
        let result = solve(ChamferInput::new(Some(20.0), None, Some(45.0), Some(2.0)));
        let gcode = generate_gcode(&result, &PostSettings::default());
        assert_eq!(
            gcode,
            "// CHAMFER WITHOUT TOOL NOSE RADIUS COMPENSATION\n\
             // D=20.000 D1=16.000 ANGLE=45.0 FACE L1=2.000\n\
             G00 X25.000 Z2.000;\n\
             G01 Z0.000 F0.1;\n\
             X20.000 Z0.000;\n\
             X16.000 Z-2.000;\n"
        );
    }

    #[test]
    fn test_compensated_program() {
        let result = solve(
            ChamferInput::new(Some(20.0), None, Some(45.0), Some(2.0)).with_tool_radius(0.4),
        );
        let gcode = generate_gcode(&result, &PostSettings::default());
        assert_eq!(
            gcode,
            "// CHAMFER WITH TOOL NOSE RADIUS COMPENSATION R=0.4 mm\n\
             // D=20.000 D1=16.000 ANGLE=45.0 FACE L1=2.000\n\
             G00 X25.000 Z2.000;\n\
             G01 Z0.000 F0.1;\n\
             X20.000 Z0.000;\n\
             X15.531 Z-2.234;\n"
        );
    }

    #[test]
    fn test_axis_convention_comment() {
        let settings = ChamferSettings {
            convention: AngleConvention::AxisAngle,
            ..Default::default()
        };
        let input = ChamferInput::new(Some(20.0), Some(16.0), None, Some(2.0));
        let result = calculate(&input, &settings).unwrap();
        let gcode = generate_gcode(&result, &PostSettings::default());
        assert!(gcode.contains("ANGLE=45.0 AXIS"));
    }

    #[test]
    fn test_fanuc_program() {
        let result = solve(ChamferInput::new(Some(30.0), Some(26.0), Some(30.0), None));
        let settings = PostSettings {
            flavor: GcodeFlavor::Fanuc,
            feed: 0.15,
            ..Default::default()
        };
        let gcode = generate_gcode(&result, &settings);
        assert!(gcode.starts_with("%\n(CHAMFER)\n(CHAMFER WITHOUT"));
        assert!(gcode.contains("G00 X35.000 Z2.000;\n"));
        assert!(gcode.contains("G01 Z0.000 F0.15;\n"));
        // L1 = 2 / tan 30° = 3.464
        assert!(gcode.contains("X26.000 Z-3.464;\n"));
        assert!(gcode.ends_with("%\n"));
    }

    #[test]
    fn test_guidance_block() {
        let text = guidance_block("Enter any 3 of the 4 parameters", GcodeFlavor::Generic);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "// Enter any 3 of the 4 parameters");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "// Enter any 3 parameters:");
        assert_eq!(lines.len(), 7);

        let fanuc = guidance_block("angle must satisfy 0° < angle < 90° (got 95)", GcodeFlavor::Fanuc);
        assert!(fanuc.starts_with("(angle must satisfy 0° < angle < 90° got 95)"));
    }
}
