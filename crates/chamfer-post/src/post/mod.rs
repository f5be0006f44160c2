//! Post-processors for converting lathe toolpaths to G-code.

mod lathe;

pub use lathe::LathePost;

use crate::toolpath::{LatheSegment, LatheToolpath};

/// Active motion mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionMode {
    /// G00.
    Rapid,
    /// G01.
    Linear,
}

/// Modal state tracked during post-processing.
#[derive(Debug, Clone, Default)]
pub struct PostState {
    /// Current modal feed (mm/rev).
    pub feed: Option<f64>,
    /// Current modal motion.
    pub motion: Option<MotionMode>,
}

/// Trait for post-processors that convert lathe toolpaths to G-code.
pub trait PostProcessor {
    /// Generate the program start.
    fn header(&self, program_name: &str) -> String;

    /// Generate G-code for a single block.
    fn segment(&self, seg: &LatheSegment, state: &mut PostState) -> String;

    /// Generate the program end.
    fn footer(&self) -> String;

    /// Generate complete G-code for a toolpath.
    fn generate(&self, program_name: &str, toolpath: &LatheToolpath) -> String {
        let mut output = String::new();
        let mut state = PostState::default();

        output.push_str(&self.header(program_name));
        for seg in &toolpath.segments {
            output.push_str(&self.segment(seg, &mut state));
        }
        output.push_str(&self.footer());

        output
    }
}

/// Format a coordinate with fixed precision.
///
/// Values that round to zero are written without a sign.
pub fn format_coord(value: f64, precision: usize) -> String {
    let half_ulp = 0.5 * 10f64.powi(-(precision as i32));
    let value = if value.abs() < half_ulp { 0.0 } else { value };
    format!("{:.prec$}", value, prec = precision)
}

/// Format a value with trailing zeros removed, keeping one decimal.
pub fn format_trimmed(value: f64) -> String {
    let s = format_coord(value, 4);
    let s = s.trim_end_matches('0');
    if s.ends_with('.') {
        format!("{}0", s)
    } else {
        s.to_string()
    }
}
