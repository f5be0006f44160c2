//! Two-axis lathe post-processor.

use super::{format_coord, format_trimmed, MotionMode, PostProcessor, PostState};
use crate::flavor::GcodeFlavor;
use crate::toolpath::LatheSegment;

/// Post-processor for two-axis lathes programmed in diameter mode.
#[derive(Debug, Clone)]
pub struct LathePost {
    /// Comment and block syntax.
    pub flavor: GcodeFlavor,
    /// Decimal places for X and Z words.
    pub precision: usize,
}

impl LathePost {
    /// Create a lathe post for a flavor with 3-decimal coordinates.
    pub fn new(flavor: GcodeFlavor) -> Self {
        Self {
            flavor,
            precision: 3,
        }
    }

    fn block(&self, words: &[String]) -> String {
        format!("{}{}\n", words.join(" "), self.flavor.end_of_block())
    }

    fn motion_word(&self, mode: MotionMode, state: &mut PostState) -> Option<String> {
        if state.motion == Some(mode) {
            return None;
        }
        state.motion = Some(mode);
        Some(
            match mode {
                MotionMode::Rapid => "G00",
                MotionMode::Linear => "G01",
            }
            .to_string(),
        )
    }
}

impl Default for LathePost {
    fn default() -> Self {
        Self::new(GcodeFlavor::default())
    }
}

impl PostProcessor for LathePost {
    fn header(&self, program_name: &str) -> String {
        let mut out = self.flavor.program_start().to_string();
        if !out.is_empty() && !program_name.is_empty() {
            out.push_str(&self.flavor.comment(&program_name.to_uppercase()));
            out.push('\n');
        }
        out
    }

    fn segment(&self, seg: &LatheSegment, state: &mut PostState) -> String {
        let prec = self.precision;
        match seg {
            LatheSegment::Comment(text) => format!("{}\n", self.flavor.comment(text)),
            LatheSegment::Rapid { x, z } => {
                let mut words = Vec::new();
                words.extend(self.motion_word(MotionMode::Rapid, state));
                words.push(format!("X{}", format_coord(*x, prec)));
                words.push(format!("Z{}", format_coord(*z, prec)));
                self.block(&words)
            }
            LatheSegment::Linear { x, z, feed } => {
                let mut words = Vec::new();
                words.extend(self.motion_word(MotionMode::Linear, state));
                if let Some(x) = x {
                    words.push(format!("X{}", format_coord(*x, prec)));
                }
                if let Some(z) = z {
                    words.push(format!("Z{}", format_coord(*z, prec)));
                }
                if let Some(f) = feed {
                    if state.feed != Some(*f) {
                        words.push(format!("F{}", format_trimmed(*f)));
                        state.feed = Some(*f);
                    }
                }
                self.block(&words)
            }
        }
    }

    fn footer(&self) -> String {
        self.flavor.program_end().to_string()
    }
}
