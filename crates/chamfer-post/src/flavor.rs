//! Controller flavor definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Controller flavor (comment and block syntax only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GcodeFlavor {
    /// `//` comments and `;` block ends, as pasted into most lathe programs.
    #[default]
    Generic,
    /// Fanuc-style: `( )` comments and `;` block ends.
    Fanuc,
    /// LinuxCNC: `( )` comments, no block end character.
    LinuxCnc,
}

impl GcodeFlavor {
    /// Characters appended to every motion block.
    pub fn end_of_block(&self) -> &'static str {
        match self {
            GcodeFlavor::Generic | GcodeFlavor::Fanuc => ";",
            GcodeFlavor::LinuxCnc => "",
        }
    }

    /// Render a comment line (without newline).
    pub fn comment(&self, text: &str) -> String {
        match self {
            GcodeFlavor::Generic => format!("// {}", text),
            GcodeFlavor::Fanuc | GcodeFlavor::LinuxCnc => {
                // Parenthesised comments cannot nest.
                let clean: String = text.chars().filter(|c| *c != '(' && *c != ')').collect();
                format!("({})", clean)
            }
        }
    }

    /// Program start marker, if the flavor uses one.
    pub fn program_start(&self) -> &'static str {
        match self {
            GcodeFlavor::Generic => "",
            GcodeFlavor::Fanuc | GcodeFlavor::LinuxCnc => "%\n",
        }
    }

    /// Program end marker, if the flavor uses one.
    pub fn program_end(&self) -> &'static str {
        match self {
            GcodeFlavor::Generic => "",
            GcodeFlavor::Fanuc | GcodeFlavor::LinuxCnc => "%\n",
        }
    }
}

impl fmt::Display for GcodeFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GcodeFlavor::Generic => write!(f, "generic"),
            GcodeFlavor::Fanuc => write!(f, "fanuc"),
            GcodeFlavor::LinuxCnc => write!(f, "linux_cnc"),
        }
    }
}

impl FromStr for GcodeFlavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "generic" => Ok(GcodeFlavor::Generic),
            "fanuc" => Ok(GcodeFlavor::Fanuc),
            "linux_cnc" | "linuxcnc" => Ok(GcodeFlavor::LinuxCnc),
            other => Err(format!(
                "unknown flavor '{other}' (expected generic, fanuc or linux_cnc)"
            )),
        }
    }
}
