//! Parsing of user-entered numeric fields.

use crate::error::{ChamferError, Result};

/// Unit suffixes stripped before parsing.
const UNIT_SUFFIXES: [&str; 2] = ["mm", "мм"];

/// Parse a numeric field as typed by a user.
///
/// Empty or whitespace-only text is an absent value. A trailing `mm` unit is
/// ignored and a comma is accepted as the decimal separator, so `"12,5 mm"`
/// parses as `12.5`.
pub fn parse_number(text: &str) -> Result<Option<f64>> {
    let mut s = text.trim();
    if s.is_empty() {
        return Ok(None);
    }

    for suffix in UNIT_SUFFIXES {
        if let Some(stripped) = s.strip_suffix(suffix) {
            s = stripped.trim_end();
            break;
        }
    }
    if s.is_empty() {
        return Ok(None);
    }

    let normalized = s.replacen(',', ".", 1);
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(ChamferError::Parse {
            input: text.to_string(),
        }),
    }
}
