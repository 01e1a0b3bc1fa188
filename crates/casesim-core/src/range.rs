//! Normal-range display strings.
//!
//! Authored studies carry ranges as short strings the way they appear on a
//! report sheet: `"<4.4"`, `">=50"`, `"3.0-4.5"`. This module parses them so
//! a value can be checked against its own range, and renders synthesized
//! ranges back into the same notation.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "bound", rename_all = "snake_case")]
#[ts(export)]
pub enum NormalRange {
    /// Value must be strictly below `limit` (`"<4.4"`).
    Below { limit: f64 },
    /// Value must be at or below `limit` (`"<=4.4"`).
    AtMost { limit: f64 },
    /// Value must be strictly above `limit` (`">50"`).
    Above { limit: f64 },
    /// Value must be at or above `limit` (`">=50"`).
    AtLeast { limit: f64 },
    /// Inclusive interval (`"3.0-4.5"`).
    Between { min: f64, max: f64 },
}

impl NormalRange {
    pub fn parse(text: &str) -> Result<Self, CoreError> {
        let trimmed = text.trim();
        let invalid = || CoreError::InvalidRange(text.to_string());

        if let Some(rest) = trimmed.strip_prefix("<=").or(trimmed.strip_prefix('≤')) {
            let limit = parse_number(rest).ok_or_else(invalid)?;
            return Ok(NormalRange::AtMost { limit });
        }
        if let Some(rest) = trimmed.strip_prefix(">=").or(trimmed.strip_prefix('≥')) {
            let limit = parse_number(rest).ok_or_else(invalid)?;
            return Ok(NormalRange::AtLeast { limit });
        }
        if let Some(rest) = trimmed.strip_prefix('<') {
            let limit = parse_number(rest).ok_or_else(invalid)?;
            return Ok(NormalRange::Below { limit });
        }
        if let Some(rest) = trimmed.strip_prefix('>') {
            let limit = parse_number(rest).ok_or_else(invalid)?;
            return Ok(NormalRange::Above { limit });
        }
        if let Some((min, max)) = trimmed.split_once('-') {
            let min = parse_number(min).ok_or_else(invalid)?;
            let max = parse_number(max).ok_or_else(invalid)?;
            if min > max {
                return Err(invalid());
            }
            return Ok(NormalRange::Between { min, max });
        }
        Err(invalid())
    }

    pub fn contains(&self, value: f64) -> bool {
        match *self {
            NormalRange::Below { limit } => value < limit,
            NormalRange::AtMost { limit } => value <= limit,
            NormalRange::Above { limit } => value > limit,
            NormalRange::AtLeast { limit } => value >= limit,
            NormalRange::Between { min, max } => value >= min && value <= max,
        }
    }
}

impl fmt::Display for NormalRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            NormalRange::Below { limit } => write!(f, "<{}", format_limit(limit)),
            NormalRange::AtMost { limit } => write!(f, "<={}", format_limit(limit)),
            NormalRange::Above { limit } => write!(f, ">{}", format_limit(limit)),
            NormalRange::AtLeast { limit } => write!(f, ">={}", format_limit(limit)),
            NormalRange::Between { min, max } => {
                write!(f, "{}-{}", format_limit(min), format_limit(max))
            }
        }
    }
}

/// Whole velocities read as `">50"`, everything else keeps one decimal
/// (`"<4.4"`, `">5.0"`).
fn format_limit(limit: f64) -> String {
    if limit >= 10.0 && limit.fract() == 0.0 {
        format!("{limit:.0}")
    } else {
        format!("{limit:.1}")
    }
}

/// Accepts a trailing unit (`"4.4 ms"`, `">50 m/s"`).
fn parse_number(text: &str) -> Option<f64> {
    let number: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    number.parse().ok()
}
