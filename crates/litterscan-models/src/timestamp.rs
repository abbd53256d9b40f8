//! Timestamp parsing for incident offsets.
//!
//! The inference service reports incident times as strings. The contract asks
//! for plain seconds (`"5.2"`), but `MM:SS`, `HH:MM:SS` and a trailing `s`
//! unit are seen in practice and accepted as well.

use thiserror::Error;

/// Maximum reasonable video duration (24 hours in seconds).
pub const MAX_VIDEO_DURATION_SECS: f64 = 86400.0;

/// Timestamp parsing error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimestampError {
    /// Timestamp string is empty
    #[error("Timestamp cannot be empty")]
    Empty,

    /// Timestamp contains negative values
    #[error("Timestamp cannot be negative")]
    Negative,

    /// Timestamp is NaN or infinite
    #[error("Timestamp is not a finite number: {0}")]
    NonFinite(String),

    /// Invalid numeric value for a component
    #[error("Invalid {0} value: {1}")]
    InvalidValue(&'static str, String),

    /// Invalid timestamp format
    #[error("Invalid timestamp format '{0}'. Use SS, SS.mmm, MM:SS or HH:MM:SS")]
    InvalidFormat(String),

    /// Timestamp exceeds maximum allowed duration
    #[error("Timestamp exceeds maximum allowed duration ({} hours)", .0 / 3600.0)]
    ExceedsMaxDuration(f64),
}

/// Parse a timestamp string to total seconds.
///
/// Supports formats:
/// - `SS` or `SS.mmm`, optionally suffixed with a seconds unit (`s`, `sec`, `seconds`)
/// - `MM:SS` or `MM:SS.mmm`
/// - `HH:MM:SS` or `HH:MM:SS.mmm`
///
/// The result is always finite and non-negative.
///
/// # Examples
/// ```
/// use litterscan_models::timestamp::parse_timestamp;
/// assert_eq!(parse_timestamp("5.2").unwrap(), 5.2);
/// assert_eq!(parse_timestamp("01:05").unwrap(), 65.0);
/// assert!(parse_timestamp("not-a-number").is_err());
/// ```
pub fn parse_timestamp(ts: &str) -> Result<f64, TimestampError> {
    let ts = ts.trim();
    if ts.is_empty() {
        return Err(TimestampError::Empty);
    }

    let parts: Vec<&str> = ts.split(':').collect();
    let seconds = match parts.as_slice() {
        [secs] => parse_component("seconds", strip_seconds_unit(secs))?,
        [mins, secs] => parse_component("minutes", mins)? * 60.0 + parse_component("seconds", secs)?,
        [hours, mins, secs] => {
            parse_component("hours", hours)? * 3600.0
                + parse_component("minutes", mins)? * 60.0
                + parse_component("seconds", secs)?
        }
        _ => return Err(TimestampError::InvalidFormat(ts.to_string())),
    };

    if seconds > MAX_VIDEO_DURATION_SECS {
        return Err(TimestampError::ExceedsMaxDuration(MAX_VIDEO_DURATION_SECS));
    }

    Ok(seconds)
}

/// Drop a trailing seconds unit (`s`, `sec`, `secs`, `second`, `seconds`).
fn strip_seconds_unit(value: &str) -> &str {
    let number_end = value
        .trim_end_matches(|c: char| c.is_ascii_alphabetic())
        .len();
    let unit = value[number_end..].to_ascii_lowercase();
    match unit.as_str() {
        "s" | "sec" | "secs" | "second" | "seconds" => value[..number_end].trim_end(),
        _ => value,
    }
}

fn parse_component(name: &'static str, value: &str) -> Result<f64, TimestampError> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| TimestampError::InvalidValue(name, value.to_string()))?;

    // `f64::from_str` accepts "NaN" and "inf"
    if !parsed.is_finite() {
        return Err(TimestampError::NonFinite(value.to_string()));
    }
    if parsed < 0.0 {
        return Err(TimestampError::Negative);
    }
    Ok(parsed)
}
