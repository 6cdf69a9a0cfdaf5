//! Date codec: local editable date-times to UTC wire timestamps and back
//! to long-form display strings.
//!
//! The editor holds a naive `YYYY-MM-DDTHH:MM` value with no timezone. It
//! is resolved in the local timezone only when a submission payload is
//! built. The `*_in` variants take the timezone explicitly; the plain
//! functions use [`chrono::Local`].

use std::fmt;

use chrono::{DateTime, Local, LocalResult, NaiveDateTime, SecondsFormat, TimeDelta, TimeZone, Utc};

/// Long-form display pattern, e.g. `Tuesday, 31 December 2024, 17:00`.
pub const DISPLAY_FORMAT: &str = "%A, %-d %B %Y, %H:%M";

/// Shown in place of a timestamp that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid date";

/// Accepted editor layouts. `%.f` also matches an absent fraction.
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Errors produced by the date codec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// The input is not a recognizable date-time.
    #[error("invalid date: {0:?}")]
    InvalidDate(String),
}

/// Parses an editor value as a naive local date-time.
///
/// # Errors
///
/// Returns [`DateError::InvalidDate`] if no accepted layout matches.
pub fn parse_local(local: &str) -> Result<NaiveDateTime, DateError> {
    let trimmed = local.trim();
    LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| DateError::InvalidDate(local.to_string()))
}

/// Converts an editor value to a UTC wire timestamp using the local timezone.
///
/// An empty value converts to an empty string; the server reports it.
///
/// # Errors
///
/// Returns [`DateError::InvalidDate`] if the value cannot be parsed.
pub fn to_wire_format(local: &str) -> Result<String, DateError> {
    to_wire_format_in(&Local, local)
}

/// [`to_wire_format`] with an explicit timezone.
///
/// # Errors
///
/// Returns [`DateError::InvalidDate`] if the value cannot be parsed or does
/// not exist in `tz`.
pub fn to_wire_format_in<Tz: TimeZone>(tz: &Tz, local: &str) -> Result<String, DateError> {
    if local.trim().is_empty() {
        return Ok(String::new());
    }
    let naive = parse_local(local)?;
    let resolved =
        resolve_local(tz, naive).ok_or_else(|| DateError::InvalidDate(local.to_string()))?;
    Ok(resolved
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Ambiguous times take the earlier instant; times in a DST gap move
/// forward by an hour.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt),
        LocalResult::None => {
            let shifted = naive.checked_add_signed(TimeDelta::hours(1))?;
            tz.from_local_datetime(&shifted).earliest()
        }
    }
}

/// Parses a wire timestamp (RFC 3339).
///
/// # Errors
///
/// Returns [`DateError::InvalidDate`] if the string is not RFC 3339.
pub fn parse_wire(wire: &str) -> Result<DateTime<Utc>, DateError> {
    DateTime::parse_from_rfc3339(wire.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DateError::InvalidDate(wire.to_string()))
}

/// Renders a wire timestamp for people, in the local timezone.
///
/// # Errors
///
/// Returns [`DateError::InvalidDate`] if the timestamp cannot be parsed.
pub fn to_display_format(wire: &str) -> Result<String, DateError> {
    to_display_format_in(&Local, wire)
}

/// [`to_display_format`] with an explicit timezone.
///
/// # Errors
///
/// Returns [`DateError::InvalidDate`] if the timestamp cannot be parsed.
pub fn to_display_format_in<Tz>(tz: &Tz, wire: &str) -> Result<String, DateError>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let instant = parse_wire(wire)?;
    Ok(instant.with_timezone(tz).format(DISPLAY_FORMAT).to_string())
}

/// Display path that never fails: malformed input renders [`INVALID_DATE`].
#[must_use]
pub fn display_or_fallback(wire: &str) -> String {
    display_or_fallback_in(&Local, wire)
}

/// [`display_or_fallback`] with an explicit timezone.
#[must_use]
pub fn display_or_fallback_in<Tz>(tz: &Tz, wire: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    to_display_format_in(tz, wire).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "unparseable timestamp in display path");
        INVALID_DATE.to_string()
    })
}
