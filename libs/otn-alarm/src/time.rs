//! Alarm timestamp conversion
//!
//! Stored times are integer nanoseconds since the epoch. They are displayed as
//! `YYYY-MM-DD HH:MM:SS.mmm`: the value is converted to fractional seconds,
//! the microsecond part is rounded half-to-even, the result is formatted with
//! six fractional digits and the last three are cut off.

use chrono::{DateTime, Local, Utc};

/// Nanoseconds per second
pub const NANOSECONDS: i64 = 1_000_000_000;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Time zone alarm times are displayed in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimestampZone {
    #[default]
    Local,
    Utc,
}

/// Whole seconds and rounded microseconds of a nanosecond timestamp
///
/// Rounding happens on the `f64` seconds value, so sub-microsecond digits
/// follow float precision.
pub fn seconds_and_micros(nanos: i64) -> (i64, u32) {
    let whole = nanos.div_euclid(NANOSECONDS);
    let rest = nanos.rem_euclid(NANOSECONDS);
    let timestamp = whole as f64 + rest as f64 / NANOSECONDS as f64;

    let int_part = timestamp.trunc();
    let frac_part = timestamp - int_part;
    let mut seconds = int_part as i64;
    let mut micros = (frac_part * 1e6).round_ties_even() as i64;

    if micros >= 1_000_000 {
        seconds += 1;
        micros -= 1_000_000;
    } else if micros < 0 {
        seconds -= 1;
        micros += 1_000_000;
    }

    (seconds, micros as u32)
}

/// Format a nanosecond timestamp for display
///
/// Returns `None` when the value is outside the representable date range.
pub fn format_alarm_time(nanos: i64, zone: TimestampZone) -> Option<String> {
    let (seconds, micros) = seconds_and_micros(nanos);
    let utc = DateTime::<Utc>::from_timestamp(seconds, micros * 1_000)?;

    let full = match zone {
        TimestampZone::Local => utc.with_timezone(&Local).format(DISPLAY_FORMAT).to_string(),
        TimestampZone::Utc => utc.format(DISPLAY_FORMAT).to_string(),
    };

    // Drop the microsecond digits, keeping milliseconds
    Some(full[..full.len() - 3].to_string())
}
