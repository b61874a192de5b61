//! Shared formatting helpers for CLI commands.

use chrono::{DateTime, FixedOffset, TimeDelta};

/// Log-style timestamp, keeping the original offset.
pub fn format_timestamp(ts: &DateTime<FixedOffset>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S %z").to_string()
}

/// Formats a duration as "Xh Ym" if >= 1 hour, "Ym" otherwise.
/// Negative durations are treated as 0m.
pub fn format_duration(duration: TimeDelta) -> String {
    let total_minutes = duration.num_minutes().max(0);
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours >= 1 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Hours with two decimals and an `h` suffix.
pub fn format_hours(hours: f64) -> String {
    format!("{hours:.2}h")
}
