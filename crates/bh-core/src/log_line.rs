//! Classification of single `pmset -g log` lines.
//!
//! A power log interleaves many kinds of records. Only three entry types
//! carry a usable charge reading:
//!
//! ```text
//! 2016-12-14 01:36:31 -0500 Wake        Wake from Normal Sleep [CDNVA] due to EC.LidOpen/Lid Open: Using BATT (Charge:30%)
//! 2016-12-14 01:56:29 -0500 Assertions  Summary- [System: PrevIdle PrevDisp DeclUser kDisp] Using AC(Charge: 26)
//! 2016-12-15 03:10:05 -0500 Sleep       Entering Sleep state due to 'Clamshell Sleep':TCPKeepAlive=inactive Using Batt (Charge:20%) 10805 secs
//! ```
//!
//! Everything else is dropped.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::DateTime;
use regex::Regex;

use crate::event::{Event, EventKind};
use crate::types::{ChargePercent, PowerSource};

/// Timestamp, entry type, power-source marker and charge, in that order.
static LOG_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(\d{4}-\d{2}-\d{2}\s\d{2}:\d{2}:\d{2}\s\S+)\s+(wake|sleep|assertions)\s+.*using\s+(batt|ac).*charge:\s*(\d+)",
    )
    .unwrap()
});

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Log entry types that report a charge reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    Wake,
    Sleep,
    Assertions,
}

impl EntryType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Wake => "wake",
            Self::Sleep => "sleep",
            Self::Assertions => "assertions",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = UnknownEntryType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Wake, Self::Sleep, Self::Assertions]
            .into_iter()
            .find(|entry| entry.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownEntryType(s.to_string()))
    }
}

/// Error type for entry type tokens outside the known vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log entry type: {0}")]
pub struct UnknownEntryType(String);

/// Maps an entry type and power source to the power state it reports.
///
/// Going to sleep on battery is not discharge at the awake rate, so it is
/// reported as [`EventKind::Suspended`]: it closes a discharge window but
/// never opens one.
#[must_use]
pub const fn classify(entry: EntryType, source: PowerSource) -> EventKind {
    match (entry, source) {
        (EntryType::Wake | EntryType::Assertions, PowerSource::Battery) => EventKind::Discharging,
        (EntryType::Sleep, PowerSource::Battery) => EventKind::Suspended,
        (_, PowerSource::Ac) => EventKind::Charging,
    }
}

/// Parses one raw log line.
///
/// Returns `None` for anything that is not a charge-bearing power event,
/// including lines whose timestamp lacks a parseable UTC offset or whose
/// charge falls outside 0..=100.
pub fn parse_line(line: &str) -> Option<Event> {
    let caps = LOG_LINE_RE.captures(line)?;

    let timestamp = match DateTime::parse_from_str(&caps[1], TIMESTAMP_FORMAT) {
        Ok(ts) => ts,
        Err(e) => {
            tracing::trace!(error = %e, timestamp = &caps[1], "skipping line with bad timestamp");
            return None;
        }
    };
    let entry: EntryType = caps[2].parse().ok()?;
    let source: PowerSource = caps[3].parse().ok()?;
    let charge = caps[4]
        .parse::<u32>()
        .ok()
        .and_then(|value| ChargePercent::new(value).ok());
    let Some(charge) = charge else {
        tracing::trace!(charge = &caps[4], "skipping line with invalid charge");
        return None;
    };

    Some(Event::new(timestamp, classify(entry, source), charge))
}
