//! Power-state events recovered from the log.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::types::{ChargePercent, ValidationError};

/// A single power-state observation.
///
/// Timestamps keep the offset written in the log so that arithmetic across
/// a daylight-saving change stays correct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// When the line was logged.
    pub timestamp: DateTime<FixedOffset>,
    /// What the machine was doing.
    pub kind: EventKind,
    /// Battery charge at that moment.
    pub charge: ChargePercent,
}

impl Event {
    pub const fn new(
        timestamp: DateTime<FixedOffset>,
        kind: EventKind,
        charge: ChargePercent,
    ) -> Self {
        Self {
            timestamp,
            kind,
            charge,
        }
    }
}

/// The power state an event reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Awake and running from the battery.
    Discharging,
    /// Plugged in.
    Charging,
    /// Going to sleep on battery. Ends a discharge window without starting one.
    Suspended,
}

impl EventKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Discharging => "discharging",
            Self::Charging => "charging",
            Self::Suspended => "suspended",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "discharging" => Ok(Self::Discharging),
            "charging" => Ok(Self::Charging),
            "suspended" => Ok(Self::Suspended),
            _ => Err(ValidationError::InvalidEventKind {
                value: s.to_string(),
            }),
        }
    }
}
