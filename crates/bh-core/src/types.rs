//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The charge value was outside 0..=100.
    #[error("charge must be between 0 and 100 percent, got {value}")]
    ChargeOutOfRange { value: u32 },

    /// Invalid power source value.
    #[error("invalid power source: {value}")]
    InvalidPowerSource { value: String },

    /// Invalid event kind value.
    #[error("invalid event kind: {value}")]
    InvalidEventKind { value: String },
}

/// Where the machine was drawing power from when a line was logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerSource {
    /// Internal battery (`Using BATT` / `Using Batt`).
    Battery,
    /// Wall power (`Using AC`).
    Ac,
}

impl PowerSource {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Battery => "battery",
            Self::Ac => "ac",
        }
    }
}

impl fmt::Display for PowerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PowerSource {
    type Err = ValidationError;

    /// Accepts the log markers (`batt`, `ac`) as well as the display form,
    /// ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("batt") || s.eq_ignore_ascii_case("battery") {
            Ok(Self::Battery)
        } else if s.eq_ignore_ascii_case("ac") {
            Ok(Self::Ac)
        } else {
            Err(ValidationError::InvalidPowerSource {
                value: s.to_string(),
            })
        }
    }
}

/// A battery charge reading in whole percent, \[0, 100\].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u8")]
pub struct ChargePercent(u8);

impl ChargePercent {
    /// An empty battery.
    pub const EMPTY: Self = Self(0);

    /// A full battery.
    pub const FULL: Self = Self(100);

    /// Creates a new charge value after validation.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        match u8::try_from(value) {
            Ok(v) if v <= 100 => Ok(Self(v)),
            _ => Err(ValidationError::ChargeOutOfRange { value }),
        }
    }

    /// Returns the charge as a plain integer.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u32> for ChargePercent {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChargePercent> for u8 {
    fn from(c: ChargePercent) -> Self {
        c.0
    }
}

impl fmt::Display for ChargePercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charge_validates_range() {
        assert!(ChargePercent::new(0).is_ok());
        assert!(ChargePercent::new(55).is_ok());
        assert!(ChargePercent::new(100).is_ok());
        assert_eq!(
            ChargePercent::new(101),
            Err(ValidationError::ChargeOutOfRange { value: 101 })
        );
        assert!(ChargePercent::new(300).is_err());
    }

    #[test]
    fn charge_serde_roundtrip() {
        let c = ChargePercent::new(85).unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "85");
        let parsed: ChargePercent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, c);
    }

    #[test]
    fn charge_serde_rejects_out_of_range() {
        let result: Result<ChargePercent, _> = serde_json::from_str("150");
        assert!(result.is_err());
    }

    #[test]
    fn charge_display_has_percent_sign() {
        assert_eq!(ChargePercent::FULL.to_string(), "100%");
        assert_eq!(ChargePercent::EMPTY.to_string(), "0%");
    }

    #[test]
    fn power_source_from_log_markers() {
        assert_eq!("BATT".parse::<PowerSource>().unwrap(), PowerSource::Battery);
        assert_eq!("Batt".parse::<PowerSource>().unwrap(), PowerSource::Battery);
        assert_eq!("AC".parse::<PowerSource>().unwrap(), PowerSource::Ac);
        assert_eq!("ac".parse::<PowerSource>().unwrap(), PowerSource::Ac);
        assert!("ups".parse::<PowerSource>().is_err());
    }

    #[test]
    fn power_source_serde_matches_as_str() {
        for source in [PowerSource::Battery, PowerSource::Ac] {
            let json = serde_json::to_string(&source).unwrap();
            assert_eq!(json, format!("\"{}\"", source.as_str()));
        }
    }
}
