//! Live battery readings from `pmset -g batt`.
//!
//! ```text
//! Now drawing from 'Battery Power'
//!  -InternalBattery-0 (id=4653155)	85%; discharging; 4:12 remaining present: true
//! ```

use std::sync::LazyLock;

use anyhow::{Context, Result};
use bh_core::{ChargePercent, Event, EventKind, PowerSource, ValidationError};
use chrono::{DateTime, FixedOffset, Local};
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::Config;
use crate::acquire::run_command;

static SOURCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Now drawing from '([^']+?) Power'").unwrap());

static CHARGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)%").unwrap());

/// Errors from interpreting sampler output.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SampleError {
    #[error("no power source line in battery status")]
    MissingSource,
    #[error("unsupported power source: {0}")]
    UnknownSource(String),
    #[error("no charge percentage in battery status")]
    MissingCharge,
    #[error("invalid charge in battery status")]
    InvalidCharge(#[source] ValidationError),
}

/// A battery reading taken now rather than read from the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveSample {
    pub timestamp: DateTime<FixedOffset>,
    pub charge: ChargePercent,
    pub source: PowerSource,
}

impl LiveSample {
    /// The reading as an event that can close a discharge window.
    pub fn to_event(&self) -> Event {
        let kind = match self.source {
            PowerSource::Battery => EventKind::Discharging,
            PowerSource::Ac => EventKind::Charging,
        };
        Event::new(self.timestamp, kind, self.charge)
    }
}

/// Parses battery status output taken at `timestamp`.
pub fn parse_status(
    text: &str,
    timestamp: DateTime<FixedOffset>,
) -> Result<LiveSample, SampleError> {
    let source = SOURCE_RE
        .captures(text)
        .ok_or(SampleError::MissingSource)?;
    let source: PowerSource = source[1]
        .parse()
        .map_err(|_| SampleError::UnknownSource(source[1].to_string()))?;

    let charge = CHARGE_RE.captures(text).ok_or(SampleError::MissingCharge)?;
    let value: u32 = charge[1].parse().map_err(|_| SampleError::MissingCharge)?;
    let charge = ChargePercent::new(value).map_err(SampleError::InvalidCharge)?;

    Ok(LiveSample {
        timestamp,
        charge,
        source,
    })
}

/// Takes a reading with [`Config::sample_command`].
pub fn sample(config: &Config) -> Result<LiveSample> {
    let text = run_command(&config.sample_command)?;
    let sample = parse_status(&text, Local::now().fixed_offset())
        .context("failed to parse battery status")?;
    tracing::debug!(?sample, "took live battery sample");
    Ok(sample)
}
