//! Reconstruction of battery discharge periods from an event stream.
//!
//! A discharge period opens on the first [`EventKind::Discharging`] event
//! seen while idle and closes on the next charging or suspended event.
//! Further discharging events in between never move the start.

use chrono::TimeDelta;
use serde::Serialize;
use thiserror::Error;

use crate::event::{Event, EventKind};
use crate::types::ChargePercent;

/// Why a candidate period was thrown away.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PeriodRejection {
    /// The period did not start on battery.
    #[error("period must start with a discharging event, got {kind}")]
    StartNotDischarging { kind: EventKind },

    /// The closing event is older than the opening one.
    #[error("period ends before it starts ({elapsed_seconds}s)")]
    EndBeforeStart { elapsed_seconds: i64 },

    /// The battery did not lose charge over the period.
    #[error("no charge lost: started at {start}, ended at {end}")]
    NoChargeLoss {
        start: ChargePercent,
        end: ChargePercent,
    },
}

/// A validated stretch of time spent running on battery.
///
/// Construction guarantees that `start` is a discharging event, that `end`
/// is not earlier than `start`, and that charge strictly decreased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DischargePeriod {
    start: Event,
    end: Event,
}

impl DischargePeriod {
    /// Validates and builds a period.
    pub fn new(start: Event, end: Event) -> Result<Self, PeriodRejection> {
        if start.kind != EventKind::Discharging {
            return Err(PeriodRejection::StartNotDischarging { kind: start.kind });
        }
        let elapsed = end.timestamp - start.timestamp;
        if elapsed < TimeDelta::zero() {
            return Err(PeriodRejection::EndBeforeStart {
                elapsed_seconds: elapsed.num_seconds(),
            });
        }
        if start.charge <= end.charge {
            return Err(PeriodRejection::NoChargeLoss {
                start: start.charge,
                end: end.charge,
            });
        }
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> &Event {
        &self.start
    }

    pub const fn end(&self) -> &Event {
        &self.end
    }
}

/// Where the reconstructor is in the log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Phase {
    #[default]
    Idle,
    Discharging(Event),
}

/// Single-pass state machine turning events into discharge periods.
#[derive(Debug, Clone, Default)]
pub struct Reconstructor {
    phase: Phase,
}

impl Reconstructor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the next event, returning a period if this event closed one.
    pub fn push(&mut self, event: Event) -> Option<DischargePeriod> {
        match (std::mem::take(&mut self.phase), event.kind) {
            (Phase::Idle, EventKind::Discharging) => {
                self.phase = Phase::Discharging(event);
                None
            }
            (Phase::Idle, EventKind::Charging | EventKind::Suspended) => None,
            (Phase::Discharging(start), EventKind::Discharging) => {
                self.phase = Phase::Discharging(start);
                None
            }
            (Phase::Discharging(start), EventKind::Charging | EventKind::Suspended) => {
                match DischargePeriod::new(start, event) {
                    Ok(period) => Some(period),
                    Err(reason) => {
                        tracing::debug!(%reason, "dropping discharge period");
                        None
                    }
                }
            }
        }
    }

    /// The event that opened the current discharge window, if one is open.
    pub const fn open_start(&self) -> Option<&Event> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Discharging(start) => Some(start),
        }
    }

    /// Ends reconstruction, handing back the start of a still-open window.
    pub fn finish(self) -> Option<Event> {
        match self.phase {
            Phase::Idle => None,
            Phase::Discharging(start) => Some(start),
        }
    }
}

/// Result of folding a whole event stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconstruction {
    /// Closed, validated periods in log order.
    pub periods: Vec<DischargePeriod>,
    /// Start of a discharge window the log never closed.
    pub open: Option<Event>,
}

/// Folds events into discharge periods.
///
/// A trailing open window is reported in [`Reconstruction::open`] and left
/// for the caller to close against a live reading.
pub fn reconstruct<I>(events: I) -> Reconstruction
where
    I: IntoIterator<Item = Event>,
{
    let mut machine = Reconstructor::new();
    let periods: Vec<DischargePeriod> = events
        .into_iter()
        .filter_map(|event| machine.push(event))
        .collect();
    let open = machine.finish();

    tracing::debug!(
        periods = periods.len(),
        open = open.is_some(),
        "reconstructed discharge periods"
    );
    Reconstruction { periods, open }
}

/// Folds events into closed discharge periods, ignoring any open window.
pub fn discharge_periods<I>(events: I) -> Vec<DischargePeriod>
where
    I: IntoIterator<Item = Event>,
{
    reconstruct(events).periods
}
