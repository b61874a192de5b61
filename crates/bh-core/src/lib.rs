//! Core domain logic for battery history.
//!
//! This crate contains the pure, I/O-free pipeline:
//! - Line parsing: classifying `pmset -g log` lines into power events
//! - Event streams: turning raw log text into ordered events
//! - Discharge reconstruction: folding events into validated battery-only periods
//! - Metrics: elapsed time, charge lost and extrapolated endurance per period

pub mod discharge;
pub mod event;
pub mod log_line;
pub mod metrics;
pub mod stream;
pub mod types;

pub use discharge::{
    DischargePeriod, PeriodRejection, Reconstruction, Reconstructor, discharge_periods,
    reconstruct,
};
pub use event::{Event, EventKind};
pub use log_line::{EntryType, UnknownEntryType, classify, parse_line};
pub use metrics::{Metrics, MetricsColumn, MetricsMatrix, compute};
pub use stream::{parse_events, parse_log};
pub use types::{ChargePercent, PowerSource, ValidationError};
