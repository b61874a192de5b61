//! Runs the core pipeline over an acquired log.

use anyhow::Result;
use bh_core::{DischargePeriod, Event, parse_log, reconstruct};

use crate::Config;
use crate::acquire::read_log;
use crate::cli::LogArgs;
use crate::sampler::{self, LiveSample};

/// Discharge periods recovered from one log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    /// Number of power events parsed from the log.
    pub events: usize,
    /// Validated periods in log order.
    pub periods: Vec<DischargePeriod>,
    /// Start of a discharge window that is still open.
    pub open: Option<Event>,
    /// Whether the last period was closed against a live reading.
    pub closed_live: bool,
}

impl Analysis {
    /// Parses and reconstructs periods from raw log text.
    pub fn from_log(text: &str) -> Self {
        let events = parse_log(text);
        let count = events.len();
        let reconstruction = reconstruct(events);
        Self {
            events: count,
            periods: reconstruction.periods,
            open: reconstruction.open,
            closed_live: false,
        }
    }

    /// Closes the open window against a live reading.
    ///
    /// A reading that shows no charge lost leaves the window open.
    pub fn close_with(&mut self, sample: &LiveSample) {
        let Some(start) = self.open.clone() else {
            return;
        };
        match DischargePeriod::new(start, sample.to_event()) {
            Ok(period) => {
                self.periods.push(period);
                self.open = None;
                self.closed_live = true;
            }
            Err(reason) => {
                tracing::debug!(%reason, "live reading did not close the open period");
            }
        }
    }
}

/// Acquires the log and analyzes it, sampling the battery if asked to close
/// a trailing window.
pub fn load(args: &LogArgs, config: &Config) -> Result<Analysis> {
    let text = read_log(args.input.as_deref(), config)?;
    let mut analysis = Analysis::from_log(&text);

    if analysis.open.is_some() && (args.live || config.close_open_period) {
        match sampler::sample(config) {
            Ok(sample) => analysis.close_with(&sample),
            Err(e) => tracing::warn!(error = %e, "could not take a live battery reading"),
        }
    }

    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bh_core::{ChargePercent, PowerSource};
    use chrono::DateTime;
    use std::io::Write;

    const OPEN_LOG: &str = "\
2016-12-14 01:36:31 -0500 Wake \tWake from Normal Sleep: Using BATT (Charge:30%)
2016-12-14 01:56:29 -0500 Assertions \tSummary- [System: kDisp] Using AC(Charge: 26)
2016-12-16 08:00:00 -0500 Wake \tWake from Normal Sleep: Using BATT (Charge:90%)
";

    fn sample(ts: &str, charge: u32, source: PowerSource) -> LiveSample {
        LiveSample {
            timestamp: DateTime::parse_from_rfc3339(ts).unwrap(),
            charge: ChargePercent::new(charge).unwrap(),
            source,
        }
    }

    #[test]
    fn test_from_log_counts_events_and_open_window() {
        let analysis = Analysis::from_log(OPEN_LOG);

        assert_eq!(analysis.events, 3);
        assert_eq!(analysis.periods.len(), 1);
        assert_eq!(analysis.open.as_ref().map(|e| e.charge.value()), Some(90));
        assert!(!analysis.closed_live);
    }

    #[test]
    fn test_close_with_live_reading() {
        let mut analysis = Analysis::from_log(OPEN_LOG);

        analysis.close_with(&sample("2016-12-16T10:00:00-05:00", 70, PowerSource::Battery));

        assert_eq!(analysis.periods.len(), 2);
        assert!(analysis.open.is_none());
        assert!(analysis.closed_live);
        assert_eq!(analysis.periods[1].charge_delta(), 20);
    }

    #[test]
    fn test_close_without_loss_keeps_window_open() {
        let mut analysis = Analysis::from_log(OPEN_LOG);

        analysis.close_with(&sample("2016-12-16T10:00:00-05:00", 95, PowerSource::Ac));

        assert_eq!(analysis.periods.len(), 1);
        assert!(analysis.open.is_some());
        assert!(!analysis.closed_live);
    }

    #[test]
    fn test_close_with_nothing_open_is_noop() {
        let mut analysis = Analysis::from_log("");
        analysis.close_with(&sample("2016-12-16T10:00:00-05:00", 50, PowerSource::Battery));
        assert_eq!(analysis, Analysis::default());
    }

    #[test]
    fn test_load_skips_sampler_when_log_is_closed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for line in OPEN_LOG.lines().take(2) {
            writeln!(file, "{line}").unwrap();
        }
        let config = Config {
            sample_command: vec![],
            ..Config::default()
        };
        let args = LogArgs {
            input: Some(file.path().to_path_buf()),
            live: true,
        };

        let analysis = load(&args, &config).unwrap();
        assert_eq!(analysis.periods.len(), 1);
        assert!(!analysis.closed_live);
    }

    #[test]
    fn test_load_tolerates_sampler_failure() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(OPEN_LOG.as_bytes()).unwrap();
        let config = Config {
            sample_command: vec![],
            ..Config::default()
        };
        let args = LogArgs {
            input: Some(file.path().to_path_buf()),
            live: true,
        };

        let analysis = load(&args, &config).unwrap();
        assert_eq!(analysis.periods.len(), 1);
        assert!(analysis.open.is_some());
    }
}
