//! Report command: discharge periods and battery endurance estimates.
//!
//! Averages are computed here rather than in the core: the core only yields
//! per-period rows, the report decides how to aggregate and show them.

use std::fmt::Write;
use std::io;

use anyhow::Result;
use bh_core::{Event, Metrics, MetricsColumn, MetricsMatrix, compute};
use chrono::TimeDelta;
use serde::Serialize;

use crate::Config;
use crate::analysis::{self, Analysis};
use crate::cli::LogArgs;
use crate::commands::util::{format_duration, format_hours, format_timestamp};

// ========== Summary Statistics ==========

/// Aggregate figures over every period in one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub periods: usize,
    pub total_elapsed_hours: f64,
    pub total_charge_delta: u32,
    /// Plain mean of the per-period estimates.
    pub mean_estimate_hours: f64,
    /// Mean of the per-period estimates weighted by time spent discharging.
    pub weighted_mean_estimate_hours: f64,
    pub min_estimate_hours: f64,
    pub max_estimate_hours: f64,
}

impl Summary {
    /// Returns `None` for an empty matrix; there is nothing to average.
    #[expect(
        clippy::cast_precision_loss,
        reason = "period counts are tiny compared to f64 precision"
    )]
    pub fn from_matrix(matrix: &MetricsMatrix) -> Option<Self> {
        if matrix.is_empty() {
            return None;
        }

        let elapsed = matrix.column(MetricsColumn::ElapsedHours);
        let estimates = matrix.column(MetricsColumn::EstimatedFullDischargeHours);

        let total_elapsed_hours: f64 = elapsed.iter().sum();
        let mean_estimate_hours = estimates.iter().sum::<f64>() / estimates.len() as f64;
        // Zero-length periods only: every estimate is 0, so weights add nothing.
        let weighted_mean_estimate_hours = if total_elapsed_hours > 0.0 {
            elapsed
                .iter()
                .zip(&estimates)
                .map(|(hours, estimate)| hours * estimate)
                .sum::<f64>()
                / total_elapsed_hours
        } else {
            mean_estimate_hours
        };

        Some(Self {
            periods: matrix.len(),
            total_elapsed_hours,
            total_charge_delta: matrix
                .rows()
                .iter()
                .map(|m| u32::from(m.charge_delta))
                .sum(),
            mean_estimate_hours,
            weighted_mean_estimate_hours,
            min_estimate_hours: estimates.iter().copied().fold(f64::INFINITY, f64::min),
            max_estimate_hours: estimates.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    }
}

// ========== Text Output ==========

fn table_row(start: &str, used: &str, elapsed: &str, estimate: &str) -> String {
    format!("{start:<25}  {used:>5}  {elapsed:>8}  {estimate:>8}")
}

/// Formats the human-readable report.
pub fn format_report(analysis: &Analysis) -> String {
    let mut output = String::new();

    writeln!(output, "BATTERY REPORT").unwrap();
    writeln!(output, "──────────────").unwrap();
    writeln!(output, "Events parsed: {}", analysis.events).unwrap();
    writeln!(output, "Periods:       {}", analysis.periods.len()).unwrap();
    writeln!(output).unwrap();

    let matrix = compute(&analysis.periods);
    let Some(summary) = Summary::from_matrix(&matrix) else {
        writeln!(output, "No discharge periods found.").unwrap();
        write_open_window(&mut output, analysis.open.as_ref());
        writeln!(output).unwrap();
        writeln!(output, "Hint: Run 'bh events' to see what was parsed.").unwrap();
        return output;
    };

    writeln!(
        output,
        "{}",
        table_row("START", "USED", "ELAPSED", "ESTIMATE")
    )
    .unwrap();
    for (period, metrics) in analysis.periods.iter().zip(matrix.rows()) {
        writeln!(
            output,
            "{}",
            table_row(
                &format_timestamp(&period.start().timestamp),
                &format!("{}%", metrics.charge_delta),
                &format_hours(metrics.elapsed_hours),
                &format_hours(metrics.estimated_full_discharge_hours),
            )
        )
        .unwrap();
    }

    if analysis.closed_live {
        writeln!(output).unwrap();
        writeln!(output, "Last period closed against a live reading.").unwrap();
    }
    write_open_window(&mut output, analysis.open.as_ref());

    let on_battery: TimeDelta = analysis.periods.iter().map(|p| p.elapsed()).sum();

    writeln!(output).unwrap();
    writeln!(output, "SUMMARY").unwrap();
    writeln!(output, "───────").unwrap();
    writeln!(output, "Time on battery:        {}", format_duration(on_battery)).unwrap();
    writeln!(output, "Charge used:            {}%", summary.total_charge_delta).unwrap();
    writeln!(
        output,
        "Mean estimate:          {}",
        format_hours(summary.mean_estimate_hours)
    )
    .unwrap();
    writeln!(
        output,
        "Weighted mean estimate: {}",
        format_hours(summary.weighted_mean_estimate_hours)
    )
    .unwrap();
    writeln!(
        output,
        "Estimate range:         {} to {}",
        format_hours(summary.min_estimate_hours),
        format_hours(summary.max_estimate_hours)
    )
    .unwrap();

    output
}

fn write_open_window(output: &mut String, open: Option<&Event>) {
    if let Some(start) = open {
        writeln!(output).unwrap();
        writeln!(
            output,
            "Open since {} at {} (not counted; use --live to close it).",
            format_timestamp(&start.timestamp),
            start.charge
        )
        .unwrap();
    }
}

// ========== JSON Output ==========

/// JSON report structure.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub events: usize,
    pub periods: Vec<JsonPeriod<'a>>,
    pub open: Option<&'a Event>,
    pub closed_live: bool,
    pub summary: Option<Summary>,
}

#[derive(Debug, Serialize)]
pub struct JsonPeriod<'a> {
    pub start: &'a Event,
    pub end: &'a Event,
    #[serde(flatten)]
    pub metrics: Metrics,
}

/// Formats the report as JSON.
pub fn format_report_json(analysis: &Analysis) -> Result<String> {
    let matrix = compute(&analysis.periods);
    let report = JsonReport {
        events: analysis.events,
        periods: analysis
            .periods
            .iter()
            .zip(matrix.rows())
            .map(|(period, metrics)| JsonPeriod {
                start: period.start(),
                end: period.end(),
                metrics: *metrics,
            })
            .collect(),
        open: analysis.open.as_ref(),
        closed_live: analysis.closed_live,
        summary: Summary::from_matrix(&matrix),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== Public Interface ==========

/// Runs the report command.
pub fn run<W: io::Write>(
    writer: &mut W,
    args: &LogArgs,
    config: &Config,
    json: bool,
) -> Result<()> {
    let analysis = analysis::load(args, config)?;

    if json {
        let output = format_report_json(&analysis)?;
        writeln!(writer, "{output}")?;
    } else {
        let output = format_report(&analysis);
        write!(writer, "{output}")?;
    }

    Ok(())
}
