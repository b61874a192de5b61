//! Periods command: the raw metrics matrix for plotting or spreadsheets.

use std::io::Write;

use anyhow::Result;
use bh_core::{DischargePeriod, MetricsColumn, compute};

use crate::Config;
use crate::analysis;
use crate::cli::{LogArgs, PeriodsFormat};
use crate::commands::report::JsonPeriod;

/// Writes one CSV row per period, matrix columns last.
pub fn write_csv<W: Write>(writer: &mut W, periods: &[DischargePeriod]) -> Result<()> {
    let matrix = compute(periods);

    write!(writer, "start,end,start_charge,end_charge")?;
    for column in MetricsColumn::ALL {
        write!(writer, ",{}", column.as_str())?;
    }
    writeln!(writer)?;

    for (period, m) in periods.iter().zip(matrix.rows()) {
        writeln!(
            writer,
            "{},{},{},{},{:.6},{},{:.6}",
            period.start().timestamp.to_rfc3339(),
            period.end().timestamp.to_rfc3339(),
            period.start().charge.value(),
            period.end().charge.value(),
            m.elapsed_hours,
            m.charge_delta,
            m.estimated_full_discharge_hours,
        )?;
    }

    Ok(())
}

/// Writes the periods as a pretty JSON array.
pub fn write_json<W: Write>(writer: &mut W, periods: &[DischargePeriod]) -> Result<()> {
    let matrix = compute(periods);
    let rows: Vec<JsonPeriod<'_>> = periods
        .iter()
        .zip(matrix.rows())
        .map(|(period, metrics)| JsonPeriod {
            start: period.start(),
            end: period.end(),
            metrics: *metrics,
        })
        .collect();

    serde_json::to_writer_pretty(&mut *writer, &rows)?;
    writeln!(writer)?;
    Ok(())
}

/// Runs the periods command.
pub fn run<W: Write>(
    writer: &mut W,
    args: &LogArgs,
    config: &Config,
    format: PeriodsFormat,
) -> Result<()> {
    let analysis = analysis::load(args, config)?;
    match format {
        PeriodsFormat::Csv => write_csv(writer, &analysis.periods),
        PeriodsFormat::Json => write_json(writer, &analysis.periods),
    }
}
