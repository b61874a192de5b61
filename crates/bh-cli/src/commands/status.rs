//! Status command for showing the current battery reading.

use std::io::Write;

use anyhow::Result;

use crate::Config;
use crate::commands::util::format_timestamp;
use crate::sampler::{self, LiveSample};

/// Writes a short human-readable description of a reading.
pub fn write_status<W: Write>(writer: &mut W, sample: &LiveSample) -> Result<()> {
    writeln!(writer, "Battery status")?;
    writeln!(writer, "Time:   {}", format_timestamp(&sample.timestamp))?;
    writeln!(writer, "Charge: {}", sample.charge)?;
    writeln!(writer, "Source: {}", sample.source)?;
    Ok(())
}

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let sample = sampler::sample(config)?;
    write_status(writer, &sample)
}
