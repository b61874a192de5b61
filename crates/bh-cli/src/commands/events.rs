//! Events command for inspecting what the parser recovered.
//!
//! This module outputs parsed power events as JSONL for debugging.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use bh_core::parse_events;

use crate::Config;
use crate::acquire::read_log;

/// Writes one JSON object per parsed event, returning how many were written.
pub fn write_events<W: Write>(writer: &mut W, text: &str) -> Result<usize> {
    let mut count = 0;
    for event in parse_events(text.lines()) {
        serde_json::to_writer(&mut *writer, &event)?;
        writeln!(writer)?;
        count += 1;
    }
    Ok(count)
}

/// Runs the events command, outputting events as JSONL.
pub fn run<W: Write>(writer: &mut W, input: Option<&Path>, config: &Config) -> Result<()> {
    let text = read_log(input, config)?;
    let count = write_events(writer, &text)?;
    tracing::debug!(count, "wrote events");
    Ok(())
}
