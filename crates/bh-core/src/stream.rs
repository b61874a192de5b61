//! Event streams built from raw log text.

use crate::event::Event;
use crate::log_line::parse_line;

/// Lazily parses lines into events, preserving input order.
///
/// Lines that are not power events are skipped. The log is assumed to be
/// chronological already; events are never re-sorted.
pub fn parse_events<I>(lines: I) -> impl Iterator<Item = Event>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    lines.into_iter().filter_map(|line| parse_line(line.as_ref()))
}

/// Parses a whole log into events.
pub fn parse_log(text: &str) -> Vec<Event> {
    let events: Vec<Event> = parse_events(text.lines()).collect();
    tracing::debug!(events = events.len(), "parsed power log");
    events
}
