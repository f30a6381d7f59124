//! Line layouts for the two event kinds.
//!
//! Instance events: `<id>[ (<name>)]: <code> <description>`.
//! Cache events: `<source id> (<source type>): <message> - <RFC 3339 time>`.

use std::io::{self, Write};

use chrono::SecondsFormat;
use common::{CacheEvent, InstanceEvent, ResourceStatus};

pub fn format_instance_event(event: &InstanceEvent, name: &str) -> String {
    let mut line = event.resource_id.clone();
    if !name.is_empty() {
        line.push_str(&format!(" ({})", name));
    }
    line.push_str(&format!(": {} {}", event.code, event.description));
    line
}

pub fn format_cache_event(event: &CacheEvent) -> String {
    format!(
        "{} ({}): {} - {}",
        event.source_id,
        event.source_type,
        event.message,
        event.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    )
}

/// Writes one line per nested event, in feed order. Returns the line count.
pub fn write_resource_events<W: Write>(out: &mut W, status: &ResourceStatus, name: &str) -> io::Result<usize> {
    for event in &status.events {
        writeln!(out, "{}", format_instance_event(event, name))?;
    }
    Ok(status.events.len())
}

pub fn write_cache_events<W: Write>(out: &mut W, events: &[CacheEvent]) -> io::Result<usize> {
    for event in events {
        writeln!(out, "{}", format_cache_event(event))?;
    }
    Ok(events.len())
}
