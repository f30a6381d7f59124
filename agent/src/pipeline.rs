use std::io::Write;

use anyhow::{Context, Result};
use common::{EventFilter, LookbackWindow, NameErrorPolicy};
use log::{debug, info};

use crate::collectors::{fetch_cache_events, fetch_status_events, CacheProvider, ComputeProvider};
use crate::report::{write_cache_events, write_resource_events};
use crate::resolver::resolve_name_with_policy;

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub filter: EventFilter,
    pub lookback: LookbackWindow,
    pub name_errors: NameErrorPolicy,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            filter: EventFilter::maintenance(),
            lookback: LookbackWindow::default(),
            name_errors: NameErrorPolicy::Abort,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub resources: usize,
    pub instance_lines: usize,
    pub cache_lines: usize,
}

/// Runs both pipelines in order and writes the report to `out`.
///
/// Each instance's lines are written as soon as its name is known, so on a
/// failure the lines for earlier instances are already on `out`. The cache
/// feed is only queried once every instance line has been written.
pub async fn run_report<C, E, W>(
    compute: &C,
    cache: &E,
    options: &ReportOptions,
    out: &mut W,
) -> Result<ReportSummary>
where
    C: ComputeProvider + ?Sized,
    E: CacheProvider + ?Sized,
    W: Write,
{
    let mut summary = ReportSummary::default();

    let statuses = fetch_status_events(compute, &options.filter).await?;
    summary.resources = statuses.len();

    for status in &statuses {
        let name = resolve_name_with_policy(compute, &status.resource_id, options.name_errors).await?;
        debug!("Writing {} events for {}", status.events.len(), status.resource_id);
        summary.instance_lines += write_resource_events(out, status, &name)
            .context("writing instance events")?;
    }
    out.flush().context("flushing report")?;

    let events = fetch_cache_events(cache, options.lookback).await?;
    summary.cache_lines = write_cache_events(out, &events).context("writing cache events")?;
    out.flush().context("flushing report")?;

    info!(
        "Report complete: {} instance lines from {} instances, {} cache lines",
        summary.instance_lines, summary.resources, summary.cache_lines
    );
    Ok(summary)
}
