use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use common::{CacheEvent, EventFilter, LookbackWindow, ResourceStatus};
use log::info;

/// Compute-instance feed: status events plus per-instance tag lookups.
#[async_trait]
pub trait ComputeProvider {
    async fn describe_instance_status(&self, filter: &EventFilter) -> Result<Vec<ResourceStatus>>;

    async fn describe_instance_tags(&self, resource_id: &str) -> Result<HashMap<String, String>>;
}

/// Managed-cache feed, queried over a window ending now.
#[async_trait]
pub trait CacheProvider {
    async fn describe_cache_events(&self, window: LookbackWindow) -> Result<Vec<CacheEvent>>;
}

pub async fn fetch_status_events<P>(provider: &P, filter: &EventFilter) -> Result<Vec<ResourceStatus>>
where
    P: ComputeProvider + ?Sized,
{
    if filter.is_empty() {
        bail!("event filter has no codes");
    }
    info!("Fetching instance status events for codes: {}", filter.codes().join(", "));

    let statuses = provider
        .describe_instance_status(filter)
        .await
        .context("describing instance status")?;

    let events: usize = statuses.iter().map(|s| s.events.len()).sum();
    info!("{} instances with {} scheduled events", statuses.len(), events);
    Ok(statuses)
}

pub async fn fetch_cache_events<P>(provider: &P, window: LookbackWindow) -> Result<Vec<CacheEvent>>
where
    P: CacheProvider + ?Sized,
{
    info!(
        "Fetching cache events from the last {} minutes (since {})",
        window.minutes(),
        window.start(Utc::now()).to_rfc3339()
    );

    let events = provider
        .describe_cache_events(window)
        .await
        .context("describing cache events")?;

    info!("{} cache events", events.len());
    Ok(events)
}
