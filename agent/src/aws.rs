use std::collections::HashMap;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_ec2::config::Region;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::types::{Filter, InstanceStatus, Reservation};
use chrono::{DateTime, Utc};
use common::{CacheEvent, EventFilter, InstanceEvent, LookbackWindow, ResourceStatus};
use log::{debug, info};

use crate::collectors::{CacheProvider, ComputeProvider};

pub const EVENT_CODE_FILTER: &str = "event.code";

/// Shared SDK config for `region`, credentials from the default chain.
pub async fn load_sdk_config(region: &str) -> SdkConfig {
    info!("Loading AWS configuration for {}", region);
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await
}

pub struct Ec2Provider {
    client: aws_sdk_ec2::Client,
}

impl Ec2Provider {
    pub fn new(config: &SdkConfig) -> Self {
        Self { client: aws_sdk_ec2::Client::new(config) }
    }
}

#[async_trait]
impl ComputeProvider for Ec2Provider {
    async fn describe_instance_status(&self, filter: &EventFilter) -> Result<Vec<ResourceStatus>> {
        let output = self
            .client
            .describe_instance_status()
            .filters(
                Filter::builder()
                    .name(EVENT_CODE_FILTER)
                    .set_values(Some(filter.codes().to_vec()))
                    .build(),
            )
            .send()
            .await
            .map_err(|e| anyhow!("{}", DisplayErrorContext(&e)))?;

        Ok(output.instance_statuses().iter().map(to_resource_status).collect())
    }

    async fn describe_instance_tags(&self, resource_id: &str) -> Result<HashMap<String, String>> {
        let output = self
            .client
            .describe_instances()
            .instance_ids(resource_id)
            .send()
            .await
            .map_err(|e| anyhow!("{}", DisplayErrorContext(&e)))?;

        Ok(first_instance_tags(output.reservations()))
    }
}

pub struct ElastiCacheProvider {
    client: aws_sdk_elasticache::Client,
}

impl ElastiCacheProvider {
    pub fn new(config: &SdkConfig) -> Self {
        Self { client: aws_sdk_elasticache::Client::new(config) }
    }
}

#[async_trait]
impl CacheProvider for ElastiCacheProvider {
    async fn describe_cache_events(&self, window: LookbackWindow) -> Result<Vec<CacheEvent>> {
        let duration = i32::try_from(window.minutes())
            .with_context(|| format!("lookback of {} minutes is too large", window.minutes()))?;

        let output = self
            .client
            .describe_events()
            .duration(duration)
            .send()
            .await
            .map_err(|e| anyhow!("{}", aws_sdk_elasticache::error::DisplayErrorContext(&e)))?;

        Ok(output.events().iter().map(to_cache_event).collect())
    }
}

fn to_resource_status(status: &InstanceStatus) -> ResourceStatus {
    let resource_id = status.instance_id().unwrap_or_default().to_string();
    let events = status
        .events()
        .iter()
        .map(|event| InstanceEvent {
            resource_id: resource_id.clone(),
            code: event.code().map(|c| c.as_str()).unwrap_or_default().to_string(),
            description: event.description().unwrap_or_default().to_string(),
        })
        .collect();
    ResourceStatus { resource_id, events }
}

// Only the first instance of the first reservation is consulted; a lookup by
// a single id never returns more.
fn first_instance_tags(reservations: &[Reservation]) -> HashMap<String, String> {
    let Some(instance) = reservations.first().and_then(|r| r.instances().first()) else {
        debug!("No instance in DescribeInstances response");
        return HashMap::new();
    };
    instance
        .tags()
        .iter()
        .filter_map(|tag| Some((tag.key()?.to_string(), tag.value().unwrap_or_default().to_string())))
        .collect()
}

fn to_cache_event(event: &aws_sdk_elasticache::types::Event) -> CacheEvent {
    let timestamp = event
        .date()
        .and_then(|d| DateTime::<Utc>::from_timestamp(d.secs(), d.subsec_nanos()))
        .unwrap_or_default();
    CacheEvent {
        source_id: event.source_identifier().unwrap_or_default().to_string(),
        source_type: event.source_type().map(|t| t.as_str()).unwrap_or_default().to_string(),
        message: event.message().unwrap_or_default().to_string(),
        timestamp,
    }
}
