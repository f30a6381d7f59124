//! Aggregates EC2 scheduled events and ElastiCache events into one report.

pub mod aws;
pub mod collectors;
pub mod pipeline;
pub mod report;
pub mod resolver;

pub use aws::{load_sdk_config, Ec2Provider, ElastiCacheProvider};
pub use collectors::{CacheProvider, ComputeProvider};
pub use pipeline::{run_report, ReportOptions, ReportSummary};
