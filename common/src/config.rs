use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::{bail, Context, Result};

use crate::types::{LookbackWindow, DEFAULT_LOOKBACK_MINUTES};

pub const CONFIG_ENV: &str = "AWS_EVENTS_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "./config/default.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub aws: AwsConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsConfig {
    #[serde(default = "default_region")]
    pub region: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_lookback_minutes")]
    pub lookback_minutes: u32,
    #[serde(default)]
    pub name_errors: NameErrorPolicy,
}

/// What a failed `Name` tag lookup does to the rest of the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameErrorPolicy {
    #[default]
    Abort,
    Unnamed,
}

fn default_region() -> String { "ap-northeast-1".to_string() }
fn default_lookback_minutes() -> u32 { DEFAULT_LOOKBACK_MINUTES }

impl Default for AwsConfig {
    fn default() -> Self {
        Self { region: default_region() }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            lookback_minutes: default_lookback_minutes(),
            name_errors: NameErrorPolicy::default(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path))?;
        Self::parse(&content).with_context(|| format!("parsing config {}", path))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if i32::try_from(config.report.lookback_minutes).is_err() {
            bail!("lookback_minutes {} exceeds {}", config.report.lookback_minutes, i32::MAX);
        }
        Ok(config)
    }

    /// Loads the file named by `AWS_EVENTS_CONFIG` if set, which must exist.
    /// Otherwise loads the default location, or built-in defaults when
    /// nothing is there.
    pub fn load_or_default(configured: Option<&str>) -> Result<Self> {
        Self::load_with_fallback(configured, DEFAULT_CONFIG_PATH)
    }

    fn load_with_fallback(configured: Option<&str>, default_path: &str) -> Result<Self> {
        match configured {
            Some(path) => Self::load(path),
            None if Path::new(default_path).exists() => Self::load(default_path),
            None => Ok(Self::default()),
        }
    }

    /// Path from `AWS_EVENTS_CONFIG`, `None` when the variable is unset.
    pub fn configured_path() -> Option<String> {
        std::env::var(CONFIG_ENV).ok()
    }

    pub fn lookback(&self) -> LookbackWindow {
        LookbackWindow::from_minutes(self.report.lookback_minutes)
    }
}
