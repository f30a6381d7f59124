use chrono::{DateTime, Duration, Utc};

/// Event codes that mark scheduled maintenance on a compute instance.
pub const MAINTENANCE_EVENT_CODES: [&str; 5] = [
    "instance-reboot",
    "instance-stop",
    "instance-retirement",
    "system-reboot",
    "system-maintenance",
];

pub const DEFAULT_LOOKBACK_MINUTES: u32 = 60 * 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceEvent {
    pub resource_id: String,
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceStatus {
    pub resource_id: String,
    pub events: Vec<InstanceEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEvent {
    pub source_id: String,
    pub source_type: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Logical OR over event codes, applied by the compute feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFilter {
    codes: Vec<String>,
}

impl EventFilter {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { codes: codes.into_iter().map(Into::into).collect() }
    }

    pub fn maintenance() -> Self {
        Self::new(MAINTENANCE_EVENT_CODES)
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for EventFilter {
    fn default() -> Self {
        Self::maintenance()
    }
}

/// How far back, in whole minutes, the cache feed is queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookbackWindow {
    minutes: u32,
}

impl LookbackWindow {
    pub fn from_minutes(minutes: u32) -> Self {
        Self { minutes }
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Oldest instant covered by the window when measured from `now`.
    pub fn start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::minutes(i64::from(self.minutes))
    }
}

impl Default for LookbackWindow {
    fn default() -> Self {
        Self::from_minutes(DEFAULT_LOOKBACK_MINUTES)
    }
}
