//! Watcher configuration loaded from `config/alert-watcher.yaml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use alert_pipeline::PipelineConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    pub feed: FeedConfig,
    pub schedule: ScheduleConfig,
    pub dedup: DedupConfig,
    pub output: OutputConfig,
    pub pipeline: PipelineConfig,
}

/// Alert feed endpoint and selection filters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub url: String,
    /// api.weather.gov rejects requests without a User-Agent.
    pub user_agent: String,
    /// Substring the alert's `senderName` must contain.
    pub sender_filter: String,
    /// Event names to render; anything else is ignored.
    pub events: Vec<String>,
    pub request_timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: "https://api.weather.gov/alerts/active?area=GA".to_string(),
            user_agent: "alert-watcher (ops@example.com)".to_string(),
            sender_filter: "NWS Peachtree City GA".to_string(),
            events: vec![
                "Tornado Warning".to_string(),
                "Severe Thunderstorm Warning".to_string(),
            ],
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub poll_interval_secs: u64,
    /// Renders in flight at once within one poll cycle.
    pub max_concurrent: usize,
    /// Upper bound on one render, backdrop fetch included.
    pub render_timeout_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 60,
            max_concurrent: 4,
            render_timeout_secs: 45,
        }
    }
}

impl ScheduleConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// How long a published alert id is remembered.
    pub window_secs: u64,
    pub capacity: usize,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            window_secs: 48 * 3600,
            capacity: 10_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
        }
    }
}

impl WatcherConfig {
    /// Load configuration from a YAML file.
    ///
    /// A missing file is not an error: the defaults are used.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_yaml(&contents)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.pipeline.render.validate()?;
        Ok(config)
    }
}
