//! Agent configuration

use anyhow::{Context, Result};
use netmeter_engine::NotificationConfig;
use serde::{Deserialize, Serialize};

/// netmeter agent configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Tracing filter directive (e.g. "info", "netmeter_engine=debug")
    pub log_filter: String,
    /// Capacity of the envelope and sample channels
    pub channel_buffer: usize,
    /// Write the Prometheus exposition to stderr on shutdown
    pub dump_metrics: bool,
    /// Subscription settings
    pub notification: NotificationConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            channel_buffer: 1024,
            dump_metrics: false,
            notification: NotificationConfig::default(),
        }
    }
}

impl AgentConfig {
    /// Load configuration from `.env` and the process environment
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(filter) = lookup("NETMETER_LOG").or_else(|| lookup("RUST_LOG")) {
            cfg.log_filter = filter;
        }
        if let Some(val) = lookup("NETMETER_CHANNEL_BUFFER") {
            cfg.channel_buffer = val
                .parse()
                .with_context(|| format!("invalid NETMETER_CHANNEL_BUFFER: {val:?}"))?;
            anyhow::ensure!(cfg.channel_buffer > 0, "NETMETER_CHANNEL_BUFFER must be positive");
        }
        if let Some(val) = lookup("NETMETER_DUMP_METRICS") {
            cfg.dump_metrics = matches!(val.as_str(), "1" | "true" | "yes");
        }

        cfg.notification = NotificationConfig::from_lookup(&lookup)?;
        Ok(cfg)
    }
}
