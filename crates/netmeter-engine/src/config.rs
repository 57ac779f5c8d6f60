//! Notification subscription configuration
//!
//! Exchange and topic names are threaded through to the consumer layer; the
//! engine never interprets them.

use netmeter_common::{MeterError, Result};
use serde::{Deserialize, Serialize};

/// Default exchange Neutron publishes on
pub const DEFAULT_CONTROL_EXCHANGE: &str = "neutron";

/// Default notification topic
pub const DEFAULT_NOTIFICATION_TOPIC: &str = "notifications";

const ENV_CONTROL_EXCHANGE: &str = "NETMETER_CONTROL_EXCHANGE";
const ENV_CONTROL_EXCHANGE_DEPRECATED: &str = "NETMETER_QUANTUM_CONTROL_EXCHANGE";
const ENV_NOTIFICATION_TOPICS: &str = "NETMETER_NOTIFICATION_TOPICS";

/// Exchange/topic pair to consume from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    pub exchange: String,
    pub topic: String,
}

/// Subscription configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Exchange name for Neutron notifications
    pub control_exchange: String,
    /// Topics to consume on that exchange
    pub notification_topics: Vec<String>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            control_exchange: DEFAULT_CONTROL_EXCHANGE.to_string(),
            notification_topics: vec![DEFAULT_NOTIFICATION_TOPIC.to_string()],
        }
    }
}

impl NotificationConfig {
    /// Load configuration from `.env` and the process environment
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        // The current name takes priority over the deprecated one
        if let Some(exchange) =
            lookup(ENV_CONTROL_EXCHANGE).or_else(|| lookup(ENV_CONTROL_EXCHANGE_DEPRECATED))
        {
            let exchange = exchange.trim();
            if exchange.is_empty() {
                return Err(MeterError::Config(format!(
                    "{ENV_CONTROL_EXCHANGE} must not be empty"
                )));
            }
            cfg.control_exchange = exchange.to_string();
        }

        if let Some(topics) = lookup(ENV_NOTIFICATION_TOPICS) {
            let topics: Vec<String> = topics
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect();
            if topics.is_empty() {
                return Err(MeterError::Config(format!(
                    "{ENV_NOTIFICATION_TOPICS} lists no topics"
                )));
            }
            cfg.notification_topics = topics;
        }

        Ok(cfg)
    }

    /// One target per topic on the control exchange
    pub fn targets(&self) -> Vec<Target> {
        self.notification_topics
            .iter()
            .map(|topic| Target {
                exchange: self.control_exchange.clone(),
                topic: topic.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = NotificationConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, NotificationConfig::default());
        assert_eq!(
            cfg.targets(),
            vec![Target {
                exchange: "neutron".into(),
                topic: "notifications".into()
            }]
        );
    }

    #[test]
    fn test_topics_and_exchange() {
        let cfg = NotificationConfig::from_lookup(lookup(&[
            ("NETMETER_CONTROL_EXCHANGE", "openstack"),
            ("NETMETER_NOTIFICATION_TOPICS", "notifications, metering ,"),
        ]))
        .unwrap();

        let targets = cfg.targets();
        assert_eq!(targets.len(), 2);
        assert!(targets.iter().all(|t| t.exchange == "openstack"));
        assert_eq!(targets[1].topic, "metering");
    }

    #[test]
    fn test_deprecated_exchange_name() {
        let cfg = NotificationConfig::from_lookup(lookup(&[(
            "NETMETER_QUANTUM_CONTROL_EXCHANGE",
            "quantum",
        )]))
        .unwrap();
        assert_eq!(cfg.control_exchange, "quantum");

        let cfg = NotificationConfig::from_lookup(lookup(&[
            ("NETMETER_QUANTUM_CONTROL_EXCHANGE", "quantum"),
            ("NETMETER_CONTROL_EXCHANGE", "neutron-2"),
        ]))
        .unwrap();
        assert_eq!(cfg.control_exchange, "neutron-2");
    }

    #[test]
    fn test_invalid_values() {
        assert!(NotificationConfig::from_lookup(lookup(&[("NETMETER_CONTROL_EXCHANGE", " ")]))
            .is_err());
        assert!(
            NotificationConfig::from_lookup(lookup(&[("NETMETER_NOTIFICATION_TOPICS", ",,")]))
                .is_err()
        );
    }
}
