//! Sample - the measurement record handed to the metering pipeline
//!
//! A sample is built from the notification that caused it: the timestamp,
//! resource metadata and raw message all come from the envelope.

use super::envelope::Envelope;
use crate::error::{MeterError, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Timestamp layout used by the oslo notifier
const OSLO_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Measurement semantics of a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleKind {
    /// The resource exists / was touched at this point in time
    #[serde(rename = "gauge")]
    State,
    /// One occurrence of a lifecycle phase
    #[serde(rename = "delta")]
    Delta,
    /// Running total; reserved, never produced by the engine
    #[serde(rename = "cumulative")]
    Cumulative,
}

impl SampleKind {
    /// Wire name used by downstream consumers
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleKind::State => "gauge",
            SampleKind::Delta => "delta",
            SampleKind::Cumulative => "cumulative",
        }
    }
}

impl std::fmt::Display for SampleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields a producer chooses; the rest is derived from the notification
#[derive(Debug, Clone, PartialEq)]
pub struct SampleParams {
    pub name: String,
    pub kind: SampleKind,
    pub unit: String,
    pub volume: f64,
    pub user_id: Option<String>,
    pub project_id: String,
    pub resource_id: String,
}

/// Immutable measurement record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Measurement series (e.g. "network", "network.create")
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SampleKind,
    pub unit: String,
    pub volume: f64,
    /// Absent for infrastructure-level metering
    pub user_id: Option<String>,
    pub project_id: String,
    /// Never empty
    pub resource_id: String,
    /// Producer timestamp, if the notification carried a readable one
    pub timestamp: Option<DateTime<Utc>>,
    /// Resource attributes plus event type and emitting host
    pub resource_metadata: Map<String, Value>,
    /// Notification the sample was derived from
    pub raw_message: Value,
}

impl Sample {
    /// Build a sample from a notification
    pub fn from_notification(params: SampleParams, message: &Envelope) -> Result<Self> {
        if params.resource_id.is_empty() {
            return Err(MeterError::invalid_field("resource_id", "must not be empty"));
        }

        // An unreadable timestamp never costs the sample; the raw string
        // stays available in `raw_message`
        let timestamp = message.timestamp.as_deref().and_then(|raw| {
            parse_timestamp(raw)
                .map_err(|e| {
                    warn!(event_type = %message.event_type, "Ignoring timestamp: {}", e)
                })
                .ok()
        });

        let mut resource_metadata = message.payload.as_object().cloned().unwrap_or_default();
        resource_metadata.insert("event_type".into(), Value::String(message.event_type.clone()));
        if let Some(host) = &message.publisher_id {
            resource_metadata.insert("host".into(), Value::String(host.clone()));
        }

        Ok(Self {
            name: params.name,
            kind: params.kind,
            unit: params.unit,
            volume: params.volume,
            user_id: params.user_id,
            project_id: params.project_id,
            resource_id: params.resource_id,
            timestamp,
            resource_metadata,
            raw_message: message.to_value()?,
        })
    }
}

/// Parse an RFC 3339 or oslo-style (naive, UTC) timestamp
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(raw, OSLO_TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .map_err(|e| MeterError::invalid_field("timestamp", format!("{raw:?}: {e}")))?;
    Ok(Utc.from_utc_datetime(&naive))
}
