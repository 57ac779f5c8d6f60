//! Notification envelope
//!
//! The decoded message as delivered by the notification bus. Context
//! attribution travels in `_context_*` keys next to the payload.

use crate::error::{MeterError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decoded notification message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Dot-separated event type (e.g. "network.create.end")
    pub event_type: String,
    /// Resource-shaped or container-shaped payload
    #[serde(default)]
    pub payload: Value,
    /// Initiating user
    #[serde(
        rename = "_context_user_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub context_user_id: Option<String>,
    /// Owning project/tenant
    #[serde(
        rename = "_context_tenant_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub context_tenant_id: Option<String>,
    /// Emitting host/service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher_id: Option<String>,
    /// Producer timestamp, kept verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Any other top-level keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Envelope {
    /// Create an envelope with no context attribution
    pub fn new(event_type: impl Into<String>, payload: Value) -> Self {
        Self {
            event_type: event_type.into(),
            payload,
            context_user_id: None,
            context_tenant_id: None,
            publisher_id: None,
            timestamp: None,
            message_id: None,
            extra: Map::new(),
        }
    }

    /// Set the initiating user
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.context_user_id = Some(user_id.into());
        self
    }

    /// Set the owning project/tenant
    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.context_tenant_id = Some(tenant_id.into());
        self
    }

    /// Set the publisher id
    pub fn with_publisher(mut self, publisher_id: impl Into<String>) -> Self {
        self.publisher_id = Some(publisher_id.into());
        self
    }

    /// Set the producer timestamp
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Initiating user, required on the generic path
    pub fn require_user(&self) -> Result<&str> {
        self.context_user_id
            .as_deref()
            .ok_or_else(|| MeterError::missing_field("_context_user_id", &self.event_type))
    }

    /// Owning project, required everywhere context attribution is used
    pub fn require_tenant(&self) -> Result<&str> {
        self.context_tenant_id
            .as_deref()
            .ok_or_else(|| MeterError::missing_field("_context_tenant_id", &self.event_type))
    }

    /// Copy of this envelope with the payload replaced.
    ///
    /// The current payload is never cloned, so building one view per
    /// resource of a container payload stays linear in the resource count.
    pub fn with_payload(&self, payload: Value) -> Envelope {
        Envelope {
            event_type: self.event_type.clone(),
            payload,
            context_user_id: self.context_user_id.clone(),
            context_tenant_id: self.context_tenant_id.clone(),
            publisher_id: self.publisher_id.clone(),
            timestamp: self.timestamp.clone(),
            message_id: self.message_id.clone(),
            extra: self.extra.clone(),
        }
    }

    /// Top-level payload field lookup
    pub fn payload_field(&self, key: &str) -> Option<&Value> {
        self.payload.as_object().and_then(|obj| obj.get(key))
    }

    /// Full envelope as JSON
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
