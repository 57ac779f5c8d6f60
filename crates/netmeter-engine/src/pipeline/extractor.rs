//! Resource extraction
//!
//! Pulls resource objects out of a notification payload. A payload either
//! carries one resource under the resource name, or a list under the
//! pluralized name (`network` vs `networks`).

use netmeter_common::Envelope;
use serde_json::{Map, Value};
use tracing::debug;

/// A single resource object, owned so each can be emitted independently
pub type Resource = Map<String, Value>;

/// Suffix of event types whose resource object lacks its own id
const UPDATE_START_SUFFIX: &str = "update.start";

/// Extract the resources a notification describes.
///
/// Returns an empty vector when the payload has neither shape.
pub fn extract(envelope: &Envelope, resource_name: &str) -> Vec<Resource> {
    if let Some(resource) = singular(envelope, resource_name) {
        return vec![resource];
    }

    let plural = format!("{resource_name}s");
    match envelope.payload_field(&plural) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(resource) => Some(resource.clone()),
                other => {
                    debug!(
                        event_type = %envelope.event_type,
                        key = %plural,
                        "Skipping non-object resource entry: {}",
                        other
                    );
                    None
                }
            })
            .collect(),
        Some(other) => {
            debug!(
                event_type = %envelope.event_type,
                key = %plural,
                "Resource collection is not a list: {}",
                other
            );
            Vec::new()
        }
        None => Vec::new(),
    }
}

fn singular(envelope: &Envelope, resource_name: &str) -> Option<Resource> {
    let mut resource = match envelope.payload_field(resource_name) {
        Some(Value::Object(obj)) if !obj.is_empty() => obj.clone(),
        _ => return None,
    };

    // update.start notifications carry the id next to the resource
    if envelope.event_type.ends_with(UPDATE_START_SUFFIX) {
        if let Some(id) = envelope.payload_field("id") {
            resource.insert("id".to_string(), id.clone());
        }
    }

    Some(resource)
}
