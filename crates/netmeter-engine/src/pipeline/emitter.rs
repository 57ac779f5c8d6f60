//! Sample emission
//!
//! Every extracted resource yields one state sample. When the event type
//! names a lifecycle phase (`network.create.end` has three segments,
//! `network.exists` only two), a delta sample counting that phase follows.

use super::extractor::Resource;
use crate::routing::ResourceDescriptor;
use netmeter_common::{
    Envelope, MeterError, Result, Sample, SampleKind, SampleParams, GENERIC_VOLUME,
};
use serde_json::Value;

/// Emit the samples for one resource of a notification
pub fn emit(
    envelope: &Envelope,
    resource: Resource,
    descriptor: &ResourceDescriptor,
) -> Result<Vec<Sample>> {
    let resource_id = resource_id(&resource, &envelope.event_type)?;
    let user_id = envelope.require_user()?.to_string();
    let project_id = envelope.require_tenant()?.to_string();

    let view = envelope.with_payload(Value::Object(resource));

    let params = SampleParams {
        name: descriptor.counter_name().to_string(),
        kind: SampleKind::State,
        unit: descriptor.unit().to_string(),
        volume: GENERIC_VOLUME,
        user_id: Some(user_id),
        project_id,
        resource_id,
    };

    let mut samples = Vec::with_capacity(2);
    let delta = phase_token(&envelope.event_type).map(|phase| SampleParams {
        name: format!("{}.{}", descriptor.counter_name(), phase),
        kind: SampleKind::Delta,
        ..params.clone()
    });

    samples.push(Sample::from_notification(params, &view)?);
    if let Some(delta) = delta {
        samples.push(Sample::from_notification(delta, &view)?);
    }

    Ok(samples)
}

/// Lifecycle phase of an event type, if it names one.
///
/// `"port.update.start"` yields `Some("update")`; two-segment event types
/// such as `"port.exists"` yield `None`.
pub fn phase_token(event_type: &str) -> Option<&str> {
    let mut segments = event_type.split('.');
    let _resource = segments.next()?;
    let phase = segments.next()?;
    segments.next().map(|_| phase)
}

fn resource_id(resource: &Resource, event_type: &str) -> Result<String> {
    match resource.get("id") {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(Value::String(_)) | Some(Value::Null) | None => {
            Err(MeterError::missing_field("id", event_type))
        }
        Some(other) => Err(MeterError::invalid_field(
            "id",
            format!("expected a string, got {other}"),
        )),
    }
}
