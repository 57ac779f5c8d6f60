//! Bandwidth metering
//!
//! `l3.meter` notifications are not resource-shaped: the payload carries a
//! byte count for a metering label directly.

use netmeter_common::{Envelope, MeterError, Result, Sample, SampleKind, SampleParams};
use serde_json::{Number, Value};
use tracing::warn;

pub const BANDWIDTH_EVENT_TYPE: &str = "l3.meter";
pub const BANDWIDTH_COUNTER: &str = "bandwidth";
pub const BANDWIDTH_UNIT: &str = "B";

/// Largest byte count an `f64` volume holds exactly (2^53)
pub const MAX_EXACT_BYTES: u64 = 1 << 53;

/// One delta sample per metering report, without user attribution.
///
/// Sample volumes are `f64`, so byte counts above [`MAX_EXACT_BYTES`] are
/// rounded to the nearest representable value. The sample is still emitted
/// and a warning is logged.
pub fn transform(envelope: &Envelope) -> Result<Vec<Sample>> {
    let bytes = match envelope.payload_field("bytes") {
        Some(Value::Number(n)) => volume(n)?,
        Some(other) => {
            return Err(MeterError::invalid_field(
                "bytes",
                format!("expected a number, got {other}"),
            ))
        }
        None => return Err(MeterError::missing_field("bytes", &envelope.event_type)),
    };

    let params = SampleParams {
        name: BANDWIDTH_COUNTER.to_string(),
        kind: SampleKind::Delta,
        unit: BANDWIDTH_UNIT.to_string(),
        volume: bytes,
        user_id: None,
        project_id: string_field(envelope, "tenant_id")?,
        resource_id: string_field(envelope, "label_id")?,
    };

    Ok(vec![Sample::from_notification(params, envelope)?])
}

fn volume(n: &Number) -> Result<f64> {
    if let Some(bytes) = n.as_u64() {
        if bytes > MAX_EXACT_BYTES {
            warn!(bytes, "Byte count exceeds exact f64 range, volume is rounded");
        }
        return Ok(bytes as f64);
    }
    n.as_f64()
        .ok_or_else(|| MeterError::invalid_field("bytes", format!("not representable: {n}")))
}

fn string_field(envelope: &Envelope, field: &str) -> Result<String> {
    match envelope.payload_field(field) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::String(_)) | Some(Value::Null) | None => {
            Err(MeterError::missing_field(field, &envelope.event_type))
        }
        Some(other) => Err(MeterError::invalid_field(
            field,
            format!("expected a string, got {other}"),
        )),
    }
}
