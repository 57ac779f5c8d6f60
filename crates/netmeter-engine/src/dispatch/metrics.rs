//! Prometheus metrics for the dispatcher

use netmeter_common::SampleKind;
use prometheus::{IntCounter, IntCounterVec, Opts, Registry};

/// Counters describing what happened to each envelope
#[derive(Clone)]
pub struct DispatchMetrics {
    pub envelopes_total: IntCounter,
    pub envelopes_unrouted: IntCounter,
    /// Routed envelopes that produced no samples (silently dropped payloads)
    pub envelopes_empty: IntCounter,
    pub envelopes_failed: IntCounter,
    pub samples_total: IntCounterVec,
}

impl DispatchMetrics {
    pub fn new() -> prometheus::Result<Self> {
        Ok(Self {
            envelopes_total: IntCounter::new(
                "netmeter_envelopes_total",
                "Total notifications received",
            )?,
            envelopes_unrouted: IntCounter::new(
                "netmeter_envelopes_unrouted_total",
                "Notifications no descriptor claimed",
            )?,
            envelopes_empty: IntCounter::new(
                "netmeter_envelopes_empty_total",
                "Notifications without identifiable resources",
            )?,
            envelopes_failed: IntCounter::new(
                "netmeter_envelopes_failed_total",
                "Notifications skipped after a transformation error",
            )?,
            samples_total: IntCounterVec::new(
                Opts::new("netmeter_samples_total", "Samples produced"),
                &["kind"],
            )?,
        })
    }

    pub fn register(&self, registry: &Registry) -> prometheus::Result<()> {
        registry.register(Box::new(self.envelopes_total.clone()))?;
        registry.register(Box::new(self.envelopes_unrouted.clone()))?;
        registry.register(Box::new(self.envelopes_empty.clone()))?;
        registry.register(Box::new(self.envelopes_failed.clone()))?;
        registry.register(Box::new(self.samples_total.clone()))?;
        Ok(())
    }

    pub fn record_sample(&self, kind: SampleKind) {
        self.samples_total.with_label_values(&[kind.as_str()]).inc();
    }

    /// Samples produced so far for one kind
    pub fn samples(&self, kind: SampleKind) -> u64 {
        self.samples_total.with_label_values(&[kind.as_str()]).get()
    }
}

impl std::fmt::Debug for DispatchMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchMetrics")
            .field("envelopes_total", &self.envelopes_total.get())
            .field("envelopes_unrouted", &self.envelopes_unrouted.get())
            .field("envelopes_empty", &self.envelopes_empty.get())
            .field("envelopes_failed", &self.envelopes_failed.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_gather() {
        let metrics = DispatchMetrics::new().unwrap();
        let registry = Registry::new();
        metrics.register(&registry).unwrap();

        metrics.envelopes_total.inc();
        metrics.record_sample(SampleKind::State);
        metrics.record_sample(SampleKind::State);

        assert_eq!(metrics.samples(SampleKind::State), 2);
        assert_eq!(metrics.samples(SampleKind::Delta), 0);

        let names: Vec<_> = registry
            .gather()
            .iter()
            .map(|family| family.get_name().to_string())
            .collect();
        assert!(names.contains(&"netmeter_envelopes_total".to_string()));
        assert!(names.contains(&"netmeter_samples_total".to_string()));
    }

    #[test]
    fn test_double_registration_fails() {
        let metrics = DispatchMetrics::new().unwrap();
        let registry = Registry::new();
        metrics.register(&registry).unwrap();
        assert!(metrics.register(&registry).is_err());
    }
}
