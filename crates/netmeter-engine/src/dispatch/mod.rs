//! Dispatch module
//!
//! Consumer-side wrapper around the engine:
//! - per-envelope failure isolation (log, count, skip)
//! - Prometheus counters, including the silent-drop counter for payloads
//!   without identifiable resources
//! - an mpsc-driven loop for feeding decoded envelopes through the engine

pub mod metrics;

pub use metrics::DispatchMetrics;

use crate::engine::NotificationEngine;
use netmeter_common::{Envelope, Sample};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Feeds envelopes through a shared engine
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    engine: Arc<NotificationEngine>,
    metrics: Arc<DispatchMetrics>,
}

impl NotificationDispatcher {
    pub fn new(engine: Arc<NotificationEngine>, metrics: Arc<DispatchMetrics>) -> Self {
        Self { engine, metrics }
    }

    pub fn metrics(&self) -> &DispatchMetrics {
        &self.metrics
    }

    /// Process one envelope; a failure only costs that envelope
    pub fn dispatch(&self, envelope: &Envelope) -> Vec<Sample> {
        self.metrics.envelopes_total.inc();

        let Some(descriptor) = self.engine.route(&envelope.event_type) else {
            self.metrics.envelopes_unrouted.inc();
            debug!(event_type = %envelope.event_type, "Unrouted notification");
            return Vec::new();
        };

        match self.engine.transform(descriptor, envelope) {
            Ok(samples) => {
                if samples.is_empty() {
                    self.metrics.envelopes_empty.inc();
                }
                for sample in &samples {
                    self.metrics.record_sample(sample.kind);
                }
                samples
            }
            Err(e) => {
                self.metrics.envelopes_failed.inc();
                warn!(
                    event_type = %envelope.event_type,
                    message_id = envelope.message_id.as_deref().unwrap_or("-"),
                    "Skipping notification: {}",
                    e
                );
                Vec::new()
            }
        }
    }

    /// Drain envelopes from `envelope_rx`, forwarding samples to `sample_tx`.
    ///
    /// Returns when the input channel closes or the sample receiver is gone.
    pub async fn run(
        self,
        mut envelope_rx: mpsc::Receiver<Envelope>,
        sample_tx: mpsc::Sender<Sample>,
    ) {
        while let Some(envelope) = envelope_rx.recv().await {
            for sample in self.dispatch(&envelope) {
                if sample_tx.send(sample).await.is_err() {
                    warn!("Sample channel closed, dispatcher exiting");
                    return;
                }
            }
        }
        info!("Envelope channel closed, dispatcher exiting");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::neutron_registry;
    use netmeter_common::SampleKind;
    use serde_json::json;

    fn dispatcher() -> NotificationDispatcher {
        let engine = Arc::new(NotificationEngine::new(neutron_registry().unwrap()));
        let metrics = Arc::new(DispatchMetrics::new().unwrap());
        NotificationDispatcher::new(engine, metrics)
    }

    #[test]
    fn test_dispatch_counts_outcomes() {
        let dispatcher = dispatcher();

        let ok = Envelope::new("router.create.end", json!({"router": {"id": "r1"}}))
            .with_user("u1")
            .with_tenant("t1");
        let unrouted = Envelope::new("router.delete.end", json!({"router_id": "r1"}));
        let empty = Envelope::new("router.exists", json!({}))
            .with_user("u1")
            .with_tenant("t1");
        let failed = Envelope::new("router.exists", json!({"router": {"id": "r1"}}));

        assert_eq!(dispatcher.dispatch(&ok).len(), 2);
        assert!(dispatcher.dispatch(&unrouted).is_empty());
        assert!(dispatcher.dispatch(&empty).is_empty());
        assert!(dispatcher.dispatch(&failed).is_empty());

        let metrics = dispatcher.metrics();
        assert_eq!(metrics.envelopes_total.get(), 4);
        assert_eq!(metrics.envelopes_unrouted.get(), 1);
        assert_eq!(metrics.envelopes_empty.get(), 1);
        assert_eq!(metrics.envelopes_failed.get(), 1);
        assert_eq!(metrics.samples(SampleKind::State), 1);
        assert_eq!(metrics.samples(SampleKind::Delta), 1);
    }

    #[tokio::test]
    async fn test_run_forwards_samples() {
        let dispatcher = dispatcher();
        let (envelope_tx, envelope_rx) = mpsc::channel(8);
        let (sample_tx, mut sample_rx) = mpsc::channel(8);

        let handle = tokio::spawn(dispatcher.clone().run(envelope_rx, sample_tx));

        envelope_tx
            .send(Envelope::new(
                "l3.meter",
                json!({"bytes": 10, "tenant_id": "p1", "label_id": "l1"}),
            ))
            .await
            .unwrap();
        // A bad envelope must not stop the loop
        envelope_tx
            .send(Envelope::new("network.exists", json!({"network": {"id": "n1"}})))
            .await
            .unwrap();
        envelope_tx
            .send(
                Envelope::new("network.exists", json!({"network": {"id": "n1"}}))
                    .with_user("u1")
                    .with_tenant("t1"),
            )
            .await
            .unwrap();
        drop(envelope_tx);

        let mut names = Vec::new();
        while let Some(sample) = sample_rx.recv().await {
            names.push(sample.name);
        }
        handle.await.unwrap();

        assert_eq!(names, vec!["bandwidth", "network"]);
        assert_eq!(dispatcher.metrics().envelopes_failed.get(), 1);
    }
}
