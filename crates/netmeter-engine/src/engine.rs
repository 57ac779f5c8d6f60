//! Notification engine
//!
//! Entry point of the transformation: one envelope in, samples out. The
//! engine holds nothing but the immutable registry and can be shared freely
//! across threads and tasks.

use crate::pipeline::{emit, extract};
use crate::routing::{DescriptorRegistry, EventRouter, ResourceDescriptor, Transform};
use crate::transforms::bandwidth;
use netmeter_common::{Envelope, Result, Sample};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Stateless envelope-to-sample transformer
#[derive(Debug, Clone)]
pub struct NotificationEngine {
    router: EventRouter,
}

impl NotificationEngine {
    /// Create an engine over a fully registered descriptor set
    pub fn new(registry: DescriptorRegistry) -> Self {
        Self::with_shared_registry(Arc::new(registry))
    }

    pub fn with_shared_registry(registry: Arc<DescriptorRegistry>) -> Self {
        Self {
            router: EventRouter::new(registry),
        }
    }

    /// Descriptor claiming an event type, if any
    pub fn route(&self, event_type: &str) -> Option<&ResourceDescriptor> {
        self.router.route(event_type)
    }

    /// Event types the engine is interested in
    pub fn event_types(&self) -> Vec<String> {
        self.router.event_types()
    }

    /// Route and transform one envelope.
    ///
    /// Unclaimed event types produce no samples; that is a subscription
    /// concern rather than a runtime fault.
    pub fn process(&self, envelope: &Envelope) -> Result<Vec<Sample>> {
        match self.route(&envelope.event_type) {
            Some(descriptor) => self.transform(descriptor, envelope),
            None => {
                debug!(event_type = %envelope.event_type, "No descriptor claims event type");
                Ok(Vec::new())
            }
        }
    }

    /// Transform one envelope with a specific descriptor
    #[instrument(
        level = "debug",
        skip(self, descriptor, envelope),
        fields(event_type = %envelope.event_type, resource = descriptor.resource_name())
    )]
    pub fn transform(
        &self,
        descriptor: &ResourceDescriptor,
        envelope: &Envelope,
    ) -> Result<Vec<Sample>> {
        let samples = match descriptor.transform() {
            Transform::Generic => {
                let resources = extract(envelope, descriptor.resource_name());
                if resources.is_empty() {
                    debug!("Payload carries no identifiable resources");
                }
                let mut samples = Vec::with_capacity(resources.len() * 2);
                for resource in resources {
                    samples.extend(emit(envelope, resource, descriptor)?);
                }
                samples
            }
            Transform::Bandwidth => bandwidth::transform(envelope)?,
        };

        debug!(samples = samples.len(), "Processed notification");
        Ok(samples)
    }
}
