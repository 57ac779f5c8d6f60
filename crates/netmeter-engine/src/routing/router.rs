//! Event router
//!
//! Maps an event type to the first registered descriptor whose interest
//! patterns match it.

use super::descriptor::ResourceDescriptor;
use super::registry::DescriptorRegistry;
use std::sync::Arc;
use tracing::trace;

/// Data-driven dispatch over a shared, immutable registry
#[derive(Debug, Clone)]
pub struct EventRouter {
    registry: Arc<DescriptorRegistry>,
}

impl EventRouter {
    pub fn new(registry: Arc<DescriptorRegistry>) -> Self {
        Self { registry }
    }

    /// First descriptor (in registration order) claiming the event type
    pub fn route(&self, event_type: &str) -> Option<&ResourceDescriptor> {
        let found = self.registry.iter().find(|d| d.matches(event_type));
        trace!(
            event_type,
            resource = found.map(|d| d.resource_name()),
            "Routed event type"
        );
        found
    }

    /// Event types to subscribe to
    pub fn event_types(&self) -> Vec<String> {
        self.registry.event_types()
    }
}
