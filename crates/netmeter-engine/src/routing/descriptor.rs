//! Resource descriptors
//!
//! Static per-resource-type configuration: how a resource type is named in
//! samples and which event types it claims.

use super::pattern::EventPattern;
use netmeter_common::RegistryError;

/// How a descriptor turns a notification into samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transform {
    /// Extract resources from the payload and emit state/delta samples
    Generic,
    /// Read byte counts from `l3.meter` notifications
    Bandwidth,
}

/// Static configuration for one resource type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Payload key and event-type prefix
    resource_name: String,
    /// Sample name for state samples, prefix for delta samples
    counter_name: String,
    /// Sample unit
    unit: String,
    /// Event types this descriptor claims
    interest_patterns: Vec<EventPattern>,
    transform: Transform,
}

impl ResourceDescriptor {
    /// Generic descriptor with default naming and patterns
    pub fn generic(resource_name: &str) -> Result<Self, RegistryError> {
        validate_resource_name(resource_name)?;
        let interest_patterns = default_patterns(resource_name)
            .iter()
            .map(|p| EventPattern::parse(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            resource_name: resource_name.to_string(),
            counter_name: resource_name.to_string(),
            unit: resource_name.to_string(),
            interest_patterns,
            transform: Transform::Generic,
        })
    }

    /// Descriptor that bypasses the generic pipeline
    pub fn custom(
        resource_name: &str,
        patterns: &[&str],
        transform: Transform,
    ) -> Result<Self, RegistryError> {
        Self::generic(resource_name)?
            .with_interest_patterns(patterns)
            .map(|d| d.with_transform(transform))
    }

    /// Override the sample name
    pub fn with_counter_name(mut self, counter_name: impl Into<String>) -> Self {
        self.counter_name = counter_name.into();
        self
    }

    /// Override the sample unit
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Replace the default interest patterns
    pub fn with_interest_patterns(mut self, patterns: &[&str]) -> Result<Self, RegistryError> {
        self.interest_patterns = patterns
            .iter()
            .map(|p| EventPattern::parse(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self)
    }

    /// Replace the transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    pub fn counter_name(&self) -> &str {
        &self.counter_name
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn interest_patterns(&self) -> &[EventPattern] {
        &self.interest_patterns
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Whether any interest pattern matches the event type
    pub fn matches(&self, event_type: &str) -> bool {
        self.interest_patterns.iter().any(|p| p.matches(event_type))
    }
}

/// Default interest patterns for a resource type.
///
/// `*.create.start` is left out because the resource has no id yet, and
/// `*.delete.*` because delete notifications lack the resource metadata.
pub fn default_patterns(resource_name: &str) -> [String; 3] {
    [
        format!("{resource_name}.create.end"),
        format!("{resource_name}.update.*"),
        format!("{resource_name}.exists"),
    ]
}

fn validate_resource_name(name: &str) -> Result<(), RegistryError> {
    if name.is_empty() || name.contains('.') || name.contains('*') {
        return Err(RegistryError::InvalidResourceName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_defaults() {
        let descriptor = ResourceDescriptor::generic("port").unwrap();
        assert_eq!(descriptor.counter_name(), "port");
        assert_eq!(descriptor.unit(), "port");
        assert_eq!(descriptor.transform(), Transform::Generic);

        let patterns: Vec<_> = descriptor
            .interest_patterns()
            .iter()
            .map(|p| p.as_str())
            .collect();
        assert_eq!(patterns, vec!["port.create.end", "port.update.*", "port.exists"]);
    }

    #[test]
    fn test_default_patterns_coverage() {
        let descriptor = ResourceDescriptor::generic("router").unwrap();
        assert!(descriptor.matches("router.create.end"));
        assert!(descriptor.matches("router.update.start"));
        assert!(descriptor.matches("router.update.end"));
        assert!(descriptor.matches("router.exists"));
        assert!(!descriptor.matches("router.create.start"));
        assert!(!descriptor.matches("router.delete.end"));
    }

    #[test]
    fn test_overrides() {
        let descriptor = ResourceDescriptor::generic("floatingip")
            .unwrap()
            .with_counter_name("ip.floating")
            .with_unit("ip");
        assert_eq!(descriptor.resource_name(), "floatingip");
        assert_eq!(descriptor.counter_name(), "ip.floating");
        assert_eq!(descriptor.unit(), "ip");
    }

    #[test]
    fn test_custom_descriptor() {
        let descriptor =
            ResourceDescriptor::custom("bandwidth", &["l3.meter"], Transform::Bandwidth).unwrap();
        assert_eq!(descriptor.transform(), Transform::Bandwidth);
        assert_eq!(descriptor.interest_patterns().len(), 1);
        assert!(descriptor.matches("l3.meter"));
        assert!(!descriptor.matches("bandwidth.exists"));
    }

    #[test]
    fn test_invalid_resource_name() {
        assert_eq!(
            ResourceDescriptor::generic("ip.floating").unwrap_err(),
            RegistryError::InvalidResourceName("ip.floating".into())
        );
        assert!(ResourceDescriptor::generic("").is_err());
        assert!(ResourceDescriptor::generic("net*").is_err());
    }
}
