//! Descriptor registry
//!
//! Built once at startup and never mutated afterwards. Registration order is
//! match priority.

use super::descriptor::ResourceDescriptor;
use netmeter_common::RegistryError;
use std::collections::HashSet;

/// Ordered, immutable set of resource descriptors
#[derive(Debug, Clone, Default)]
pub struct DescriptorRegistry {
    descriptors: Vec<ResourceDescriptor>,
}

/// Builder collecting descriptors in priority order
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    descriptors: Vec<ResourceDescriptor>,
    names: HashSet<String>,
}

impl RegistryBuilder {
    /// Register a descriptor after all previously registered ones
    pub fn register(mut self, descriptor: ResourceDescriptor) -> Result<Self, RegistryError> {
        let name = descriptor.resource_name().to_string();
        if descriptor.interest_patterns().is_empty() {
            return Err(RegistryError::NoPatterns(name));
        }
        if !self.names.insert(name.clone()) {
            return Err(RegistryError::DuplicateResource(name));
        }
        self.descriptors.push(descriptor);
        Ok(self)
    }

    pub fn build(self) -> DescriptorRegistry {
        DescriptorRegistry {
            descriptors: self.descriptors,
        }
    }
}

impl DescriptorRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Descriptors in priority order
    pub fn iter(&self) -> impl Iterator<Item = &ResourceDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Look up a descriptor by resource name
    pub fn get(&self, resource_name: &str) -> Option<&ResourceDescriptor> {
        self.descriptors
            .iter()
            .find(|d| d.resource_name() == resource_name)
    }

    /// Every interest pattern, in priority order, without duplicates
    pub fn event_types(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.descriptors
            .iter()
            .flat_map(|d| d.interest_patterns())
            .map(|p| p.to_string())
            .filter(|p| seen.insert(p.clone()))
            .collect()
    }
}
