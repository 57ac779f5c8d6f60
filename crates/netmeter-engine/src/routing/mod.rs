//! Routing module
//!
//! Decides which resource descriptor handles a notification:
//! - EventPattern: segment-wise event-type matching with `*` wildcards
//! - ResourceDescriptor: naming, units and interest patterns per resource type
//! - DescriptorRegistry: ordered, immutable descriptor set
//! - EventRouter: first-match lookup over the registry

pub mod descriptor;
pub mod pattern;
pub mod registry;
pub mod router;

pub use descriptor::{default_patterns, ResourceDescriptor, Transform};
pub use pattern::EventPattern;
pub use registry::{DescriptorRegistry, RegistryBuilder};
pub use router::EventRouter;
