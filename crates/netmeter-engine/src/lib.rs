//! # netmeter engine
//!
//! Turns network lifecycle notifications into metering samples.
//!
//! ## Pipeline
//!
//! ```text
//! Envelope -> EventRouter -> descriptor
//!   Generic:   extract (singular | plural payload) -> emit (state [+ delta])
//!   Bandwidth: payload byte count -> one delta sample
//! ```
//!
//! A notification such as `network.create.end` yields a `network` gauge
//! sample and a `network.create` delta sample per resource; the two-segment
//! `network.exists` yields the gauge only.

pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod pipeline;
pub mod routing;
pub mod transforms;

pub use catalog::neutron_registry;
pub use config::{NotificationConfig, Target};
pub use dispatch::{DispatchMetrics, NotificationDispatcher};
pub use engine::NotificationEngine;
pub use routing::{DescriptorRegistry, EventPattern, EventRouter, ResourceDescriptor, Transform};
