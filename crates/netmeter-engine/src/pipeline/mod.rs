//! Generic pipeline
//!
//! Resource-shaped notifications flow through two steps:
//! - extract: normalize the singular/plural payload shapes into resources
//! - emit: turn each resource into a state sample and, for lifecycle
//!   phases, a delta sample

pub mod emitter;
pub mod extractor;

pub use emitter::{emit, phase_token};
pub use extractor::{extract, Resource};
