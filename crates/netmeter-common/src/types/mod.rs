//! Core data types for netmeter

pub mod envelope;
pub mod sample;
