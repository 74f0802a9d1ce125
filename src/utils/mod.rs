//! Utils Module - Shared helpers used across the service

pub mod telemetry;

pub use telemetry::*;
