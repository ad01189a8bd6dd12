//! Observability utilities for AI Writer.

#![warn(missing_docs, clippy::pedantic)]

pub mod health;
pub mod tracing_support;

pub use health::{HealthReport, HealthStatus};
pub use tracing_support::{TelemetryError, init_tracing, level_directive};
