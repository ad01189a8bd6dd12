//! Core shared types for the AI Writer service.

#![warn(missing_docs, clippy::pedantic)]

mod content_type;
mod error;
mod ids;
mod request;

/// Content type tags and their fallback rule.
pub use content_type::ContentType;
/// Error type and result alias shared across the workspace.
pub use error::{Error, Result};
/// Identifier attached to each generation request.
pub use ids::RequestId;
/// Validated generation requests and their results.
pub use request::{GenerationRequest, GenerationResult, MAX_LENGTH_RANGE, TEMPERATURE_RANGE};
