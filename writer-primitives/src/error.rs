//! Shared error definitions for the writer pipeline.

use thiserror::Error;
use uuid::Error as UuidError;

/// Result alias used throughout the writer crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the generation pipeline.
///
/// The variants mirror how callers are expected to react: invalid requests are
/// rejected before any work happens, an unavailable model is a temporary
/// condition, and generation or internal failures are reported as-is.
#[derive(Debug, Error)]
pub enum Error {
    /// A request field is missing or outside its accepted range.
    #[error("invalid request: {reason}")]
    InvalidRequest {
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// The generation model has not been loaded or failed to load.
    #[error("model unavailable: {reason}")]
    ModelUnavailable {
        /// Additional context for the failure.
        reason: String,
    },

    /// The underlying generator raised while producing text.
    #[error("generation failed: {reason}")]
    GenerationFailure {
        /// Additional context for the failure.
        reason: String,
    },

    /// Any other unexpected failure.
    #[error("internal error: {reason}")]
    Internal {
        /// Additional context for the failure.
        reason: String,
    },

    /// The provided request identifier could not be parsed.
    #[error("invalid request id: {source}")]
    InvalidRequestId {
        /// Source parsing error from the UUID library.
        #[from]
        source: UuidError,
    },
}

impl Error {
    /// Convenience constructor for invalid requests.
    #[must_use]
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for an unavailable model.
    #[must_use]
    pub fn model_unavailable(reason: impl Into<String>) -> Self {
        Self::ModelUnavailable {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for generation failures.
    #[must_use]
    pub fn generation(reason: impl Into<String>) -> Self {
        Self::GenerationFailure {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for internal failures.
    #[must_use]
    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal {
            reason: reason.into(),
        }
    }

    /// Returns `true` when the model is not available to serve requests.
    #[must_use]
    pub const fn is_model_unavailable(&self) -> bool {
        matches!(self, Self::ModelUnavailable { .. })
    }
}
