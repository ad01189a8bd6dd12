//! Shared model adapter traits and data structures.

use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used by model adapters.
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Streaming response emitted by [`ModelAdapter::infer`].
pub type AdapterStream = Pin<Box<dyn Stream<Item = AdapterResult<InferenceChunk>> + Send>>;

/// Error type shared by adapter implementations.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Adapter is misconfigured.
    #[error("adapter not configured: {reason}")]
    Configuration {
        /// Additional context for the failure.
        reason: String,
    },

    /// The backend does not know the requested model.
    #[error("model `{model}` not found")]
    ModelNotFound {
        /// Identifier that failed to resolve.
        model: String,
    },

    /// The supplied request was invalid for the target model.
    #[error("invalid inference request: {reason}")]
    InvalidRequest {
        /// Reason describing why the request could not be processed.
        reason: String,
    },

    /// Transport-level failures (network, protocol, etc.).
    #[error("adapter transport error: {reason}")]
    Transport {
        /// Additional context about the error.
        reason: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("adapter request timed out after {after:?}")]
    Timeout {
        /// Timeout that elapsed.
        after: Duration,
    },

    /// The provider returned a malformed or failed response.
    #[error("adapter response error: {reason}")]
    Response {
        /// Additional context about the response failure.
        reason: String,
    },
}

impl AdapterError {
    /// Convenience constructor for invalid requests.
    #[must_use]
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for configuration issues.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for transport failures.
    #[must_use]
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for response failures.
    #[must_use]
    pub fn response(reason: impl Into<String>) -> Self {
        Self::Response {
            reason: reason.into(),
        }
    }
}

/// Descriptive information about a loaded model.
///
/// Fields the backend does not report stay `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDetails {
    /// Model family or architecture (e.g. `gpt2`, `llama`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
    /// Parameter count in human form as reported by the backend (e.g. `124M`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_size: Option<String>,
    /// Exact parameter count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_parameters: Option<u64>,
    /// Maximum context length (position embeddings).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_length: Option<u64>,
    /// Weight quantization level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantization: Option<String>,
}

/// Metadata describing a model adapter instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AdapterMetadata {
    provider: &'static str,
    model: String,
    #[serde(flatten)]
    details: ModelDetails,
}

impl AdapterMetadata {
    /// Creates metadata for the supplied provider and model identifier.
    #[must_use]
    pub fn new(provider: &'static str, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            details: ModelDetails::default(),
        }
    }

    /// Attaches backend-reported details.
    #[must_use]
    pub fn with_details(mut self, details: ModelDetails) -> Self {
        self.details = details;
        self
    }

    /// Returns the provider identifier (e.g., "ollama").
    #[must_use]
    pub const fn provider(&self) -> &'static str {
        self.provider
    }

    /// Returns the configured model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the backend-reported model details.
    #[must_use]
    pub const fn details(&self) -> &ModelDetails {
        &self.details
    }
}

/// Sampling controls passed through to the generator untouched.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    /// Maximum number of tokens to generate.
    pub max_length: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Nucleus sampling probability mass.
    pub top_p: f32,
    /// Top-k sampling cutoff.
    pub top_k: u32,
    /// Penalty applied to repeated tokens.
    pub repetition_penalty: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            max_length: 500,
            temperature: 0.7,
            top_p: 0.9,
            top_k: 50,
            repetition_penalty: 1.2,
        }
    }
}

/// Raw completion request submitted to a model adapter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    prompt: String,
    params: SamplingParams,
}

impl CompletionRequest {
    /// Creates a request for the supplied prompt.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::InvalidRequest`] if the prompt is empty.
    pub fn new(prompt: impl Into<String>, params: SamplingParams) -> AdapterResult<Self> {
        let prompt = prompt.into();
        if prompt.is_empty() {
            return Err(AdapterError::invalid_request(
                "completion request requires a non-empty prompt",
            ));
        }

        Ok(Self { prompt, params })
    }

    /// Returns the prompt text.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Returns the sampling parameters.
    #[must_use]
    pub const fn params(&self) -> &SamplingParams {
        &self.params
    }
}

/// Streaming chunk returned by the adapter.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct InferenceChunk {
    /// Partial text emitted by the provider.
    pub delta: String,
    /// Whether the generation is complete.
    pub done: bool,
}

impl InferenceChunk {
    /// Creates a new chunk.
    #[must_use]
    pub fn new(delta: impl Into<String>, done: bool) -> Self {
        Self {
            delta: delta.into(),
            done,
        }
    }
}

/// Trait implemented by all model adapters.
#[async_trait]
pub trait ModelAdapter: Send + Sync {
    /// Returns metadata describing the adapter instance.
    fn metadata(&self) -> &AdapterMetadata;

    /// Executes the completion request, returning a streaming response.
    async fn infer(&self, request: CompletionRequest) -> AdapterResult<AdapterStream>;
}

/// Creates ready-to-use adapters bound to a model identifier.
///
/// Loading is where a backend verifies that the model exists, so a failed
/// load means the model is unavailable.
#[async_trait]
pub trait ModelLoader: Send + Sync {
    /// Loads the model identified by `model`.
    async fn load(&self, model: &str) -> AdapterResult<Arc<dyn ModelAdapter>>;
}
