//! `Ollama` adapter implementation.
//!
//! Talks to a local Ollama daemon, which hosts the pretrained model. Loading a
//! model asks the daemon to describe it (`/api/show`), and completions use the
//! raw `/api/generate` endpoint so the prompt reaches the model untouched.

use std::collections::HashMap;
use std::sync::Arc;
use std::{fmt, time::Duration};

use async_trait::async_trait;
use futures::stream;
use hyper::{StatusCode, Uri};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::http_client::{HyperClient, build_https_client, post_json};
use crate::traits::{
    AdapterError, AdapterMetadata, AdapterResult, AdapterStream, CompletionRequest,
    InferenceChunk, ModelAdapter, ModelDetails, ModelLoader,
};

const PROVIDER: &str = "ollama";

/// Configuration for the `Ollama` backend.
#[derive(Clone, Debug)]
pub struct OllamaConfig {
    base_url: String,
    timeout: Duration,
    use_gpu: bool,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:11434/".to_owned(),
            timeout: Duration::from_secs(120),
            use_gpu: false,
        }
    }
}

impl OllamaConfig {
    /// Creates a configuration using default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the base URL of the Ollama daemon.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Configuration`] if the supplied URL is invalid.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> AdapterResult<Self> {
        self.base_url = sanitize_base_url(base_url.as_ref())?;
        Ok(self)
    }

    /// Sets the HTTP timeout for requests to the daemon.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Allows the daemon to offload layers to a GPU. Disabled means CPU only.
    #[must_use]
    pub fn with_gpu(mut self, use_gpu: bool) -> Self {
        self.use_gpu = use_gpu;
        self
    }

    fn endpoint(&self, path: &str) -> AdapterResult<Uri> {
        format!("{}{path}", self.base_url)
            .parse::<Uri>()
            .map_err(|err| AdapterError::configuration(format!("invalid Ollama endpoint: {err}")))
    }
}

/// Loads Ollama-hosted models after checking the daemon knows them.
pub struct OllamaLoader {
    client: HyperClient,
    config: OllamaConfig,
    show_endpoint: Uri,
}

impl fmt::Debug for OllamaLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OllamaLoader")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl OllamaLoader {
    /// Constructs a loader from the supplied configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Configuration`] if the endpoints are invalid or the
    /// HTTP client cannot be constructed.
    pub fn new(config: OllamaConfig) -> AdapterResult<Self> {
        let show_endpoint = config.endpoint("api/show")?;
        let client = build_https_client()?;
        Ok(Self {
            client,
            config,
            show_endpoint,
        })
    }
}

#[async_trait]
impl ModelLoader for OllamaLoader {
    async fn load(&self, model: &str) -> AdapterResult<Arc<dyn ModelAdapter>> {
        if model.trim().is_empty() {
            return Err(AdapterError::configuration("model identifier must not be empty"));
        }

        info!(model, base_url = %self.config.base_url, "loading Ollama model");
        let reply = post_json(
            &self.client,
            &self.show_endpoint,
            &ShowRequest { model },
            self.config.timeout,
        )
        .await?;

        if reply.status == StatusCode::NOT_FOUND {
            return Err(AdapterError::ModelNotFound {
                model: model.to_owned(),
            });
        }

        let show: ShowResponse = reply.decode("Ollama")?;
        let details = show.into_details();
        debug!(model, ?details, "Ollama model described");

        let adapter = OllamaAdapter {
            client: self.client.clone(),
            endpoint: self.config.endpoint("api/generate")?,
            metadata: AdapterMetadata::new(PROVIDER, model).with_details(details),
            timeout: self.config.timeout,
            use_gpu: self.config.use_gpu,
        };
        Ok(Arc::new(adapter))
    }
}

/// `Ollama` adapter bound to a single model.
pub struct OllamaAdapter {
    client: HyperClient,
    endpoint: Uri,
    metadata: AdapterMetadata,
    timeout: Duration,
    use_gpu: bool,
}

impl fmt::Debug for OllamaAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OllamaAdapter")
            .field("model", &self.metadata.model())
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl OllamaAdapter {
    fn build_request<'a>(&'a self, request: &'a CompletionRequest) -> GenerateRequest<'a> {
        let params = request.params();
        GenerateRequest {
            model: self.metadata.model(),
            prompt: request.prompt(),
            stream: false,
            raw: true,
            options: GenerateOptions {
                temperature: params.temperature,
                top_p: params.top_p,
                top_k: params.top_k,
                num_predict: params.max_length,
                repeat_penalty: params.repetition_penalty,
                num_gpu: (!self.use_gpu).then_some(0),
            },
        }
    }
}

#[async_trait]
impl ModelAdapter for OllamaAdapter {
    fn metadata(&self) -> &AdapterMetadata {
        &self.metadata
    }

    async fn infer(&self, request: CompletionRequest) -> AdapterResult<AdapterStream> {
        let payload = self.build_request(&request);
        let reply = post_json(&self.client, &self.endpoint, &payload, self.timeout).await?;
        let response: GenerateResponse = reply.decode("Ollama")?;

        if let Some(error) = response.error {
            return Err(AdapterError::response(error));
        }

        let chunk = InferenceChunk::new(response.response, response.done);
        Ok(Box::pin(stream::once(async move {
            Ok::<_, AdapterError>(chunk)
        })))
    }
}

#[derive(Debug, Serialize)]
struct ShowRequest<'a> {
    model: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct ShowResponse {
    #[serde(default)]
    details: ShowDetails,
    #[serde(default)]
    model_info: HashMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
struct ShowDetails {
    #[serde(default)]
    family: Option<String>,
    #[serde(default)]
    parameter_size: Option<String>,
    #[serde(default)]
    quantization_level: Option<String>,
}

impl ShowResponse {
    fn into_details(self) -> ModelDetails {
        let architecture = self
            .model_info
            .get("general.architecture")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let context_length = architecture
            .as_deref()
            .and_then(|arch| self.model_info.get(&format!("{arch}.context_length")))
            .and_then(Value::as_u64);
        let num_parameters = self
            .model_info
            .get("general.parameter_count")
            .and_then(Value::as_u64);

        ModelDetails {
            model_type: self.details.family.or(architecture),
            parameter_size: self.details.parameter_size,
            num_parameters,
            context_length,
            quantization: self.details.quantization_level,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    raw: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    num_predict: u32,
    repeat_penalty: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_gpu: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<String>,
}

fn sanitize_base_url(input: &str) -> AdapterResult<String> {
    let mut base = input.trim().to_owned();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(AdapterError::configuration(
            "Ollama base URL must start with http:// or https://",
        ));
    }
    if !base.ends_with('/') {
        base.push('/');
    }
    base.parse::<Uri>()
        .map_err(|err| AdapterError::configuration(format!("invalid Ollama base URL: {err}")))?;
    Ok(base)
}
