//! Load-once access to the generation model.

use std::fmt;
use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info};
use writer_primitives::{Error, Result};

use crate::traits::{AdapterMetadata, CompletionRequest, ModelAdapter, ModelLoader, SamplingParams};

/// Owns the single model instance shared by every request.
///
/// The instance is created by [`GenerationGateway::initialize`], normally once
/// at startup, and can be swapped with [`GenerationGateway::reload`]. Loads are
/// serialized so concurrent callers never construct two instances. Until a
/// load succeeds, [`GenerationGateway::generate`] fails fast with
/// [`Error::ModelUnavailable`].
pub struct GenerationGateway {
    loader: Arc<dyn ModelLoader>,
    default_model: String,
    slot: RwLock<Option<Arc<dyn ModelAdapter>>>,
    last_failure: RwLock<Option<String>>,
    load_lock: Mutex<()>,
}

impl fmt::Debug for GenerationGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationGateway")
            .field("default_model", &self.default_model)
            .finish_non_exhaustive()
    }
}

impl GenerationGateway {
    /// Creates an empty gateway that will load `default_model` on initialize.
    #[must_use]
    pub fn new(loader: Arc<dyn ModelLoader>, default_model: impl Into<String>) -> Self {
        Self {
            loader,
            default_model: default_model.into(),
            slot: RwLock::new(None),
            last_failure: RwLock::new(None),
            load_lock: Mutex::new(()),
        }
    }

    /// Loads the default model unless an instance already exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModelUnavailable`] if the loader fails. The gateway stays
    /// usable and a later call may retry.
    pub async fn initialize(&self) -> Result<()> {
        let _guard = self.load_lock.lock().await;
        if self.slot.read().await.is_some() {
            debug!(model = %self.default_model, "model already loaded");
            return Ok(());
        }

        let adapter = self.load(&self.default_model).await?;
        *self.slot.write().await = Some(adapter);
        Ok(())
    }

    /// Replaces the current instance with one bound to `model`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModelUnavailable`] if the loader fails; the previous
    /// instance, if any, keeps serving.
    pub async fn reload(&self, model: &str) -> Result<()> {
        let _guard = self.load_lock.lock().await;
        info!(model, "reloading model");
        let adapter = self.load(model).await?;
        let previous = self.slot.write().await.replace(adapter);
        if let Some(previous) = previous {
            info!(previous = previous.metadata().model(), model, "model replaced");
        }
        Ok(())
    }

    async fn load(&self, model: &str) -> Result<Arc<dyn ModelAdapter>> {
        match self.loader.load(model).await {
            Ok(adapter) => {
                info!(model, provider = adapter.metadata().provider(), "model loaded");
                *self.last_failure.write().await = None;
                Ok(adapter)
            }
            Err(err) => {
                error!(model, error = %err, "failed to load model");
                let reason = format!("failed to load model `{model}`: {err}");
                *self.last_failure.write().await = Some(reason.clone());
                Err(Error::model_unavailable(reason))
            }
        }
    }

    /// Returns the current model instance, if one is loaded.
    pub async fn current(&self) -> Option<Arc<dyn ModelAdapter>> {
        self.slot.read().await.clone()
    }

    /// Returns `true` once a model instance exists.
    pub async fn is_loaded(&self) -> bool {
        self.slot.read().await.is_some()
    }

    /// Returns the identifier of the loaded model.
    pub async fn model_name(&self) -> Option<String> {
        self.current()
            .await
            .map(|adapter| adapter.metadata().model().to_owned())
    }

    /// Returns descriptive metadata for the loaded model.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModelUnavailable`] if no model is loaded.
    pub async fn model_info(&self) -> Result<AdapterMetadata> {
        let adapter = self.require_model().await?;
        Ok(adapter.metadata().clone())
    }

    /// Confirms a model instance is loaded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModelUnavailable`] carrying the last load failure, if any.
    pub async fn ensure_available(&self) -> Result<()> {
        self.require_model().await.map(|_| ())
    }

    async fn require_model(&self) -> Result<Arc<dyn ModelAdapter>> {
        if let Some(adapter) = self.current().await {
            return Ok(adapter);
        }

        let reason = self
            .last_failure
            .read()
            .await
            .clone()
            .unwrap_or_else(|| "model not loaded".to_owned());
        Err(Error::model_unavailable(reason))
    }

    /// Generates text for `prompt`, removing an echoed prompt prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModelUnavailable`] without contacting the backend when no
    /// model is loaded, and [`Error::GenerationFailure`] when the adapter fails.
    pub async fn generate(&self, prompt: &str, params: SamplingParams) -> Result<String> {
        let adapter = self.require_model().await?;
        let request = CompletionRequest::new(prompt, params)
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        debug!(prompt_length = prompt.len(), ?params, "generating text");
        let mut stream = adapter
            .infer(request)
            .await
            .map_err(|err| Error::generation(err.to_string()))?;

        let mut text = String::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| Error::generation(err.to_string()))?;
            text.push_str(&chunk.delta);
            if chunk.done {
                break;
            }
        }

        let text = strip_prompt_echo(prompt, text);
        debug!(generated_length = text.len(), "text generated");
        Ok(text)
    }
}

/// Drops `prompt` from the front of `text` on an exact prefix match.
fn strip_prompt_echo(prompt: &str, text: String) -> String {
    match text.strip_prefix(prompt) {
        Some(rest) => rest.trim().to_owned(),
        None => text,
    }
}
