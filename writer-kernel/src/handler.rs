//! Request handler: prompt, generate, clean.

use std::sync::Arc;

use tracing::{error, info};
use writer_adapters::GenerationGateway;
use writer_adapters::traits::SamplingParams;
use writer_primitives::{GenerationRequest, GenerationResult, RequestId, Result};
use writer_prompts::{build_prompt, clean_output};

use crate::pipeline::{PipelineEvent, RequestPipeline};

/// Runs generation requests against the shared gateway.
///
/// Sampling knobs the request does not carry (`top_p`, `top_k`, repetition
/// penalty) come from `defaults`; the request's own `max_length` and
/// `temperature` always win.
#[derive(Debug, Clone)]
pub struct RequestHandler {
    gateway: Arc<GenerationGateway>,
    defaults: SamplingParams,
}

impl RequestHandler {
    /// Creates a handler over `gateway`.
    #[must_use]
    pub fn new(gateway: Arc<GenerationGateway>, defaults: SamplingParams) -> Self {
        Self { gateway, defaults }
    }

    /// Returns the shared gateway.
    #[must_use]
    pub fn gateway(&self) -> &Arc<GenerationGateway> {
        &self.gateway
    }

    /// Returns the default sampling parameters.
    #[must_use]
    pub const fn defaults(&self) -> SamplingParams {
        self.defaults
    }

    fn params_for(&self, request: &GenerationRequest) -> SamplingParams {
        SamplingParams {
            max_length: request.max_length(),
            temperature: request.temperature(),
            ..self.defaults
        }
    }

    /// Produces cleaned content for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`writer_primitives::Error::ModelUnavailable`] when no model is
    /// loaded, [`writer_primitives::Error::GenerationFailure`] when the backend
    /// fails, and [`writer_primitives::Error::Internal`] on a pipeline bug.
    pub async fn handle(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let mut pipeline = RequestPipeline::new(RequestId::random());
        let params = self.params_for(request);

        info!(
            request_id = %pipeline.request_id(),
            content_type = %request.content_type(),
            input_length = request.input_length(),
            max_length = params.max_length,
            temperature = params.temperature,
            "generating content"
        );

        match self.run(&mut pipeline, request, params).await {
            Ok(result) => {
                info!(
                    request_id = %pipeline.request_id(),
                    output_length = result.output_length,
                    "content generated"
                );
                Ok(result)
            }
            Err(err) => {
                if !pipeline.stage().is_terminal() {
                    pipeline.transition(PipelineEvent::Fail)?;
                }
                error!(
                    request_id = %pipeline.request_id(),
                    content_type = %request.content_type(),
                    input_length = request.input_length(),
                    max_length = params.max_length,
                    temperature = params.temperature,
                    error = %err,
                    "content generation failed"
                );
                Err(err)
            }
        }
    }

    async fn run(
        &self,
        pipeline: &mut RequestPipeline,
        request: &GenerationRequest,
        params: SamplingParams,
    ) -> Result<GenerationResult> {
        let content_type = request.content_type();

        self.gateway.ensure_available().await?;
        let prompt = build_prompt(content_type, request.input());
        pipeline.transition(PipelineEvent::PromptReady)?;

        let raw = self.gateway.generate(&prompt, params).await?;
        pipeline.transition(PipelineEvent::TextGenerated)?;

        let cleaned = clean_output(&raw, content_type);
        pipeline.transition(PipelineEvent::OutputCleaned)?;

        let result = GenerationResult::new(request, cleaned);
        pipeline.transition(PipelineEvent::Respond)?;
        Ok(result)
    }
}
