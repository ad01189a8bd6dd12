//! Per-request stage machine.

use tracing::debug;
use writer_primitives::{Error, RequestId, Result};

/// Stages a generation request passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Request accepted and validated.
    Received,
    /// Prompt assembled from the content-type template.
    PromptBuilt,
    /// Raw text returned by the model.
    Generated,
    /// Raw text cleaned for the content type.
    Cleaned,
    /// Result handed back to the caller.
    Returned,
    /// Processing stopped with an error.
    Failed,
}

impl PipelineStage {
    /// Returns `true` once no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Returned | Self::Failed)
    }
}

/// Events that advance a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineEvent {
    /// The prompt is ready.
    PromptReady,
    /// The model produced text.
    TextGenerated,
    /// The text was cleaned.
    OutputCleaned,
    /// The result was returned.
    Respond,
    /// A step failed.
    Fail,
}

/// Tracks the stage of a single request.
#[derive(Debug, Clone, Copy)]
pub struct RequestPipeline {
    request_id: RequestId,
    stage: PipelineStage,
}

impl RequestPipeline {
    /// Starts tracking a freshly received request.
    #[must_use]
    pub const fn new(request_id: RequestId) -> Self {
        Self {
            request_id,
            stage: PipelineStage::Received,
        }
    }

    /// Returns the request identifier.
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Returns the current stage.
    #[must_use]
    pub const fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// Applies `event`, returning the resulting stage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] when `event` is not allowed from the current
    /// stage.
    pub fn transition(&mut self, event: PipelineEvent) -> Result<PipelineStage> {
        let next = match (self.stage, event) {
            (PipelineStage::Received, PipelineEvent::PromptReady) => PipelineStage::PromptBuilt,
            (PipelineStage::PromptBuilt, PipelineEvent::TextGenerated) => PipelineStage::Generated,
            (PipelineStage::Generated, PipelineEvent::OutputCleaned) => PipelineStage::Cleaned,
            (PipelineStage::Cleaned, PipelineEvent::Respond) => PipelineStage::Returned,
            (stage, PipelineEvent::Fail) if !stage.is_terminal() => PipelineStage::Failed,
            (from, event) => {
                return Err(Error::internal(format!(
                    "invalid pipeline transition from {from:?} via {event:?} for request {}",
                    self.request_id
                )));
            }
        };

        debug!(
            request_id = %self.request_id,
            from = ?self.stage,
            to = ?next,
            ?event,
            "request stage transition"
        );
        self.stage = next;
        Ok(next)
    }
}
