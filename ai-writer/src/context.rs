use std::sync::Arc;

use writer_adapters::GenerationGateway;
use writer_adapters::traits::SamplingParams;
use writer_config::WriterConfig;
use writer_kernel::RequestHandler;

/// State shared by every HTTP handler.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: Arc<WriterConfig>,
    handler: RequestHandler,
}

impl AppContext {
    /// Wires the request handler over `gateway` using the configured
    /// sampling defaults.
    #[must_use]
    pub fn new(config: WriterConfig, gateway: Arc<GenerationGateway>) -> Self {
        let defaults = SamplingParams {
            max_length: config.max_length,
            temperature: config.temperature,
            top_p: config.top_p,
            top_k: config.top_k,
            repetition_penalty: config.repetition_penalty,
        };

        Self {
            config: Arc::new(config),
            handler: RequestHandler::new(gateway, defaults),
        }
    }

    /// Returns the effective configuration.
    #[must_use]
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Returns the request handler.
    #[must_use]
    pub const fn handler(&self) -> &RequestHandler {
        &self.handler
    }

    /// Returns the shared generation gateway.
    #[must_use]
    pub fn gateway(&self) -> &GenerationGateway {
        self.handler.gateway()
    }
}
