//! Strongly typed configuration schema.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{ConfigError, ConfigResult};

/// Origins allowed to call the API from a browser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CorsOrigins {
    /// Any origin (`*`).
    Any,
    /// An explicit allow-list.
    List(Vec<String>),
}

/// Service configuration.
///
/// Field names match the environment variable names lowercased, so `PORT`
/// sets [`WriterConfig::port`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u32,
    /// Verbose diagnostics.
    pub debug: bool,

    /// Identifier of the model to load at startup.
    pub model_name: String,
    /// Base URL of the model daemon.
    pub model_endpoint: String,
    /// Upper bound for a single backend call, in seconds.
    pub generation_timeout_secs: u64,
    /// Let the model daemon use a GPU.
    pub use_gpu: bool,

    /// Default maximum output length for requests that omit it.
    pub max_length: u32,
    /// Smallest maximum length the operator expects callers to use.
    pub min_length: u32,
    /// Default sampling temperature for requests that omit it.
    pub temperature: f32,
    /// Nucleus sampling probability mass.
    pub top_p: f32,
    /// Top-k sampling cutoff.
    pub top_k: u32,
    /// Penalty applied to repeated tokens.
    pub repetition_penalty: f32,

    /// `*` or a comma-separated list of allowed origins.
    pub cors_origins: String,
    /// Log level name (`DEBUG`, `INFO`, `WARNING`, ...).
    pub log_level: String,

    /// API title reported by the home route.
    pub api_title: String,
    /// API version reported by the home route.
    pub api_version: String,
    /// API description reported by the home route.
    pub api_description: String,

    /// Deployment profile name (`development`, `production`, `testing`).
    pub env: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 5000,
            debug: true,
            model_name: "gpt2".to_owned(),
            model_endpoint: "http://127.0.0.1:11434/".to_owned(),
            generation_timeout_secs: 120,
            use_gpu: false,
            max_length: 500,
            min_length: 50,
            temperature: 0.7,
            top_p: 0.9,
            top_k: 50,
            repetition_penalty: 1.2,
            cors_origins: "*".to_owned(),
            log_level: "INFO".to_owned(),
            api_title: "AI Writer API".to_owned(),
            api_version: "1.0.0".to_owned(),
            api_description: "Generate high-quality content with AI".to_owned(),
            env: "development".to_owned(),
        }
    }
}

impl WriterConfig {
    /// Checks every setting, collecting all violations.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] listing each violated rule.
    pub fn validate(&self) -> ConfigResult<()> {
        let mut errors = Vec::new();

        if !(1..=65_535).contains(&self.port) {
            errors.push(format!(
                "Invalid PORT: {}. Must be between 1 and 65535",
                self.port
            ));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            errors.push(format!(
                "Invalid TEMPERATURE: {}. Must be between 0.0 and 2.0",
                self.temperature
            ));
        }

        if !(0.0..=1.0).contains(&self.top_p) {
            errors.push(format!(
                "Invalid TOP_P: {}. Must be between 0.0 and 1.0",
                self.top_p
            ));
        }

        if self.min_length > self.max_length {
            errors.push(format!(
                "MIN_LENGTH ({}) cannot be greater than MAX_LENGTH ({})",
                self.min_length, self.max_length
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid { errors })
        }
    }

    /// Returns the `host:port` pair to bind.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the backend timeout as a [`Duration`].
    #[must_use]
    pub const fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// Parses [`WriterConfig::cors_origins`].
    #[must_use]
    pub fn cors(&self) -> CorsOrigins {
        let raw = self.cors_origins.trim();
        if raw == "*" {
            return CorsOrigins::Any;
        }

        CorsOrigins::List(
            raw.split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }

    /// Logs the effective configuration at info level.
    pub fn log_summary(&self) {
        info!(
            host = %self.host,
            port = self.port,
            debug = self.debug,
            profile = %self.env,
            "server configuration"
        );
        info!(
            model = %self.model_name,
            endpoint = %self.model_endpoint,
            device = if self.use_gpu { "GPU" } else { "CPU" },
            timeout_secs = self.generation_timeout_secs,
            "model configuration"
        );
        info!(
            max_length = self.max_length,
            min_length = self.min_length,
            temperature = self.temperature,
            top_p = self.top_p,
            top_k = self.top_k,
            repetition_penalty = self.repetition_penalty,
            "generation defaults"
        );
        info!(
            title = %self.api_title,
            version = %self.api_version,
            cors_origins = %self.cors_origins,
            "api configuration"
        );
    }
}
