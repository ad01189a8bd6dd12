//! Configuration management for AI Writer.
//!
//! Settings are layered: built-in defaults, an optional `ai-writer.{toml,yaml,json}`
//! file, environment variables (optionally seeded from `.env`), the forced
//! values of the selected [`Profile`], and finally command-line overrides.

#![warn(missing_docs, clippy::pedantic)]

use std::path::PathBuf;

mod loader;
mod profile;
mod schema;

pub use loader::{ConfigLoader, Overrides};
pub use profile::{PRODUCTION_CORS_ORIGIN, Profile};
pub use schema::{CorsOrigins, WriterConfig};

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {source}")]
    Load {
        /// Underlying loader error.
        #[from]
        source: config::ConfigError,
    },

    /// A `.env` file exists but could not be parsed.
    #[error("failed to load .env file: {source}")]
    Dotenv {
        /// Underlying dotenv error.
        #[from]
        source: dotenvy::Error,
    },

    /// One or more settings are out of range.
    #[error("invalid configuration: {}", .errors.join("; "))]
    Invalid {
        /// Every violated rule, in check order.
        errors: Vec<String>,
    },
}

/// Result alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Loads variables from a `.env` file in the working directory, if present.
///
/// Variables already set in the process environment win. Returns the path of
/// the loaded file, or `None` when no file exists.
///
/// # Errors
///
/// Returns [`ConfigError::Dotenv`] if the file exists but cannot be parsed.
pub fn load_dotenv() -> ConfigResult<Option<PathBuf>> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(dotenvy::Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}
