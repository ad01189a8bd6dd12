//! Structured tracing helpers.

use tracing_subscriber::EnvFilter;

/// Errors raised while installing the subscriber.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter `{directive}`: {reason}")]
    Filter {
        /// Rejected directive.
        directive: String,
        /// Parser message.
        reason: String,
    },

    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {reason}")]
    Install {
        /// Underlying error message.
        reason: String,
    },
}

/// Maps a log level name to a tracing filter directive.
///
/// Accepts the names operators usually write in `LOG_LEVEL` (`DEBUG`,
/// `INFO`, `WARNING`, `ERROR`, `CRITICAL`) as well as tracing's own names.
/// Unknown names map to `info`.
#[must_use]
pub fn level_directive(level: &str) -> &'static str {
    match level.trim().to_ascii_uppercase().as_str() {
        "TRACE" => "trace",
        "DEBUG" => "debug",
        "WARNING" | "WARN" => "warn",
        "ERROR" | "CRITICAL" | "FATAL" => "error",
        "OFF" => "off",
        _ => "info",
    }
}

fn filter_for(level: &str) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let directive = level_directive(level);
    EnvFilter::try_new(directive).map_err(|err| TelemetryError::Filter {
        directive: directive.to_owned(),
        reason: err.to_string(),
    })
}

/// Installs the global fmt subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `level` decides verbosity.
///
/// # Errors
///
/// Returns [`TelemetryError::Install`] if a subscriber is already set.
pub fn init_tracing(level: &str) -> Result<(), TelemetryError> {
    let filter = filter_for(level)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|err| TelemetryError::Install {
            reason: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_operator_level_names() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("warning"), "warn");
        assert_eq!(level_directive("CRITICAL"), "error");
        assert_eq!(level_directive(" info "), "info");
        assert_eq!(level_directive("verbose"), "info");
    }

    #[test]
    fn second_install_is_reported() {
        let first = init_tracing("INFO");
        let second = init_tracing("INFO");
        assert!(first.is_ok() || matches!(first, Err(TelemetryError::Install { .. })));
        assert!(matches!(second, Err(TelemetryError::Install { .. })));
    }
}
