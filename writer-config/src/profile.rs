//! Deployment profiles selected by the `ENV` setting.

use std::fmt;

use crate::WriterConfig;

/// CORS origin used in production when none is configured.
pub const PRODUCTION_CORS_ORIGIN: &str = "https://yourdomain.com";

/// Named bundle of settings forced on top of file and environment values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Profile {
    /// Local development: debug on, verbose logs.
    #[default]
    Development,
    /// Production: debug off, warnings only, restricted CORS default.
    Production,
    /// Tests: smallest model, short outputs.
    Testing,
}

impl Profile {
    /// Parses a profile name, falling back to [`Profile::Development`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "production" => Self::Production,
            "testing" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Returns the canonical profile name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Testing => "testing",
        }
    }

    /// Applies the profile's forced settings.
    ///
    /// `cors_configured` tells whether an explicit CORS setting was supplied;
    /// production only substitutes its default origin when it was not.
    pub fn apply(self, config: &mut WriterConfig, cors_configured: bool) {
        config.env = self.name().to_owned();
        match self {
            Self::Development => {
                config.debug = true;
                config.log_level = "DEBUG".to_owned();
            }
            Self::Production => {
                config.debug = false;
                config.log_level = "WARNING".to_owned();
                if !cors_configured {
                    config.cors_origins = PRODUCTION_CORS_ORIGIN.to_owned();
                }
            }
            Self::Testing => {
                config.debug = true;
                config.model_name = "distilgpt2".to_owned();
                config.max_length = 100;
            }
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
