//! Layered configuration loader.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, Map};
use tracing::debug;

use crate::{ConfigResult, Profile, WriterConfig};

/// Values supplied on the command line. They win over every other layer,
/// including profile overrides.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u32>,
    /// Model identifier to load.
    pub model_name: Option<String>,
}

impl Overrides {
    fn apply(self, config: &mut WriterConfig) {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(model) = self.model_name {
            config.model_name = model;
        }
    }
}

/// Builds a [`WriterConfig`] from files, environment, profile, and overrides.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_file: Option<PathBuf>,
    load_env: bool,
    env_source: Option<Map<String, String>>,
    overrides: Overrides,
}

impl ConfigLoader {
    /// Creates a loader that only applies defaults and the optional
    /// `ai-writer` file from the working directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads an explicit configuration file, which must exist.
    #[must_use]
    pub fn load_from_file(mut self, path: Option<&Path>) -> Self {
        self.config_file = path.map(Path::to_path_buf);
        self
    }

    /// Reads settings from the process environment.
    #[must_use]
    pub fn load_from_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Reads settings from `vars` instead of the process environment.
    #[must_use]
    pub fn with_env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.load_env = true;
        self.env_source = Some(
            vars.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        );
        self
    }

    /// Applies command-line overrides last.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Builds the final configuration.
    ///
    /// The result is not validated; call [`WriterConfig::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::Load`] if a source cannot be read or a
    /// value has the wrong type.
    pub fn build(self) -> ConfigResult<WriterConfig> {
        let mut builder = Config::builder();

        builder = match &self.config_file {
            Some(path) => builder.add_source(File::from(path.as_path()).required(true)),
            None => builder
                .add_source(File::with_name("ai-writer").required(false))
                .add_source(File::with_name("config/ai-writer").required(false)),
        };

        if self.load_env {
            builder = builder.add_source(
                Environment::default()
                    .try_parsing(true)
                    .source(self.env_source),
            );
        }

        let raw = builder.build()?;
        let cors_configured = raw.get_string("cors_origins").is_ok();
        let mut config: WriterConfig = raw.try_deserialize()?;

        let profile = Profile::from_name(&config.env);
        profile.apply(&mut config, cors_configured);
        self.overrides.apply(&mut config);

        debug!(%profile, model = %config.model_name, "configuration loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConfigError, PRODUCTION_CORS_ORIGIN};

    #[test]
    fn environment_values_override_defaults() {
        let config = ConfigLoader::new()
            .with_env_vars([
                ("ENV", "staging"),
                ("PORT", "8080"),
                ("MODEL_NAME", "gpt2-medium"),
                ("TEMPERATURE", "0.5"),
                ("USE_GPU", "true"),
                ("CORS_ORIGINS", "https://a.example,https://b.example"),
            ])
            .build()
            .expect("config loads");

        assert_eq!(config.port, 8080);
        assert_eq!(config.model_name, "gpt2-medium");
        assert!((config.temperature - 0.5).abs() < f32::EPSILON);
        assert!(config.use_gpu);
        assert_eq!(config.env, "development");
        assert_eq!(config.log_level, "DEBUG");
    }

    #[test]
    fn production_profile_forces_settings() {
        let config = ConfigLoader::new()
            .with_env_vars([("ENV", "production"), ("DEBUG", "true"), ("LOG_LEVEL", "DEBUG")])
            .build()
            .expect("config loads");

        assert!(!config.debug);
        assert_eq!(config.log_level, "WARNING");
        assert_eq!(config.cors_origins, PRODUCTION_CORS_ORIGIN);
    }

    #[test]
    fn production_keeps_explicit_cors() {
        let config = ConfigLoader::new()
            .with_env_vars([("ENV", "production"), ("CORS_ORIGINS", "*")])
            .build()
            .expect("config loads");
        assert_eq!(config.cors_origins, "*");
    }

    #[test]
    fn command_line_overrides_win_over_profile() {
        let config = ConfigLoader::new()
            .with_env_vars([("ENV", "testing"), ("PORT", "6000")])
            .with_overrides(Overrides {
                port: Some(7000),
                model_name: Some("gpt2".to_owned()),
                ..Overrides::default()
            })
            .build()
            .expect("config loads");

        assert_eq!(config.port, 7000);
        assert_eq!(config.model_name, "gpt2");
        assert_eq!(config.max_length, 100);
    }

    #[test]
    fn malformed_numbers_fail_to_load() {
        let err = ConfigLoader::new()
            .with_env_vars([("PORT", "not-a-port")])
            .build()
            .expect_err("port must be numeric");
        assert!(matches!(err, ConfigError::Load { .. }));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = ConfigLoader::new()
            .load_from_file(Some(Path::new("does-not-exist/ai-writer.toml")))
            .build()
            .expect_err("explicit file is required");
        assert!(matches!(err, ConfigError::Load { .. }));
    }
}
