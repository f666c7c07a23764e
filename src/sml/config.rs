//! Configuration loading for the sml toolchain.
//!
//! `defaults/sml.default.toml` is embedded into the binary so that docs and
//! runtime behavior stay in sync. User files and command line settings are
//! layered on top of those defaults via [`Loader`] before deserializing into
//! [`SmlConfig`].

use crate::sml::processor::OutputFormat;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/sml.default.toml");

/// Top-level configuration consumed by the `sml` binary.
#[derive(Debug, Clone, Deserialize)]
pub struct SmlConfig {
    pub inspect: InspectConfig,
    pub convert: ConvertConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub print_runs: bool,
    pub strict: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl LoggingConfig {
    /// The configured level, or `Warn` if it does not name one.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Warn)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (used for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<SmlConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<SmlConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.inspect.format, OutputFormat::Simple);
        assert!(!config.convert.print_runs);
        assert!(!config.convert.strict);
        assert_eq!(config.logging.level_filter(), log::LevelFilter::Warn);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("inspect.format", "yaml")
            .expect("override to apply")
            .set_override("convert.strict", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.inspect.format, OutputFormat::Yaml);
        assert!(config.convert.strict);
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[logging]\nlevel = \"trace\"").expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.logging.level_filter(), log::LevelFilter::Trace);
        assert_eq!(config.inspect.format, OutputFormat::Simple);
    }

    #[test]
    fn missing_user_file_is_an_error() {
        let result = Loader::new().with_file("/nonexistent/sml.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn unknown_level_falls_back_to_warn() {
        let logging = LoggingConfig {
            level: "loud".to_string(),
        };
        assert_eq!(logging.level_filter(), log::LevelFilter::Warn);
    }
}
