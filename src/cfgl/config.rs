//! Configuration loader for cfgl
//!
//! `defaults/cfgl.default.toml` is embedded into the binary so that docs and runtime
//! behavior stay in sync. Callers layer user files and command-line overrides on top of
//! those defaults via [`Loader`] before deserializing into [`CfglConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/cfgl.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CfglConfig {
    pub output: OutputConfig,
    pub diagnostics: DiagnosticsConfig,
}

/// Controls how compiled documents are written
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Name of the output format, or a `token-*` / `ast-*` inspection spec
    pub format: String,
}

/// Controls fault handling and reporting
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DiagnosticsConfig {
    /// Fail the compilation when any fault was recorded
    pub strict: bool,
    /// Colorize fault reports on terminals
    pub color: bool,
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

    /// Apply a single key/value override (used for command-line flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<CfglConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<CfglConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.output.format, "yaml");
        assert!(!config.diagnostics.strict);
        assert!(config.diagnostics.color);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("diagnostics.strict", true)
            .expect("override to apply")
            .set_override("output.format", "json")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(config.diagnostics.strict);
        assert_eq!(config.output.format, "json");
    }

    #[test]
    fn user_file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[diagnostics]\ncolor = false").expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert!(!config.diagnostics.color);
        assert!(!config.diagnostics.strict);
        assert_eq!(config.output.format, "yaml");
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = Loader::new().with_file("/nonexistent/cfgl.toml").build();
        assert!(result.is_err());
    }
}
