use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::args::is_usable_name;
use crate::config::types::RegistryConfig;
use crate::error::ExtractError;

/// Errors that can occur when loading type declarations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read type file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse type file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Type file validation failed: {message}")]
    ValidationError { message: String },

    #[error("Invalid type declaration: {0}")]
    Type(#[from] ExtractError),
}

impl RegistryConfig {
    /// Returns the path to the default type file.
    ///
    /// Uses `~/.config/targo/types.toml` on Unix/macOS, or the equivalent via
    /// `dirs::config_dir()`. Falls back to the current directory.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("targo").join("types.toml")
    }

    /// Loads declarations from the default type file.
    ///
    /// A missing file yields an empty configuration.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(RegistryConfig::default());
        }

        Self::load_from(&path)
    }

    /// Loads and validates declarations from `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config = Self::parse(&content, path)?;
        tracing::debug!(path = %path.display(), types = config.types.len(), "Loaded type file");
        Ok(config)
    }

    /// Parses and validates declarations from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, Path::new("<string>"))
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: RegistryConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the declarations.
    ///
    /// Checks that every entry has a non-empty name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(index) = self.types.iter().position(|t| !is_usable_name(&t.name)) {
            return Err(ConfigError::ValidationError {
                message: format!("Type #{} has no name", index + 1),
            });
        }

        Ok(())
    }
}
