//! Reference generator configuration (`docgen.json`).

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::ConfigError;

/// Output directory used when the generator config does not declare one.
pub const DEFAULT_OUTPUT_DIR: &str = "docs/reference";

/// Generator configuration as parsed from JSON.
///
/// Only `outputDir` is read; everything else belongs to the generator.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Output directory, relative to the config file's directory.
    pub output_dir: Option<String>,
}

impl GeneratorConfig {
    /// Load the generator config from `path`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file is missing, or a parse or
    /// validation error for malformed content.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate declared values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if `outputDir` is present but empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_dir.as_deref().is_some_and(|d| d.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "outputDir cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Absolute output directory, resolved against the config file's directory.
    #[must_use]
    pub fn output_dir(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(self.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR))
    }
}
