//! Error types for navigation synchronization.

use std::path::PathBuf;

use navsync_config::ConfigError;

/// Error from loading, reconciling or writing a navigation document.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// Path resolution failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Reading a file or directory failed.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File or directory being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The navigation document is not valid YAML, or could not be serialized.
    #[error("YAML error in {}: {source}", path.display())]
    Yaml {
        /// Navigation document path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The navigation document is valid YAML but has the wrong shape.
    #[error("Invalid navigation document {}: {message}", path.display())]
    InvalidDocument {
        /// Navigation document path.
        path: PathBuf,
        /// What is wrong with it.
        message: String,
    },

    /// Writing the navigation document failed. The previous content is intact.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Navigation document path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}
