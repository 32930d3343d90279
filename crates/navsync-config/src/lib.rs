//! Path resolution for navsync.
//!
//! Works out where everything lives before the navigation tree is touched:
//!
//! - the navigation document (`mkdocs.yml`) and the reference generator's
//!   config (`docgen.json`), either given explicitly or guessed from the
//!   project manifest (see [`guess_paths`]);
//! - the generator's output directory, from the config's `outputDir`
//!   (default [`DEFAULT_OUTPUT_DIR`]) relative to the config file;
//! - the docs input root, from the navigation document's `docs_dir`
//!   (default `docs`) relative to the navigation document;
//! - the reference directory: the output directory relative to the docs
//!   root. Navigation entries under this prefix are reference pages.
//!
//! Overrides from the command line are passed in through [`PathOverrides`].
//!
//! ## Environment Variable Expansion
//!
//! The manifest's `navsync.mkdocs` and `navsync.config` values support
//! `${VAR}` and `${VAR:-default}`.

mod expand;
mod generator;
mod manifest;

use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

pub use generator::{DEFAULT_OUTPUT_DIR, GeneratorConfig};
pub use manifest::{
    DEFAULT_CONFIG_FILENAME, DEFAULT_MKDOCS_FILENAME, GuessedPaths, MANIFEST_FILENAME, guess_paths,
};

/// Docs directory used when the navigation document does not set `docs_dir`.
pub const DEFAULT_DOCS_DIR: &str = "docs";

/// Subdirectory of the generator output holding the reference pages.
pub const COMMANDS_DIR: &str = "commands";

/// Command-line overrides for path resolution.
///
/// All fields are optional. Relative paths are resolved against the
/// working directory.
#[derive(Debug, Default, Clone)]
pub struct PathOverrides {
    /// Working directory (default: process current directory).
    pub cwd: Option<PathBuf>,
    /// Navigation document path (default: guessed).
    pub mkdocs: Option<PathBuf>,
    /// Project manifest path used as a discovery hint.
    pub manifest: Option<PathBuf>,
    /// Generator config path (default: guessed).
    pub config: Option<PathBuf>,
}

/// Fully resolved locations, all absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Navigation document.
    pub mkdocs_path: PathBuf,
    /// Generator config document.
    pub config_path: PathBuf,
    /// Generator output directory.
    pub output_dir: PathBuf,
    /// Documentation input root.
    pub docs_dir: PathBuf,
    /// Output directory relative to the docs root, `/`-separated.
    pub reference_dir: String,
}

impl ResolvedPaths {
    /// Resolve every path from the given overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if either document is missing or unparsable, or if
    /// the output directory cannot be expressed relative to the docs root.
    pub fn resolve(overrides: &PathOverrides) -> Result<Self, ConfigError> {
        let cwd = absolute_cwd(overrides.cwd.as_deref())?;

        let (mkdocs_path, config_path) = match (&overrides.mkdocs, &overrides.config) {
            (Some(mkdocs), Some(config)) => (cwd.join(mkdocs), cwd.join(config)),
            (mkdocs, config) => {
                let guessed = guess_paths(&cwd, overrides.manifest.as_deref())?;
                (
                    mkdocs.as_ref().map_or(guessed.mkdocs_path, |p| cwd.join(p)),
                    config.as_ref().map_or(guessed.config_path, |p| cwd.join(p)),
                )
            }
        };
        let mkdocs_path = normalize(&mkdocs_path);
        let config_path = normalize(&config_path);
        tracing::debug!(
            mkdocs = %mkdocs_path.display(),
            config = %config_path.display(),
            "resolved input documents"
        );

        let generator = GeneratorConfig::load(&config_path)?;
        let output_dir = normalize(&generator.output_dir(parent_dir(&config_path)));

        let docs_dir_name = read_docs_dir(&mkdocs_path)?;
        let docs_dir = normalize(&parent_dir(&mkdocs_path).join(docs_dir_name));

        let reference_dir = relative_path(&output_dir, &docs_dir).ok_or_else(|| {
            ConfigError::Validation(format!(
                "output directory {} has no UTF-8 path relative to docs directory {}",
                output_dir.display(),
                docs_dir.display()
            ))
        })?;
        if reference_dir.is_empty() {
            return Err(ConfigError::Validation(format!(
                "output directory {} is the docs directory itself",
                output_dir.display()
            )));
        }

        Ok(Self {
            mkdocs_path,
            config_path,
            output_dir,
            docs_dir,
            reference_dir,
        })
    }

    /// Directory holding the generated reference pages.
    #[must_use]
    pub fn commands_dir(&self) -> PathBuf {
        self.output_dir.join(COMMANDS_DIR)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing error (manifest or generator config).
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parsing error (navigation document).
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Manifest field (e.g., "`navsync.mkdocs`").
        field: String,
        /// Error message (e.g., "${`SITE_DIR`} not set").
        message: String,
    },
}

/// Fields of the navigation document needed for path resolution.
#[derive(Deserialize, Default)]
#[serde(default)]
struct MkdocsFields {
    docs_dir: Option<String>,
}

/// Read `docs_dir` from the navigation document.
fn read_docs_dir(mkdocs_path: &Path) -> Result<String, ConfigError> {
    if !mkdocs_path.is_file() {
        return Err(ConfigError::NotFound(mkdocs_path.to_path_buf()));
    }
    let content = std::fs::read_to_string(mkdocs_path)?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(DEFAULT_DOCS_DIR.to_owned());
    }
    let fields: MkdocsFields = serde_yaml::from_str(trimmed)?;
    Ok(fields
        .docs_dir
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| DEFAULT_DOCS_DIR.to_owned()))
}

/// Working directory as an absolute path.
fn absolute_cwd(cwd: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let current = std::env::current_dir()?;
    Ok(normalize(&cwd.map_or_else(|| current.clone(), |p| current.join(p))))
}

fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or(Path::new("."))
}

/// Lexically normalize a path, dropping `.` and folding `..`.
///
/// Symlinks are not resolved.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Express `path` relative to `base` with `/` separators.
///
/// Returns `None` when the two paths share no root (e.g. different drives,
/// or one absolute and one relative) or when the result would contain a
/// component that is not valid UTF-8. Returns an empty string when they are
/// the same directory.
#[must_use]
pub fn relative_path(path: &Path, base: &Path) -> Option<String> {
    let path = normalize(path);
    let base = normalize(base);
    if path.has_root() != base.has_root() {
        return None;
    }

    let path_parts: Vec<_> = path.components().collect();
    let base_parts: Vec<_> = base.components().collect();
    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();
    if path.has_root() && common == 0 {
        return None;
    }

    let downs = path_parts[common..]
        .iter()
        .map(|c| c.as_os_str().to_str().map(str::to_owned))
        .collect::<Option<Vec<_>>>()?;
    let mut parts = vec!["..".to_owned(); base_parts.len() - common];
    parts.extend(downs);
    Some(parts.join("/"))
}
