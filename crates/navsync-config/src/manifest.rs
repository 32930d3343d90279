//! Project manifest discovery and path guessing.
//!
//! The manifest is the project's `package.json`. Its directory is the
//! project root, and an optional `navsync` object may point at the
//! navigation document and the generator config:
//!
//! ```json
//! {
//!   "name": "my-cli",
//!   "navsync": { "mkdocs": "site/mkdocs.yml", "config": "docgen.json" }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::ConfigError;
use crate::expand::expand_env;

/// Manifest filename to search for.
pub const MANIFEST_FILENAME: &str = "package.json";

/// Navigation document guessed when the manifest does not name one.
pub const DEFAULT_MKDOCS_FILENAME: &str = "mkdocs.yml";

/// Generator config guessed when the manifest does not name one.
pub const DEFAULT_CONFIG_FILENAME: &str = "docgen.json";

/// The parts of `package.json` this tool reads.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Manifest {
    navsync: ManifestSection,
}

/// `navsync` object inside the manifest (paths relative to the project root).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ManifestSection {
    mkdocs: Option<String>,
    config: Option<String>,
}

/// Best-guess locations derived from the project manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessedPaths {
    /// Directory holding the manifest, or the working directory.
    pub project_root: PathBuf,
    /// Manifest that was read, if any.
    pub manifest_path: Option<PathBuf>,
    /// Guessed navigation document.
    pub mkdocs_path: PathBuf,
    /// Guessed generator config document.
    pub config_path: PathBuf,
}

/// Guess the navigation document and generator config locations.
///
/// If `manifest_path` is given it must exist. Otherwise `cwd` and its parents
/// are searched for `package.json`; when none is found the guesses are made
/// relative to `cwd`.
///
/// # Errors
///
/// Returns an error if an explicit manifest is missing, the manifest cannot
/// be read or parsed, or a referenced environment variable is unset.
pub fn guess_paths(cwd: &Path, manifest_path: Option<&Path>) -> Result<GuessedPaths, ConfigError> {
    let manifest_path = match manifest_path {
        Some(path) => {
            let path = cwd.join(path);
            if !path.is_file() {
                return Err(ConfigError::NotFound(path));
            }
            Some(path)
        }
        None => discover_manifest(cwd),
    };

    let (project_root, section) = match &manifest_path {
        Some(path) => {
            tracing::debug!(manifest = %path.display(), "reading project manifest");
            let content = std::fs::read_to_string(path)?;
            let manifest: Manifest = serde_json::from_str(&content)?;
            let root = path.parent().unwrap_or(cwd).to_path_buf();
            (root, manifest.navsync)
        }
        None => {
            tracing::debug!(cwd = %cwd.display(), "no project manifest found");
            (cwd.to_path_buf(), ManifestSection::default())
        }
    };

    let mkdocs_path = guess_one(
        &project_root,
        section.mkdocs.as_deref(),
        DEFAULT_MKDOCS_FILENAME,
        "navsync.mkdocs",
    )?;
    let config_path = guess_one(
        &project_root,
        section.config.as_deref(),
        DEFAULT_CONFIG_FILENAME,
        "navsync.config",
    )?;

    Ok(GuessedPaths {
        project_root,
        manifest_path,
        mkdocs_path,
        config_path,
    })
}

/// Resolve one manifest entry (or its default) against the project root.
fn guess_one(
    root: &Path,
    declared: Option<&str>,
    default: &str,
    field: &str,
) -> Result<PathBuf, ConfigError> {
    match declared {
        Some(value) => {
            let expanded = expand_env(value, field)?;
            if expanded.is_empty() {
                return Err(ConfigError::Validation(format!("{field} cannot be empty")));
            }
            Ok(root.join(expanded))
        }
        None => Ok(root.join(default)),
    }
}

/// Search for the manifest in `start` and its parents.
fn discover_manifest(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(MANIFEST_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_guess_without_manifest_uses_cwd() {
        let dir = tempfile::tempdir().unwrap();

        let guessed = guess_paths(dir.path(), None).unwrap();

        assert_eq!(guessed.project_root, dir.path());
        assert!(guessed.manifest_path.is_none());
        assert_eq!(guessed.mkdocs_path, dir.path().join("mkdocs.yml"));
        assert_eq!(guessed.config_path, dir.path().join("docgen.json"));
    }

    #[test]
    fn test_guess_discovers_manifest_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"name": "demo"}"#).unwrap();
        let nested = dir.path().join("src/commands");
        fs::create_dir_all(&nested).unwrap();

        let guessed = guess_paths(&nested, None).unwrap();

        assert_eq!(guessed.project_root, dir.path());
        assert_eq!(
            guessed.manifest_path,
            Some(dir.path().join("package.json"))
        );
        assert_eq!(guessed.mkdocs_path, dir.path().join("mkdocs.yml"));
    }

    #[test]
    fn test_guess_reads_navsync_section() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"name": "demo", "navsync": {"mkdocs": "site/mkdocs.yml", "config": "cfg/docgen.json"}}"#,
        )
        .unwrap();

        let guessed = guess_paths(dir.path(), None).unwrap();

        assert_eq!(guessed.mkdocs_path, dir.path().join("site/mkdocs.yml"));
        assert_eq!(guessed.config_path, dir.path().join("cfg/docgen.json"));
    }

    #[test]
    fn test_guess_explicit_manifest_must_exist() {
        let dir = tempfile::tempdir().unwrap();

        let err = guess_paths(dir.path(), Some(Path::new("missing/package.json"))).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_guess_explicit_manifest_sets_root() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("project");
        fs::create_dir_all(&project).unwrap();
        fs::write(project.join("package.json"), "{}").unwrap();

        let guessed = guess_paths(dir.path(), Some(Path::new("project/package.json"))).unwrap();

        assert_eq!(guessed.project_root, project);
        assert_eq!(guessed.config_path, project.join("docgen.json"));
    }

    #[test]
    fn test_guess_invalid_manifest_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{ not json").unwrap();

        let err = guess_paths(dir.path(), None).unwrap_err();

        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_guess_empty_section_value_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"navsync": {"mkdocs": ""}}"#,
        )
        .unwrap();

        let err = guess_paths(dir.path(), None).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("navsync.mkdocs"));
    }
}
