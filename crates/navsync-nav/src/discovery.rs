//! Reference page discovery.
//!
//! Lists the generator's `commands` directory and turns every Markdown file
//! in it into a navigation path relative to the docs root.

use std::fs;
use std::path::Path;

use navsync_config::COMMANDS_DIR;

use crate::error::NavError;

/// List reference pages in `commands_dir`.
///
/// Returns `{reference_dir}/commands/{name}` for every regular file whose
/// name ends in `.md`, sorted lexicographically. Subdirectories and symlinks
/// are skipped.
///
/// # Errors
///
/// Returns `NavError::Io` if the directory is missing or cannot be listed,
/// if any entry cannot be inspected, or if a Markdown file name is not valid
/// UTF-8.
pub fn discover_reference_pages(
    commands_dir: &Path,
    reference_dir: &str,
) -> Result<Vec<String>, NavError> {
    let io_error = |source: std::io::Error| NavError::Io {
        path: commands_dir.to_path_buf(),
        source,
    };

    let mut pages = Vec::new();
    for entry in fs::read_dir(commands_dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        if !entry.file_type().map_err(io_error)?.is_file() {
            continue;
        }
        let name = entry.file_name();
        if !name.as_encoded_bytes().ends_with(b".md") {
            continue;
        }
        let name = name.into_string().map_err(|name| {
            io_error(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("file name is not valid UTF-8: {}", name.display()),
            ))
        })?;
        pages.push(format!("{reference_dir}/{COMMANDS_DIR}/{name}"));
    }
    pages.sort();

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_discover_markdown_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["push.md", "init.md", "config.md"] {
            fs::write(dir.path().join(name), "# cmd").unwrap();
        }

        let pages = discover_reference_pages(dir.path(), "reference").unwrap();

        assert_eq!(
            pages,
            vec![
                "reference/commands/config.md",
                "reference/commands/init.md",
                "reference/commands/push.md",
            ]
        );
    }

    #[test]
    fn test_discover_skips_non_markdown_and_dirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("init.md"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join(".draft.md"), "").unwrap();
        fs::write(dir.path().join("README.MD"), "").unwrap();
        fs::create_dir(dir.path().join("nested.md")).unwrap();

        let pages = discover_reference_pages(dir.path(), "api/cli").unwrap();

        assert_eq!(
            pages,
            vec!["api/cli/commands/.draft.md", "api/cli/commands/init.md"]
        );
    }

    #[test]
    fn test_discover_lists_dot_prefixed_pages() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".index.md"), "").unwrap();

        let pages = discover_reference_pages(dir.path(), "reference").unwrap();

        assert_eq!(pages, vec!["reference/commands/.index.md"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_skips_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("init.md");
        fs::write(&target, "").unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("alias.md")).unwrap();

        let pages = discover_reference_pages(dir.path(), "reference").unwrap();

        assert_eq!(pages, vec!["reference/commands/init.md"]);
    }

    #[test]
    fn test_discover_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let pages = discover_reference_pages(dir.path(), "reference").unwrap();
        assert!(pages.is_empty());
    }

    #[test]
    fn test_discover_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let commands_dir = dir.path().join("commands");

        let err = discover_reference_pages(&commands_dir, "reference").unwrap_err();

        assert!(matches!(err, NavError::Io { ref path, .. } if *path == commands_dir));
        assert!(err.to_string().contains("commands"));
    }

    #[test]
    fn test_discover_file_instead_of_directory() {
        let dir = tempfile::tempdir().unwrap();
        let commands_dir = dir.path().join("commands");
        fs::write(&commands_dir, "").unwrap();

        let err = discover_reference_pages(&commands_dir, "reference").unwrap_err();

        assert!(matches!(err, NavError::Io { .. }));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_discover_non_utf8_markdown_name_is_an_error() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("init.md"), "").unwrap();
        fs::write(dir.path().join(OsStr::from_bytes(b"bad\xff.md")), "").unwrap();

        let err = discover_reference_pages(dir.path(), "reference").unwrap_err();

        assert!(matches!(err, NavError::Io { .. }));
        assert!(err.to_string().contains("UTF-8"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_discover_ignores_non_utf8_non_markdown_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("init.md"), "").unwrap();
        fs::write(dir.path().join(OsStr::from_bytes(b"bad\xff.txt")), "").unwrap();

        let pages = discover_reference_pages(dir.path(), "reference").unwrap();

        assert_eq!(pages, vec!["reference/commands/init.md"]);
    }

    #[test]
    fn test_discover_outside_docs_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("init.md"), "").unwrap();

        let pages = discover_reference_pages(dir.path(), "../generated").unwrap();

        assert_eq!(pages, vec!["../generated/commands/init.md"]);
    }
}
