//! End-to-end synchronization of one navigation document.

use navsync_config::{PathOverrides, ResolvedPaths};

use crate::discovery::discover_reference_pages;
use crate::entry::NavDocument;
use crate::error::NavError;
use crate::reconcile::{SyncOptions, reconcile};
use crate::report::Reporter;

/// What a synchronization run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No reference pages were found; nothing was touched.
    NoReferencePages,
    /// The tree already lists exactly the discovered pages.
    Unchanged,
    /// The reference set changed.
    Updated {
        /// Pages added to the tree.
        added: Vec<String>,
        /// Pages removed from the tree.
        removed: Vec<String>,
        /// False on a dry run.
        written: bool,
    },
}

/// Resolve paths from `overrides`, then synchronize.
///
/// # Errors
///
/// Returns an error if path resolution, reading, or writing fails.
pub fn run(
    overrides: &PathOverrides,
    options: &SyncOptions,
    reporter: &dyn Reporter,
) -> Result<SyncOutcome, NavError> {
    let paths = ResolvedPaths::resolve(overrides)?;
    sync_reference_nav(&paths, options, reporter)
}

/// Bring the reference section of the navigation document in line with the
/// generated reference pages.
///
/// The document is rewritten only when the set of reference pages differs
/// from what it lists, so a second run with unchanged inputs writes nothing.
///
/// # Errors
///
/// Returns an error if the document cannot be read or parsed, the commands
/// directory cannot be listed, or the write fails.
pub fn sync_reference_nav(
    paths: &ResolvedPaths,
    options: &SyncOptions,
    reporter: &dyn Reporter,
) -> Result<SyncOutcome, NavError> {
    reporter.debug(&format!("Navigation document: {}", paths.mkdocs_path.display()));
    reporter.debug(&format!("Reference directory: {}", paths.reference_dir));

    let mut document = NavDocument::load(&paths.mkdocs_path)?;

    let commands_dir = paths.commands_dir();
    let pages = discover_reference_pages(&commands_dir, &paths.reference_dir)?;
    if pages.is_empty() {
        reporter.warning(&format!(
            "No reference pages found in {}",
            commands_dir.display()
        ));
        return Ok(SyncOutcome::NoReferencePages);
    }
    for page in &pages {
        reporter.debug(&format!("Found reference page: {page}"));
    }

    let result = reconcile(document.take_nav(), &pages, &paths.reference_dir, options);
    let Some(nav) = result.nav else {
        reporter.info("No changes to navigation");
        return Ok(SyncOutcome::Unchanged);
    };

    for page in &result.diff.added {
        reporter.debug(&format!("+ {page}"));
    }
    for page in &result.diff.removed {
        reporter.debug(&format!("- {page}"));
    }
    let summary = format!(
        "{} added, {} removed",
        result.diff.added.len(),
        result.diff.removed.len()
    );

    let written = if options.dry_run {
        reporter.info(&format!(
            "Dry run: would update {} ({summary})",
            document.path().display()
        ));
        false
    } else {
        document.set_nav(nav);
        document.save()?;
        reporter.success(&format!(
            "Updated {} ({summary})",
            document.path().display()
        ));
        true
    };

    Ok(SyncOutcome::Updated {
        added: result.diff.added,
        removed: result.diff.removed,
        written,
    })
}
