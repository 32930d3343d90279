//! Navigation reconciliation.
//!
//! Given the current tree and the discovered reference pages, decide whether
//! the tree needs rewriting and build the new tree.
//!
//! Reference pages are recognized by prefix: any page path starting with
//! `{reference_dir}/` belongs to the reference set. Two tree styles are
//! supported:
//!
//! ```yaml
//! # flat
//! nav:
//!   - intro.md
//!   - reference/commands/init.md
//!
//! # headered
//! nav:
//!   - intro.md
//!   - Reference:
//!       - reference/commands/init.md
//! ```
//!
//! The discovered list is authoritative: old reference entries are dropped
//! and the new ones appended after the surviving entries.

use std::collections::BTreeSet;

use crate::entry::NavEntry;

/// Section title used when none is configured.
pub const DEFAULT_HEADER: &str = "Reference";

/// Options controlling how the reference section is written.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Title of the section holding reference pages.
    pub header: String,
    /// Always write a headered section, even into a flat tree.
    pub use_header: bool,
    /// Always write a flat list. Takes precedence over `use_header`.
    pub no_header: bool,
    /// Compute and report changes without writing.
    pub dry_run: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER.to_owned(),
            use_header: false,
            no_header: false,
            dry_run: false,
        }
    }
}

/// Set difference between discovered and existing reference pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
    /// Discovered pages missing from the tree (sorted).
    pub added: Vec<String>,
    /// Tree pages no longer discovered (sorted).
    pub removed: Vec<String>,
}

impl Diff {
    /// Compare two page lists as sets. Duplicates count once.
    #[must_use]
    pub fn between(discovered: &[String], existing: &[String]) -> Self {
        let discovered: BTreeSet<&str> = discovered.iter().map(String::as_str).collect();
        let existing: BTreeSet<&str> = existing.iter().map(String::as_str).collect();
        Self {
            added: discovered.difference(&existing).map(|&s| s.to_owned()).collect(),
            removed: existing.difference(&discovered).map(|&s| s.to_owned()).collect(),
        }
    }

    /// True when both sets are equal.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Result of reconciling a tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// What changed in the reference set.
    pub diff: Diff,
    /// Replacement tree, present only when `diff` is non-empty.
    pub nav: Option<Vec<NavEntry>>,
}

impl Reconciliation {
    fn new(diff: Diff, nav: Vec<NavEntry>) -> Self {
        let nav = (!diff.is_empty()).then_some(nav);
        Self { diff, nav }
    }
}

/// Index of the first top-level section titled `header`.
#[must_use]
pub fn find_reference_section(entries: &[NavEntry], header: &str) -> Option<usize> {
    entries
        .iter()
        .position(|entry| matches!(entry, NavEntry::Section { title, .. } if title == header))
}

/// Split entries into reference page paths and everything else.
///
/// Relative order is kept on both sides.
#[must_use]
pub fn partition_reference(
    entries: Vec<NavEntry>,
    reference_dir: &str,
) -> (Vec<String>, Vec<NavEntry>) {
    let prefix = format!("{reference_dir}/");
    let mut references = Vec::new();
    let mut others = Vec::new();
    for entry in entries {
        match entry {
            NavEntry::Page(path) if path.starts_with(&prefix) => references.push(path),
            other => others.push(other),
        }
    }
    (references, others)
}

/// Whether the tree should be written in headered style.
///
/// True when forced, or when the tree already holds anything other than
/// plain page paths.
#[must_use]
pub fn uses_headers(entries: &[NavEntry], force: bool) -> bool {
    force || entries.iter().any(|entry| entry.as_page().is_none())
}

/// Reconcile `entries` against the `discovered` reference pages.
///
/// Headered style, section present: the section keeps its non-reference
/// children followed by the discovered pages. Headered style, no section:
/// top-level reference pages are dropped and a new section is appended.
/// Flat style: top-level reference pages are dropped and the discovered
/// pages appended; a reference section, if any, is dissolved in place.
#[must_use]
pub fn reconcile(
    mut entries: Vec<NavEntry>,
    discovered: &[String],
    reference_dir: &str,
    options: &SyncOptions,
) -> Reconciliation {
    let headered = !options.no_header && uses_headers(&entries, options.use_header);
    let pages = || discovered.iter().cloned().map(NavEntry::Page);

    if !headered {
        let flat = dissolve_section(entries, &options.header);
        let (existing, mut others) = partition_reference(flat, reference_dir);
        others.extend(pages());
        return Reconciliation::new(Diff::between(discovered, &existing), others);
    }

    let section = find_reference_section(&entries, &options.header);
    if let Some(NavEntry::Section { children, .. }) = section.and_then(|i| entries.get_mut(i)) {
        let (existing, mut others) = partition_reference(std::mem::take(children), reference_dir);
        others.extend(pages());
        *children = others;
        return Reconciliation::new(Diff::between(discovered, &existing), entries);
    }

    let (existing, mut others) = partition_reference(entries, reference_dir);
    others.push(NavEntry::section(options.header.clone(), pages().collect()));
    Reconciliation::new(Diff::between(discovered, &existing), others)
}

/// Replace the first section titled `header` with its children.
fn dissolve_section(entries: Vec<NavEntry>, header: &str) -> Vec<NavEntry> {
    let mut flattened = Vec::with_capacity(entries.len());
    let mut dissolved = false;
    for entry in entries {
        match entry {
            NavEntry::Section { title, children } if !dissolved && title == header => {
                dissolved = true;
                flattened.extend(children);
            }
            other => flattened.push(other),
        }
    }
    flattened
}
