//! Reference navigation synchronization.
//!
//! Keeps the reference section of a `mkdocs.yml` navigation tree in line
//! with the Markdown pages a reference generator wrote into its `commands`
//! output directory:
//!
//! 1. Resolve paths ([`navsync_config::ResolvedPaths`])
//! 2. Load the navigation document ([`NavDocument`])
//! 3. Discover reference pages ([`discover_reference_pages`])
//! 4. Reconcile the tree ([`reconcile`])
//! 5. Write it back atomically, only if the reference set changed
//!
//! Messages go through a caller-supplied [`Reporter`].
//!
//! # Example
//!
//! ```ignore
//! use navsync_config::PathOverrides;
//! use navsync_nav::{SyncOptions, run};
//!
//! let outcome = run(&PathOverrides::default(), &SyncOptions::default(), &reporter)?;
//! ```

mod discovery;
mod entry;
mod error;
mod reconcile;
mod report;
mod sync;
mod write;

pub use discovery::discover_reference_pages;
pub use entry::{NAV_KEY, NavDocument, NavEntry};
pub use error::NavError;
pub use reconcile::{
    DEFAULT_HEADER, Diff, Reconciliation, SyncOptions, find_reference_section,
    partition_reference, reconcile, uses_headers,
};
pub use report::Reporter;
pub use sync::{SyncOutcome, run, sync_reference_nav};
