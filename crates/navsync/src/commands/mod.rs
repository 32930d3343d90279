//! CLI command implementations.

pub(crate) mod paths;
pub(crate) mod sync;

pub(crate) use paths::PathsArgs;
pub(crate) use sync::SyncArgs;

use std::path::PathBuf;

use clap::Args;
use navsync_config::PathOverrides;

/// Location arguments shared by all commands.
#[derive(Args, Debug)]
pub(crate) struct PathArgs {
    /// Working directory for resolving relative paths (default: current directory).
    #[arg(short = 'C', long)]
    cwd: Option<PathBuf>,

    /// Navigation document (default: guessed from package.json, then ./mkdocs.yml).
    #[arg(short, long, env = "NAVSYNC_MKDOCS")]
    mkdocs: Option<PathBuf>,

    /// Project manifest used to guess the other paths (default: auto-discover package.json).
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Reference generator config (default: guessed from package.json, then ./docgen.json).
    #[arg(short, long, env = "NAVSYNC_CONFIG")]
    config: Option<PathBuf>,
}

impl PathArgs {
    /// Convert into path resolution overrides.
    pub(crate) fn into_overrides(self) -> PathOverrides {
        PathOverrides {
            cwd: self.cwd,
            mkdocs: self.mkdocs,
            manifest: self.manifest,
            config: self.config,
        }
    }
}
