//! `navsync paths` command implementation.

use clap::Args;
use navsync_config::ResolvedPaths;

use super::PathArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the paths command.
#[derive(Args, Debug)]
pub(crate) struct PathsArgs {
    #[command(flatten)]
    paths: PathArgs,
}

impl PathsArgs {
    /// Execute the paths command.
    ///
    /// # Errors
    ///
    /// Returns an error if any path cannot be resolved.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let resolved = ResolvedPaths::resolve(&self.paths.into_overrides())?;

        output.field("Navigation", &resolved.mkdocs_path.display().to_string());
        output.field("Generator config", &resolved.config_path.display().to_string());
        output.field("Docs directory", &resolved.docs_dir.display().to_string());
        output.field("Output directory", &resolved.output_dir.display().to_string());
        output.field("Reference pages", &resolved.commands_dir().display().to_string());
        output.field("Reference prefix", &resolved.reference_dir);
        Ok(())
    }
}
