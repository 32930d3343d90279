//! `navsync sync` command implementation.

use clap::Args;
use navsync_nav::{DEFAULT_HEADER, SyncOptions, SyncOutcome, run};

use super::PathArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sync command.
#[derive(Args, Debug)]
pub(crate) struct SyncArgs {
    #[command(flatten)]
    paths: PathArgs,

    /// Title of the section holding reference pages.
    #[arg(long, env = "NAVSYNC_HEADER", default_value = DEFAULT_HEADER)]
    header: String,

    /// Always group reference pages under the header, even in a flat tree.
    #[arg(long)]
    use_header: bool,

    /// Always list reference pages flat, without a header.
    #[arg(long, conflicts_with = "use_header")]
    no_header: bool,

    /// Show what would change without writing the navigation document.
    #[arg(short = 'n', long)]
    dry_run: bool,
}

impl SyncArgs {
    /// Execute the sync command.
    ///
    /// # Errors
    ///
    /// Returns an error if path resolution, reading, or writing fails.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let options = self.sync_options();
        let overrides = self.paths.into_overrides();

        // Dry runs list the individual changes; real runs only summarize.
        if let SyncOutcome::Updated {
            added,
            removed,
            written: false,
        } = run(&overrides, &options, output)?
        {
            for page in &added {
                output.info(&format!("  + {page}"));
            }
            for page in &removed {
                output.info(&format!("  - {page}"));
            }
        }

        Ok(())
    }

    /// Collect reconciliation options from flags.
    fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            header: self.header.clone(),
            use_header: self.use_header,
            no_header: self.no_header,
            dry_run: self.dry_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: SyncArgs,
    }

    fn parse(argv: &[&str]) -> Result<SyncArgs, clap::Error> {
        let mut full = vec!["navsync"];
        full.extend_from_slice(argv);
        TestCli::try_parse_from(full).map(|cli| cli.args)
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]).unwrap();
        let options = args.sync_options();
        assert_eq!(options.header, "Reference");
        assert!(!options.use_header);
        assert!(!options.no_header);
        assert!(!options.dry_run);
    }

    #[test]
    fn test_flags_map_to_options() {
        let args = parse(&["--header", "CLI", "--use-header", "-n"]).unwrap();
        let options = args.sync_options();
        assert_eq!(options.header, "CLI");
        assert!(options.use_header);
        assert!(options.dry_run);
    }

    #[test]
    fn test_header_flags_conflict() {
        assert!(parse(&["--use-header", "--no-header"]).is_err());
    }

    #[test]
    fn test_path_flags_map_to_overrides() {
        let args = parse(&[
            "-C",
            "site",
            "-m",
            "nav.yml",
            "-c",
            "gen.json",
            "--manifest",
            "package.json",
        ])
        .unwrap();
        let overrides = args.paths.into_overrides();
        assert_eq!(overrides.cwd.as_deref(), Some(std::path::Path::new("site")));
        assert_eq!(overrides.mkdocs.as_deref(), Some(std::path::Path::new("nav.yml")));
        assert_eq!(overrides.config.as_deref(), Some(std::path::Path::new("gen.json")));
        assert_eq!(
            overrides.manifest.as_deref(),
            Some(std::path::Path::new("package.json"))
        );
    }
}
