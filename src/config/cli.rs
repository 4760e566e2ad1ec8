//! Command-line argument configuration source

use std::path::PathBuf;

use super::ConfigSource;
use crate::cli::args::Args;
use crate::error::Result;
use crate::models::config::{OutputFormat, PartialSettings};

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
    name: String,
    priority: u8,
}

/// Configuration-relevant subset of the command line
///
/// Flags that were not given stay `None`/`false` so they do not mask
/// values from lower-priority sources.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub path: Option<PathBuf>,
    pub name: Option<String>,
    pub exclude: Option<Vec<String>>,
    pub no_follow_links: bool,
    pub no_parallel: bool,
    pub threads: Option<usize>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub dot_file: Option<PathBuf>,
    pub quiet: bool,
    pub verbose: bool,
    pub no_colors: bool,
    pub no_progress: bool,
    pub config: Option<PathBuf>,
}

impl From<&Args> for CliArgs {
    fn from(args: &Args) -> Self {
        Self {
            path: args.path.clone(),
            name: args.name.clone(),
            exclude: if args.exclude.is_empty() {
                None
            } else {
                Some(args.exclude.clone())
            },
            no_follow_links: args.no_follow_links,
            no_parallel: args.no_parallel,
            threads: args.threads,
            output_format: args.output.map(OutputFormat::from),
            output_file: args.output_file.clone(),
            dot_file: args.dot.clone(),
            quiet: args.quiet,
            verbose: args.verbose,
            no_colors: args.no_colors,
            no_progress: args.no_progress,
            config: args.config.clone(),
        }
    }
}

impl CliConfig {
    /// Create a new CLI configuration source
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            name: "command-line arguments".to_string(),
            priority: 30,
        }
    }

    /// Create a CLI configuration source from parsed arguments
    pub fn from_args(args: &Args) -> Self {
        Self::new(CliArgs::from(args))
    }

    /// Get the config file path if specified
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.args.config.as_ref()
    }

    pub fn args(&self) -> &CliArgs {
        &self.args
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let args = &self.args;
        let mut settings = PartialSettings {
            scan_path: args.path.clone(),
            repo_name: args.name.clone(),
            exclude_dirs: args.exclude.clone(),
            threads: args.threads,
            output_format: args.output_format,
            output_file: args.output_file.clone(),
            dot_file: args.dot_file.clone(),
            ..Default::default()
        };

        // Boolean flags only ever switch a default off or on
        if args.no_follow_links {
            settings.follow_links = Some(false);
        }
        if args.no_parallel {
            settings.parallel = Some(false);
        }
        if args.quiet {
            settings.quiet = Some(true);
        }
        if args.verbose {
            settings.verbose = Some(true);
        }
        if args.no_colors {
            settings.use_colors = Some(false);
        }
        if args.no_progress {
            settings.show_progress = Some(false);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
