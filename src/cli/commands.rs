//! Command implementations

use super::Args;
use crate::config::{self, cli::CliArgs, parser, DEFAULT_CONFIG_FILE};
use crate::core::Analyzer;
use crate::error::{ErrorSeverity, Result, ScopeError};
use crate::models::analysis::RepositoryAnalysis;
use crate::models::config::Settings;
use crate::output::{create_formatter, create_progress_callback, create_writer, FileWriter, OutputWriter, ProgressReporter};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Analyze the configured repository
    Analyze(Args),
    /// Write a default configuration file
    Init(Option<PathBuf>),
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        if args.init {
            return Command::Init(args.config);
        }
        Command::Analyze(args)
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        match self {
            Command::Analyze(args) => {
                self.validate()?;
                let settings = config::load_config(CliArgs::from(args))?;
                debug!(?settings, "resolved settings");
                let results = run_analysis(&settings)?;
                write_results(&settings, &results)
            }
            Command::Init(path) => {
                let config_path = path.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

                if config_path.exists() {
                    println!("Configuration file already exists at: {}", config_path.display());
                    println!("To overwrite it, delete the file first and run this command again.");
                    return Ok(());
                }

                parser::create_default_config(&config_path)?;
                println!("Created default configuration file at: {}", config_path.display());
                Ok(())
            }
        }
    }

    /// Validate the command arguments
    pub fn validate(&self) -> Result<()> {
        match self {
            Command::Analyze(args) => {
                if let Some(path) = &args.path {
                    if !path.is_dir() {
                        return Err(ScopeError::InvalidPath { path: path.clone() });
                    }
                }
                if let Some(config_path) = &args.config {
                    if !config_path.exists() {
                        return Err(ScopeError::ConfigNotFound {
                            path: config_path.clone(),
                        });
                    }
                }
                if args.threads == Some(0) {
                    return Err(ScopeError::config_error("--threads must be at least 1"));
                }
                Ok(())
            }
            Command::Init(_) => Ok(()),
        }
    }

    /// Run the command and map the outcome to a process exit code
    pub fn run(&self) -> i32 {
        match self.execute() {
            Ok(()) => 0,
            Err(err) => {
                eprintln!("{}: {}", err.severity(), err.user_message());
                exit_code(err.severity())
            }
        }
    }
}

/// Exit code for an error of the given severity
pub fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Warning => 0,
        ErrorSeverity::Error => 1,
        ErrorSeverity::Critical => 2,
    }
}

/// Analyze with a progress bar on stderr
pub fn run_analysis(settings: &Settings) -> Result<RepositoryAnalysis> {
    let reporter = Arc::new(ProgressReporter::new(settings.show_progress && !settings.quiet));
    reporter.start(&format!("Scanning {}", settings.scan_path.display()));

    let analyzer = Analyzer::new(settings.clone());
    let outcome = analyzer.analyze_with_progress(create_progress_callback(Arc::clone(&reporter)));
    reporter.clear();

    outcome
}

/// Write the formatted report and the optional DOT export
pub fn write_results(settings: &Settings, results: &RepositoryAnalysis) -> Result<()> {
    let formatter = create_formatter(
        settings.output_format,
        settings.use_colors && settings.output_file.is_none(),
        settings.verbose,
        settings.quiet,
    );
    let content = formatter.format(results)?;
    create_writer(settings.output_file.as_ref()).write(&content)?;

    if let Some(path) = &settings.output_file {
        info!(path = %path.display(), format = %settings.output_format, "report written");
    }

    if let Some(path) = &settings.dot_file {
        FileWriter::new(path).write(&results.dependency_graph.to_dot())?;
        info!(path = %path.display(), "dependency graph written");
    }

    Ok(())
}
