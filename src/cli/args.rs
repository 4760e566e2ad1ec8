//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// reposcope - repository layout and import dependency analyzer
#[derive(Parser, Debug, Default)]
#[command(name = "reposcope")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Map a repository's folder tree and the modules each source file imports")]
#[command(long_about = "reposcope walks a source repository, renders its folder tree, classifies \
source files by language and extracts the modules each file imports. Python files are parsed \
into a syntax tree; JavaScript and TypeScript files are matched against import/require patterns. \
The result is a per-file report plus a flat list of file -> module dependency edges.")]
#[command(after_help = "EXAMPLES:

Basic Usage:
    # Analyze the current directory
    reposcope

    # Analyze a specific checkout and name it in the report
    reposcope --path ./checkout --name my-service

    # Skip additional directory names at every level
    reposcope --exclude node_modules --exclude build

Output Options:
    # Full result as JSON
    reposcope --output json --output-file analysis.json

    # Dependency edges as CSV
    reposcope --output csv

    # Graphviz export of the dependency graph
    reposcope --dot deps.dot

Performance Options:
    # Extract on a single thread
    reposcope --no-parallel

    # Bound the worker pool
    reposcope --threads 4

Configuration:
    # Use a specific configuration file
    reposcope --config ./reposcope.toml

    # Create .reposcope.toml in the current directory
    reposcope --init
")]
pub struct Args {
    /// Repository root to analyze
    #[arg(short, long, value_name = "PATH", help = "Repository root to analyze (defaults to the current directory)")]
    pub path: Option<PathBuf>,

    /// Repository name used in the report
    #[arg(short, long, value_name = "NAME", help = "Name used in the report (defaults to the root directory name)")]
    pub name: Option<String>,

    /// Directory names to exclude
    #[arg(short, long, value_name = "NAME", help = "Directory name skipped at every level; replaces the default list (repeatable)")]
    pub exclude: Vec<String>,

    /// Do not follow symbolic links
    #[arg(long, help = "Skip symbolic links instead of following them")]
    pub no_follow_links: bool,

    /// Disable parallel extraction
    #[arg(long, help = "Read and extract files on the calling thread only")]
    pub no_parallel: bool,

    /// Worker pool size
    #[arg(short, long, value_name = "N", help = "Number of extraction workers (defaults to the number of CPUs)")]
    pub threads: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, help = "Output format: 'text' (default), 'json' or 'csv'")]
    pub output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(long, value_name = "FILE", help = "File to write output to (uses stdout if not specified)")]
    pub output_file: Option<PathBuf>,

    /// Export the dependency graph in DOT format
    #[arg(long, value_name = "FILE", help = "Write the dependency graph as Graphviz DOT")]
    pub dot: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to configuration file (defaults to .reposcope.toml lookup)")]
    pub config: Option<PathBuf>,

    /// Initialize a default configuration file
    #[arg(long, help = "Create a default configuration file (.reposcope.toml) in the current directory")]
    pub init: bool,

    /// Suppress non-essential output
    #[arg(short, long, conflicts_with = "verbose", help = "Only print results and errors")]
    pub quiet: bool,

    /// Show debug information
    #[arg(short, long, help = "Show per-file debug logging and extra report detail")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, help = "Disable ANSI colors in text output")]
    pub no_colors: bool,

    /// Disable progress bars
    #[arg(long, help = "Disable the progress bar")]
    pub no_progress: bool,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV edge list
    Csv,
}

impl From<OutputFormat> for crate::models::config::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Text,
            OutputFormat::Json => Self::Json,
            OutputFormat::Csv => Self::Csv,
        }
    }
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
