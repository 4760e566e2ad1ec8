//! Output formatting and writing functionality

mod formatters;
mod progress;
#[cfg(test)]
mod tests;
mod writers;

pub use self::formatters::format_duration;
pub use self::progress::{create_progress_callback, ProgressReporter};
pub use self::writers::{create_writer, FileWriter, OutputWriter, StdoutWriter};

use crate::error::Result;
use crate::models::analysis::RepositoryAnalysis;
use crate::models::config::OutputFormat;

/// Trait for different output formatters
pub trait Formatter {
    /// Format analysis results into a string
    fn format(&self, results: &RepositoryAnalysis) -> Result<String>;
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    pub use_colors: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(use_colors: bool, verbose: bool, quiet: bool) -> Self {
        Self {
            use_colors,
            verbose,
            quiet,
        }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, results: &RepositoryAnalysis) -> Result<String> {
        // Quiet mode prints the bare edge list
        if self.quiet {
            return Ok(formatters::format_edges_plain(results));
        }

        Ok(formatters::format_results_text(
            results,
            self.use_colors,
            self.verbose,
        ))
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, results: &RepositoryAnalysis) -> Result<String> {
        if self.pretty {
            formatters::format_results_json(results)
        } else {
            Ok(serde_json::to_string(results)?)
        }
    }
}

/// CSV formatter for the dependency edge list
#[derive(Default)]
pub struct CsvFormatter;

impl CsvFormatter {
    /// Create a new CSV formatter
    pub fn new() -> Self {
        Self
    }
}

impl Formatter for CsvFormatter {
    fn format(&self, results: &RepositoryAnalysis) -> Result<String> {
        formatters::format_results_csv(results)
    }
}

/// Create a formatter based on the output format
pub fn create_formatter(
    format: OutputFormat,
    use_colors: bool,
    verbose: bool,
    quiet: bool,
) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_colors, verbose, quiet)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Csv => Box::new(CsvFormatter::new()),
    }
}
