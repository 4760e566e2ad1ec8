//! Error types and definitions for reposcope
//!
//! Every failure the crate can report is a variant of [`ScopeError`]. Each
//! variant carries a severity that decides whether the analysis aborts or
//! degrades to "no data for this file".

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for reposcope operations
#[derive(Debug, Error)]
pub enum ScopeError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// Repository root missing or not a directory
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// A directory could not be listed while building the folder tree
    #[error("Failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single source file could not be read during the walk
    #[error("Failed to read file {path}: {message}")]
    FileRead { path: PathBuf, message: String },

    /// The structural extractor could not build a syntax tree
    #[error("Syntax error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The syntax tree parser could not be set up
    #[error("Parser setup failed: {message}")]
    Parser { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Permission denied errors
    #[error("Permission denied accessing {path}")]
    PermissionDenied { path: PathBuf },

    /// TOML parsing errors
    #[error("TOML parsing error: {source}")]
    TomlParse {
        #[source]
        source: toml::de::Error,
    },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// Generic analysis errors with context attached
    #[error("Analysis error: {message}")]
    Analysis { message: String },

    /// Parallel execution error
    #[error("Parallel execution error: {message}")]
    ParallelExecution { message: String },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// CSV serialization error
    #[error("CSV serialization error: {source}")]
    CsvSerialize {
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Output directory not found
    #[error("Output directory not found: {path}")]
    OutputDirectoryNotFound { path: PathBuf },
}

impl ScopeError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Per-file failures degrade to "no data for this file"
            ScopeError::FileRead { .. } => ErrorSeverity::Warning,
            ScopeError::Parse { .. } => ErrorSeverity::Warning,
            ScopeError::PermissionDenied { .. } => ErrorSeverity::Warning,

            // Root and tree-build failures abort the whole analysis
            ScopeError::InvalidPath { .. } => ErrorSeverity::Critical,
            ScopeError::DirectoryRead { .. } => ErrorSeverity::Critical,
            ScopeError::Parser { .. } => ErrorSeverity::Critical,
            ScopeError::Config { .. } => ErrorSeverity::Critical,
            ScopeError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            ScopeError::ConfigRead { .. } => ErrorSeverity::Critical,
            ScopeError::ConfigParse { .. } => ErrorSeverity::Critical,
            ScopeError::StdoutWrite { .. } => ErrorSeverity::Critical,
            ScopeError::OutputDirectoryNotFound { .. } => ErrorSeverity::Critical,

            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ScopeError::InvalidPath { path } => {
                format!("Invalid path: '{}'. Please provide an existing repository directory.", path.display())
            }
            ScopeError::DirectoryRead { path, source } => {
                format!("Cannot list directory '{}': {}. Check that it exists and is readable.", path.display(), source)
            }
            ScopeError::PermissionDenied { path } => {
                format!("Cannot access '{}' due to permission denied. Check file permissions.", path.display())
            }
            ScopeError::FileRead { path, message } => {
                format!("Skipping '{}': {}", path.display(), message)
            }
            ScopeError::Parse { path, .. } => {
                format!("'{}' has syntax errors; no imports extracted.", path.display())
            }
            ScopeError::Io { source } => {
                format!("File system error: {}. Check disk space and permissions.", source)
            }
            ScopeError::ConfigNotFound { path } => {
                format!("Configuration file not found at '{}'. Create one with --init or use command line options.", path.display())
            }
            ScopeError::OutputDirectoryNotFound { path } => {
                format!("Output directory '{}' does not exist. Please create the directory or specify a different output path.", path.display())
            }
            _ => self.to_string(),
        }
    }

    /// Create an IO error with context
    pub fn io_error(source: std::io::Error) -> Self {
        ScopeError::Io { source }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        ScopeError::Config {
            message: message.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        ScopeError::PermissionDenied { path: path.into() }
    }

    /// Create a directory listing error
    pub fn directory_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScopeError::DirectoryRead {
            path: path.into(),
            source,
        }
    }

    /// Create a per-file read error
    pub fn file_read(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ScopeError::FileRead {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a per-file syntax error
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ScopeError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an analysis error
    pub fn analysis_error(message: impl Into<String>) -> Self {
        ScopeError::Analysis {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ScopeError {
    fn from(err: std::io::Error) -> Self {
        ScopeError::io_error(err)
    }
}

impl From<toml::de::Error> for ScopeError {
    fn from(err: toml::de::Error) -> Self {
        ScopeError::TomlParse { source: err }
    }
}

impl From<csv::Error> for ScopeError {
    fn from(err: csv::Error) -> Self {
        ScopeError::Csv { source: err }
    }
}

impl From<serde_json::Error> for ScopeError {
    fn from(err: serde_json::Error) -> Self {
        ScopeError::JsonSerialize { source: err }
    }
}

impl From<rayon::ThreadPoolBuildError> for ScopeError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        ScopeError::ParallelExecution {
            message: err.to_string(),
        }
    }
}

/// Result type alias for reposcope operations
pub type Result<T> = std::result::Result<T, ScopeError>;
