//! reposcope - repository layout and import dependency analysis
//!
//! This library builds an ordered folder tree for a source repository,
//! classifies its source files by language, extracts the modules each file
//! imports and assembles them into a repository-wide dependency edge list.

pub mod cli;
pub mod collaborators;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod parsers;

// Re-export commonly used types
pub use collaborators::{Narrator, OfflineNarrator};
pub use core::{Analyzer, FolderTreeBuilder, RepositoryWalker};
pub use error::{handle_error, try_with_recovery, ErrorSeverity, OptionExt, Result, ResultExt, ScopeError};
pub use models::{
    analysis::{AnalysisSummary, FileArtifacts, RepositoryAnalysis},
    config::Settings,
    dependency_graph::{DependencyEdge, DependencyGraph},
    source::Language,
    tree::{Node, NodeKind},
};
pub use parsers::ExtractionStrategy;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
