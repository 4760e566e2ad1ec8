//! Data models and structures for reposcope

pub mod analysis;
pub mod config;
pub mod dependency_graph;
pub mod source;
pub mod tree;

pub use analysis::{AnalysisError, AnalysisSummary, FileArtifacts, RepositoryAnalysis};
pub use config::{OutputFormat, PartialSettings, Settings};
pub use dependency_graph::{DependencyEdge, DependencyGraph, GraphStatistics};
pub use source::{Language, SourceFile};
pub use tree::{Node, NodeKind};
