//! Core functionality for tree building, walking and analysis

pub mod analyzer;
pub mod classifier;
pub mod folder_tree;
pub mod parallel;
pub mod walker;

pub use analyzer::Analyzer;
pub use folder_tree::{render_tree, FolderTreeBuilder};
pub use walker::{RepositoryWalker, WalkOutcome};
