//! Analysis result structures

use super::dependency_graph::{DependencyGraph, GraphStatistics};
use super::source::Language;
use super::tree::Node;
use crate::error::{ErrorSeverity, ScopeError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Everything produced for one qualifying source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileArtifacts {
    /// Path relative to the repository root, `/`-separated
    pub path: String,
    pub language: Language,
    /// Module identifiers in extraction order
    pub imports: Vec<String>,
    pub explanation: String,
    pub security_report: String,
    pub tests: String,
}

/// A recovered, per-file problem recorded during the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisError {
    pub path: String,
    pub error: String,
    pub severity: ErrorSeverity,
}

/// Summary statistics from analysis
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Non-excluded files seen by the walker, source or not
    pub files_scanned: usize,
    /// Files that produced artifacts
    pub source_files: usize,
    /// Source files dropped because they could not be read
    pub files_skipped: usize,
    /// Source files whose syntax tree could not be built
    pub parse_failures: usize,
    pub folders: usize,
    pub languages: BTreeMap<Language, usize>,
    pub graph: GraphStatistics,
    pub scan_duration: Duration,
    pub warnings_count: usize,
}

/// Aggregate result of analyzing one repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryAnalysis {
    pub repo_name: String,
    pub folder_tree: Node,
    pub folder_tree_text: String,
    pub languages: IndexMap<String, Language>,
    pub imports: IndexMap<String, Vec<String>>,
    pub file_summaries: IndexMap<String, String>,
    pub security_reports: IndexMap<String, String>,
    pub test_cases: IndexMap<String, String>,
    pub dependency_graph: DependencyGraph,
    pub architecture: String,
    pub summary: AnalysisSummary,
    pub errors: Vec<AnalysisError>,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

impl RepositoryAnalysis {
    /// Start a result for a repository whose tree has already been built
    pub fn new(repo_name: impl Into<String>, folder_tree: Node, folder_tree_text: String) -> Self {
        let summary = AnalysisSummary {
            folders: folder_tree.folder_count(),
            ..Default::default()
        };

        Self {
            repo_name: repo_name.into(),
            folder_tree,
            folder_tree_text,
            languages: IndexMap::new(),
            imports: IndexMap::new(),
            file_summaries: IndexMap::new(),
            security_reports: IndexMap::new(),
            test_cases: IndexMap::new(),
            dependency_graph: DependencyGraph::new(),
            architecture: String::new(),
            summary,
            errors: Vec::new(),
            generated_at: chrono::Utc::now(),
        }
    }

    /// Record the artifacts of one file under its relative path
    pub fn add_file(&mut self, artifacts: FileArtifacts) {
        let FileArtifacts {
            path,
            language,
            imports,
            explanation,
            security_report,
            tests,
        } = artifacts;

        self.summary.source_files += 1;
        *self.summary.languages.entry(language).or_insert(0) += 1;

        self.languages.insert(path.clone(), language);
        self.imports.insert(path.clone(), imports);
        self.file_summaries.insert(path.clone(), explanation);
        self.security_reports.insert(path.clone(), security_report);
        self.test_cases.insert(path, tests);
    }

    /// Add a recovered error to the results
    pub fn add_error(&mut self, path: impl Into<String>, error: &ScopeError) {
        let severity = error.severity();
        match error {
            ScopeError::FileRead { .. } | ScopeError::PermissionDenied { .. } => {
                self.summary.files_skipped += 1;
            }
            ScopeError::Parse { .. } => self.summary.parse_failures += 1,
            _ => {}
        }
        if severity == ErrorSeverity::Warning {
            self.summary.warnings_count += 1;
        }

        self.errors.push(AnalysisError {
            path: path.into(),
            error: error.user_message(),
            severity,
        });
    }

    pub fn set_dependency_graph(&mut self, graph: DependencyGraph) {
        self.summary.graph = graph.statistics();
        self.dependency_graph = graph;
    }

    pub fn set_architecture(&mut self, architecture: String) {
        self.architecture = architecture;
    }

    pub fn set_files_scanned(&mut self, count: usize) {
        self.summary.files_scanned = count;
    }

    /// Set the scan duration in the summary
    pub fn set_scan_duration(&mut self, duration: Duration) {
        self.summary.scan_duration = duration;
    }

    /// Relative paths that produced artifacts, in traversal order
    pub fn file_paths(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Reassemble the artifacts recorded for one path
    pub fn file(&self, path: &str) -> Option<FileArtifacts> {
        let language = *self.languages.get(path)?;
        Some(FileArtifacts {
            path: path.to_string(),
            language,
            imports: self.imports.get(path).cloned().unwrap_or_default(),
            explanation: self.file_summaries.get(path).cloned().unwrap_or_default(),
            security_report: self.security_reports.get(path).cloned().unwrap_or_default(),
            tests: self.test_cases.get(path).cloned().unwrap_or_default(),
        })
    }
}
