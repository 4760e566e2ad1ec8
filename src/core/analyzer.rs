//! Repository analysis orchestration
//!
//! Runs the whole pipeline for one repository root: build and render the
//! folder tree, walk and extract, assemble the dependency graph, ask the
//! narrator for the architecture description, and fold everything into a
//! single [`RepositoryAnalysis`].

use crate::collaborators::{Narrator, OfflineNarrator};
use crate::core::folder_tree::{render_tree, FolderTreeBuilder};
use crate::core::parallel::ProgressUpdate;
use crate::core::walker::RepositoryWalker;
use crate::error::Result;
use crate::models::{analysis::RepositoryAnalysis, config::Settings};
use crate::parsers::DependencyGraphBuilder;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Repository analyzer
pub struct Analyzer {
    settings: Settings,
    narrator: Arc<dyn Narrator>,
}

impl Analyzer {
    /// Create an analyzer that uses the offline narrator
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            narrator: Arc::new(OfflineNarrator),
        }
    }

    /// Replace the narrator used for per-file and architecture text
    pub fn with_narrator(mut self, narrator: Arc<dyn Narrator>) -> Self {
        self.narrator = narrator;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Analyze the configured repository
    pub fn analyze(&self) -> Result<RepositoryAnalysis> {
        self.analyze_with_progress(|_| {})
    }

    /// Analyze the configured repository with per-file progress reporting
    ///
    /// The only errors returned are the ones that make the root unusable.
    /// Everything recovered per file ends up in [`RepositoryAnalysis::errors`].
    pub fn analyze_with_progress<F>(&self, progress: F) -> Result<RepositoryAnalysis>
    where
        F: Fn(ProgressUpdate) + Send + Sync,
    {
        let start_time = Instant::now();
        let root = self.settings.scan_path.as_path();
        info!(path = %root.display(), "analyzing repository");

        let tree = FolderTreeBuilder::from_settings(&self.settings).build(root)?;
        let tree_text = render_tree(&tree);
        let repo_name = self
            .settings
            .repo_name
            .clone()
            .unwrap_or_else(|| repo_name_for(root));

        let outcome = RepositoryWalker::from_settings(&self.settings)
            .with_narrator(Arc::clone(&self.narrator))
            .walk_with_progress(root, progress)?;

        let graph = DependencyGraphBuilder::assemble(outcome.edge_batches);
        let architecture = self.narrator.architecture(&repo_name, &tree_text);

        let mut results = RepositoryAnalysis::new(repo_name, tree, tree_text);
        for file in outcome.files {
            results.add_file(file);
        }
        for (path, err) in &outcome.errors {
            results.add_error(path.as_str(), err);
        }
        results.set_dependency_graph(graph);
        results.set_architecture(architecture);
        results.set_files_scanned(outcome.files_scanned);
        results.set_scan_duration(start_time.elapsed());

        info!(
            repo = %results.repo_name,
            files = results.summary.source_files,
            edges = results.dependency_graph.len(),
            warnings = results.summary.warnings_count,
            elapsed_ms = results.summary.scan_duration.as_millis() as u64,
            "analysis complete"
        );
        Ok(results)
    }
}

/// Name a repository after its root directory
///
/// Relative roots such as `.` are resolved first so the name is the real
/// directory name.
pub fn repo_name_for(root: &Path) -> String {
    let resolved = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    let segment = resolved
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| resolved.display().to_string());
    repo_name_from_location(&segment)
}

/// Last path segment of a repository location without a trailing `.git`
///
/// Works for clone URLs (`https://host/org/project.git`) as well as local
/// paths.
pub fn repo_name_from_location(location: &str) -> String {
    let trimmed = location.trim_end_matches(['/', '\\']);
    let segment = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed);
    let name = segment.strip_suffix(".git").unwrap_or(segment);
    if name.is_empty() {
        segment.to_string()
    } else {
        name.to_string()
    }
}
