//! Repository walking and per-file extraction
//!
//! The walk runs in two phases. Discovery descends the tree once with
//! `walkdir`, pruning excluded names before they are entered, and collects
//! the source files in a fixed order: within each directory, files come
//! before subdirectories and each group is sorted by name. Extraction then
//! reads and analyzes every discovered file, optionally on a bounded rayon
//! pool. Results are gathered by index, so the output order is the
//! discovery order no matter how work was scheduled.

use crate::collaborators::{Narrator, OfflineNarrator};
use crate::core::classifier::{classify, extension_of, is_source_file};
use crate::core::parallel::{
    build_pool, parallel_process_with_progress, sequential_process_with_progress, ProgressUpdate,
};
use crate::error::{Result, ResultExt, ScopeError};
use crate::models::analysis::FileArtifacts;
use crate::models::config::Settings;
use crate::models::dependency_graph::DependencyEdge;
use crate::models::source::{Language, SourceFile};
use crate::parsers::{DependencyGraphBuilder, ExtractError, ExtractionStrategy};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// A source file found during discovery, not yet read
#[derive(Debug, Clone)]
struct Candidate {
    path: PathBuf,
    relative: String,
    extension: String,
    language: Language,
}

enum FileOutcome {
    Analyzed {
        artifacts: FileArtifacts,
        edges: Vec<DependencyEdge>,
        warning: Option<ScopeError>,
    },
    Skipped(ScopeError),
}

/// Everything a single walk produces, in discovery order
#[derive(Debug, Default)]
pub struct WalkOutcome {
    /// Artifacts of every source file that could be read
    pub files: Vec<FileArtifacts>,
    /// One edge batch per entry of `files`
    pub edge_batches: Vec<Vec<DependencyEdge>>,
    /// Recovered per-file problems keyed by relative path
    pub errors: Vec<(String, ScopeError)>,
    /// Regular files seen after exclusion, source or not
    pub files_scanned: usize,
}

impl WalkOutcome {
    /// Flat edge list across all files
    pub fn edges(&self) -> Vec<DependencyEdge> {
        self.edge_batches.iter().flatten().cloned().collect()
    }
}

/// Walks a repository and extracts per-file artifacts
pub struct RepositoryWalker {
    excluded: HashSet<String>,
    follow_links: bool,
    parallel: bool,
    threads: usize,
    narrator: Arc<dyn Narrator>,
}

impl RepositoryWalker {
    /// Create a sequential walker that prunes the given names
    pub fn new<S: AsRef<str>>(exclude_dirs: &[S], follow_links: bool) -> Self {
        Self {
            excluded: exclude_dirs.iter().map(|s| s.as_ref().to_string()).collect(),
            follow_links,
            parallel: false,
            threads: 1,
            narrator: Arc::new(OfflineNarrator),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.exclude_dirs, settings.follow_links)
            .with_parallelism(settings.parallel, settings.thread_count())
    }

    /// Extract on a pool of `threads` workers when `parallel` is set
    pub fn with_parallelism(mut self, parallel: bool, threads: usize) -> Self {
        self.parallel = parallel;
        self.threads = threads.max(1);
        self
    }

    pub fn with_narrator(mut self, narrator: Arc<dyn Narrator>) -> Self {
        self.narrator = narrator;
        self
    }

    /// Walk `root` without progress reporting
    pub fn walk(&self, root: &Path) -> Result<WalkOutcome> {
        self.walk_with_progress(root, |_| {})
    }

    /// Walk `root`, reporting each finished file
    ///
    /// Fails only when `root` is not a directory. Every per-file problem is
    /// recorded in [`WalkOutcome::errors`] and the walk carries on.
    pub fn walk_with_progress<P>(&self, root: &Path, progress: P) -> Result<WalkOutcome>
    where
        P: Fn(ProgressUpdate) + Send + Sync,
    {
        if !root.is_dir() {
            return Err(ScopeError::InvalidPath {
                path: root.to_path_buf(),
            });
        }

        let started = Instant::now();
        let mut outcome = WalkOutcome::default();
        let candidates = self.discover(root, &mut outcome);
        debug!(
            candidates = candidates.len(),
            scanned = outcome.files_scanned,
            "discovery finished"
        );

        let pool = if self.parallel && candidates.len() > 1 {
            match build_pool(self.threads) {
                Ok(pool) => Some(pool),
                Err(err) => {
                    warn!(error = %err, "worker pool unavailable, extracting sequentially");
                    None
                }
            }
        } else {
            None
        };

        let step = |candidate: &Candidate| (self.process(candidate), candidate.relative.clone());
        let results = match &pool {
            Some(pool) => parallel_process_with_progress(pool, &candidates, step, progress),
            None => sequential_process_with_progress(&candidates, step, progress),
        };

        for (candidate, result) in candidates.iter().zip(results) {
            match result {
                FileOutcome::Analyzed {
                    artifacts,
                    edges,
                    warning,
                } => {
                    if let Some(err) = warning {
                        warn!(path = %candidate.relative, "{}", err.user_message());
                        outcome.errors.push((candidate.relative.clone(), err));
                    }
                    outcome.files.push(artifacts);
                    outcome.edge_batches.push(edges);
                }
                FileOutcome::Skipped(err) => {
                    warn!(path = %candidate.relative, "{}", err.user_message());
                    outcome.errors.push((candidate.relative.clone(), err));
                }
            }
        }

        info!(
            files = outcome.files.len(),
            edges = outcome.edge_batches.iter().map(Vec::len).sum::<usize>(),
            skipped = outcome.errors.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "walk finished"
        );
        Ok(outcome)
    }

    /// Collect source files in traversal order
    fn discover(&self, root: &Path, outcome: &mut WalkOutcome) -> Vec<Candidate> {
        let entries = WalkDir::new(root)
            .follow_links(self.follow_links)
            .sort_by(|a, b| {
                a.file_type()
                    .is_dir()
                    .cmp(&b.file_type().is_dir())
                    .then_with(|| a.file_name().cmp(b.file_name()))
            })
            .into_iter()
            .filter_entry(|entry| self.keep_entry(entry));

        let mut candidates = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    self.record_walk_error(root, err, outcome);
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }
            if entry.path_is_symlink() && !self.follow_links {
                // Unfollowed links still stand for the file they point at
                match fs::metadata(entry.path()) {
                    Ok(meta) if meta.is_file() => {}
                    Ok(_) => {
                        debug!(path = %entry.path().display(), "not a regular file");
                        continue;
                    }
                    Err(err) => {
                        self.record_unreadable(root, entry.path(), err.to_string(), outcome);
                        continue;
                    }
                }
            } else if !entry.file_type().is_file() {
                debug!(path = %entry.path().display(), "not a regular file");
                continue;
            }

            outcome.files_scanned += 1;
            let extension = extension_of(entry.path());
            if !is_source_file(&extension) {
                continue;
            }

            candidates.push(Candidate {
                relative: relative_path(root, entry.path()),
                path: entry.into_path(),
                language: classify(&extension),
                extension,
            });
        }

        candidates
    }

    fn keep_entry(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return true;
        }
        if !self.follow_links && entry.path_is_symlink() && points_to_dir(entry.path()) {
            debug!(path = %entry.path().display(), "symlinked directory not followed");
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        if self.excluded.contains(name.as_ref()) {
            debug!(path = %entry.path().display(), "excluded from walk");
            return false;
        }
        true
    }

    fn record_walk_error(&self, root: &Path, err: walkdir::Error, outcome: &mut WalkOutcome) {
        if err.loop_ancestor().is_some() {
            debug!(error = %err, "skipping directory cycle");
            return;
        }

        let Some(path) = err.path().map(Path::to_path_buf) else {
            warn!(error = %err, "walk error");
            return;
        };

        self.record_unreadable(root, &path, err.to_string(), outcome);
    }

    /// Dangling links and files removed mid-walk
    fn record_unreadable(&self, root: &Path, path: &Path, message: String, outcome: &mut WalkOutcome) {
        if !is_source_file(&extension_of(path)) {
            warn!(path = %path.display(), error = %message, "entry could not be visited");
            return;
        }

        let relative = relative_path(root, path);
        outcome
            .errors
            .push((relative.clone(), ScopeError::file_read(relative, message)));
    }

    /// Read, extract and narrate one file
    fn process(&self, candidate: &Candidate) -> FileOutcome {
        let bytes = match fs::read(&candidate.path).with_file_context(&candidate.relative) {
            Ok(bytes) => bytes,
            Err(err) => return FileOutcome::Skipped(err),
        };

        let source = SourceFile::new(
            candidate.relative.as_str(),
            candidate.extension.as_str(),
            candidate.language,
            String::from_utf8_lossy(&bytes),
        );

        let strategy = ExtractionStrategy::for_language(source.language);
        let (imports, warning) = match strategy.try_extract(&source.content) {
            Ok(imports) => (imports, None),
            Err(ExtractError::Setup(message)) => (Vec::new(), Some(ScopeError::Parser { message })),
            Err(err) => (
                Vec::new(),
                Some(ScopeError::parse_error(&source.relative_path, err.to_string())),
            ),
        };
        debug!(path = %source.relative_path, imports = imports.len(), "extracted");

        let edges = DependencyGraphBuilder::edges_for(&source.relative_path, &imports);
        let explanation = self.narrator.explain(&source.content, &source.relative_path);
        let security_report =
            self.narrator
                .security_scan(&source.content, &source.relative_path, source.language);
        let tests = self
            .narrator
            .generate_tests(&source.content, &source.relative_path, source.language);

        FileOutcome::Analyzed {
            artifacts: FileArtifacts {
                path: source.relative_path,
                language: source.language,
                imports,
                explanation,
                security_report,
                tests,
            },
            edges,
            warning,
        }
    }
}

fn points_to_dir(path: &Path) -> bool {
    fs::metadata(path).map(|meta| meta.is_dir()).unwrap_or(false)
}

/// `/`-separated path of `path` below `root`
fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
