//! Folder tree construction and rendering
//!
//! Builds an ordered [`Node`] tree for a repository root. Excluded names are
//! pruned at every level, entries are sorted before recursing, and symlinked
//! directories that point back at one of their ancestors are dropped instead
//! of being followed forever. Links to files are always listed.

use crate::error::{Result, ScopeError};
use crate::models::{config::Settings, tree::Node};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Builds the folder tree of a repository
#[derive(Debug, Clone)]
pub struct FolderTreeBuilder {
    excluded: HashSet<String>,
    follow_links: bool,
}

impl FolderTreeBuilder {
    /// Create a builder that prunes the given names
    pub fn new<S: AsRef<str>>(exclude_dirs: &[S], follow_links: bool) -> Self {
        Self {
            excluded: exclude_dirs.iter().map(|s| s.as_ref().to_string()).collect(),
            follow_links,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.exclude_dirs, settings.follow_links)
    }

    /// Build the tree rooted at `root`
    ///
    /// Fails as a whole if the root is not a readable directory or if any
    /// directory below it cannot be listed.
    pub fn build(&self, root: &Path) -> Result<Node> {
        if !root.is_dir() {
            return Err(ScopeError::InvalidPath {
                path: root.to_path_buf(),
            });
        }

        let mut ancestors = Vec::new();
        self.build_folder(root, root_name(root), &mut ancestors)?
            .ok_or_else(|| ScopeError::InvalidPath {
                path: root.to_path_buf(),
            })
    }

    /// Whether an entry name is pruned
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(name)
    }

    fn build_folder(
        &self,
        dir: &Path,
        name: String,
        ancestors: &mut Vec<PathBuf>,
    ) -> Result<Option<Node>> {
        let real = fs::canonicalize(dir).map_err(|e| ScopeError::directory_read(dir, e))?;
        if ancestors.contains(&real) {
            debug!(path = %dir.display(), "skipping directory cycle");
            return Ok(None);
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| ScopeError::directory_read(dir, e))? {
            let entry = entry.map_err(|e| ScopeError::directory_read(dir, e))?;
            entries.push((entry.file_name().to_string_lossy().into_owned(), entry.path()));
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        ancestors.push(real);
        let mut children = Vec::with_capacity(entries.len());
        for (child_name, child_path) in entries {
            if self.is_excluded(&child_name) {
                debug!(path = %child_path.display(), "excluded from tree");
                continue;
            }
            if let Some(child) = self.build_entry(&child_path, child_name, ancestors)? {
                children.push(child);
            }
        }
        ancestors.pop();

        Ok(Some(Node::folder(name, children)))
    }

    fn build_entry(
        &self,
        path: &Path,
        name: String,
        ancestors: &mut Vec<PathBuf>,
    ) -> Result<Option<Node>> {
        // Entries that vanish after listing are reported as plain files
        let Ok(link_meta) = fs::symlink_metadata(path) else {
            return Ok(Some(Node::file(name)));
        };

        if link_meta.file_type().is_symlink() {
            return match fs::metadata(path) {
                Ok(meta) if meta.is_dir() && self.follow_links => self.build_folder(path, name, ancestors),
                Ok(meta) if meta.is_dir() => {
                    debug!(path = %path.display(), "symlinked directory not followed");
                    Ok(None)
                }
                // Dangling links and links to files
                _ => Ok(Some(Node::file(name))),
            };
        }

        if link_meta.is_dir() {
            self.build_folder(path, name, ancestors)
        } else {
            Ok(Some(Node::file(name)))
        }
    }
}

/// Last path segment of the root, or the path itself when it has none
fn root_name(root: &Path) -> String {
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}

/// Render a tree as indented text
///
/// One line per node, depth-first, two spaces per level, folders suffixed
/// with `/`. No trailing newline.
pub fn render_tree(node: &Node) -> String {
    let mut lines = Vec::new();
    render_into(node, 0, &mut lines);
    lines.join("\n")
}

fn render_into(node: &Node, depth: usize, lines: &mut Vec<String>) {
    let prefix = "  ".repeat(depth);
    if node.is_folder() {
        lines.push(format!("{}{}/", prefix, node.name()));
        for child in node.children() {
            render_into(child, depth + 1, lines);
        }
    } else {
        lines.push(format!("{}{}", prefix, node.name()));
    }
}
