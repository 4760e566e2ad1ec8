//! Dependency graph assembly from per-file extraction results

use crate::models::dependency_graph::{DependencyEdge, DependencyGraph};

/// Merges per-file edge batches into one repository-wide edge list
///
/// Assembly is plain concatenation. Batches are appended in the order they
/// are given and each batch keeps its own order, so a caller that supplies
/// batches in traversal order gets edges in traversal order. Duplicate
/// references are kept and targets are never resolved against the tree.
#[derive(Debug, Default)]
pub struct DependencyGraphBuilder {
    edges: Vec<DependencyEdge>,
}

impl DependencyGraphBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Edges for one file: one per extracted module identifier
    pub fn edges_for(path: &str, imports: &[String]) -> Vec<DependencyEdge> {
        imports
            .iter()
            .map(|module| DependencyEdge::new(path, module.as_str()))
            .collect()
    }

    /// Append one file's batch
    pub fn add_batch(&mut self, batch: Vec<DependencyEdge>) -> &mut Self {
        self.edges.extend(batch);
        self
    }

    /// Append the edges implied by one file's imports
    pub fn add_file(&mut self, path: &str, imports: &[String]) -> &mut Self {
        self.edges.extend(Self::edges_for(path, imports));
        self
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn build(self) -> DependencyGraph {
        DependencyGraph::from_edges(self.edges)
    }

    /// Concatenate batches into a graph in one step
    pub fn assemble<I>(batches: I) -> DependencyGraph
    where
        I: IntoIterator<Item = Vec<DependencyEdge>>,
    {
        let mut builder = Self::new();
        for batch in batches {
            builder.add_batch(batch);
        }
        builder.build()
    }
}
