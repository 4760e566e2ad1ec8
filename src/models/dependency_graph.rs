//! Dependency graph data structures
//!
//! The graph is a raw reference list: one edge per extracted module
//! identifier, in traversal order, with no deduplication and no attempt to
//! resolve targets to files.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A directed reference from a source file to a module identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// Repository-relative path of the importing file, `/`-separated
    pub source: String,
    /// Module identifier exactly as written in the import
    pub target: String,
}

impl DependencyEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Ordered edge list for a whole repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyGraph {
    edges: Vec<DependencyEdge>,
}

/// Which side of an edge a graph node stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Endpoint {
    File,
    Module,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already ordered edge sequence
    pub fn from_edges(edges: Vec<DependencyEdge>) -> Self {
        Self { edges }
    }

    /// Append one edge at the end of the sequence
    pub fn push(&mut self, edge: DependencyEdge) {
        self.edges.push(edge);
    }

    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edges originating from one file, in extraction order
    pub fn edges_from<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a DependencyEdge> + 'a {
        self.edges.iter().filter(move |edge| edge.source == source)
    }

    /// Build a petgraph view with one node per distinct file and module
    ///
    /// Repeated references collapse into a single edge.
    fn to_petgraph(&self) -> DiGraph<(Endpoint, &str), ()> {
        let mut graph = DiGraph::new();
        let mut indices: HashMap<(Endpoint, &str), NodeIndex> = HashMap::new();

        for edge in &self.edges {
            let from = *indices
                .entry((Endpoint::File, edge.source.as_str()))
                .or_insert_with_key(|key| graph.add_node(*key));
            let to = *indices
                .entry((Endpoint::Module, edge.target.as_str()))
                .or_insert_with_key(|key| graph.add_node(*key));
            graph.update_edge(from, to, ());
        }

        graph
    }

    /// Get statistics about the dependency graph
    pub fn statistics(&self) -> GraphStatistics {
        let graph = self.to_petgraph();

        let mut distinct_sources = 0;
        let mut distinct_targets = 0;
        let mut max_fan_out = 0;
        let mut max_fan_out_file = None;
        let mut max_fan_in = 0;
        let mut most_referenced_module = None;

        // Node indices follow first appearance, so ties keep the earliest
        for index in graph.node_indices() {
            let (endpoint, name) = graph[index];
            match endpoint {
                Endpoint::File => {
                    distinct_sources += 1;
                    let fan_out = graph.neighbors_directed(index, Direction::Outgoing).count();
                    if fan_out > max_fan_out {
                        max_fan_out = fan_out;
                        max_fan_out_file = Some(name.to_string());
                    }
                }
                Endpoint::Module => {
                    distinct_targets += 1;
                    let fan_in = graph.neighbors_directed(index, Direction::Incoming).count();
                    if fan_in > max_fan_in {
                        max_fan_in = fan_in;
                        most_referenced_module = Some(name.to_string());
                    }
                }
            }
        }

        GraphStatistics {
            total_edges: self.edges.len(),
            distinct_sources,
            distinct_targets,
            max_fan_out,
            max_fan_out_file,
            max_fan_in,
            most_referenced_module,
        }
    }

    /// Export to DOT format for visualization
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph dependencies {\n");
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  node [shape=box];\n\n");

        let graph = self.to_petgraph();
        for index in graph.node_indices() {
            let (endpoint, name) = graph[index];
            let shape = match endpoint {
                Endpoint::File => "box",
                Endpoint::Module => "ellipse",
            };
            dot.push_str(&format!("  \"{}\" [shape={}];\n", escape_dot(name), shape));
        }

        dot.push('\n');

        for edge in graph.raw_edges() {
            let (_, from) = graph[edge.source()];
            let (_, to) = graph[edge.target()];
            dot.push_str(&format!("  \"{}\" -> \"{}\";\n", escape_dot(from), escape_dot(to)));
        }

        dot.push_str("}\n");
        dot
    }
}

fn escape_dot(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Statistics about the dependency graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub total_edges: usize,
    pub distinct_sources: usize,
    pub distinct_targets: usize,
    pub max_fan_out: usize,
    pub max_fan_out_file: Option<String>,
    pub max_fan_in: usize,
    pub most_referenced_module: Option<String>,
}
