//! Folder tree data structures

use serde::{Deserialize, Serialize};

/// Kind of a folder tree element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    File,
}

/// One element of the repository folder tree
///
/// Folders always carry a (possibly empty) child list sorted by name; files
/// never carry one. Nodes are built once by the folder tree builder and are
/// not modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    name: String,
    #[serde(rename = "type")]
    kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<Node>>,
}

impl Node {
    /// Create a file node
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            children: None,
        }
    }

    /// Create a folder node, sorting the children by name
    pub fn folder(name: impl Into<String>, mut children: Vec<Node>) -> Self {
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            name: name.into(),
            kind: NodeKind::Folder,
            children: Some(children),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    /// Children of a folder; always empty for files
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Number of file nodes in this subtree
    pub fn file_count(&self) -> usize {
        match self.kind {
            NodeKind::File => 1,
            NodeKind::Folder => self.children().iter().map(Node::file_count).sum(),
        }
    }

    /// Number of folder nodes in this subtree, including this one
    pub fn folder_count(&self) -> usize {
        match self.kind {
            NodeKind::File => 0,
            NodeKind::Folder => 1 + self.children().iter().map(Node::folder_count).sum::<usize>(),
        }
    }

    /// Whether any node strictly below this one has the given name
    pub fn contains_name(&self, name: &str) -> bool {
        self.children()
            .iter()
            .any(|child| child.name == name || child.contains_name(name))
    }
}
