//! Structural import extraction for Python using tree-sitter
//!
//! The file is parsed into a syntax tree and walked breadth-first by
//! statement level, the way Python's own `ast.walk` visits a module: a
//! statement nested in an `if`, `def` or `else:` body sits one level below
//! the compound statement, while `elif` chains, exception handlers and
//! `case` clauses add a level of their own. Every `import a.b, c` statement
//! contributes its dotted names, every `from x.y import z` statement
//! contributes `x.y`. Relative imports contribute the module part after the
//! dots, and bare relative imports (`from . import z`) contribute nothing.
//!
//! The grammar also accepts Python 2 syntax. Those constructs are rejected
//! as syntax errors so that only Python 3 modules yield imports.

use std::collections::VecDeque;
use thiserror::Error;
use tree_sitter::{Node, Parser};

/// Why a syntax tree could not be used for extraction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("syntax error at line {line}, column {column}")]
    Syntax { line: usize, column: usize },

    #[error("parser unavailable: {0}")]
    Setup(String),
}

/// Wrappers whose children belong to the enclosing statement's level
const TRANSPARENT_KINDS: &[&str] = &["block", "else_clause", "finally_clause", "decorated_definition"];

/// One statement-level node, with the `elif`/`else` clauses that follow it
struct Level<'tree> {
    node: Node<'tree>,
    alternatives: Vec<Node<'tree>>,
}

/// Structural extractor for Python sources
pub struct PythonImportExtractor;

impl PythonImportExtractor {
    /// Extract module identifiers, reporting syntax errors
    pub fn try_extract(source: &str) -> Result<Vec<String>, ExtractError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| ExtractError::Setup(e.to_string()))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ExtractError::Setup("parse was cancelled".to_string()))?;
        let root = tree.root_node();
        let bytes = source.as_bytes();

        if let Some(node) = first_invalid_node(root, bytes) {
            let point = node.start_position();
            return Err(ExtractError::Syntax {
                line: point.row + 1,
                column: point.column + 1,
            });
        }

        let mut imports = Vec::new();
        let mut queue = VecDeque::from([Level {
            node: root,
            alternatives: Vec::new(),
        }]);

        while let Some(level) = queue.pop_front() {
            let node = level.node;
            match node.kind() {
                "import_statement" => collect_import_names(node, bytes, &mut imports),
                "import_from_statement" => {
                    if let Some(module) = from_import_module(node, bytes) {
                        imports.push(module);
                    }
                }
                "future_import_statement" => imports.push("__future__".to_string()),
                _ => {}
            }

            queue.extend(child_levels(level));
        }

        Ok(imports)
    }

    /// Extract module identifiers; malformed input yields nothing
    pub fn extract(source: &str) -> Vec<String> {
        Self::try_extract(source).unwrap_or_default()
    }
}

/// Children of a node one statement level down, in source order
fn child_levels(level: Level<'_>) -> Vec<Level<'_>> {
    let node = level.node;
    let mut children = Vec::new();
    let mut alternatives = Vec::new();

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "elif_clause" | "else_clause" if node.kind() == "if_statement" => alternatives.push(child),
            _ => push_flattened(child, &mut children),
        }
    }

    // `elif` nests the rest of the chain one level deeper
    if node.kind() == "elif_clause" {
        alternatives = level.alternatives;
    }
    let mut rest = alternatives.into_iter();
    match rest.next() {
        Some(clause) if clause.kind() == "elif_clause" => children.push(Level {
            node: clause,
            alternatives: rest.collect(),
        }),
        Some(clause) => push_flattened(clause, &mut children),
        None => {}
    }

    children
}

fn push_flattened<'tree>(node: Node<'tree>, out: &mut Vec<Level<'tree>>) {
    if TRANSPARENT_KINDS.contains(&node.kind()) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            push_flattened(child, out);
        }
    } else {
        out.push(Level {
            node,
            alternatives: Vec::new(),
        });
    }
}

/// `import a.b as c, d` -> `a.b`, `d`
fn collect_import_names(node: Node<'_>, source: &[u8], imports: &mut Vec<String>) {
    let mut cursor = node.walk();
    for name in node.children_by_field_name("name", &mut cursor) {
        let dotted = match name.kind() {
            "aliased_import" => name.child_by_field_name("name"),
            _ => Some(name),
        };
        if let Some(text) = dotted.and_then(|n| dotted_name_text(n, source)) {
            imports.push(text);
        }
    }
}

/// Module written after `from`, without relative-import dots
fn from_import_module(node: Node<'_>, source: &[u8]) -> Option<String> {
    let module = node.child_by_field_name("module_name")?;
    match module.kind() {
        "relative_import" => {
            let mut cursor = module.walk();
            let dotted = module
                .named_children(&mut cursor)
                .find(|child| child.kind() == "dotted_name");
            dotted.and_then(|n| dotted_name_text(n, source))
        }
        _ => dotted_name_text(module, source),
    }
}

/// Join the identifiers of a `dotted_name`, ignoring stray whitespace
fn dotted_name_text(node: Node<'_>, source: &[u8]) -> Option<String> {
    if node.kind() != "dotted_name" {
        return node.utf8_text(source).ok().map(str::to_string);
    }

    let mut cursor = node.walk();
    let parts: Vec<&str> = node
        .named_children(&mut cursor)
        .filter_map(|part| part.utf8_text(source).ok())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("."))
    }
}

/// First node, in source order, that Python 3 would not compile
fn first_invalid_node<'tree>(root: Node<'tree>, source: &[u8]) -> Option<Node<'tree>> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() || is_python2_only(node, source) {
            return Some(node);
        }
        let mut cursor = node.walk();
        let children: Vec<_> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    None
}

fn is_python2_only(node: Node<'_>, source: &[u8]) -> bool {
    match node.kind() {
        "print_statement" | "exec_statement" => true,
        // `except E, e:`; a tuple of types keeps its comma inside the tuple node
        "except_clause" => {
            has_token_child(node, ",")
                || node
                    .named_child(0)
                    .is_some_and(|value| value.kind() == "expression_list")
        }
        "comparison_operator" => has_token_child(node, "<>"),
        "integer" => node
            .utf8_text(source)
            .map(is_python2_integer)
            .unwrap_or(false),
        _ => false,
    }
}

fn has_token_child(node: Node<'_>, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == kind);
    found
}

/// `0777` octals and `10L` longs
fn is_python2_integer(text: &str) -> bool {
    let digits = text.replace('_', "");
    if digits.ends_with(['l', 'L']) {
        return true;
    }
    digits.len() > 1
        && digits.starts_with('0')
        && digits.bytes().all(|b| b.is_ascii_digit())
        && digits.bytes().any(|b| b != b'0')
}
