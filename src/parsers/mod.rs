//! Import extraction
//!
//! Each language tag maps to exactly one [`ExtractionStrategy`]: a syntax
//! tree walk for Python, a fixed pattern for JavaScript and TypeScript, and
//! nothing for every other language.

pub mod dependency_graph_builder;
pub mod js_imports;
pub mod python_imports;

pub use dependency_graph_builder::DependencyGraphBuilder;
pub use js_imports::JsImportExtractor;
pub use python_imports::{ExtractError, PythonImportExtractor};

use crate::models::source::Language;

/// How module identifiers are pulled out of a file's text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Parse into a syntax tree and read import statements
    Structural,
    /// Match import and require forms with a fixed expression
    Pattern,
    /// Language is classified but not extracted from
    None,
}

impl ExtractionStrategy {
    /// Strategy for a language tag
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::Python => ExtractionStrategy::Structural,
            Language::JavaScript | Language::TypeScript => ExtractionStrategy::Pattern,
            _ => ExtractionStrategy::None,
        }
    }

    /// Extract module identifiers, reporting why a syntax tree was unusable
    pub fn try_extract(&self, source: &str) -> Result<Vec<String>, ExtractError> {
        match self {
            ExtractionStrategy::Structural => PythonImportExtractor::try_extract(source),
            ExtractionStrategy::Pattern => Ok(JsImportExtractor::extract(source)),
            ExtractionStrategy::None => Ok(Vec::new()),
        }
    }

    /// Extract module identifiers; never fails
    pub fn extract(&self, source: &str) -> Vec<String> {
        self.try_extract(source).unwrap_or_default()
    }
}
