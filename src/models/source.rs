//! Source file and language tag definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language tag assigned to a file by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Java,
    Go,
    Cpp,
    C,
    CSharp,
    /// Anything outside the supported set
    Code,
}

impl Language {
    /// Tag used in output and by collaborators
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Java => "java",
            Language::Go => "go",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::CSharp => "csharp",
            Language::Code => "code",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A qualifying source file read during the walk
///
/// Lives only long enough to be handed to the extractors and collaborators.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path relative to the repository root, `/`-separated
    pub relative_path: String,
    /// Lowercased extension without the leading dot
    pub extension: String,
    pub language: Language,
    pub content: String,
}

impl SourceFile {
    pub fn new(
        relative_path: impl Into<String>,
        extension: impl Into<String>,
        language: Language,
        content: impl Into<String>,
    ) -> Self {
        Self {
            relative_path: relative_path.into(),
            extension: extension.into(),
            language,
            content: content.into(),
        }
    }
}
