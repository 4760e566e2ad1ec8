//! Generative-text collaborators
//!
//! Per-file explanations, security findings, generated tests and the
//! architecture narrative come from outside the analysis core. The core only
//! calls a [`Narrator`] and files whatever text comes back under the file's
//! relative path.

use crate::models::source::Language;

/// Source of free-form text about files and repositories
///
/// Implementations must be callable from several worker threads at once.
pub trait Narrator: Send + Sync {
    /// Plain-language explanation of one file
    fn explain(&self, code: &str, path: &str) -> String;

    /// Security findings for one file
    fn security_scan(&self, code: &str, path: &str, language: Language) -> String;

    /// Generated tests for one file
    fn generate_tests(&self, code: &str, path: &str, language: Language) -> String;

    /// Architecture description from the rendered folder tree
    fn architecture(&self, repo_name: &str, tree_text: &str) -> String;
}

/// Narrator that produces no text
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineNarrator;

impl Narrator for OfflineNarrator {
    fn explain(&self, _code: &str, _path: &str) -> String {
        String::new()
    }

    fn security_scan(&self, _code: &str, _path: &str, _language: Language) -> String {
        String::new()
    }

    fn generate_tests(&self, _code: &str, _path: &str, _language: Language) -> String {
        String::new()
    }

    fn architecture(&self, _repo_name: &str, _tree_text: &str) -> String {
        String::new()
    }
}
