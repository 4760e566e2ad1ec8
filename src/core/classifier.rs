//! Language classification by file extension

use crate::models::source::Language;
use std::path::Path;

/// Extensions that make a file a source file, one per supported language
pub const SOURCE_EXTENSIONS: &[&str] = &["py", "js", "ts", "go", "java", "cpp", "c", "cs"];

fn normalize(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}

/// Map an extension (with or without the leading dot) to a language tag
///
/// Total: anything unrecognised becomes [`Language::Code`].
pub fn classify(extension: &str) -> Language {
    match normalize(extension).as_str() {
        "py" => Language::Python,
        "js" => Language::JavaScript,
        "ts" => Language::TypeScript,
        "java" => Language::Java,
        "go" => Language::Go,
        "cpp" => Language::Cpp,
        "c" => Language::C,
        "cs" => Language::CSharp,
        _ => Language::Code,
    }
}

/// Whether the extension is on the source allow-list (case-insensitive)
pub fn is_source_file(extension: &str) -> bool {
    let extension = normalize(extension);
    SOURCE_EXTENSIONS.contains(&extension.as_str())
}

/// Lowercased extension of a path without the dot, empty when there is none
///
/// Dotfiles such as `.py` have no extension, as with `os.path.splitext`.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default()
}
