//! Pattern-based import extraction for JavaScript and TypeScript
//!
//! A single fixed expression recognises `import ... from "<module>"` and
//! `require("<module>")` with either quote style. The surrounding syntax is
//! not parsed, so matches inside comments and string literals are reported
//! too, and other forms (`import "x"`, `import("x")`, multi-line import
//! clauses) are not.

use once_cell::sync::Lazy;
use regex::Regex;

static IMPORT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"import\s+.*?\s+from\s+['"](.*?)['"]|require\(['"](.*?)['"]\)"#)
        .expect("import pattern is valid")
});

/// Pattern extractor for JavaScript-family sources
pub struct JsImportExtractor;

impl JsImportExtractor {
    /// Module strings in order of appearance
    pub fn extract(source: &str) -> Vec<String> {
        IMPORT_PATTERN
            .captures_iter(source)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|module| module.as_str())
            .filter(|module| !module.is_empty())
            .map(str::to_string)
            .collect()
    }
}
