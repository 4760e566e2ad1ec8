//! Full analyses over small fixture repositories

use reposcope::{
    Analyzer, DependencyEdge, Language, Narrator, ScopeError, Settings,
};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

fn create_example_repository(root: &Path) {
    fs::create_dir_all(root.join("src")).unwrap();
    fs::create_dir_all(root.join(".git")).unwrap();
    fs::write(root.join("src/a.py"), "import os\nfrom pkg.sub import x\n").unwrap();
    fs::write(root.join("src/b.js"), "import z from \"lib\";\n").unwrap();
    fs::write(root.join(".git/ignored.py"), "import secret\n").unwrap();
}

fn settings_for(root: &Path) -> Settings {
    Settings {
        show_progress: false,
        ..Settings::for_path(root)
    }
}

#[test]
fn test_example_repository() {
    let dir = tempdir().unwrap();
    create_example_repository(dir.path());

    let results = Analyzer::new(settings_for(dir.path())).analyze().unwrap();

    assert_eq!(
        results.dependency_graph.edges(),
        &[
            DependencyEdge::new("src/a.py", "os"),
            DependencyEdge::new("src/a.py", "pkg.sub"),
            DependencyEdge::new("src/b.js", "lib"),
        ]
    );
    let paths: Vec<_> = results.file_paths().collect();
    assert_eq!(paths, vec!["src/a.py", "src/b.js"]);
    assert_eq!(results.languages["src/a.py"], Language::Python);
    assert_eq!(results.languages["src/b.js"], Language::JavaScript);
    assert!(!results.folder_tree.contains_name(".git"));
    assert!(!results.folder_tree_text.contains("ignored.py"));
    assert!(results.errors.is_empty());
    assert_eq!(results.summary.files_scanned, 2);

    let expected_name = dir.path().file_name().unwrap().to_string_lossy().to_string();
    assert_eq!(results.repo_name, expected_name);
}

#[test]
fn test_syntax_error_contributes_no_edges() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("ok.py"), "import json\n").unwrap();
    fs::write(dir.path().join("bad.py"), "import os\ndef broken(:\n").unwrap();

    let results = Analyzer::new(settings_for(dir.path())).analyze().unwrap();

    assert_eq!(
        results.dependency_graph.edges(),
        &[DependencyEdge::new("ok.py", "json")]
    );
    assert!(results.file("bad.py").unwrap().imports.is_empty());
    assert_eq!(results.summary.parse_failures, 1);
    assert_eq!(results.errors.len(), 1);
    assert_eq!(results.errors[0].path, "bad.py");
}

#[test]
fn test_empty_repository() {
    let dir = tempdir().unwrap();

    let results = Analyzer::new(settings_for(dir.path())).analyze().unwrap();

    assert!(results.dependency_graph.is_empty());
    assert!(results.file_summaries.is_empty());
    assert!(results.folder_tree.children().is_empty());
    assert_eq!(results.summary.files_scanned, 0);
}

#[test]
fn test_missing_root_is_critical() {
    let dir = tempdir().unwrap();
    let err = Analyzer::new(settings_for(&dir.path().join("absent")))
        .analyze()
        .unwrap_err();

    assert!(matches!(err, ScopeError::InvalidPath { .. }));
    assert!(err.is_critical());
}

#[test]
fn test_edge_sources_are_analyzed_files() {
    let dir = tempdir().unwrap();
    create_example_repository(dir.path());
    fs::create_dir_all(dir.path().join("lib/deep")).unwrap();
    fs::write(dir.path().join("lib/deep/util.ts"), "import { a } from '../a';\nconst b = require('b');\n").unwrap();
    fs::write(dir.path().join("lib/notes.txt"), "import nothing from 'x'\n").unwrap();

    let results = Analyzer::new(settings_for(dir.path())).analyze().unwrap();
    let files: HashSet<&str> = results.file_paths().collect();

    for edge in results.dependency_graph.edges() {
        assert!(files.contains(edge.source.as_str()));
    }
    assert_eq!(results.dependency_graph.edges_from("lib/deep/util.ts").count(), 2);
    assert!(!files.contains("lib/notes.txt"));
    assert_eq!(results.summary.files_scanned, 4);
}

#[test]
fn test_parallel_matches_sequential() {
    let dir = tempdir().unwrap();
    for i in 0..40 {
        let sub = dir.path().join(format!("pkg{}", i % 5));
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join(format!("m{}.py", i)), format!("import mod{}\nimport shared\n", i)).unwrap();
        fs::write(sub.join(format!("w{}.js", i)), format!("const x = require('dep{}');\n", i)).unwrap();
    }

    let sequential = Analyzer::new(Settings {
        parallel: false,
        ..settings_for(dir.path())
    })
    .analyze()
    .unwrap();
    let parallel = Analyzer::new(Settings {
        parallel: true,
        threads: Some(4),
        ..settings_for(dir.path())
    })
    .analyze()
    .unwrap();

    assert_eq!(sequential.dependency_graph, parallel.dependency_graph);
    assert_eq!(sequential.imports, parallel.imports);
    assert_eq!(sequential.folder_tree_text, parallel.folder_tree_text);
    assert_eq!(parallel.dependency_graph.len(), 120);
}

#[test]
fn test_custom_repo_name_and_exclusions() {
    let dir = tempdir().unwrap();
    create_example_repository(dir.path());

    let results = Analyzer::new(Settings {
        repo_name: Some("renamed".to_string()),
        exclude_dirs: vec!["src".to_string()],
        ..settings_for(dir.path())
    })
    .analyze()
    .unwrap();

    assert_eq!(results.repo_name, "renamed");
    assert!(results.folder_tree.contains_name(".git"));
    assert_eq!(
        results.dependency_graph.edges(),
        &[DependencyEdge::new(".git/ignored.py", "secret")]
    );
}

/// Narrator that labels every artifact and remembers what it was shown
#[derive(Default)]
struct RecordingNarrator {
    explained: Mutex<Vec<String>>,
}

impl Narrator for RecordingNarrator {
    fn explain(&self, _code: &str, path: &str) -> String {
        self.explained.lock().unwrap().push(path.to_string());
        format!("explains {}", path)
    }

    fn security_scan(&self, _code: &str, path: &str, language: Language) -> String {
        format!("scan {} as {}", path, language.as_str())
    }

    fn generate_tests(&self, code: &str, path: &str, _language: Language) -> String {
        format!("{} tests for {} bytes", path, code.len())
    }

    fn architecture(&self, repo_name: &str, tree_text: &str) -> String {
        format!("{} has {} tree lines", repo_name, tree_text.lines().count())
    }
}

#[test]
fn test_narrator_artifacts_are_keyed_by_path() {
    let dir = tempdir().unwrap();
    create_example_repository(dir.path());
    let narrator = Arc::new(RecordingNarrator::default());

    let results = Analyzer::new(Settings {
        repo_name: Some("demo".to_string()),
        ..settings_for(dir.path())
    })
    .with_narrator(narrator.clone())
    .analyze()
    .unwrap();

    assert_eq!(results.file_summaries["src/a.py"], "explains src/a.py");
    assert_eq!(results.security_reports["src/b.js"], "scan src/b.js as javascript");
    assert_eq!(results.test_cases["src/b.js"], "src/b.js tests for 21 bytes");
    // root, src, a.py and b.js
    assert_eq!(results.architecture, "demo has 4 tree lines");

    let mut explained = narrator.explained.lock().unwrap().clone();
    explained.sort();
    assert_eq!(explained, vec!["src/a.py", "src/b.js"]);
}
