//! Walk and extraction properties over fixture repositories

use reposcope::{
    core::{classifier, RepositoryWalker},
    models::config::DEFAULT_EXCLUDED_DIRS,
    DependencyEdge, Language, ScopeError,
};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A mixed-language repository with noise in excluded directories
fn create_mixed_repository(root: &Path) {
    write(root, "setup.py", "from setuptools import setup\nsetup()\n");
    write(root, "app/__init__.py", "");
    write(root, "app/main.py", "import sys\nfrom .config import load\nfrom app.db import session as s\n");
    write(root, "app/config.py", "import os, json\n");
    write(root, "app/broken.py", "class Broken(:\n    pass\n");
    write(root, "web/index.ts", "import { render } from 'react-dom';\nimport App from \"./App\";\n");
    write(root, "web/server.js", "const express = require('express');\n");
    write(root, "native/core.c", "#include <stdio.h>\n");
    write(root, "native/core.cpp", "#include <vector>\n");
    write(root, "svc/Main.java", "import java.util.List;\n");
    write(root, "svc/main.go", "import \"fmt\"\n");
    write(root, "svc/Program.cs", "using System;\n");
    write(root, "docs/guide.md", "import nothing from 'here'\n");
    write(root, ".venv/lib/site.py", "import site\n");
    write(root, "app/__pycache__/main.cpython-311.py", "import cached\n");
    write(root, ".git/hooks/pre-commit.py", "import hook\n");
}

/// Every non-excluded allow-listed file, computed independently of the walker
fn expected_source_files(root: &Path) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let entry = entry.unwrap();
            let name = entry.file_name().to_string_lossy().to_string();
            if DEFAULT_EXCLUDED_DIRS.contains(&name.as_str()) {
                continue;
            }
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if classifier::is_source_file(&classifier::extension_of(&path)) {
                let relative = path.strip_prefix(root).unwrap();
                let parts: Vec<_> = relative.iter().map(|p| p.to_string_lossy().to_string()).collect();
                found.insert(parts.join("/"));
            }
        }
    }
    found
}

#[test]
fn test_artifact_paths_equal_source_files() {
    let dir = tempdir().unwrap();
    create_mixed_repository(dir.path());

    let outcome = RepositoryWalker::new(DEFAULT_EXCLUDED_DIRS, true).walk(dir.path()).unwrap();
    let walked: BTreeSet<String> = outcome.files.iter().map(|f| f.path.clone()).collect();

    assert_eq!(walked, expected_source_files(dir.path()));
    assert_eq!(walked.len(), outcome.files.len());
    assert!(!walked.iter().any(|p| p.contains("__pycache__") || p.starts_with(".venv")));
}

#[test]
fn test_every_edge_source_has_artifacts() {
    let dir = tempdir().unwrap();
    create_mixed_repository(dir.path());

    let outcome = RepositoryWalker::new(DEFAULT_EXCLUDED_DIRS, true).walk(dir.path()).unwrap();
    let paths: BTreeSet<&str> = outcome.files.iter().map(|f| f.path.as_str()).collect();

    for edge in outcome.edges() {
        assert!(paths.contains(edge.source.as_str()), "orphan edge {:?}", edge);
    }
}

#[test]
fn test_extraction_per_language() {
    let dir = tempdir().unwrap();
    create_mixed_repository(dir.path());

    let outcome = RepositoryWalker::new(DEFAULT_EXCLUDED_DIRS, true).walk(dir.path()).unwrap();
    let edges = outcome.edges();
    let targets_of = |source: &str| -> Vec<&str> {
        edges
            .iter()
            .filter(|e| e.source == source)
            .map(|e| e.target.as_str())
            .collect()
    };

    assert_eq!(targets_of("setup.py"), vec!["setuptools"]);
    assert_eq!(targets_of("app/main.py"), vec!["sys", "config", "app.db"]);
    assert_eq!(targets_of("app/config.py"), vec!["os", "json"]);
    assert!(targets_of("app/broken.py").is_empty());
    assert_eq!(targets_of("web/index.ts"), vec!["react-dom", "./App"]);
    assert_eq!(targets_of("web/server.js"), vec!["express"]);
    for silent in ["native/core.c", "native/core.cpp", "svc/Main.java", "svc/main.go", "svc/Program.cs"] {
        assert!(targets_of(silent).is_empty(), "{} should not be extracted", silent);
    }

    let languages: Vec<(String, Language)> = outcome
        .files
        .iter()
        .filter(|f| f.path.starts_with("svc/") || f.path.starts_with("native/"))
        .map(|f| (f.path.clone(), f.language))
        .collect();
    assert_eq!(
        languages,
        vec![
            ("native/core.c".to_string(), Language::C),
            ("native/core.cpp".to_string(), Language::Cpp),
            ("svc/Main.java".to_string(), Language::Java),
            ("svc/Program.cs".to_string(), Language::CSharp),
            ("svc/main.go".to_string(), Language::Go),
        ]
    );
}

#[test]
fn test_syntax_error_recorded_as_warning() {
    let dir = tempdir().unwrap();
    create_mixed_repository(dir.path());

    let outcome = RepositoryWalker::new(DEFAULT_EXCLUDED_DIRS, true).walk(dir.path()).unwrap();

    assert_eq!(outcome.errors.len(), 1);
    let (path, err) = &outcome.errors[0];
    assert_eq!(path, "app/broken.py");
    assert!(matches!(err, ScopeError::Parse { .. }));
    assert!(!err.is_critical());
    assert!(outcome.files.iter().any(|f| f.path == "app/broken.py"));
}

#[test]
fn test_walk_is_deterministic_across_modes() {
    let dir = tempdir().unwrap();
    create_mixed_repository(dir.path());

    let sequential = RepositoryWalker::new(DEFAULT_EXCLUDED_DIRS, true).walk(dir.path()).unwrap();
    for threads in [1, 2, 8] {
        let parallel = RepositoryWalker::new(DEFAULT_EXCLUDED_DIRS, true)
            .with_parallelism(true, threads)
            .walk(dir.path())
            .unwrap();
        assert_eq!(sequential.files, parallel.files);
        assert_eq!(sequential.edges(), parallel.edges());
    }
}

#[test]
fn test_custom_exclusions_apply_at_every_depth() {
    let dir = tempdir().unwrap();
    write(dir.path(), "gen/a.py", "import a\n");
    write(dir.path(), "pkg/gen/b.py", "import b\n");
    write(dir.path(), "pkg/c.py", "import c\n");

    let outcome = RepositoryWalker::new(&["gen"], true).walk(dir.path()).unwrap();
    assert_eq!(outcome.edges(), vec![DependencyEdge::new("pkg/c.py", "c")]);
}
