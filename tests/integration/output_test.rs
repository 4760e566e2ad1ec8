//! Report and export files produced from a real analysis

use reposcope::cli::commands::write_results;
use reposcope::models::config::OutputFormat;
use reposcope::{Analyzer, RepositoryAnalysis, ScopeError, Settings};
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn analyze_fixture() -> (TempDir, RepositoryAnalysis) {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("app")).unwrap();
    fs::write(root.join("app/main.py"), "import os\nimport a.b as c, d\n").unwrap();
    fs::write(root.join("app/view.ts"), "import { h } from \"pre,act\";\n").unwrap();

    let results = Analyzer::new(Settings {
        repo_name: Some("fixture".to_string()),
        show_progress: false,
        ..Settings::for_path(root)
    })
    .analyze()
    .unwrap();
    (dir, results)
}

fn output_settings(format: OutputFormat, output_file: &Path) -> Settings {
    Settings {
        output_format: format,
        output_file: Some(output_file.to_path_buf()),
        show_progress: false,
        ..Settings::default()
    }
}

#[test]
fn test_csv_export() {
    let (_repo, results) = analyze_fixture();
    let out = tempdir().unwrap();
    let path = out.path().join("edges.csv");

    write_results(&output_settings(OutputFormat::Csv, &path), &results).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "source,target\napp/main.py,os\napp/main.py,a.b\napp/main.py,d\napp/view.ts,\"pre,act\"\n"
    );
}

#[test]
fn test_text_report_has_no_colors_in_files() {
    let (_repo, results) = analyze_fixture();
    let out = tempdir().unwrap();
    let path = out.path().join("report.txt");

    write_results(&output_settings(OutputFormat::Text, &path), &results).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("Repository: fixture"));
    assert!(content.contains("  app/main.py\n    -> os\n    -> a.b\n    -> d\n"));
    assert!(!content.contains('\u{1b}'));
}

#[test]
fn test_json_report_round_trips() {
    let (_repo, results) = analyze_fixture();
    let out = tempdir().unwrap();
    let path = out.path().join("report.json");

    write_results(&output_settings(OutputFormat::Json, &path), &results).unwrap();

    let parsed: RepositoryAnalysis = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed.repo_name, "fixture");
    assert_eq!(parsed.dependency_graph, results.dependency_graph);
    assert_eq!(parsed.folder_tree_text, results.folder_tree_text);
    let paths: Vec<_> = parsed.file_paths().collect();
    assert_eq!(paths, vec!["app/main.py", "app/view.ts"]);
}

#[test]
fn test_dot_export() {
    let (_repo, results) = analyze_fixture();
    let out = tempdir().unwrap();
    let report = out.path().join("report.json");
    let dot = out.path().join("deps.dot");

    let settings = Settings {
        dot_file: Some(dot.clone()),
        ..output_settings(OutputFormat::Json, &report)
    };
    write_results(&settings, &results).unwrap();

    let content = fs::read_to_string(&dot).unwrap();
    assert!(content.contains("\"app/main.py\" [shape=box];"));
    assert!(content.contains("\"a.b\" [shape=ellipse];"));
    assert!(content.contains("\"app/view.ts\" -> \"pre,act\";"));
    assert!(content.trim_end().ends_with('}'));
}

#[test]
fn test_missing_output_directory() {
    let (_repo, results) = analyze_fixture();
    let out = tempdir().unwrap();
    let path = out.path().join("nested/missing/report.txt");

    let err = write_results(&output_settings(OutputFormat::Text, &path), &results).unwrap_err();
    assert!(matches!(err, ScopeError::OutputDirectoryNotFound { .. }));
}
