//! Tests for output formatting

#[cfg(test)]
mod tests {
    use crate::error::ScopeError;
    use crate::models::analysis::{FileArtifacts, RepositoryAnalysis};
    use crate::models::dependency_graph::{DependencyEdge, DependencyGraph};
    use crate::models::source::Language;
    use crate::models::tree::Node;
    use crate::output::{
        create_formatter, create_writer, format_duration, CsvFormatter, FileWriter, Formatter,
        JsonFormatter, OutputWriter, ProgressReporter, TextFormatter,
    };
    use crate::core::parallel::ProgressUpdate;
    use crate::models::config::OutputFormat;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    fn create_test_results() -> RepositoryAnalysis {
        let tree = Node::folder(
            "demo",
            vec![Node::folder(
                "src",
                vec![Node::file("a.py"), Node::file("b.js")],
            )],
        );
        let mut results = RepositoryAnalysis::new("demo", tree, "demo/\n  src/\n    a.py\n    b.js".to_string());

        results.add_file(FileArtifacts {
            path: "src/a.py".to_string(),
            language: Language::Python,
            imports: vec!["os".to_string(), "pkg.sub".to_string()],
            explanation: "Loads settings".to_string(),
            security_report: String::new(),
            tests: String::new(),
        });
        results.add_file(FileArtifacts {
            path: "src/b.js".to_string(),
            language: Language::JavaScript,
            imports: vec!["lib".to_string()],
            explanation: String::new(),
            security_report: String::new(),
            tests: String::new(),
        });
        results.set_dependency_graph(DependencyGraph::from_edges(vec![
            DependencyEdge::new("src/a.py", "os"),
            DependencyEdge::new("src/a.py", "pkg.sub"),
            DependencyEdge::new("src/b.js", "lib"),
        ]));
        results.set_architecture("Two small modules.".to_string());
        results.add_error("src/c.py", &ScopeError::parse_error("src/c.py", "syntax error"));
        results.set_scan_duration(Duration::from_millis(1500));

        results
    }

    #[test]
    fn test_text_formatter() {
        let results = create_test_results();

        let normal = TextFormatter::new(false, false, false).format(&results).unwrap();
        assert!(normal.contains("Repository: demo"));
        assert!(normal.contains("demo/\n  src/\n    a.py"));
        assert!(normal.contains("Dependency edges: 3"));
        assert!(normal.contains("  src/a.py\n    -> os\n    -> pkg.sub\n"));
        assert!(normal.contains("Parse failures: 1"));
        assert!(normal.contains("[WARNING] src/c.py"));
        assert!(normal.contains("Scan duration: 1.50s"));
        assert!(!normal.contains("Two small modules."));
        assert!(!normal.contains('\u{1b}'));

        let verbose = TextFormatter::new(false, true, false).format(&results).unwrap();
        assert!(verbose.contains("Architecture\nTwo small modules."));
        assert!(verbose.contains("src/a.py (python)\n  Explanation:\n    Loads settings"));
        assert!(!verbose.contains("src/b.js (javascript)"));

        let quiet = TextFormatter::new(false, false, true).format(&results).unwrap();
        assert_eq!(quiet, "src/a.py -> os\nsrc/a.py -> pkg.sub\nsrc/b.js -> lib\n");
    }

    #[test]
    fn test_colors_are_optional() {
        let results = create_test_results();
        let colored = TextFormatter::new(true, false, false).format(&results).unwrap();
        assert!(colored.contains('\u{1b}'));
    }

    #[test]
    fn test_json_formatter() {
        let results = create_test_results();
        let json = JsonFormatter::new(true).format(&results).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["repo_name"], "demo");
        assert_eq!(value["folder_tree"]["type"], "folder");
        assert_eq!(value["folder_tree"]["children"][0]["children"][0]["name"], "a.py");
        assert_eq!(value["folder_tree"]["children"][0]["children"][0].get("children"), None);
        assert_eq!(
            value["dependency_graph"],
            serde_json::json!([
                {"source": "src/a.py", "target": "os"},
                {"source": "src/a.py", "target": "pkg.sub"},
                {"source": "src/b.js", "target": "lib"}
            ])
        );
        assert_eq!(value["file_summaries"]["src/a.py"], "Loads settings");
        assert_eq!(value["architecture"], "Two small modules.");

        let compact = JsonFormatter::new(false).format(&results).unwrap();
        assert!(!compact.contains('\n'));
    }

    #[test]
    fn test_json_preserves_traversal_order() {
        let results = create_test_results();
        let json = JsonFormatter::new(true).format(&results).unwrap();
        let a = json.find("\"src/a.py\": \"Loads settings\"").unwrap();
        let b = json.find("\"src/b.js\": \"\"").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_csv_formatter() {
        let results = create_test_results();
        let csv = CsvFormatter::new().format(&results).unwrap();
        assert_eq!(csv, "source,target\nsrc/a.py,os\nsrc/a.py,pkg.sub\nsrc/b.js,lib\n");
    }

    #[test]
    fn test_csv_quotes_awkward_modules() {
        let mut results = create_test_results();
        results.set_dependency_graph(DependencyGraph::from_edges(vec![DependencyEdge::new(
            "a.js",
            "weird,\"name",
        )]));
        let csv = CsvFormatter::new().format(&results).unwrap();
        assert_eq!(csv, "source,target\na.js,\"weird,\"\"name\"\n");
    }

    #[test]
    fn test_create_formatter() {
        let results = create_test_results();
        let csv = create_formatter(OutputFormat::Csv, false, false, false)
            .format(&results)
            .unwrap();
        assert!(csv.starts_with("source,target\n"));
        let json = create_formatter(OutputFormat::Json, false, false, false)
            .format(&results)
            .unwrap();
        assert!(json.starts_with('{'));
    }

    #[test]
    fn test_file_writer() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("out.txt");

        FileWriter::new(&file_path).write("Test content").unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "Test content");

        create_writer(Some(&file_path)).write("Replaced").unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "Replaced");
    }

    #[test]
    fn test_file_writer_missing_directory() {
        let temp_dir = tempdir().unwrap();
        let err = FileWriter::new(temp_dir.path().join("missing").join("out.txt"))
            .write("x")
            .unwrap_err();
        assert!(matches!(err, ScopeError::OutputDirectoryNotFound { .. }));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(42)), "42ms");
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.50s");
    }

    #[test]
    fn test_disabled_progress_reporter_tracks_position() {
        let reporter = ProgressReporter::new(false);
        assert!(!reporter.is_enabled());
        reporter.start("extracting");
        reporter.update_from(ProgressUpdate::new(3, 5, "src/a.py"));
        assert_eq!(reporter.position(), 3);
        reporter.finish("done");
    }
}
