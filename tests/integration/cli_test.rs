//! Command-line parsing and command execution

use clap::Parser;
use reposcope::cli::{
    args::{Args, OutputFormat},
    commands::{exit_code, Command},
};
use reposcope::config::{parser::parse_config_file, DEFAULT_CONFIG_FILE};
use reposcope::ErrorSeverity;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn create_repository(root: &Path) {
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("src/a.py"), "import os\nfrom pkg.sub import x\n").unwrap();
    fs::write(root.join("src/b.js"), "import z from \"lib\";\n").unwrap();
}

#[test]
fn test_cli_args_parsing() {
    let args = Args::try_parse_from(["reposcope"]).unwrap();
    assert_eq!(args.path, None);
    assert!(args.exclude.is_empty());
    assert_eq!(args.output, None);
    assert!(!args.no_parallel);
    assert!(!args.init);

    let args = Args::try_parse_from([
        "reposcope",
        "--path",
        "/test/path",
        "--name",
        "service",
        "--exclude",
        "node_modules",
        "--exclude",
        "dist",
        "--threads",
        "3",
        "--output",
        "csv",
        "--output-file",
        "edges.csv",
        "--dot",
        "deps.dot",
        "--no-follow-links",
        "--quiet",
    ])
    .unwrap();

    assert_eq!(args.path, Some(PathBuf::from("/test/path")));
    assert_eq!(args.name.as_deref(), Some("service"));
    assert_eq!(args.exclude, vec!["node_modules".to_string(), "dist".to_string()]);
    assert_eq!(args.threads, Some(3));
    assert_eq!(args.output, Some(OutputFormat::Csv));
    assert_eq!(args.output_file, Some(PathBuf::from("edges.csv")));
    assert_eq!(args.dot, Some(PathBuf::from("deps.dot")));
    assert!(args.no_follow_links);
    assert!(args.quiet);
}

#[test]
fn test_cli_rejects_unknown_format() {
    assert!(Args::try_parse_from(["reposcope", "--output", "xml"]).is_err());
}

#[test]
fn test_init_command_writes_loadable_config() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join(DEFAULT_CONFIG_FILE);

    let args = Args::try_parse_from(["reposcope", "--init", "--config", config_path.to_str().unwrap()]).unwrap();
    let command = Command::from_args(args);
    assert!(matches!(command, Command::Init(_)));
    assert_eq!(command.run(), 0);

    let partial = parse_config_file(&config_path).unwrap();
    assert_eq!(partial.follow_links, Some(true));

    // A second init leaves the existing file alone
    fs::write(&config_path, "parallel = false\n").unwrap();
    assert_eq!(command.run(), 0);
    assert_eq!(fs::read_to_string(&config_path).unwrap(), "parallel = false\n");
}

#[test]
fn test_analyze_command_writes_json() {
    let repo = tempdir().unwrap();
    create_repository(repo.path());
    let out = tempdir().unwrap();
    let config_path = out.path().join("config.toml");
    fs::write(&config_path, "show_progress = false\n").unwrap();
    let output_file = out.path().join("analysis.json");
    let dot_file = out.path().join("deps.dot");

    let args = Args {
        path: Some(repo.path().to_path_buf()),
        name: Some("demo".to_string()),
        output: Some(OutputFormat::Json),
        output_file: Some(output_file.clone()),
        dot: Some(dot_file.clone()),
        config: Some(config_path),
        no_progress: true,
        ..Default::default()
    };
    assert_eq!(Command::from_args(args).run(), 0);

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output_file).unwrap()).unwrap();
    assert_eq!(json["repo_name"], "demo");
    assert_eq!(
        json["dependency_graph"],
        serde_json::json!([
            {"source": "src/a.py", "target": "os"},
            {"source": "src/a.py", "target": "pkg.sub"},
            {"source": "src/b.js", "target": "lib"}
        ])
    );

    let dot = fs::read_to_string(&dot_file).unwrap();
    assert!(dot.starts_with("digraph dependencies {"));
    assert!(dot.contains("\"src/a.py\" -> \"pkg.sub\";"));
}

#[test]
fn test_analyze_missing_path_is_critical() {
    let dir = tempdir().unwrap();
    let args = Args {
        path: Some(dir.path().join("missing")),
        no_progress: true,
        ..Default::default()
    };
    let command = Command::from_args(args);

    let err = command.execute().unwrap_err();
    assert!(err.is_critical());
    assert_eq!(command.run(), 2);
}

#[test]
fn test_analyze_missing_config_is_critical() {
    let repo = tempdir().unwrap();
    let args = Args {
        path: Some(repo.path().to_path_buf()),
        config: Some(repo.path().join("absent.toml")),
        no_progress: true,
        ..Default::default()
    };
    assert_eq!(Command::from_args(args).run(), 2);
}

#[test]
fn test_exit_codes() {
    assert_eq!(exit_code(ErrorSeverity::Warning), 0);
    assert_eq!(exit_code(ErrorSeverity::Error), 1);
    assert_eq!(exit_code(ErrorSeverity::Critical), 2);
}
