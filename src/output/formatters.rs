//! Output formatting implementations

use crate::error::{Result, ScopeError};
use crate::models::analysis::RepositoryAnalysis;
use ansi_term::Colour::{Blue, Cyan, Green, Red, Yellow};
use ansi_term::Style;
use std::time::Duration;

fn heading(text: &str, use_colors: bool) -> String {
    if use_colors {
        Blue.bold().paint(text).to_string()
    } else {
        text.to_string()
    }
}

fn paint(style: Style, text: &str, use_colors: bool) -> String {
    if use_colors {
        style.paint(text).to_string()
    } else {
        text.to_string()
    }
}

/// Format the full human-readable report
pub fn format_results_text(results: &RepositoryAnalysis, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{}\n\n",
        heading(&format!("Repository: {}", results.repo_name), use_colors)
    ));

    output.push_str(&format!("{}\n", heading("Folder Tree", use_colors)));
    output.push_str(&results.folder_tree_text);
    output.push_str("\n\n");

    output.push_str(&format_summary_text(results, use_colors));
    output.push('\n');
    output.push_str(&format_dependencies_text(results, use_colors));

    if verbose {
        output.push_str(&format_narrative_text(results, use_colors));
    }

    if !results.errors.is_empty() {
        output.push('\n');
        output.push_str(&paint(
            Yellow.bold(),
            &format!("Warnings ({})", results.errors.len()),
            use_colors,
        ));
        output.push('\n');
        for error in &results.errors {
            output.push_str(&format!("  [{}] {}: {}\n", error.severity, error.path, error.error));
        }
    }

    output
}

/// Summary statistics block
pub fn format_summary_text(results: &RepositoryAnalysis, use_colors: bool) -> String {
    let summary = &results.summary;
    let graph = &summary.graph;
    let mut output = format!("{}\n", heading("Summary", use_colors));

    output.push_str(&format!("Files scanned: {}\n", summary.files_scanned));
    output.push_str(&format!("Source files: {}\n", summary.source_files));
    for (language, count) in &summary.languages {
        output.push_str(&format!("  {}: {}\n", language, count));
    }
    output.push_str(&format!("Folders: {}\n", summary.folders));
    output.push_str(&format!("Dependency edges: {}\n", graph.total_edges));
    output.push_str(&format!("Distinct modules: {}\n", graph.distinct_targets));
    if let Some(module) = &graph.most_referenced_module {
        output.push_str(&format!(
            "Most referenced module: {} ({} files)\n",
            paint(Cyan.normal(), module, use_colors),
            graph.max_fan_in
        ));
    }
    if let Some(file) = &graph.max_fan_out_file {
        output.push_str(&format!(
            "Most imports: {} ({} modules)\n",
            paint(Green.normal(), file, use_colors),
            graph.max_fan_out
        ));
    }
    if summary.files_skipped > 0 {
        output.push_str(&paint(
            Red.normal(),
            &format!("Files skipped: {}", summary.files_skipped),
            use_colors,
        ));
        output.push('\n');
    }
    if summary.parse_failures > 0 {
        output.push_str(&paint(
            Yellow.normal(),
            &format!("Parse failures: {}", summary.parse_failures),
            use_colors,
        ));
        output.push('\n');
    }
    output.push_str(&format!("Scan duration: {}\n", format_duration(summary.scan_duration)));

    output
}

/// Edges grouped under their source file, in traversal order
pub fn format_dependencies_text(results: &RepositoryAnalysis, use_colors: bool) -> String {
    let mut output = format!("{}\n", heading("Dependencies", use_colors));

    if results.dependency_graph.is_empty() {
        output.push_str("  (none)\n");
        return output;
    }

    for (path, imports) in &results.imports {
        if imports.is_empty() {
            continue;
        }
        output.push_str(&format!("  {}\n", paint(Green.normal(), path, use_colors)));
        for module in imports {
            output.push_str(&format!("    -> {}\n", paint(Cyan.normal(), module, use_colors)));
        }
    }

    output
}

/// Architecture and per-file narrative, skipping empty entries
fn format_narrative_text(results: &RepositoryAnalysis, use_colors: bool) -> String {
    let mut output = String::new();

    if !results.architecture.trim().is_empty() {
        output.push_str(&format!("\n{}\n", heading("Architecture", use_colors)));
        output.push_str(results.architecture.trim_end());
        output.push('\n');
    }

    for path in results.file_paths() {
        let Some(file) = results.file(path) else {
            continue;
        };
        let sections = [
            ("Explanation", &file.explanation),
            ("Security", &file.security_report),
            ("Tests", &file.tests),
        ];
        if sections.iter().all(|(_, text)| text.trim().is_empty()) {
            continue;
        }

        output.push_str(&format!("\n{} ({})\n", heading(path, use_colors), file.language));
        for (label, text) in sections {
            if !text.trim().is_empty() {
                output.push_str(&format!("  {}:\n", label));
                for line in text.lines() {
                    output.push_str(&format!("    {}\n", line));
                }
            }
        }
    }

    output
}

/// Quiet mode: one `source -> target` line per edge
pub fn format_edges_plain(results: &RepositoryAnalysis) -> String {
    results
        .dependency_graph
        .edges()
        .iter()
        .map(|edge| format!("{} -> {}\n", edge.source, edge.target))
        .collect()
}

pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

/// Format analysis results as JSON
pub fn format_results_json(results: &RepositoryAnalysis) -> Result<String> {
    serde_json::to_string_pretty(results).map_err(|e| ScopeError::JsonSerialize { source: e })
}

/// Format the dependency edge list as CSV
pub fn format_results_csv(results: &RepositoryAnalysis) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record(["source", "target"])?;
    for edge in results.dependency_graph.edges() {
        writer.write_record([edge.source.as_str(), edge.target.as_str()])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ScopeError::io_error(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| ScopeError::CsvSerialize { source: e })
}
