//! JSON output format support.
//!
//! Mirrors the text report for tooling that wants to parse results.

use genlint_core::{Finding, ValidationReport};
use serde::Serialize;
use std::path::Path;

/// Root structure for JSON output.
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    /// Version of genlint that produced this output.
    pub version: String,
    /// Number of files validated.
    pub files_checked: usize,
    /// Whether the run is accepted (no errors).
    pub passed: bool,
    pub errors: Vec<JsonFinding>,
    pub warnings: Vec<JsonFinding>,
    pub summary: JsonSummary,
}

/// A single finding in JSON format.
#[derive(Debug, Serialize)]
pub struct JsonFinding {
    /// Rule identifier (e.g., DOC-004).
    pub rule: String,
    /// File path (forward slashes for cross-platform consistency).
    pub file: String,
    /// Line number (1-based), 0 for whole-file findings.
    pub line: usize,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JsonSummary {
    pub errors: usize,
    pub warnings: usize,
}

fn path_to_string(path: &Path, base_path: &Path) -> String {
    path.strip_prefix(base_path)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn to_json(finding: &Finding, base_path: &Path) -> JsonFinding {
    JsonFinding {
        rule: finding.rule.clone(),
        file: path_to_string(&finding.file, base_path),
        line: finding.line,
        message: finding.message.clone(),
        suggestion: finding.suggestion.clone(),
    }
}

/// Convert a report to JSON output format.
pub fn report_to_json(report: &ValidationReport, base_path: &Path) -> JsonOutput {
    JsonOutput {
        version: env!("CARGO_PKG_VERSION").to_string(),
        files_checked: report.files_checked,
        passed: report.passed(),
        errors: report.errors.iter().map(|f| to_json(f, base_path)).collect(),
        warnings: report
            .warnings
            .iter()
            .map(|f| to_json(f, base_path))
            .collect(),
        summary: JsonSummary {
            errors: report.errors.len(),
            warnings: report.warnings.len(),
        },
    }
}
