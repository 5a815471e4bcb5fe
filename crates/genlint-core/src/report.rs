//! Aggregated validation report

use crate::diagnostics::{Finding, Severity};
use serde::Serialize;
use std::fmt::Write as _;

/// Terminal result of a run: findings split by severity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub files_checked: usize,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

impl ValidationReport {
    /// Partition findings by severity, keeping their relative order
    pub fn from_findings(findings: Vec<Finding>, files_checked: usize) -> Self {
        let (errors, warnings): (Vec<Finding>, Vec<Finding>) = findings
            .into_iter()
            .partition(|f| f.severity == Severity::Error);
        Self {
            files_checked,
            errors,
            warnings,
        }
    }

    /// True iff there are no error findings
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn total_findings(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Human-readable report
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== Generated content validation report ===");
        let _ = writeln!(out, "Files checked: {}", self.files_checked);
        let _ = writeln!(out, "Errors: {}", self.errors.len());
        let _ = writeln!(out, "Warnings: {}", self.warnings.len());
        out.push('\n');

        render_section(&mut out, "Error details:", &self.errors);
        render_section(&mut out, "Warning details:", &self.warnings);

        out
    }
}

fn render_section(out: &mut String, title: &str, findings: &[Finding]) {
    if findings.is_empty() {
        return;
    }
    let _ = writeln!(out, "{}", title);
    for (idx, finding) in findings.iter().enumerate() {
        let _ = writeln!(out, "{}. [{}] {}", idx + 1, finding.rule, finding.message);
    }
    out.push('\n');
}
