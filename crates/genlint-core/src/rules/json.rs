//! JSON syntax validation

use crate::{context::ValidationContext, diagnostics::Finding, rules::Validator};
use std::path::Path;

pub struct JsonValidator;

impl Validator for JsonValidator {
    fn validate(&self, path: &Path, content: &str, ctx: &ValidationContext) -> Vec<Finding> {
        let mut findings = Vec::new();

        if !ctx.is_rule_enabled("JSON-001") {
            return findings;
        }

        if let Err(e) = serde_json::from_str::<serde_json::Value>(content) {
            findings.push(
                Finding::error(
                    path.to_path_buf(),
                    e.line(),
                    "JSON-001",
                    format!("Invalid JSON in {}: {}", path.display(), e),
                )
                .with_suggestion("Check JSON syntax".to_string()),
            );
        }

        findings
    }
}
