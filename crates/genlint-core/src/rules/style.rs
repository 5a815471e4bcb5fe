//! Naming heuristic for code files
//!
//! Flags transliterated identifiers and magic numbers. The digit-run pattern
//! is deliberately loose: any run of three digits trips it, so ports, HTTP
//! status codes and years are reported too. Findings are warnings only.

use crate::{
    context::ValidationContext, diagnostics::Finding, file_utils::extension_of,
    regex_util::static_regex, rules::Validator,
};
use regex::Regex;
use std::path::Path;

/// Extensions the heuristic applies to
pub const CODE_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx", ".cs", ".vue", ".cshtml"];

/// Marker some generators leave next to transliterated names
const TRANSLITERATION_MARKER: &str = "拼音";

static_regex!(fn digit_run_pattern, r"[a-zA-Z]*[0-9]{3,}[a-zA-Z]*");

pub struct StyleValidator;

impl Validator for StyleValidator {
    fn validate(&self, path: &Path, content: &str, ctx: &ValidationContext) -> Vec<Finding> {
        let mut findings = Vec::new();

        if !ctx.is_rule_enabled("STY-001") {
            return findings;
        }
        if !CODE_EXTENSIONS.contains(&extension_of(path).as_str()) {
            return findings;
        }

        if content.contains(TRANSLITERATION_MARKER) || digit_run_pattern().is_match(content) {
            findings.push(
                Finding::warning(
                    path.to_path_buf(),
                    0,
                    "STY-001",
                    format!(
                        "Possible transliterated naming or magic number in {}",
                        path.display()
                    ),
                )
                .with_suggestion(
                    "Use descriptive English identifiers and named constants".to_string(),
                ),
            );
        }

        findings
    }
}
