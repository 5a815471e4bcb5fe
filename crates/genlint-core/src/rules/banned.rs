//! Banned technology scan

use crate::{
    context::ValidationContext,
    diagnostics::Finding,
    file_utils::{extension_of, is_under_any},
    rules::Validator,
};
use regex::RegexBuilder;
use std::path::Path;

/// Extensions that are prose or spreadsheets rather than code
const DOC_EXTENSIONS: &[&str] = &[".md", ".xlsx"];

pub struct BannedTechValidator;

impl BannedTechValidator {
    /// Doc-like files mention technologies as prose, not as dependencies
    fn is_exempt(path: &Path, ctx: &ValidationContext) -> bool {
        let ext = extension_of(path);
        if DOC_EXTENSIONS.contains(&ext.as_str()) {
            return true;
        }
        if is_under_any(path, &ctx.config.docs.doc_dirs) {
            return true;
        }
        // The constraints artifact lists every banned term by definition
        let meta_name = ctx.config.artifacts.constraints.file_name();
        meta_name.is_some() && path.file_name() == meta_name
    }
}

impl Validator for BannedTechValidator {
    fn validate(&self, path: &Path, content: &str, ctx: &ValidationContext) -> Vec<Finding> {
        let mut findings = Vec::new();

        if !ctx.is_rule_enabled("BAN-001") || Self::is_exempt(path, ctx) {
            return findings;
        }

        for term in ctx.banned.terms() {
            if term.is_empty() {
                continue;
            }
            // Terms are literals; escaping keeps `@vue/composition-api` and friends safe
            let pattern = match RegexBuilder::new(&regex::escape(term))
                .case_insensitive(true)
                .build()
            {
                Ok(pattern) => pattern,
                Err(e) => {
                    tracing::debug!("skipping banned term {term:?}: {e}");
                    continue;
                }
            };

            if let Some(m) = pattern.find(content) {
                let line = content[..m.start()].matches('\n').count() + 1;
                findings.push(
                    Finding::error(
                        path.to_path_buf(),
                        line,
                        "BAN-001",
                        format!(
                            "Banned technology '{}' detected in {}",
                            term,
                            path.display()
                        ),
                    )
                    .with_suggestion(format!(
                        "Remove '{}' and use the approved stack instead",
                        term
                    )),
                );
            }
        }

        findings
    }
}
