//! TypeScript and Vue single-file component checks
//!
//! Both rules are substring heuristics, not parses. TS-001 fires on any file
//! that mentions `options` and `data()` without `setup`, which includes
//! comments and unrelated identifiers.

use crate::{context::ValidationContext, diagnostics::Finding, rules::Validator};
use std::path::Path;

pub struct ScriptValidator;

impl Validator for ScriptValidator {
    fn validate(&self, path: &Path, content: &str, ctx: &ValidationContext) -> Vec<Finding> {
        let mut findings = Vec::new();

        // TS-001: Options API instead of Composition API
        if ctx.is_rule_enabled("TS-001")
            && content.contains("options")
            && content.contains("data()")
            && !content.contains("setup")
        {
            findings.push(
                Finding::warning(
                    path.to_path_buf(),
                    0,
                    "TS-001",
                    format!(
                        "Options API style component, use the Composition API in {}",
                        path.display()
                    ),
                )
                .with_suggestion("Move state into setup() or <script setup>".to_string()),
            );
        }

        // TS-002: Vuex without Pinia
        if ctx.is_rule_enabled("TS-002") && content.contains("Vuex") && !content.contains("Pinia") {
            findings.push(
                Finding::error(
                    path.to_path_buf(),
                    0,
                    "TS-002",
                    format!("Vuex is banned, use Pinia instead in {}", path.display()),
                )
                .with_suggestion("Replace the Vuex store with a Pinia store".to_string()),
            );
        }

        findings
    }
}
