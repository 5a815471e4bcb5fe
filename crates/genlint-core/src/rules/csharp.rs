//! C# source checks

use crate::{
    context::ValidationContext, diagnostics::Finding, regex_util::static_regex, rules::Validator,
};
use regex::Regex;
use std::path::Path;

static_regex!(fn summary_doc_pattern, r"(?s)///\s*<summary>.*?</summary>");

pub struct CSharpValidator;

impl Validator for CSharpValidator {
    fn validate(&self, path: &Path, content: &str, ctx: &ValidationContext) -> Vec<Finding> {
        let mut findings = Vec::new();

        // CS-001: EF-style DbContext instead of SqlSugar
        if ctx.is_rule_enabled("CS-001")
            && content.contains("DbContext")
            && !content.contains("SqlSugar")
        {
            findings.push(
                Finding::error(
                    path.to_path_buf(),
                    0,
                    "CS-001",
                    format!(
                        "DbContext found, use SqlSugar instead of EntityFramework in {}",
                        path.display()
                    ),
                )
                .with_suggestion("Inject ISqlSugarClient instead of a DbContext".to_string()),
            );
        }

        // CS-002: no XML doc comment anywhere in the file
        if ctx.is_rule_enabled("CS-002") && !summary_doc_pattern().is_match(content) {
            findings.push(
                Finding::warning(
                    path.to_path_buf(),
                    0,
                    "CS-002",
                    format!("Missing /// <summary> doc comments in {}", path.display()),
                )
                .with_suggestion("Document public types with /// <summary>".to_string()),
            );
        }

        findings
    }
}
