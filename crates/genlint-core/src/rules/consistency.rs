//! Banned list consistency between the constraints artifact and the prompt registry
//!
//! Runs once per directory validation. Both artifacts must declare the same
//! frontend and backend lists, compared as case-insensitive sets.

use crate::{
    context::ValidationContext,
    diagnostics::{Finding, LintResult},
    schemas::{
        constraints::{BannedLists, ConstraintsFile},
        prompts::RegistryBannedLists,
        read_artifact,
    },
};
use std::collections::BTreeSet;

fn normalized(list: Option<&Vec<String>>) -> BTreeSet<String> {
    list.map(|items| items.iter().map(|s| s.to_lowercase()).collect())
        .unwrap_or_default()
}

/// Categories whose lists disagree, in `frontend`, `backend` order
pub fn mismatched_categories(a: &BannedLists, b: &BannedLists) -> Vec<&'static str> {
    let mut mismatched = Vec::new();
    if normalized(a.frontend.as_ref()) != normalized(b.frontend.as_ref()) {
        mismatched.push("frontend");
    }
    if normalized(a.backend.as_ref()) != normalized(b.backend.as_ref()) {
        mismatched.push("backend");
    }
    mismatched
}

fn compare_artifacts(ctx: &ValidationContext) -> LintResult<Vec<Finding>> {
    let constraints_path = ctx.constraints_path();
    let registry_path = ctx.registry_path();

    let constraints: ConstraintsFile = read_artifact(&constraints_path)?;
    let registry = RegistryBannedLists::load(&registry_path)?;

    let declared = constraints.banned().cloned().unwrap_or_default();
    let mirrored = registry.banned_technologies.unwrap_or_default();

    let mismatched = mismatched_categories(&declared, &mirrored);
    if mismatched.is_empty() {
        return Ok(Vec::new());
    }

    Ok(vec![Finding::error(
        registry_path.clone(),
        0,
        "XREF-001",
        format!(
            "banned_technologies disagree between {} and {}: {}",
            constraints_path.display(),
            registry_path.display(),
            mismatched.join(", ")
        ),
    )
    .with_suggestion(format!(
        "Sync the {} lists of both files",
        mismatched.join(" and ")
    ))])
}

/// Compare the two artifacts when both exist. Failures degrade to an XREF-002 warning.
pub fn check_banned_consistency(ctx: &ValidationContext) -> Vec<Finding> {
    if !ctx.is_rule_enabled("XREF-001") {
        return Vec::new();
    }

    let constraints_path = ctx.constraints_path();
    let registry_path = ctx.registry_path();
    if !constraints_path.is_file() || !registry_path.is_file() {
        tracing::debug!("consistency check skipped, an artifact is missing");
        return Vec::new();
    }

    match compare_artifacts(ctx) {
        Ok(findings) => findings,
        Err(e) => {
            let detail = match std::error::Error::source(&e) {
                Some(source) => format!("{e}: {source}"),
                None => e.to_string(),
            };
            tracing::warn!("consistency check degraded: {detail}");
            if ctx.is_rule_enabled("XREF-002") {
                vec![Finding::warning(
                    registry_path,
                    0,
                    "XREF-002",
                    format!("Consistency check could not complete: {}", detail),
                )]
            } else {
                Vec::new()
            }
        }
    }
}
