//! Documentation provenance and structure validation
//!
//! Generated documents must carry an evidence section ("依据与来源") with at
//! least one source item, and a `Prompt-Ref: prompt:id=<id>` header marker
//! near the top that resolves to an entry in the prompt registry.
//!
//! The structure check (DOC-007) is a raw-text heuristic: any line starting
//! with `##` or deeper counts as a section heading, including lines inside
//! fenced code blocks and `##` without a following space.

use crate::{
    context::ValidationContext,
    diagnostics::Finding,
    file_utils::is_under_any,
    regex_util::static_regex,
    rules::Validator,
    schemas::prompts::PromptRegistry,
};
use regex::Regex;
use std::path::Path;

/// Evidence-and-sources section title
pub const EVIDENCE_SECTION: &str = "依据与来源";

/// The Prompt-Ref marker must sit within this many leading lines
pub const PROMPT_REF_MAX_LINE_INDEX: usize = 29;

static_regex!(fn evidence_heading_pattern, r"^(#{1,6}\s*)?依据与来源");
static_regex!(fn any_heading_pattern, r"^\s*#");
static_regex!(fn section_heading_pattern, r"^\s*#{2,}");
static_regex!(fn url_pattern, r"\bhttps?://\S+");
static_regex!(fn reference_tag_pattern, r"<mcreference\b");
static_regex!(fn bullet_pattern, r"^\s*[-*]\s+");
static_regex!(fn prompt_ref_pattern, r"Prompt-Ref:\s*prompt:id=([a-zA-Z0-9_\-]+)");

/// A `Prompt-Ref` marker found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRef {
    /// 0-based line index
    pub line_index: usize,
    pub id: String,
}

/// Find the first `Prompt-Ref` marker
pub fn find_prompt_ref(lines: &[&str]) -> Option<PromptRef> {
    lines.iter().enumerate().find_map(|(idx, line)| {
        prompt_ref_pattern().captures(line).map(|caps| PromptRef {
            line_index: idx,
            id: caps[1].to_string(),
        })
    })
}

/// Outcome of looking for source items under the evidence heading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceSection {
    /// The title never appears
    Missing,
    /// The title appears only inline, not at the start of a line
    Inline,
    /// Heading found at this 0-based line, with or without a source item below
    Heading { line_index: usize, has_source: bool },
}

/// Locate the evidence section and scan it for a source item
pub fn find_evidence_section(content: &str, lines: &[&str]) -> EvidenceSection {
    if !content.contains(EVIDENCE_SECTION) {
        return EvidenceSection::Missing;
    }

    let Some(line_index) = lines
        .iter()
        .position(|l| evidence_heading_pattern().is_match(l))
    else {
        return EvidenceSection::Inline;
    };

    let has_source = lines[line_index + 1..]
        .iter()
        .take_while(|l| !any_heading_pattern().is_match(l))
        .any(|l| is_source_item(l));

    EvidenceSection::Heading {
        line_index,
        has_source,
    }
}

/// A link, a `<mcreference>` tag or a bulleted list item
fn is_source_item(line: &str) -> bool {
    url_pattern().is_match(line)
        || reference_tag_pattern().is_match(line)
        || bullet_pattern().is_match(line)
}

/// True when some line opens with a `##` (or deeper) marker
pub fn has_section_headings(lines: &[&str]) -> bool {
    lines.iter().any(|l| section_heading_pattern().is_match(l))
}

pub struct DocsValidator;

impl DocsValidator {
    /// Baseline documents and exempt directories skip the provenance rules
    fn requires_provenance(path: &Path, ctx: &ValidationContext) -> bool {
        let policy = &ctx.config.docs;
        if is_under_any(path, &policy.exempt_dirs) {
            return false;
        }
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        !policy.whitelist.iter().any(|w| w == name)
    }

    fn check_evidence(
        &self,
        path: &Path,
        content: &str,
        lines: &[&str],
        ctx: &ValidationContext,
        findings: &mut Vec<Finding>,
    ) {
        match find_evidence_section(content, lines) {
            EvidenceSection::Missing if ctx.is_rule_enabled("DOC-001") => {
                findings.push(
                    Finding::error(
                        path.to_path_buf(),
                        0,
                        "DOC-001",
                        format!(
                            "Document lacks the mandatory \"{}\" section: {}",
                            EVIDENCE_SECTION,
                            path.display()
                        ),
                    )
                    .with_suggestion(format!(
                        "Add a \"## {}\" section listing the sources the document is based on",
                        EVIDENCE_SECTION
                    )),
                );
            }
            EvidenceSection::Heading {
                line_index,
                has_source: false,
            } if ctx.is_rule_enabled("DOC-002") => {
                findings.push(
                    Finding::error(
                        path.to_path_buf(),
                        line_index + 1,
                        "DOC-002",
                        format!(
                            "\"{}\" section needs at least one source item (link, <mcreference> or list item): {}",
                            EVIDENCE_SECTION,
                            path.display()
                        ),
                    )
                    .with_suggestion("Add a bulleted source or a URL under the heading".to_string()),
                );
            }
            _ => {}
        }
    }

    fn check_prompt_ref(
        &self,
        path: &Path,
        lines: &[&str],
        ctx: &ValidationContext,
        findings: &mut Vec<Finding>,
    ) {
        let Some(prompt_ref) = find_prompt_ref(lines) else {
            if ctx.is_rule_enabled("DOC-003") {
                findings.push(
                    Finding::error(
                        path.to_path_buf(),
                        0,
                        "DOC-003",
                        format!(
                            "Missing Prompt-Ref header marker (Prompt-Ref: prompt:id=<registry id>): {}",
                            path.display()
                        ),
                    )
                    .with_suggestion(
                        "Add 'Prompt-Ref: prompt:id=<id>' within the first 30 lines".to_string(),
                    ),
                );
            }
            return;
        };

        let line = prompt_ref.line_index + 1;

        if prompt_ref.line_index > PROMPT_REF_MAX_LINE_INDEX && ctx.is_rule_enabled("DOC-004") {
            findings.push(
                Finding::error(
                    path.to_path_buf(),
                    line,
                    "DOC-004",
                    format!(
                        "Prompt-Ref must be within the first {} lines (found on line {}): {}",
                        PROMPT_REF_MAX_LINE_INDEX + 1,
                        line,
                        path.display()
                    ),
                )
                .with_suggestion("Move the Prompt-Ref marker into the document header".to_string()),
            );
        }

        self.check_registry(path, &prompt_ref, ctx, findings);
    }

    /// Resolve the referenced id against a freshly read registry
    fn check_registry(
        &self,
        path: &Path,
        prompt_ref: &PromptRef,
        ctx: &ValidationContext,
        findings: &mut Vec<Finding>,
    ) {
        let registry_path = ctx.registry_path();
        let line = prompt_ref.line_index + 1;

        if !registry_path.is_file() {
            if ctx.is_rule_enabled("DOC-005") {
                findings.push(Finding::error(
                    path.to_path_buf(),
                    line,
                    "DOC-005",
                    format!(
                        "Prompt registry {} not found, cannot resolve Prompt-Ref: {}",
                        registry_path.display(),
                        path.display()
                    ),
                ));
            }
            return;
        }

        match PromptRegistry::load(&registry_path) {
            Ok(registry) => {
                if !registry.contains(&prompt_ref.id) && ctx.is_rule_enabled("DOC-006") {
                    findings.push(
                        Finding::error(
                            path.to_path_buf(),
                            line,
                            "DOC-006",
                            format!(
                                "Prompt-Ref id '{}' is not in {} (file: {})",
                                prompt_ref.id,
                                registry_path.display(),
                                path.display()
                            ),
                        )
                        .with_suggestion("Register the prompt or fix the id".to_string()),
                    );
                }
            }
            Err(e) if ctx.is_rule_enabled("DOC-005") => {
                let detail = match std::error::Error::source(&e) {
                    Some(source) => format!("{e}: {source}"),
                    None => e.to_string(),
                };
                findings.push(Finding::error(
                    path.to_path_buf(),
                    line,
                    "DOC-005",
                    format!(
                        "Failed to check Prompt-Ref: {} (file: {})",
                        detail,
                        path.display()
                    ),
                ));
            }
            Err(_) => {}
        }
    }
}

impl Validator for DocsValidator {
    fn validate(&self, path: &Path, content: &str, ctx: &ValidationContext) -> Vec<Finding> {
        let mut findings = Vec::new();
        let lines: Vec<&str> = content.lines().collect();

        if Self::requires_provenance(path, ctx) {
            self.check_evidence(path, content, &lines, ctx, &mut findings);
            self.check_prompt_ref(path, &lines, ctx, &mut findings);
        }

        // DOC-007 applies to every document, whitelisted or not
        if ctx.is_rule_enabled("DOC-007") && !has_section_headings(&lines) {
            findings.push(
                Finding::warning(
                    path.to_path_buf(),
                    0,
                    "DOC-007",
                    format!("Document has no section headings: {}", path.display()),
                )
                .with_suggestion("Structure the document with ## / ### headings".to_string()),
            );
        }

        findings
    }
}
