//! # genlint-core
//!
//! Rule engine for validating generated code and documents.
//!
//! Validates:
//! - Banned technology references in code and data files
//! - Naming heuristics in code files
//! - TypeScript/Vue and C# conventions
//! - Documentation provenance (evidence section, Prompt-Ref marker, registry lookup)
//! - JSON syntax
//! - Banned list consistency between the constraints file and the prompt registry

pub mod config;
pub mod context;
pub mod diagnostics;
pub mod file_utils;
mod regex_util;
pub mod report;
pub mod rules;
pub mod schemas;

use std::path::{Path, PathBuf};

pub use config::LintConfig;
pub use context::ValidationContext;
pub use diagnostics::{Finding, LintError, LintResult, Severity};
pub use file_utils::FileRecord;
pub use report::ValidationReport;
use rules::Validator;

/// Detected file category for validator dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    /// .cs sources
    CSharp,
    /// .ts and .vue sources
    Script,
    /// .md documents
    Documentation,
    /// .json data
    StructuredData,
    /// Anything else: common rules only, never picked up by traversal
    Other,
}

/// Detect file category from the (case-insensitive) extension
pub fn detect_file_category(path: &Path) -> FileCategory {
    category_for_extension(&file_utils::extension_of(path))
}

/// Map a lowercased, dot-prefixed extension to its category
pub fn category_for_extension(extension: &str) -> FileCategory {
    match extension {
        ".cs" => FileCategory::CSharp,
        ".ts" | ".vue" => FileCategory::Script,
        ".md" => FileCategory::Documentation,
        ".json" => FileCategory::StructuredData,
        _ => FileCategory::Other,
    }
}

/// Get validators for a file category, common validators first
fn validators_for_category(category: FileCategory) -> Vec<Box<dyn Validator>> {
    let mut validators: Vec<Box<dyn Validator>> = vec![
        Box::new(rules::banned::BannedTechValidator),
        Box::new(rules::style::StyleValidator),
    ];

    match category {
        FileCategory::CSharp => validators.push(Box::new(rules::csharp::CSharpValidator)),
        FileCategory::Script => validators.push(Box::new(rules::script::ScriptValidator)),
        FileCategory::Documentation => validators.push(Box::new(rules::docs::DocsValidator)),
        FileCategory::StructuredData => validators.push(Box::new(rules::json::JsonValidator)),
        FileCategory::Other => {}
    }

    validators
}

/// Run every validator for the record's category
pub fn validate_record(record: &FileRecord, ctx: &ValidationContext) -> Vec<Finding> {
    tracing::debug!(
        file = %record.path.display(),
        extension = %record.extension,
        category = ?record.category,
        "validating"
    );
    let mut findings = Vec::new();

    for validator in validators_for_category(record.category) {
        findings.extend(validator.validate(&record.path, &record.content, ctx));
    }

    findings
}

/// Validate a single file
pub fn validate_file(path: &Path, ctx: &ValidationContext) -> LintResult<Vec<Finding>> {
    let record = FileRecord::read(path)?;
    Ok(validate_record(&record, ctx))
}

/// Findings of a directory run
#[derive(Debug, Clone, Default)]
pub struct ProjectScan {
    pub files_checked: usize,
    pub findings: Vec<Finding>,
}

/// Collect the files a directory run validates, in sorted order
pub fn collect_files(path: &Path, config: &LintConfig) -> LintResult<Vec<PathBuf>> {
    let exclude_patterns = config
        .exclude
        .iter()
        .map(|p| {
            glob::Pattern::new(p).map_err(|e| LintError::InvalidExclude {
                pattern: p.clone(),
                source: e,
            })
        })
        .collect::<LintResult<Vec<_>>>()?;

    let files = walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("skipping unreadable entry: {e}");
                None
            }
        })
        // Follows symlinks to files; symlinked directories are not descended
        .filter(|entry| entry.path().is_file())
        .filter(|entry| detect_file_category(entry.path()) != FileCategory::Other)
        .filter(|entry| {
            let relative = entry
                .path()
                .strip_prefix(path)
                .unwrap_or(entry.path())
                .to_string_lossy()
                .replace('\\', "/");
            let excluded = exclude_patterns.iter().any(|p| p.matches(&relative));
            if excluded {
                tracing::debug!(file = %relative, "excluded by config");
            }
            !excluded
        })
        .map(|entry| entry.into_path())
        .collect();

    Ok(files)
}

/// Validate a directory: the artifact consistency check, then every eligible file
pub fn validate_project(path: &Path, ctx: &ValidationContext) -> LintResult<ProjectScan> {
    let files = collect_files(path, &ctx.config)?;
    let mut findings = rules::consistency::check_banned_consistency(ctx);

    for file_path in &files {
        match validate_file(file_path, ctx) {
            Ok(file_findings) => findings.extend(file_findings),
            Err(e) => {
                // One unreadable file must not sink the whole run
                tracing::warn!(file = %file_path.display(), "read failed: {e}");
                findings.push(Finding::error(
                    file_path.clone(),
                    0,
                    "FILE-001",
                    format!("Failed to validate file: {}", e),
                ));
            }
        }
    }

    Ok(ProjectScan {
        files_checked: files.len(),
        findings,
    })
}

/// Main entry point: validate a file or directory and build the report.
///
/// Artifacts under `root` are read afresh on every call. The target is
/// canonicalized first so directory exemptions see the real location.
pub fn validate_path(path: &Path, config: LintConfig, root: &Path) -> LintResult<ValidationReport> {
    let canonical = path.canonicalize().map_err(|_| LintError::PathNotFound {
        path: path.to_path_buf(),
    })?;
    let path = canonical.as_path();

    let ctx = ValidationContext::load(config, root);

    if path.is_dir() {
        let scan = validate_project(path, &ctx)?;
        Ok(ValidationReport::from_findings(scan.findings, scan.files_checked))
    } else {
        let findings = validate_file(path, &ctx)?;
        Ok(ValidationReport::from_findings(findings, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::constraints::RuleConfig;
    use std::fs;
    use tempfile::TempDir;

    const REGISTRY: &str = r#"{
        "prompts": [{"id": "abc123", "title": "Order design"}],
        "banned_technologies": {
            "frontend": ["Vuex", "jQuery"],
            "backend": ["EntityFramework", "Dapper"]
        }
    }"#;

    const CONSTRAINTS: &str = r#"{"technologyStack": {"banned": {
        "frontend": ["Vuex", "jQuery"],
        "backend": ["EntityFramework", "Dapper"]
    }}}"#;

    /// Project root with both artifacts in place
    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("docs")).unwrap();
        fs::write(temp.path().join("docs/prompts.json"), REGISTRY).unwrap();
        fs::write(temp.path().join(".ai-constraints.json"), CONSTRAINTS).unwrap();
        temp
    }

    fn ctx(root: &Path) -> ValidationContext {
        ValidationContext::load(LintConfig::default(), root)
    }

    fn rules_of(findings: &[Finding]) -> Vec<&str> {
        findings.iter().map(|f| f.rule.as_str()).collect()
    }

    #[test]
    fn test_detect_categories() {
        assert_eq!(detect_file_category(Path::new("src/Svc.cs")), FileCategory::CSharp);
        assert_eq!(detect_file_category(Path::new("src/a.ts")), FileCategory::Script);
        assert_eq!(detect_file_category(Path::new("src/App.VUE")), FileCategory::Script);
        assert_eq!(
            detect_file_category(Path::new("docs/guide.md")),
            FileCategory::Documentation
        );
        assert_eq!(
            detect_file_category(Path::new("package.json")),
            FileCategory::StructuredData
        );
        assert_eq!(detect_file_category(Path::new("main.js")), FileCategory::Other);
        assert_eq!(detect_file_category(Path::new("Makefile")), FileCategory::Other);
        assert_eq!(category_for_extension(""), FileCategory::Other);
    }

    #[test]
    fn test_validators_per_category() {
        assert_eq!(validators_for_category(FileCategory::Other).len(), 2);
        for category in [
            FileCategory::CSharp,
            FileCategory::Script,
            FileCategory::Documentation,
            FileCategory::StructuredData,
        ] {
            assert_eq!(validators_for_category(category).len(), 3);
        }
    }

    #[test]
    fn test_doc_without_evidence_section_fails() {
        let temp = project();
        let doc = temp.path().join("design.md");
        fs::write(
            &doc,
            "# Design\nPrompt-Ref: prompt:id=abc123\n\n## Overview\nNo sources here.\n",
        )
        .unwrap();

        let report = validate_path(&doc, LintConfig::default(), temp.path()).unwrap();
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].rule, "DOC-001");
        assert!(report.warnings.is_empty());
        assert!(!report.passed());
    }

    #[test]
    fn test_prompt_ref_past_line_30_fails_even_if_registered() {
        let temp = project();
        let mut content = String::from("## Overview\n");
        for i in 1..34 {
            content.push_str(&format!("detail {i}\n"));
        }
        content.push_str("Prompt-Ref: prompt:id=abc123\n\n## 依据与来源\n- https://example.com\n");
        let doc = temp.path().join("late.md");
        fs::write(&doc, content).unwrap();

        let findings = validate_file(&doc, &ctx(temp.path())).unwrap();
        assert_eq!(rules_of(&findings), vec!["DOC-004"]);
        assert!(findings[0].message.contains("line 35"));
    }

    #[test]
    fn test_vuex_in_script_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("store.ts");
        fs::write(&file, "import Vuex from 'vuex'\nexport const store = new Vuex.Store({})\n")
            .unwrap();

        let findings = validate_file(&file, &ctx(temp.path())).unwrap();
        let ts: Vec<_> = findings.iter().filter(|f| f.rule == "TS-002").collect();
        assert_eq!(ts.len(), 1);
        assert!(ts[0].message.contains("store.ts"));
        // The banned scan reports the same term independently
        assert!(findings
            .iter()
            .any(|f| f.rule == "BAN-001" && f.message.contains("Vuex")));
    }

    #[test]
    fn test_invalid_json_yields_exactly_one_finding() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("data.json");
        fs::write(&file, "{\"a\": 1,}").unwrap();

        let findings = validate_file(&file, &ctx(temp.path())).unwrap();
        assert_eq!(rules_of(&findings), vec!["JSON-001"]);
        assert!(findings[0].message.contains("trailing comma"));
    }

    #[test]
    fn test_consistency_case_and_order_insensitive_in_project_run() {
        let temp = project();
        fs::write(
            temp.path().join("docs/prompts.json"),
            r#"{"prompts": [], "banned_technologies": {
                "frontend": ["jquery", "VUEX"],
                "backend": ["dapper", "entityFRAMEWORK"]
            }}"#,
        )
        .unwrap();

        let scan = validate_project(temp.path(), &ctx(temp.path())).unwrap();
        assert!(!rules_of(&scan.findings).contains(&"XREF-001"));
    }

    #[test]
    fn test_consistency_backend_mismatch_in_project_run() {
        let temp = project();
        fs::write(
            temp.path().join("docs/prompts.json"),
            r#"{"prompts": [], "banned_technologies": {
                "frontend": ["Vuex", "jQuery"],
                "backend": ["EntityFramework", "NHibernate"]
            }}"#,
        )
        .unwrap();

        let scan = validate_project(temp.path(), &ctx(temp.path())).unwrap();
        let xref: Vec<_> = scan.findings.iter().filter(|f| f.rule == "XREF-001").collect();
        assert_eq!(xref.len(), 1);
        assert!(xref[0].message.contains("backend"));
        assert!(!xref[0].message.contains("frontend"));
        // Consistency findings come before per-file findings
        assert_eq!(scan.findings[0].rule, "XREF-001");
    }

    #[test]
    fn test_empty_directory_passes() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("out");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("notes.txt"), "Vuex 12345").unwrap();
        fs::write(target.join("app.js"), "jQuery").unwrap();

        let report = validate_path(&target, LintConfig::default(), temp.path()).unwrap();
        assert_eq!(report.files_checked, 0);
        assert_eq!(report.total_findings(), 0);
        assert!(report.passed());
    }

    #[test]
    fn test_missing_path_is_fatal() {
        let temp = TempDir::new().unwrap();
        let err = validate_path(
            &temp.path().join("does-not-exist"),
            LintConfig::default(),
            temp.path(),
        )
        .unwrap_err();
        assert!(matches!(err, LintError::PathNotFound { .. }));
    }

    #[test]
    fn test_direct_invocation_runs_common_rules_on_other_files() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("legacy.js");
        fs::write(&file, "$('#id').hide(); // jQuery").unwrap();

        let report = validate_path(&file, LintConfig::default(), temp.path()).unwrap();
        assert_eq!(report.files_checked, 1);
        assert_eq!(rules_of(&report.errors), vec!["BAN-001"]);
    }

    /// Make `path` unreadable; false when permissions are not enforced (running as root)
    #[cfg(unix)]
    fn make_unreadable(path: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o000)).unwrap();
        fs::read(path).is_err()
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_in_walk_becomes_finding() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("out");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("locked.md"), "## Locked").unwrap();
        fs::write(target.join("ok.json"), "{}").unwrap();
        if !make_unreadable(&target.join("locked.md")) {
            return;
        }

        let scan = validate_project(&target, &ctx(temp.path())).unwrap();
        assert_eq!(scan.files_checked, 2);
        assert_eq!(rules_of(&scan.findings), vec!["FILE-001"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_single_file_is_fatal() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("locked.md");
        fs::write(&file, "## Locked").unwrap();
        if !make_unreadable(&file) {
            return;
        }

        let err = validate_path(&file, LintConfig::default(), temp.path()).unwrap_err();
        assert!(matches!(err, LintError::FileRead { .. }));
    }

    #[test]
    fn test_invalid_utf8_in_walk_is_still_validated() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("out");
        fs::create_dir_all(&target).unwrap();
        let mut bytes = b"{\"a\": 1,}".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        fs::write(target.join("data.json"), bytes).unwrap();

        let scan = validate_project(&target, &ctx(temp.path())).unwrap();
        assert_eq!(scan.files_checked, 1);
        assert_eq!(rules_of(&scan.findings), vec!["JSON-001"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_files_are_walked() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("out");
        fs::create_dir_all(&target).unwrap();
        fs::write(temp.path().join("real.json"), "{,}").unwrap();
        std::os::unix::fs::symlink(temp.path().join("real.json"), target.join("link.json"))
            .unwrap();

        let scan = validate_project(&target, &ctx(temp.path())).unwrap();
        assert_eq!(scan.files_checked, 1);
        assert_eq!(rules_of(&scan.findings), vec!["JSON-001"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_doc_dir_exemption_uses_real_location() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("docs")).unwrap();
        fs::write(temp.path().join("docs/guide.ts"), "// migrated off jQuery").unwrap();
        let alias = temp.path().join("alias");
        std::os::unix::fs::symlink(temp.path().join("docs"), &alias).unwrap();

        let report = validate_path(&alias, LintConfig::default(), temp.path()).unwrap();
        assert_eq!(report.files_checked, 1);
        assert!(report.errors.is_empty(), "unexpected: {:?}", report.errors);
    }

    #[test]
    fn test_collect_files_sorted_and_filtered() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("b")).unwrap();
        fs::create_dir_all(temp.path().join("node_modules/pkg")).unwrap();
        fs::write(temp.path().join("b/z.ts"), "").unwrap();
        fs::write(temp.path().join("a.md"), "").unwrap();
        fs::write(temp.path().join("b/a.cs"), "").unwrap();
        fs::write(temp.path().join("c.txt"), "").unwrap();
        fs::write(temp.path().join("node_modules/pkg/index.ts"), "").unwrap();

        let files = collect_files(temp.path(), &LintConfig::default()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(temp.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["a.md", "b/a.cs", "b/z.ts"]);
    }

    #[test]
    fn test_invalid_exclude_pattern_is_error() {
        let temp = TempDir::new().unwrap();
        let mut config = LintConfig::default();
        config.exclude = vec!["[".to_string()];

        let err = collect_files(temp.path(), &config).unwrap_err();
        assert!(matches!(err, LintError::InvalidExclude { .. }));
    }

    #[test]
    fn test_constraints_file_changes_banned_terms() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(".ai-constraints.json"),
            r#"{"technologyStack": {"banned": {"frontend": ["Svelte"], "backend": []}}}"#,
        )
        .unwrap();
        let file = temp.path().join("app.ts");
        fs::write(&file, "import Svelte from 'svelte'; // was jQuery").unwrap();

        let findings = validate_file(&file, &ctx(temp.path())).unwrap();
        let banned: Vec<_> = findings.iter().filter(|f| f.rule == "BAN-001").collect();
        assert_eq!(banned.len(), 1);
        assert!(banned[0].message.contains("Svelte"));
    }

    #[test]
    fn test_constraints_artifact_itself_is_not_scanned() {
        let temp = project();
        let scan = validate_project(temp.path(), &ctx(temp.path())).unwrap();
        // Both artifacts are picked up, neither trips the banned scan
        assert_eq!(scan.files_checked, 2);
        assert!(scan.findings.is_empty(), "unexpected: {:?}", scan.findings);
    }

    #[test]
    fn test_in_memory_record_matches_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("Repo.cs");
        let content = "public class Repo : DbContext { int x = 1000; }";
        fs::write(&file, content).unwrap();
        let ctx = ValidationContext::with_banned(LintConfig::default(), temp.path(), RuleConfig::default());

        let from_disk = validate_file(&file, &ctx).unwrap();
        let in_memory = validate_record(&FileRecord::from_content(&file, content.to_string()), &ctx);
        assert_eq!(from_disk, in_memory);
        assert_eq!(rules_of(&in_memory), vec!["STY-001", "CS-001", "CS-002"]);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let temp = project();
        let out = temp.path().join("generated");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("store.ts"), "Vuex and 12345").unwrap();
        fs::write(out.join("design.md"), "# Design only\n").unwrap();
        fs::write(out.join("data.json"), "{,}").unwrap();
        fs::write(out.join("Svc.cs"), "class Svc : DbContext {}").unwrap();

        let first = validate_path(&out, LintConfig::default(), temp.path()).unwrap();
        for _ in 0..5 {
            let again = validate_path(&out, LintConfig::default(), temp.path()).unwrap();
            assert_eq!(first, again);
            assert_eq!(first.render(), again.render());
        }
        assert!(!first.passed());
        assert_eq!(first.files_checked, 4);
    }
}
