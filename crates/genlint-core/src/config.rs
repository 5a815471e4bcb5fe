//! Linter configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the project root
pub const CONFIG_FILE_NAME: &str = ".genlint.toml";

/// Configuration for the linter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintConfig {
    /// Paths to exclude, relative to the validated directory
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Rules to enable/disable
    #[serde(default)]
    pub rules: RuleToggles,

    /// Locations of the companion artifacts, relative to the project root
    #[serde(default)]
    pub artifacts: ArtifactPaths,

    /// Which documents must carry provenance sections
    #[serde(default)]
    pub docs: DocsPolicy,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            exclude: default_exclude(),
            rules: RuleToggles::default(),
            artifacts: ArtifactPaths::default(),
            docs: DocsPolicy::default(),
        }
    }
}

fn default_exclude() -> Vec<String> {
    vec![
        "**/node_modules/**".to_string(),
        "**/.git/**".to_string(),
        "**/target/**".to_string(),
    ]
}

/// Helper function for serde default
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleToggles {
    /// Banned technology scan (BAN-*)
    #[serde(default = "default_true")]
    pub banned: bool,

    /// Naming heuristic (STY-*)
    #[serde(default = "default_true")]
    pub style: bool,

    /// TypeScript and Vue checks (TS-*)
    #[serde(default = "default_true")]
    pub script: bool,

    /// C# checks (CS-*)
    #[serde(default = "default_true")]
    pub csharp: bool,

    /// Documentation structure and provenance (DOC-*)
    #[serde(default = "default_true")]
    pub docs: bool,

    /// JSON syntax (JSON-*)
    #[serde(default = "default_true")]
    pub json: bool,

    /// Banned list consistency between artifacts (XREF-*)
    #[serde(default = "default_true")]
    pub consistency: bool,

    /// Explicitly disabled rules by ID (e.g., ["STY-001", "DOC-007"])
    #[serde(default)]
    pub disabled_rules: Vec<String>,
}

impl Default for RuleToggles {
    fn default() -> Self {
        Self {
            banned: true,
            style: true,
            script: true,
            csharp: true,
            docs: true,
            json: true,
            consistency: true,
            disabled_rules: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactPaths {
    /// Technology constraints file declaring `technologyStack.banned`
    pub constraints: PathBuf,
    /// Prompt registry declaring `prompts[].id` and `banned_technologies`
    pub registry: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            constraints: PathBuf::from(".ai-constraints.json"),
            registry: PathBuf::from("docs/prompts.json"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsPolicy {
    /// Document file names that skip the provenance sections
    pub whitelist: Vec<String>,
    /// Directories whose documents skip the provenance sections
    pub exempt_dirs: Vec<String>,
    /// Directories whose files are prose, never scanned for banned terms
    pub doc_dirs: Vec<String>,
}

impl Default for DocsPolicy {
    fn default() -> Self {
        Self {
            whitelist: [
                "智能体提示词.md",
                "architecture.md",
                "design-constraints.md",
                "README.md",
                "task-tracking.md",
                "user-management-example.md",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            exempt_dirs: vec![".trae".to_string()],
            doc_dirs: vec!["docs".to_string(), ".trae".to_string()],
        }
    }
}

impl LintConfig {
    /// Load config from file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Check if a specific rule is enabled based on config
    ///
    /// A rule is enabled if it's not in the disabled_rules list and its
    /// category switch is on.
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        if self.rules.disabled_rules.iter().any(|r| r == rule_id) {
            return false;
        }

        self.is_category_enabled(rule_id)
    }

    fn is_category_enabled(&self, rule_id: &str) -> bool {
        match rule_id {
            s if s.starts_with("BAN-") => self.rules.banned,
            s if s.starts_with("STY-") => self.rules.style,
            s if s.starts_with("TS-") => self.rules.script,
            s if s.starts_with("CS-") => self.rules.csharp,
            s if s.starts_with("DOC-") => self.rules.docs,
            s if s.starts_with("JSON-") => self.rules.json,
            s if s.starts_with("XREF-") => self.rules.consistency,
            // FILE-* and unknown rules are always on
            _ => true,
        }
    }
}
