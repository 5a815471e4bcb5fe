//! Per-run validation context

use crate::{config::LintConfig, schemas::constraints::RuleConfig};
use std::path::{Path, PathBuf};

/// Everything a validator may read besides the file itself.
///
/// Built once at the start of a run and shared by reference, so no validator
/// can observe a banned list that changed mid-run.
#[derive(Debug, Clone)]
pub struct ValidationContext {
    pub config: LintConfig,
    /// Project root the artifact paths are resolved against
    pub root: PathBuf,
    pub banned: RuleConfig,
}

impl ValidationContext {
    /// Read the constraints artifact under `root` and build the context
    pub fn load(config: LintConfig, root: &Path) -> Self {
        let banned = RuleConfig::load(&root.join(&config.artifacts.constraints));
        Self {
            config,
            root: root.to_path_buf(),
            banned,
        }
    }

    /// Build a context with an explicit banned list
    pub fn with_banned(config: LintConfig, root: &Path, banned: RuleConfig) -> Self {
        Self {
            config,
            root: root.to_path_buf(),
            banned,
        }
    }

    pub fn constraints_path(&self) -> PathBuf {
        self.root.join(&self.config.artifacts.constraints)
    }

    pub fn registry_path(&self) -> PathBuf {
        self.root.join(&self.config.artifacts.registry)
    }

    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        self.config.is_rule_enabled(rule_id)
    }
}
