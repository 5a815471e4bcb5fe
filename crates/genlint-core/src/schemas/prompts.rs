//! Prompt registry artifact (`docs/prompts.json`)
//!
//! The registry is written by hand and by generators, so entries are kept
//! untyped. Each reader deserializes only the part it needs.

use super::{constraints::BannedLists, read_artifact};
use crate::diagnostics::LintResult;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Registered prompts, read by the Prompt-Ref check
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromptRegistry {
    /// Expected to be an array of objects with an `id`; anything else holds no ids
    #[serde(default)]
    pub prompts: Value,
}

impl PromptRegistry {
    pub fn load(path: &Path) -> LintResult<Self> {
        read_artifact(path)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.prompts
            .as_array()
            .is_some_and(|entries| {
                entries
                    .iter()
                    .any(|entry| entry.get("id").and_then(Value::as_str) == Some(id))
            })
    }
}

/// The registry's copy of the banned lists, read by the consistency check
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryBannedLists {
    #[serde(default)]
    pub banned_technologies: Option<BannedLists>,
}

impl RegistryBannedLists {
    pub fn load(path: &Path) -> LintResult<Self> {
        read_artifact(path)
    }
}
