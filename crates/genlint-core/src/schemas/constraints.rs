//! Technology constraints artifact (`.ai-constraints.json`)

use super::read_artifact;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Banned technology lists as they appear in both artifacts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannedLists {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<Vec<String>>,
}

/// `.ai-constraints.json` schema, only the parts the linter reads
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintsFile {
    #[serde(default)]
    pub technology_stack: Option<TechnologyStack>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechnologyStack {
    #[serde(default)]
    pub banned: Option<BannedLists>,
}

impl ConstraintsFile {
    pub fn banned(&self) -> Option<&BannedLists> {
        self.technology_stack.as_ref()?.banned.as_ref()
    }
}

/// Banned terms in effect for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleConfig {
    pub frontend: Vec<String>,
    pub backend: Vec<String>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            frontend: [
                "Vuex",
                "jQuery",
                "Bootstrap",
                "Element UI",
                "Vuetify",
                "@vue/composition-api",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            backend: ["EntityFramework", "Dapper", "NHibernate"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl RuleConfig {
    /// Overlay declared lists on the defaults. A missing category keeps its default.
    pub fn from_banned(banned: &BannedLists) -> Self {
        let defaults = Self::default();
        Self {
            frontend: banned.frontend.clone().unwrap_or(defaults.frontend),
            backend: banned.backend.clone().unwrap_or(defaults.backend),
        }
    }

    /// Load the banned terms from the constraints artifact, falling back to the
    /// built-in lists when it is absent or malformed.
    pub fn load(path: &Path) -> Self {
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no constraints artifact, using default banned list");
            return Self::default();
        }

        match read_artifact::<ConstraintsFile>(path) {
            Ok(file) => file.banned().map(Self::from_banned).unwrap_or_default(),
            Err(e) => {
                tracing::debug!(path = %path.display(), "unusable constraints artifact ({e}), using default banned list");
                Self::default()
            }
        }
    }

    /// Backend terms first, then frontend
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.backend
            .iter()
            .chain(self.frontend.iter())
            .map(String::as_str)
    }
}
