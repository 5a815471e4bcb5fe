//! Schema definitions for the companion JSON artifacts

pub mod constraints;
pub mod prompts;

use crate::diagnostics::{LintError, LintResult};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Read and parse a JSON artifact
pub fn read_artifact<T: DeserializeOwned>(path: &Path) -> LintResult<T> {
    let content = std::fs::read_to_string(path).map_err(|e| LintError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| LintError::ArtifactParse {
        path: path.to_path_buf(),
        source: e,
    })
}
