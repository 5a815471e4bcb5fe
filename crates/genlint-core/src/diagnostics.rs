//! Finding types and error reporting

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub type LintResult<T> = Result<T, LintError>;

/// A single rule outcome reported by a validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
    pub file: PathBuf,
    /// 1-based line, 0 when the finding applies to the whole file
    pub line: usize,
    pub rule: String,
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

impl Finding {
    pub fn error(file: PathBuf, line: usize, rule: &str, message: String) -> Self {
        Self {
            severity: Severity::Error,
            message,
            file,
            line,
            rule: rule.to_string(),
            suggestion: None,
        }
    }

    pub fn warning(file: PathBuf, line: usize, rule: &str, message: String) -> Self {
        Self {
            severity: Severity::Warning,
            message,
            file,
            line,
            rule: rule.to_string(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Linter errors that abort a run
#[derive(Error, Debug)]
pub enum LintError {
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a regular file: {path}")]
    FileNotRegular { path: PathBuf },

    #[error("Path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    #[error("Invalid exclude pattern in config: {pattern}")]
    InvalidExclude {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Failed to parse {path}")]
    ArtifactParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
