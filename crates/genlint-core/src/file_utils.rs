//! File reading for validation

use crate::diagnostics::{LintError, LintResult};
use crate::FileCategory;
use std::fs;
use std::path::{Path, PathBuf};

/// A file read for one validation pass
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub path: PathBuf,
    /// Lowercased extension with its leading dot, empty when there is none
    pub extension: String,
    pub category: FileCategory,
    pub content: String,
}

impl FileRecord {
    /// Read a regular file as text. Invalid UTF-8 is replaced, not rejected.
    ///
    /// Returns `LintError::FileNotRegular` for directories, FIFOs and other
    /// non-regular files, `LintError::FileRead` for I/O errors.
    pub fn read(path: &Path) -> LintResult<Self> {
        let metadata = fs::metadata(path).map_err(|e| LintError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        if !metadata.is_file() {
            return Err(LintError::FileNotRegular {
                path: path.to_path_buf(),
            });
        }

        let bytes = fs::read(path).map_err(|e| LintError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(Self::from_content(
            path,
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    }

    pub fn from_content(path: &Path, content: String) -> Self {
        let extension = extension_of(path);
        Self {
            path: path.to_path_buf(),
            category: crate::category_for_extension(&extension),
            extension,
            content,
        }
    }
}

/// Lowercased extension including the dot (".md"), or "" when absent
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}

/// True when any directory component of `path` equals one of `dirs`
pub fn is_under_any(path: &Path, dirs: &[String]) -> bool {
    path.parent()
        .map(|parent| {
            parent
                .components()
                .filter_map(|c| c.as_os_str().to_str())
                .any(|c| dirs.iter().any(|d| d == c))
        })
        .unwrap_or(false)
}
