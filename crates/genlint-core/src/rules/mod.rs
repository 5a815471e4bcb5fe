//! Validation rules

pub mod banned;
pub mod consistency;
pub mod csharp;
pub mod docs;
pub mod json;
pub mod script;
pub mod style;

use crate::{context::ValidationContext, diagnostics::Finding};
use std::path::Path;

/// Trait for file validators
pub trait Validator {
    fn validate(&self, path: &Path, content: &str, ctx: &ValidationContext) -> Vec<Finding>;
}
