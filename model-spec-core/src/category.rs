//! Category → model/temperature/deadline/cost-class table.
//!
//! Externalized as TOML configuration per the Open Question decision in
//! SPEC_FULL.md §9: the Router loads this once at startup and validates
//! every `Category` variant has an entry, then never reads it again at
//! request time.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One row of the category table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub model: String,
    pub temperature: f32,
    pub cost_class: String,
    pub deadline_secs: u64,
    /// Maximum tool-call rounds an agent in this category may take before
    /// the Agent Runtime forces a final answer.
    pub tool_round_budget: u32,
}

#[derive(Debug, Error)]
pub enum CategoryTableError {
    #[error("reading category table: {0}")]
    Io(String),
    #[error("parsing category table: {0}")]
    Parse(String),
    #[error("category table missing entries for: {0:?}")]
    MissingCategories(Vec<String>),
}

/// The full table, keyed by category name (`Category::to_string()`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryTable {
    #[serde(flatten)]
    entries: HashMap<String, CategoryEntry>,
}

impl CategoryTable {
    pub fn from_toml_str(s: &str) -> Result<Self, CategoryTableError> {
        toml::from_str(s).map_err(|e| CategoryTableError::Parse(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CategoryTableError> {
        let s = std::fs::read_to_string(path).map_err(|e| CategoryTableError::Io(e.to_string()))?;
        Self::from_toml_str(&s)
    }

    pub fn get(&self, category: &str) -> Option<&CategoryEntry> {
        self.entries.get(category)
    }

    /// Validates that every name in `required` has a table entry. Called at
    /// startup with every `Category::all()` variant's display name.
    pub fn validate(&self, required: &[&str]) -> Result<(), CategoryTableError> {
        let missing: Vec<String> = required
            .iter()
            .filter(|c| !self.entries.contains_key(**c))
            .map(|c| c.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CategoryTableError::MissingCategories(missing))
        }
    }
}
