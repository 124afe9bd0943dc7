//! Category & Skill Router: resolves the Analyzer's hint to a category, a
//! skill set, and (optionally) a multi-agent flag. Pure function of its
//! inputs plus the startup-loaded category table; never re-reads the table.

use model_spec_core::{CategoryEntry, CategoryTable};
use thiserror::Error;

use crate::analyzer::AnalyzerResult;
use crate::model::Category;

const DEFAULT_CATEGORY: Category = Category::QuickAnswer;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("category table has no entry for default category {0}")]
    MissingDefaultCategory(String),
}

#[derive(Debug, Clone)]
pub struct RouteDecision {
    pub category: Category,
    pub entry: CategoryEntry,
    pub skills: Vec<String>,
    pub multi_agent: bool,
}

/// Trusts `analyzer_result.category_hint` when the Analyzer resolved one
/// (its own LLM-vs-keyword fallback already folded confidence into that
/// choice), defaulting to `quick_answer` only when the hint is `Unknown`.
pub fn route(analyzer_result: &AnalyzerResult, table: &CategoryTable) -> Result<RouteDecision, RouterError> {
    let category = if analyzer_result.category_hint != Category::Unknown {
        analyzer_result.category_hint
    } else {
        DEFAULT_CATEGORY
    };

    let entry = table
        .get(&category.to_string())
        .cloned()
        .or_else(|| table.get(&DEFAULT_CATEGORY.to_string()).cloned())
        .ok_or_else(|| RouterError::MissingDefaultCategory(DEFAULT_CATEGORY.to_string()))?;

    let skills = analyzer_result.skill_hints.clone();
    let multi_agent = detect_multi_agent(&skills);

    Ok(RouteDecision {
        category,
        entry,
        skills,
        multi_agent,
    })
}

/// Heuristic: distinct skill bundles over disjoint entity groups signal
/// independent objectives worth a parallel dispatch.
fn detect_multi_agent(skills: &[String]) -> bool {
    let mut unique: Vec<&String> = skills.iter().collect();
    unique.dedup();
    unique.len() >= 2
}
