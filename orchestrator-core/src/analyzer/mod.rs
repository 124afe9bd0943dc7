//! Request Analyzer: turns a free-form user utterance into a structured
//! routing hint. Fails open — a broken LLM path degrades to a deterministic
//! keyword fallback rather than erroring.

use crate::llm::LlmClient;
use crate::message::Message;
use crate::model::Category;

/// A closed set of coarse-grained intents; unrecognized verbs degrade to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    CreateTask,
    UpdateTask,
    ListTasks,
    Search,
    Chat,
    Other,
}

#[derive(Debug, Clone)]
pub struct AnalyzerResult {
    pub intent: Intent,
    pub entities: Vec<String>,
    pub language: String,
    pub category_hint: Category,
    pub skill_hints: Vec<String>,
    pub confidence: f32,
    pub uncertain: bool,
}

/// The Analyzer never returns `Err`; this variant exists only for the LLM
/// call's own typed failure before the fallback path kicks in.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("llm path failed: {0}")]
    LlmFailed(String),
}

/// Runs the LLM path first (bounded by the caller's deadline on `llm`); on
/// any failure, falls back to the deterministic keyword lexicon with
/// confidence clamped to <= 0.5.
pub async fn analyze(utterance: &str, recent_history: &[Message], llm: &dyn LlmClient) -> AnalyzerResult {
    match analyze_with_llm(utterance, recent_history, llm).await {
        Ok(result) => result,
        Err(_) => analyze_with_keywords(utterance),
    }
}

async fn analyze_with_llm(
    utterance: &str,
    recent_history: &[Message],
    llm: &dyn LlmClient,
) -> Result<AnalyzerResult, AnalyzerError> {
    let mut messages = Vec::with_capacity(recent_history.len() + 2);
    messages.push(Message::System(
        "Classify the user's request. Respond with a single JSON object: \
         {\"intent\":...,\"entities\":[...],\"language\":...,\"category_hint\":...,\"skill_hints\":[...],\"confidence\":0..1}"
            .to_string(),
    ));
    messages.extend_from_slice(recent_history);
    messages.push(Message::User(utterance.to_string()));

    let response = llm
        .invoke(&messages)
        .await
        .map_err(|e| AnalyzerError::LlmFailed(e.to_string()))?;

    let parsed: serde_json::Value = serde_json::from_str(&response.content)
        .map_err(|e| AnalyzerError::LlmFailed(format!("schema violation: {e}")))?;

    let intent = parse_intent(parsed.get("intent").and_then(|v| v.as_str()).unwrap_or("other"));
    let entities = parsed
        .get("entities")
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
        .unwrap_or_default();
    let language = parsed
        .get("language")
        .and_then(|v| v.as_str())
        .unwrap_or("en")
        .to_string();
    let category_hint = parse_category(parsed.get("category_hint").and_then(|v| v.as_str()));
    let skill_hints = parsed
        .get("skill_hints")
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
        .unwrap_or_default();
    let confidence = parsed
        .get("confidence")
        .and_then(|v| v.as_f64())
        .map(|f| f as f32)
        .unwrap_or(0.5)
        .clamp(0.0, 1.0);

    Ok(AnalyzerResult {
        intent,
        entities,
        language,
        category_hint,
        skill_hints,
        uncertain: confidence < 0.5,
        confidence,
    })
}

fn analyze_with_keywords(utterance: &str) -> AnalyzerResult {
    let lower = utterance.to_lowercase();
    let language = detect_language(&lower);

    let intent = if lower.contains("create") || lower.contains("add a task") {
        Intent::CreateTask
    } else if lower.contains("update") || lower.contains("mark") {
        Intent::UpdateTask
    } else if lower.contains("list") || lower.contains("show my tasks") {
        Intent::ListTasks
    } else if lower.contains("search") || lower.contains("find") {
        Intent::Search
    } else if lower.contains("hi") || lower.contains("hello") || lower.contains("thanks") {
        Intent::Chat
    } else {
        Intent::Other
    };

    let category_hint = if lower.contains("architecture") || lower.contains("design a") {
        Category::Research
    } else if lower.contains("code") || lower.contains("bug") || lower.contains("pull request") {
        Category::CodeChange
    } else if lower.contains("write") || lower.contains("draft") || lower.contains("story") {
        Category::CreativeWriting
    } else if lower.contains("schedule") || lower.contains("remind") {
        Category::SchedulingAction
    } else {
        Category::QuickAnswer
    };

    let mut skill_hints = Vec::new();
    if lower.contains("issue") || lower.contains("pull request") || lower.contains("repo") {
        skill_hints.push("vcs".to_string());
    }
    if lower.contains("task") || lower.contains("ticket") {
        skill_hints.push("tool-integration".to_string());
    }
    if lower.contains("browse") || lower.contains("website") {
        skill_hints.push("browser".to_string());
    }

    let entities = utterance
        .split_whitespace()
        .filter(|w| w.chars().next().is_some_and(char::is_uppercase))
        .map(str::to_string)
        .collect();

    AnalyzerResult {
        intent,
        entities,
        language,
        category_hint,
        skill_hints,
        confidence: 0.5,
        uncertain: true,
    }
}

fn detect_language(lower: &str) -> String {
    if lower.contains(" el ") || lower.contains(" la ") || lower.starts_with("hola") {
        "es".to_string()
    } else {
        "en".to_string()
    }
}

fn parse_intent(raw: &str) -> Intent {
    match raw {
        "create_task" => Intent::CreateTask,
        "update_task" => Intent::UpdateTask,
        "list_tasks" => Intent::ListTasks,
        "search" => Intent::Search,
        "chat" => Intent::Chat,
        _ => Intent::Other,
    }
}

fn parse_category(raw: Option<&str>) -> Category {
    match raw {
        Some("research") => Category::Research,
        Some("code_change") => Category::CodeChange,
        Some("scheduling_action") => Category::SchedulingAction,
        Some("creative_writing") => Category::CreativeWriting,
        Some("quick_answer") => Category::QuickAnswer,
        _ => Category::Unknown,
    }
}
