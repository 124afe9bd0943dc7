//! Runs one chat message through the same analyze -> route -> dispatch ->
//! aggregate pipeline the HTTP surface runs, against the same `AppState`.
//! Chat ingress links against `orchestrator-core` directly rather than
//! calling `serve` over the network, matching a single-process deployment
//! where the bot front end and the orchestrator share one binary's memory.

use std::time::Duration;

use serve::AppState;
use uuid::Uuid;

use orchestrator_core::dispatch::{AgentDefinition, DispatchPlan};
use orchestrator_core::message::Message;
use orchestrator_core::model::{OrchestratorExecution, TenantId};
use orchestrator_core::{aggregate, analyze, dispatch, route};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("session manager: {0}")]
    Session(String),
    #[error("routing: {0}")]
    Route(String),
    #[error("dispatch: {0}")]
    Dispatch(String),
    #[error("no agent produced a usable result")]
    NoResult,
}

pub struct Turn {
    pub session_id: Uuid,
    pub reply: String,
}

/// Synchronous (from the caller's perspective) run: no placeholder-then-edit
/// split, since a chat message handler already owns one round trip. A
/// deployment that wants the placeholder/edit cadence spec.md describes for
/// slow categories can drive this with `tokio::spawn` and poll
/// `GET /api/sessions/{id}` from a second process instead, as the HTTP
/// surface's own `POST /api/orchestrate` does.
pub async fn run_turn(
    state: &AppState,
    tenant_id: TenantId,
    user_id: Uuid,
    existing_session_id: Option<Uuid>,
    prompt: String,
) -> Result<Turn, PipelineError> {
    let mut session = {
        let mut sessions = state.sessions.lock().await;
        sessions
            .get_or_create(tenant_id, user_id, existing_session_id)
            .await
            .map_err(|e| PipelineError::Session(e.to_string()))?
    };

    let recent_turns = {
        let mut sessions = state.sessions.lock().await;
        sessions
            .append_turn(&mut session, prompt.clone())
            .await
            .map_err(|e| PipelineError::Session(e.to_string()))?;
        session.recent_turns.clone()
    };

    let history: Vec<Message> = recent_turns.iter().map(|turn| Message::User(turn.clone())).collect();
    let analyzer_result = analyze(&prompt, &history, state.llm.as_ref()).await;

    let decision = route(&analyzer_result, &state.category_table).map_err(|e| PipelineError::Route(e.to_string()))?;
    let execution = OrchestratorExecution::new(tenant_id, session.id, decision.category);
    let _ = state.store.insert_execution(crate::convert::execution_to_row(&execution)).await;

    let base_prompt = format!(
        "You are handling a {} request for this conversation. Use the tools available to you when helpful.",
        decision.category
    );
    let primary = AgentDefinition {
        name: "primary".to_string(),
        system_prompt: base_prompt,
        declared_skills: decision.skills.clone(),
    };
    let plan = DispatchPlan::Sequential(vec![primary]);

    let outcome = dispatch(
        plan,
        state.llm.as_ref(),
        state.tool_source.as_deref(),
        &recent_turns,
        decision.entry.tool_round_budget,
        Duration::from_secs(decision.entry.deadline_secs),
    )
    .await
    .map_err(|e| PipelineError::Dispatch(e.to_string()))?;

    let result = aggregate(&outcome.outcomes, &decision.skills).ok_or(PipelineError::NoResult)?;

    let status = if outcome.cancelled { "cancelled" } else { "succeeded" };
    let _ = state.store.finish_execution(&execution.id.to_string(), status, None, 0).await;

    Ok(Turn { session_id: session.id, reply: result.primary_text })
}
