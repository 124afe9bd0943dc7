//! `POST /api/orchestrate`: accepts one prompt, persists a queued execution
//! row, and hands the rest of the pipeline to a background task. Progress
//! is delivered over `GET /api/events`, never in this response.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use progress_event::{EnvelopeState, ProgressEventKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use orchestrator_core::dispatch::{AgentDefinition, DispatchPlan};
use orchestrator_core::llm::PooledChatOpenAI;
use orchestrator_core::message::Message;
use orchestrator_core::model::{Category, OrchestratorExecution};
use orchestrator_core::progress::ProgressPublisher;
use orchestrator_core::{aggregate, analyze, dispatch, route, OrchestratorError};

use crate::app::AppState;
use crate::convert::execution_to_row;
use crate::error_response::ApiError;
use crate::tenant::{tenant_from_headers, user_from_headers};

#[derive(Deserialize)]
pub struct OrchestrateRequest {
    pub prompt: String,
    pub session_id: Option<Uuid>,
    pub source: String,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Serialize)]
pub struct OrchestrateResponse {
    pub execution_id: Uuid,
    pub session_id: Uuid,
    pub status: &'static str,
}

pub async fn handle(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<OrchestrateRequest>,
) -> Result<Json<OrchestrateResponse>, ApiError> {
    let tenant_id = tenant_from_headers(&headers)?;
    if body.prompt.trim().is_empty() {
        return Err(OrchestratorError::Validation("prompt must not be empty".to_string()).into());
    }
    if body.source.trim().is_empty() {
        return Err(OrchestratorError::Validation("source must not be empty".to_string()).into());
    }
    let user_id = user_from_headers(&headers);

    let mut session = {
        let mut sessions = state.sessions.lock().await;
        sessions
            .get_or_create(tenant_id, user_id, body.session_id)
            .await
            .map_err(|e| OrchestratorError::Internal(e.to_string()))?
    };

    let execution = OrchestratorExecution::new(tenant_id, session.id, Category::Unknown);
    state
        .store
        .insert_execution(execution_to_row(&execution))
        .await
        .map_err(|e| OrchestratorError::Internal(e.to_string()))?;

    let recent_turns = {
        let mut sessions = state.sessions.lock().await;
        sessions
            .append_turn(&mut session, body.prompt.clone())
            .await
            .map_err(|e| OrchestratorError::Internal(e.to_string()))?;
        session.recent_turns.clone()
    };

    let execution_id = execution.id;
    let session_id = session.id;
    let prompt = body.prompt.clone();
    let background_state = state.clone();
    tokio::spawn(async move {
        run_execution(background_state, tenant_id, session_id, execution_id, prompt, recent_turns).await;
    });

    Ok(Json(OrchestrateResponse {
        execution_id,
        session_id,
        status: "queued",
    }))
}

async fn build_publisher(
    state: &AppState,
    tenant_id: orchestrator_core::model::TenantId,
    session_id: Uuid,
    execution_id: Uuid,
) -> Option<ProgressPublisher> {
    let client = state.redis_client.as_ref()?;
    let conn = client.get_connection_manager().await.ok()?;
    let envelope_state = EnvelopeState::new(tenant_id.to_string(), session_id.to_string(), execution_id.to_string());
    Some(ProgressPublisher::new(conn, envelope_state))
}

async fn publish(publisher: &mut Option<ProgressPublisher>, event: ProgressEventKind) {
    if let Some(publisher) = publisher.as_mut() {
        if let Err(e) = publisher.publish(event).await {
            tracing::warn!(error = %e, "failed to publish progress event");
        }
    }
}

async fn finish(state: &AppState, execution_id: Uuid, status: &str, error_kind: Option<&str>) {
    if let Err(e) = state
        .store
        .finish_execution(&execution_id.to_string(), status, error_kind, 0)
        .await
    {
        tracing::warn!(error = %e, execution_id = %execution_id, "failed to persist terminal execution row");
    }
}

/// Runs analysis, routing, dispatch, and aggregation for one request. This
/// is the single place that writes the terminal execution row and the
/// terminal progress event, matching the propagation rule that every error
/// bubbles up to here regardless of which stage produced it.
async fn run_execution(
    state: Arc<AppState>,
    tenant_id: orchestrator_core::model::TenantId,
    session_id: Uuid,
    execution_id: Uuid,
    prompt: String,
    recent_turns: Vec<String>,
) {
    let mut publisher = build_publisher(&state, tenant_id, session_id, execution_id).await;
    publish(&mut publisher, ProgressEventKind::AnalysisStarted).await;

    let history: Vec<Message> = recent_turns.iter().map(|turn| Message::User(turn.clone())).collect();
    let analyzer_result = analyze(&prompt, &history, state.llm.as_ref()).await;
    publish(
        &mut publisher,
        ProgressEventKind::AnalysisCompleted {
            category: analyzer_result.category_hint.to_string(),
        },
    )
    .await;

    let decision = match route(&analyzer_result, &state.category_table) {
        Ok(decision) => decision,
        Err(e) => {
            finish(&state, execution_id, "failed", Some("validation_error")).await;
            publish(
                &mut publisher,
                ProgressEventKind::ExecutionFailed {
                    error_kind: "validation_error".to_string(),
                    message: e.to_string(),
                },
            )
            .await;
            return;
        }
    };

    let base_prompt = format!(
        "You are handling a {} request for this conversation. Use the tools available to you when helpful.",
        decision.category
    );
    let primary = AgentDefinition {
        name: "primary".to_string(),
        system_prompt: base_prompt.clone(),
        declared_skills: decision.skills.clone(),
    };
    let plan = if decision.multi_agent {
        let secondary = AgentDefinition {
            name: "secondary".to_string(),
            system_prompt: base_prompt,
            declared_skills: decision.skills.clone(),
        };
        DispatchPlan::Parallel(vec![primary, secondary])
    } else {
        DispatchPlan::Sequential(vec![primary])
    };

    publish(
        &mut publisher,
        ProgressEventKind::AgentStarted {
            agent_name: "primary".to_string(),
        },
    )
    .await;

    let pooled_llm = PooledChatOpenAI::new(
        state.account_pool.clone(),
        tenant_id,
        state.config.llm_base_url.clone(),
        state.config.default_model.clone(),
    );

    let outcome = dispatch(
        plan,
        &pooled_llm,
        state.tool_source.as_deref(),
        &recent_turns,
        decision.entry.tool_round_budget,
        Duration::from_secs(decision.entry.deadline_secs),
    )
    .await;

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => {
            finish(&state, execution_id, "failed", Some("internal_error")).await;
            publish(
                &mut publisher,
                ProgressEventKind::ExecutionFailed {
                    error_kind: "internal_error".to_string(),
                    message: e.to_string(),
                },
            )
            .await;
            return;
        }
    };

    for agent_outcome in &outcome.outcomes {
        if agent_outcome.failed {
            publish(
                &mut publisher,
                ProgressEventKind::AgentFailed {
                    agent_name: agent_outcome.agent_name.clone(),
                    error: agent_outcome.text.clone(),
                },
            )
            .await;
        } else {
            publish(
                &mut publisher,
                ProgressEventKind::AgentFinished {
                    agent_name: agent_outcome.agent_name.clone(),
                },
            )
            .await;
        }
    }

    match aggregate(&outcome.outcomes, &decision.skills) {
        Some(result) => {
            publish(
                &mut publisher,
                ProgressEventKind::AggregationCompleted {
                    summary: result.primary_text,
                },
            )
            .await;
            let status = if outcome.cancelled { "cancelled" } else { "succeeded" };
            finish(&state, execution_id, status, None).await;
        }
        None => {
            let error_kind = if outcome.cancelled { "deadline_exceeded" } else { "internal_error" };
            finish(&state, execution_id, "failed", Some(error_kind)).await;
            publish(
                &mut publisher,
                ProgressEventKind::ExecutionFailed {
                    error_kind: error_kind.to_string(),
                    message: "no agent produced a usable result".to_string(),
                },
            )
            .await;
        }
    }
}
