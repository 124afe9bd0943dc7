//! Multi-Agent Dispatcher: executes one or more agents against a routed
//! request and returns their raw outcomes for the Result Aggregator.
//!
//! Selection (which agents run, and whether sequentially or in parallel) is
//! data-driven by the caller's `DispatchPlan` — this module never hard-codes
//! agent names.

pub mod runtime;

use std::time::Duration;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::aggregator::AgentOutcome;
use crate::llm::LlmClient;
use crate::tool_source::ToolSource;

pub use runtime::{AgentDefinition, RuntimeError};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("agent runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

/// How the dispatcher orders the agent set: B only starts once A returns
/// (pipeline semantics) versus a concurrent fan-out with shared cancellation.
#[derive(Debug, Clone)]
pub enum DispatchPlan {
    Sequential(Vec<AgentDefinition>),
    Parallel(Vec<AgentDefinition>),
}

#[derive(Debug)]
pub struct DispatchOutcome {
    pub outcomes: Vec<AgentOutcome>,
    pub cancelled: bool,
}

/// Runs `plan` against `llm`/`tool_source`, honoring `deadline` for the
/// whole dispatch and `tool_round_budget` per agent turn. Sequential mode
/// folds each agent's output text into the next agent's session snapshot
/// (pipeline); parallel mode fans out concurrently and shares one
/// cancellation token so a deadline expiry stops every agent's further tool
/// rounds without interrupting in-flight LLM calls.
pub async fn dispatch(
    plan: DispatchPlan,
    llm: &dyn LlmClient,
    tool_source: Option<&dyn ToolSource>,
    session_snapshot: &[String],
    tool_round_budget: u32,
    deadline: Duration,
) -> Result<DispatchOutcome, DispatchError> {
    let cancellation = CancellationToken::new();
    let deadline_guard = cancellation.clone();
    let deadline_task = tokio::spawn(async move {
        tokio::time::sleep(deadline).await;
        deadline_guard.cancel();
    });

    let outcomes = match plan {
        DispatchPlan::Sequential(agents) => {
            run_sequential(&agents, llm, tool_source, session_snapshot, tool_round_budget, deadline, &cancellation)
                .await?
        }
        DispatchPlan::Parallel(agents) => {
            run_parallel(&agents, llm, tool_source, session_snapshot, tool_round_budget, deadline, &cancellation)
                .await?
        }
    };

    deadline_task.abort();
    let cancelled = cancellation.is_cancelled();

    Ok(DispatchOutcome { outcomes, cancelled })
}

async fn run_sequential(
    agents: &[AgentDefinition],
    llm: &dyn LlmClient,
    tool_source: Option<&dyn ToolSource>,
    session_snapshot: &[String],
    tool_round_budget: u32,
    deadline: Duration,
    cancellation: &CancellationToken,
) -> Result<Vec<AgentOutcome>, DispatchError> {
    let mut outcomes = Vec::with_capacity(agents.len());
    let mut carried_snapshot: Vec<String> = session_snapshot.to_vec();

    for agent in agents {
        if cancellation.is_cancelled() {
            break;
        }
        let outcome = runtime::run_agent(
            agent,
            llm,
            tool_source,
            &carried_snapshot,
            tool_round_budget,
            deadline,
            cancellation.clone(),
        )
        .await?;

        if !outcome.failed {
            carried_snapshot.push(outcome.text.clone());
        }
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

async fn run_parallel(
    agents: &[AgentDefinition],
    llm: &dyn LlmClient,
    tool_source: Option<&dyn ToolSource>,
    session_snapshot: &[String],
    tool_round_budget: u32,
    deadline: Duration,
    cancellation: &CancellationToken,
) -> Result<Vec<AgentOutcome>, DispatchError> {
    let futures = agents.iter().map(|agent| {
        runtime::run_agent(
            agent,
            llm,
            tool_source,
            session_snapshot,
            tool_round_budget,
            deadline,
            cancellation.clone(),
        )
    });

    let results = futures::future::join_all(futures).await;
    results.into_iter().collect::<Result<Vec<_>, _>>().map_err(DispatchError::from)
}
