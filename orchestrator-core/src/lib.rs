//! # orchestrator-core
//!
//! Multi-tenant AI task orchestrator: turns one user request into a routed,
//! possibly multi-agent dispatch against pooled provider accounts, aggregates
//! the agents' results, and streams progress back over an at-least-once
//! delivery channel.
//!
//! ## Main modules
//!
//! - [`model`]: data model entities (`Tenant`, `User`, `Session`,
//!   `OrchestratorExecution`, `ProviderAccount`, `ToolConnection`,
//!   `FeatureFlag`, `Budget`).
//! - [`message`]: [`Message`] (System / User / Assistant).
//! - [`state`]: [`ReActState`], [`ToolCall`], [`ToolResult`] for one agent's
//!   Think -> Act -> Observe loop.
//! - [`llm`]: [`LlmClient`] trait, [`MockLlm`], OpenAI-compatible [`ChatOpenAI`].
//! - [`tool_source`]: [`ToolSource`] trait and the four named tool adapters
//!   (`TaskTrackerToolSource`, `NotesToolSource`, `CodeHostToolSource`,
//!   `ChatPosterToolSource`).
//! - [`stream`]: [`MessageChunk`] streaming primitive used by [`LlmClient`].
//! - [`analyzer`]: Request Analyzer — classifies one request into a `Category`.
//! - [`router`]: Category & Skill Router — resolves a category to a model
//!   config and an agent skill bundle.
//! - [`account_pool`]: Account Pool with circuit breaker and retry.
//! - [`dispatch`]: Multi-Agent Dispatcher and Agent Runtime.
//! - [`aggregator`]: Result Aggregator (weighted merge of agent outputs).
//! - [`session`]: Session Manager coordinating the relational and ephemeral
//!   tiers.
//! - [`progress`]: Progress Channel publishing on top of `progress-event`.
//! - [`config`]: [`config::OrchestratorConfig`], the single typed config
//!   source for a running orchestrator process.
//! - [`error`]: [`AgentError`] (single-agent turn) and
//!   [`orchestrator_error::OrchestratorError`] (request-level).

pub mod account_pool;
pub mod aggregator;
pub mod analyzer;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod llm;
pub mod message;
pub mod model;
pub mod orchestrator_error;
pub mod progress;
pub mod router;
pub mod session;
pub mod state;
pub mod stream;
pub mod tool_source;

pub use account_pool::{AccountPool, AccountPoolError, CircuitState};
pub use aggregator::{aggregate, AggregatedResult};
pub use analyzer::{analyze, AnalyzerError};
pub use config::OrchestratorConfig;
pub use dispatch::{dispatch, DispatchError, DispatchOutcome};
pub use error::AgentError;
pub use llm::{ChatOpenAI, LlmClient, LlmResponse, LlmUsage, MockLlm, ToolChoiceMode};
pub use message::Message;
pub use orchestrator_error::OrchestratorError;
pub use progress::ProgressPublisher;
pub use router::{route, RouterError};
pub use session::{SessionManager, SessionManagerError};
pub use state::{ReActState, ToolCall, ToolResult};
pub use stream::{MessageChunk, StreamEvent, StreamMode, StreamWriter};
pub use tool_source::{
    ChatPosterToolSource, CodeHostToolSource, MockToolSource, NotesToolSource,
    TaskTrackerToolSource, ToolCallContent, ToolSource, ToolSourceError, ToolSpec,
};

/// Initializes tracing from `RUST_LOG` so unit tests can print logs with `--nocapture`.
#[cfg(test)]
mod test_logging {
    use std::sync::Once;

    static INIT: Once = Once::new();

    pub fn init() {
        INIT.call_once(|| {
            let filter = tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
            let _ = tracing_subscriber::fmt()
                .with_test_writer()
                .with_env_filter(filter)
                .try_init();
        });
    }
}
