//! Request-level error type returned across the HTTP surface and written
//! into the terminal `OrchestratorExecution` row. Every variant carries a
//! fixed retry/user-facing behavior per the error handling design.

use thiserror::Error;

use crate::account_pool::AccountPoolError;
use crate::analyzer::AnalyzerError;
use crate::router::RouterError;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("authentication/authorization failed")]
    Auth,

    #[error("budget exhausted for tenant")]
    BudgetExhausted,

    #[error("no account available: {0}")]
    NoAccountAvailable(#[from] AccountPoolError),

    #[error("provider rate limited after retries")]
    RateLimited,

    #[error("provider transient error: {0}")]
    ProviderTransient(String),

    #[error("tool error: {0}")]
    ToolError(String),

    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error("internal error: {0}")]
    Internal(String),
}

impl OrchestratorError {
    /// Typed error kind recorded on the terminal `OrchestratorExecution` row
    /// and included in the `execution_failed` progress event.
    pub fn kind(&self) -> &'static str {
        match self {
            OrchestratorError::Validation(_) => "validation_error",
            OrchestratorError::Auth => "auth_error",
            OrchestratorError::BudgetExhausted => "budget_exhausted",
            OrchestratorError::NoAccountAvailable(_) => "no_account_available",
            OrchestratorError::RateLimited => "rate_limited",
            OrchestratorError::ProviderTransient(_) => "provider_transient",
            OrchestratorError::ToolError(_) => "tool_error",
            OrchestratorError::DeadlineExceeded => "deadline_exceeded",
            OrchestratorError::Internal(_) => "internal_error",
        }
    }

    /// Whether the dispatcher should have already retried this kind
    /// internally before it reached this type (true only for the kind that
    /// is surfaced solely once the Account Pool's own retry budget is spent).
    pub fn was_retried_internally(&self) -> bool {
        matches!(self, OrchestratorError::ProviderTransient(_))
    }
}

impl From<AnalyzerError> for OrchestratorError {
    fn from(e: AnalyzerError) -> Self {
        // The Analyzer itself never returns this to callers (it fails open
        // to the keyword fallback); this conversion exists for callers that
        // invoke its internal LLM path directly for diagnostics.
        OrchestratorError::Internal(e.to_string())
    }
}

impl From<RouterError> for OrchestratorError {
    fn from(e: RouterError) -> Self {
        OrchestratorError::Validation(e.to_string())
    }
}
