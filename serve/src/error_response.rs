//! Maps [`OrchestratorError`] onto the HTTP status codes and JSON body
//! shape used across every handler, per the user-facing behavior column of
//! the error handling design: every response carries a correlation id and a
//! stable `kind` string, distinct from the free-text `error` message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use orchestrator_core::OrchestratorError;

pub struct ApiError(pub OrchestratorError);

impl From<OrchestratorError> for ApiError {
    fn from(e: OrchestratorError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let correlation_id = uuid::Uuid::new_v4().to_string();
        let status = match &self.0 {
            OrchestratorError::Validation(_) => StatusCode::BAD_REQUEST,
            OrchestratorError::Auth => StatusCode::UNAUTHORIZED,
            OrchestratorError::BudgetExhausted => StatusCode::FORBIDDEN,
            OrchestratorError::NoAccountAvailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            OrchestratorError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            OrchestratorError::ProviderTransient(_) => StatusCode::BAD_GATEWAY,
            OrchestratorError::ToolError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            OrchestratorError::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
            OrchestratorError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if matches!(status, StatusCode::INTERNAL_SERVER_ERROR) {
            tracing::error!(correlation_id, error = %self.0, "request failed with an internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.0.to_string(),
            "kind": self.0.kind(),
            "correlation_id": correlation_id,
        }));
        (status, body).into_response()
    }
}
