//! Tenant identification for the HTTP surface.
//!
//! The core explicitly does not own authentication (spec §6 describes the
//! identity layer as a separate origin); this resolves only which tenant a
//! request claims to be acting for, from a header an upstream identity
//! proxy is expected to set after verifying the caller.

use axum::http::HeaderMap;
use orchestrator_core::model::TenantId;
use uuid::Uuid;

use orchestrator_core::OrchestratorError;

const TENANT_HEADER: &str = "x-tenant-id";
const USER_HEADER: &str = "x-user-id";

pub fn tenant_from_headers(headers: &HeaderMap) -> Result<TenantId, OrchestratorError> {
    let raw = headers
        .get(TENANT_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(OrchestratorError::Auth)?;
    let id = Uuid::parse_str(raw).map_err(|_| OrchestratorError::Auth)?;
    Ok(TenantId(id))
}

/// Falls back to a fresh id when absent; a full identity layer would reject
/// the request instead, but user identity is out of scope here.
pub fn user_from_headers(headers: &HeaderMap) -> Uuid {
    headers
        .get(USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())
        .unwrap_or_else(Uuid::new_v4)
}
