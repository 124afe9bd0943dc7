//! Relational tier for `Session` and `OrchestratorExecution` rows: a
//! separate crate with its own SQLite storage, the durable half of the
//! Session Manager's two-tier (ephemeral + relational) design.
//!
//! - `Session` rows record the conversation thread header (tenant, user,
//!   status, timestamps); the bounded recent-turn window lives in the
//!   ephemeral tier and is not persisted here.
//! - `OrchestratorExecution` rows are the audit record of one request's
//!   full lifecycle, written once at dispatch start and updated at
//!   completion — never mutated by ephemeral-tier writes.

mod store;

pub use store::{SessionStore, StoreError};
