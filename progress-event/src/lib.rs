//! Progress event protocol: the wire shape of one `ProgressEvent` plus
//! envelope injection (tenant_id, session_id, execution_id, sequence).
//!
//! This crate has no dependency on `orchestrator-core`; the orchestrator
//! bridges its internal lifecycle into `ProgressEventKind` and calls
//! [`envelope::to_json`] before publishing to the ephemeral tier.

pub mod envelope;
pub mod event;

pub use envelope::{to_json, Envelope, EnvelopeState};
pub use event::ProgressEventKind;
