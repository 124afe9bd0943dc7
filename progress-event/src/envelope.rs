//! Envelope (tenant_id, session_id, execution_id, sequence) wrapping one
//! `ProgressEventKind`. `EnvelopeState` tracks the next sequence number for a
//! tenant so the Progress Channel can replay from a `Last-Event-Id` with
//! at-least-once, monotonically-increasing delivery.

use crate::event::ProgressEventKind;
use serde_json::Value;

/// Envelope fields applied to every progress event on the wire.
#[derive(Clone, Debug, Default)]
pub struct Envelope {
    pub tenant_id: Option<String>,
    pub session_id: Option<String>,
    pub execution_id: Option<String>,
    /// Per-tenant sequence number; monotonically increasing, used as the
    /// SSE `id:` field for `Last-Event-Id` replay.
    pub sequence: Option<u64>,
}

impl Envelope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tenant_id(mut self, id: impl Into<String>) -> Self {
        self.tenant_id = Some(id.into());
        self
    }

    pub fn with_session_id(mut self, id: impl Into<String>) -> Self {
        self.session_id = Some(id.into());
        self
    }

    pub fn with_execution_id(mut self, id: impl Into<String>) -> Self {
        self.execution_id = Some(id.into());
        self
    }

    pub fn with_sequence(mut self, seq: u64) -> Self {
        self.sequence = Some(seq);
        self
    }

    /// Merges envelope fields into the given JSON object (top-level only).
    /// Does not overwrite existing keys.
    pub fn inject_into(&self, obj: &mut Value) {
        let Some(obj) = obj.as_object_mut() else {
            return;
        };
        if let Some(ref id) = self.tenant_id {
            obj.entry("tenant_id")
                .or_insert_with(|| Value::String(id.clone()));
        }
        if let Some(ref id) = self.session_id {
            obj.entry("session_id")
                .or_insert_with(|| Value::String(id.clone()));
        }
        if let Some(ref id) = self.execution_id {
            obj.entry("execution_id")
                .or_insert_with(|| Value::String(id.clone()));
        }
        if let Some(seq) = self.sequence {
            obj.entry("sequence")
                .or_insert_with(|| Value::Number(serde_json::Number::from(seq)));
        }
    }
}

/// Per-tenant sequence counter for one execution's progress stream.
pub struct EnvelopeState {
    pub tenant_id: String,
    pub session_id: String,
    pub execution_id: String,
    pub next_sequence: u64,
}

impl EnvelopeState {
    pub fn new(tenant_id: String, session_id: String, execution_id: String) -> Self {
        Self {
            tenant_id,
            session_id,
            execution_id,
            next_sequence: 1,
        }
    }

    /// Resumes a counter from the last sequence number already delivered
    /// (e.g. from a client's `Last-Event-Id` header).
    pub fn resume_after(
        tenant_id: String,
        session_id: String,
        execution_id: String,
        last_sequence: u64,
    ) -> Self {
        Self {
            tenant_id,
            session_id,
            execution_id,
            next_sequence: last_sequence + 1,
        }
    }

    /// Injects envelope into the event value and advances the sequence.
    pub fn inject_into(&mut self, value: &mut Value) {
        let env = Envelope::new()
            .with_tenant_id(&self.tenant_id)
            .with_session_id(&self.session_id)
            .with_execution_id(&self.execution_id)
            .with_sequence(self.next_sequence);
        self.next_sequence += 1;
        env.inject_into(value);
    }
}

/// Converts a progress event to JSON and injects envelope using the given state.
pub fn to_json(
    event: &ProgressEventKind,
    state: &mut EnvelopeState,
) -> Result<Value, serde_json::Error> {
    let mut value = event.to_value()?;
    state.inject_into(&mut value);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_inject_does_not_overwrite_existing_keys() {
        let mut obj = serde_json::json!({"type":"agent_started","agent_name":"writer","tenant_id":"keep-me"});
        let env = Envelope::new()
            .with_tenant_id("t1")
            .with_session_id("s1")
            .with_sequence(3);
        env.inject_into(&mut obj);
        assert_eq!(obj["tenant_id"], "keep-me");
        assert_eq!(obj["session_id"], "s1");
        assert_eq!(obj["sequence"], 3);
    }

    #[test]
    fn to_json_injects_envelope_and_advances_sequence() {
        let ev = ProgressEventKind::AgentStarted {
            agent_name: "writer".to_string(),
        };
        let mut state = EnvelopeState::new("t1".to_string(), "s1".to_string(), "e1".to_string());
        let value = to_json(&ev, &mut state).unwrap();
        assert_eq!(value["type"], "agent_started");
        assert_eq!(value["sequence"], 1);
        assert_eq!(state.next_sequence, 2);

        let value2 = to_json(&ev, &mut state).unwrap();
        assert_eq!(value2["sequence"], 2);
    }

    #[test]
    fn resume_after_continues_from_last_delivered_sequence() {
        let mut state =
            EnvelopeState::resume_after("t1".to_string(), "s1".to_string(), "e1".to_string(), 7);
        assert_eq!(state.next_sequence, 8);
        let ev = ProgressEventKind::AgentFinished {
            agent_name: "writer".to_string(),
        };
        let value = to_json(&ev, &mut state).unwrap();
        assert_eq!(value["sequence"], 8);
    }
}
