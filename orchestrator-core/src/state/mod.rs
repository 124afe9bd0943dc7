//! State carried through one agent's Think -> Act -> Observe loop.
//!
//! # Main types
//!
//! - [`ReActState`]: Conversation messages plus per-round `tool_calls` and `tool_results`;
//!   use [`ReActState::last_assistant_reply`] for the final assistant message.
//! - [`ToolCall`]: A single tool invocation from the LLM; consumed by Act to call
//!   [`ToolSource::call_tool`](crate::tool_source::ToolSource::call_tool).
//! - [`ToolResult`]: Result of one tool execution; written by Act, merged in Observe.
//!
//! # Example
//!
//! ```rust
//! use orchestrator_core::{ReActState, Message};
//!
//! let mut state = ReActState::default();
//! state.messages.push(Message::System("You are a helpful assistant.".to_string()));
//! state.messages.push(Message::User("What is 2+2?".to_string()));
//! ```

pub mod react_state;

pub use react_state::{ReActState, ToolCall, ToolResult};
