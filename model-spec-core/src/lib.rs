//! Shared model/provider spec types for the orchestrator.
//!
//! [`spec::ModelSpec`] describes one model's token limits, carried over from
//! the teacher's context-compression use case. [`category::CategoryTable`]
//! is new: the Router's category → model/temperature/deadline/cost-class
//! table, loaded once from TOML at startup per the Design Notes
//! "Configuration" guidance (never re-read at request time).

pub mod category;
pub mod spec;

pub use category::{CategoryEntry, CategoryTable, CategoryTableError};
pub use spec::ModelSpec;
