//! Process-wide configuration, resolved once at startup from the environment
//! (after `env_config::load_and_apply` has folded in `.env` / XDG `config.toml`
//! values) with hardcoded defaults for everything optional.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Single typed configuration source for the orchestrator process. Every
/// field here corresponds to one line of required/optional configuration;
/// nothing reads the environment directly outside of `from_env`.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub relational_url: String,
    pub ephemeral_url: Option<String>,
    pub llm_base_url: String,
    pub llm_api_key: String,
    pub default_model: String,

    pub default_deadline: Duration,
    pub session_ttl: Duration,

    pub account_cooldown_base: Duration,
    pub account_cooldown_cap: Duration,
    pub breaker_failure_threshold: u32,
    pub retry_count: u32,
    pub retry_backoff_base: Duration,
    pub retry_backoff_cap: Duration,

    pub event_stream_ttl: Duration,
    pub heartbeat_interval: Duration,

    pub chat_ingress_signing_secret: String,
    pub secret_encryption_key: String,
}

impl OrchestratorConfig {
    /// Reads every field from the process environment. Call
    /// `orchestrator_config::load_and_apply` first so `.env`/XDG values are
    /// already folded into `std::env::var` lookups.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            relational_url: require("ORCHESTRATOR_RELATIONAL_URL")?,
            ephemeral_url: optional("ORCHESTRATOR_EPHEMERAL_URL"),
            llm_base_url: with_default("ORCHESTRATOR_LLM_BASE_URL", "https://api.openai.com/v1"),
            llm_api_key: require("ORCHESTRATOR_LLM_API_KEY")?,
            default_model: with_default("ORCHESTRATOR_DEFAULT_MODEL", "gpt-4o-mini"),

            default_deadline: duration_secs("ORCHESTRATOR_DEFAULT_DEADLINE_SECS", 60)?,
            session_ttl: duration_secs("ORCHESTRATOR_SESSION_TTL_SECS", 3600)?,

            account_cooldown_base: duration_secs("ORCHESTRATOR_ACCOUNT_COOLDOWN_BASE_SECS", 300)?,
            account_cooldown_cap: duration_secs("ORCHESTRATOR_ACCOUNT_COOLDOWN_CAP_SECS", 1800)?,
            breaker_failure_threshold: parse_or("ORCHESTRATOR_BREAKER_FAILURE_THRESHOLD", 5)?,
            retry_count: parse_or("ORCHESTRATOR_RETRY_COUNT", 3)?,
            retry_backoff_base: duration_secs("ORCHESTRATOR_RETRY_BACKOFF_BASE_SECS", 1)?,
            retry_backoff_cap: duration_secs("ORCHESTRATOR_RETRY_BACKOFF_CAP_SECS", 10)?,

            event_stream_ttl: duration_secs("ORCHESTRATOR_EVENT_STREAM_TTL_SECS", 3600)?,
            heartbeat_interval: duration_secs("ORCHESTRATOR_HEARTBEAT_INTERVAL_SECS", 25)?,

            chat_ingress_signing_secret: require("ORCHESTRATOR_CHAT_SIGNING_SECRET")?,
            secret_encryption_key: require("ORCHESTRATOR_SECRET_ENCRYPTION_KEY")?,
        })
    }
}

fn require(key: &'static str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::Missing(key))
}

fn optional(key: &'static str) -> Option<String> {
    std::env::var(key).ok()
}

fn with_default(key: &'static str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_or<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(v) => v.parse().map_err(|_| ConfigError::Invalid { key, value: v }),
        Err(_) => Ok(default),
    }
}

fn duration_secs(key: &'static str, default_secs: u64) -> Result<Duration, ConfigError> {
    parse_or(key, default_secs).map(Duration::from_secs)
}
