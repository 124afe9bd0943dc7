//! Account-pool-backed `LlmClient`: wraps `ChatOpenAI` so every call goes
//! through `AccountPool::call_with_retry` instead of one fixed credential.
//! Account selection, per-account retry with backoff, and circuit breaking
//! all happen underneath `invoke`; callers see the same trait as any other
//! `LlmClient`.

use async_trait::async_trait;
use std::sync::Arc;

use crate::account_pool::AccountPool;
use crate::error::AgentError;
use crate::message::Message;
use crate::model::TenantId;

use super::openai::ChatOpenAI;
use super::{LlmClient, LlmResponse};

pub struct PooledChatOpenAI {
    pool: Arc<AccountPool>,
    tenant_id: TenantId,
    base_url: String,
    model: String,
    temperature: f32,
}

impl PooledChatOpenAI {
    pub fn new(
        pool: Arc<AccountPool>,
        tenant_id: TenantId,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            pool,
            tenant_id,
            base_url: base_url.into(),
            model: model.into(),
            temperature: 0.2,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
impl LlmClient for PooledChatOpenAI {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let base_url = self.base_url.clone();
        let model = self.model.clone();
        let temperature = self.temperature;
        let messages = messages.to_vec();

        self.pool
            .call_with_retry(self.tenant_id, 1, move |secret| {
                let client = ChatOpenAI::new(base_url.clone(), secret, model.clone()).with_temperature(temperature);
                let messages = messages.clone();
                async move { client.invoke_with_outcome(&messages).await }
            })
            .await
            .map_err(|e| AgentError::Llm(e.to_string()))
    }
}
