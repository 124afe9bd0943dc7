//! Telegram front end for the orchestrator: accepts mentions/commands,
//! verifies them via teloxide's bot-token transport, resolves the sender to
//! an internal tenant/user pair, and drives the same pipeline the HTTP
//! surface drives. Long-polling by default (`TELOXIDE_TOKEN` from the
//! environment); a webhook listener is left for a later pass (see
//! DESIGN.md).

mod convert;
mod pipeline;
mod tenant_map;

use std::sync::Arc;

use model_spec_core::CategoryTable;
use orchestrator_core::OrchestratorConfig;
use teloxide::prelude::*;
use tracing_subscriber::EnvFilter;

use tenant_map::TenantMap;

const PLACEHOLDER_TEXT: &str = "Working on it...";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    orchestrator_config::load_and_apply("orchestrator", None::<&std::path::Path>).ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = OrchestratorConfig::from_env()?;
    let table_path = std::env::var("ORCHESTRATOR_CATEGORY_TABLE").unwrap_or_else(|_| "categories.toml".to_string());
    let category_table = CategoryTable::load(&table_path)?;
    let state = serve::build_state(config, category_table, None).await?;

    let tenant_map_path = std::env::var("CHAT_INGRESS_TENANT_MAP_DB").unwrap_or_else(|_| "chat_tenants.db".to_string());
    let tenant_map = Arc::new(TenantMap::new(tenant_map_path)?);

    let bot = Bot::from_env();

    tracing::info!("chat ingress starting long-poll loop");
    teloxide::repl(bot, move |bot: Bot, msg: Message| {
        let state = state.clone();
        let tenant_map = tenant_map.clone();
        async move {
            handle_message(&bot, &msg, &state, &tenant_map).await;
            Ok(())
        }
    })
    .await;

    Ok(())
}

async fn handle_message(bot: &Bot, msg: &Message, state: &serve::AppState, tenant_map: &TenantMap) {
    let Some(text) = msg.text() else {
        return;
    };
    if text.trim().is_empty() {
        return;
    }

    let chat_id = msg.chat.id.0;
    let (tenant_id, user_id) = match tenant_map.resolve(chat_id).await {
        Ok(pair) => pair,
        Err(e) => {
            tracing::warn!(error = %e, "failed to resolve tenant for chat");
            return;
        }
    };

    let placeholder = match bot.send_message(msg.chat.id, PLACEHOLDER_TEXT).await {
        Ok(sent) => sent,
        Err(e) => {
            tracing::warn!(error = %e, "failed to post placeholder message");
            return;
        }
    };

    match pipeline::run_turn(state, tenant_id, user_id, None, text.to_string()).await {
        Ok(turn) => {
            if let Err(e) = bot.edit_message_text(msg.chat.id, placeholder.id, turn.reply).await {
                tracing::warn!(error = %e, "failed to edit placeholder into final reply");
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "pipeline failed for chat message");
            let _ = bot
                .edit_message_text(msg.chat.id, placeholder.id, "Sorry, something went wrong.")
                .await;
        }
    }
}
