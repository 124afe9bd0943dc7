//! Admin CLI for the orchestrator: run the HTTP surface in-process, or talk
//! to a running one to submit requests, inspect sessions, and tail progress.

mod log_format;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cli::{Identity, OrchestratorClient};
use uuid::Uuid;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
const DEFAULT_ADDR: &str = "127.0.0.1:8080";

#[derive(Parser, Debug)]
#[command(name = "orchestrator")]
#[command(about = "Submit requests to, and operate, the orchestrator")]
struct Args {
    #[command(subcommand)]
    cmd: Command,

    /// Base URL of a running orchestrator (default http://127.0.0.1:8080 or ORCHESTRATOR_URL)
    #[arg(long, value_name = "URL", global = true)]
    url: Option<String>,

    /// Tenant id for requests that need one (or ORCHESTRATOR_TENANT_ID)
    #[arg(long, value_name = "UUID", global = true)]
    tenant_id: Option<Uuid>,

    /// User id for requests that need one; random per invocation if omitted
    #[arg(long, value_name = "UUID", global = true)]
    user_id: Option<Uuid>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP surface (config resolved from the environment)
    Serve(ServeArgs),
    /// Submit one prompt and print the queued execution id
    Submit(SubmitArgs),
    /// Fetch a session's status and execution history
    Session(SessionArgs),
    /// Tail a tenant's progress stream until interrupted
    Events,
    /// Print the orchestrator's readiness probe
    Health,
}

#[derive(clap::Args, Debug)]
struct ServeArgs {
    /// Listen address (default 127.0.0.1:8080)
    #[arg(long, value_name = "ADDR")]
    addr: Option<String>,
    /// Path to the category table TOML (default ORCHESTRATOR_CATEGORY_TABLE or ./categories.toml)
    #[arg(long, value_name = "PATH")]
    category_table: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct SubmitArgs {
    /// Prompt text
    message: String,
    /// Existing session id to continue, if any
    #[arg(long, value_name = "UUID")]
    session_id: Option<Uuid>,
    /// Ingress source label (e.g. "cli", "telegram")
    #[arg(long, default_value = "cli")]
    source: String,
}

#[derive(clap::Args, Debug)]
struct SessionArgs {
    /// Session id to look up
    id: Uuid,
}

fn resolve_base_url(args: &Args) -> String {
    args.url
        .clone()
        .or_else(|| std::env::var("ORCHESTRATOR_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

fn resolve_tenant_id(args: &Args) -> Result<Uuid, Box<dyn std::error::Error>> {
    if let Some(id) = args.tenant_id {
        return Ok(id);
    }
    if let Ok(raw) = std::env::var("ORCHESTRATOR_TENANT_ID") {
        return Ok(Uuid::parse_str(&raw)?);
    }
    Err("a tenant id is required: pass --tenant-id or set ORCHESTRATOR_TENANT_ID".into())
}

fn make_client(args: &Args) -> Result<OrchestratorClient, Box<dyn std::error::Error>> {
    let identity = Identity {
        tenant_id: resolve_tenant_id(args)?,
        user_id: args.user_id,
    };
    Ok(OrchestratorClient::new(resolve_base_url(args), identity))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    orchestrator_config::load_and_apply("orchestrator", None::<&std::path::Path>).ok();
    logging::init()?;

    let args = Args::parse();

    match &args.cmd {
        Command::Serve(serve_args) => run_serve_command(serve_args).await,
        Command::Submit(submit_args) => run_submit(&args, submit_args).await,
        Command::Session(session_args) => run_session(&args, session_args).await,
        Command::Events => run_events(&args).await,
        Command::Health => run_health(&args).await,
    }
}

async fn run_serve_command(serve_args: &ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = orchestrator_core::OrchestratorConfig::from_env()?;

    let table_path = serve_args
        .category_table
        .clone()
        .or_else(|| std::env::var("ORCHESTRATOR_CATEGORY_TABLE").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("categories.toml"));
    let category_table = model_spec_core::CategoryTable::load(&table_path)?;
    let required: Vec<String> = orchestrator_core::model::Category::all().iter().map(|c| c.to_string()).collect();
    let required: Vec<&str> = required.iter().map(String::as_str).collect();
    category_table.validate(&required)?;

    let state = serve::build_state(config, category_table, None).await?;
    serve::run_serve(serve_args.addr.as_deref().or(Some(DEFAULT_ADDR)), state).await?;
    Ok(())
}

async fn run_submit(args: &Args, submit_args: &SubmitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let client = make_client(args)?;
    let response = client
        .submit(submit_args.message.clone(), submit_args.session_id, submit_args.source.clone())
        .await?;
    println!("{}", serde_json::to_string_pretty(&serde_json::json!({
        "execution_id": response.execution_id,
        "session_id": response.session_id,
        "status": response.status,
    }))?);
    Ok(())
}

async fn run_session(args: &Args, session_args: &SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let client = make_client(args)?;
    let response = client.session(session_args.id).await?;
    println!("{}", serde_json::to_string_pretty(&response_to_json(&response))?);
    Ok(())
}

fn response_to_json(response: &cli::SessionResponse) -> serde_json::Value {
    serde_json::json!({
        "session_id": response.session_id,
        "status": response.status,
        "recent_turns": response.recent_turns,
        "executions": response.executions.iter().map(|e| serde_json::json!({
            "id": e.id,
            "category": e.category,
            "status": e.status,
            "started_at_ms": e.started_at_ms,
            "finished_at_ms": e.finished_at_ms,
            "error_kind": e.error_kind,
        })).collect::<Vec<_>>(),
    })
}

async fn run_events(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let client = make_client(args)?;
    client
        .tail_events(|payload| {
            println!("{payload}");
            true
        })
        .await?;
    Ok(())
}

async fn run_health(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let url = format!("{}/health/ready", resolve_base_url(args).trim_end_matches('/'));
    let body: serde_json::Value = reqwest::get(&url).await?.json().await?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
