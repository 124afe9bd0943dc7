//! Code-host tool adapter: search and create issues against a hosted Git
//! forge, behind a `ToolConnectionKind::CodeHost` connection.
//!
//! Grounded on the teacher's planned `loom-workspace/gh` crate, which pinned
//! `octocrab` for this exact responsibility but carried no surviving source;
//! rebuilt here against that crate's API (see DESIGN.md).

use async_trait::async_trait;
use octocrab::Octocrab;
use serde_json::Value;

use crate::model::ToolConnection;

use super::{ToolCallContent, ToolSource, ToolSourceError, ToolSpec};

pub const TOOL_SEARCH_ISSUES: &str = "code_host_search_issues";
pub const TOOL_CREATE_ISSUE: &str = "code_host_create_issue";

pub struct CodeHostToolSource {
    connection: ToolConnection,
}

impl CodeHostToolSource {
    pub fn new(connection: ToolConnection) -> Self {
        Self { connection }
    }

    fn client(&self) -> Result<Octocrab, ToolSourceError> {
        Octocrab::builder()
            .personal_token(self.connection.encrypted_secret.clone())
            .build()
            .map_err(|e| ToolSourceError::Transport(e.to_string()))
    }

    fn split_repo<'a>(&self, full_name: &'a str) -> Result<(&'a str, &'a str), ToolSourceError> {
        full_name
            .split_once('/')
            .ok_or_else(|| ToolSourceError::InvalidInput("repo must be \"owner/name\"".into()))
    }
}

#[async_trait]
impl ToolSource for CodeHostToolSource {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, ToolSourceError> {
        Ok(vec![
            ToolSpec {
                name: TOOL_SEARCH_ISSUES.to_string(),
                description: Some("Search issues on a repository".to_string()),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "repo": { "type": "string", "description": "owner/name" },
                        "query": { "type": "string" },
                    },
                    "required": ["repo", "query"],
                }),
            },
            ToolSpec {
                name: TOOL_CREATE_ISSUE.to_string(),
                description: Some("Create an issue on a repository".to_string()),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "repo": { "type": "string", "description": "owner/name" },
                        "title": { "type": "string" },
                        "body": { "type": "string" },
                    },
                    "required": ["repo", "title"],
                }),
            },
        ])
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<ToolCallContent, ToolSourceError> {
        if !self.connection.enabled {
            return Err(ToolSourceError::CredentialInvalid(
                self.connection.id.to_string(),
            ));
        }
        let repo = arguments
            .get("repo")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolSourceError::InvalidInput("missing repo".into()))?;
        let (owner, name_part) = self.split_repo(repo)?;
        let octo = self.client()?;

        match name {
            TOOL_SEARCH_ISSUES => {
                let query = arguments
                    .get("query")
                    .and_then(Value::as_str)
                    .ok_or_else(|| ToolSourceError::InvalidInput("missing query".into()))?;
                let q = format!("{query} repo:{owner}/{name_part} type:issue");
                let page = octo
                    .search()
                    .issues_and_pull_requests(&q)
                    .send()
                    .await
                    .map_err(|e| ToolSourceError::Transport(e.to_string()))?;
                let titles: Vec<String> = page.items.iter().map(|i| i.title.clone()).collect();
                Ok(ToolCallContent {
                    text: serde_json::to_string(&titles).unwrap_or_default(),
                })
            }
            TOOL_CREATE_ISSUE => {
                let title = arguments
                    .get("title")
                    .and_then(Value::as_str)
                    .ok_or_else(|| ToolSourceError::InvalidInput("missing title".into()))?;
                let body = arguments.get("body").and_then(Value::as_str);
                let mut builder = octo.issues(owner, name_part).create(title);
                if let Some(body) = body {
                    builder = builder.body(body);
                }
                let issue = builder
                    .send()
                    .await
                    .map_err(|e| ToolSourceError::Transport(e.to_string()))?;
                Ok(ToolCallContent {
                    text: format!("created issue #{}", issue.number),
                })
            }
            other => Err(ToolSourceError::NotFound(other.to_string())),
        }
    }

    async fn preflight(&self) -> Result<(), ToolSourceError> {
        if !self.connection.enabled || self.connection.encrypted_secret.is_empty() {
            return Err(ToolSourceError::CredentialInvalid(
                self.connection.id.to_string(),
            ));
        }
        Ok(())
    }
}
