//! Generic REST resource commands

use super::context::ExecutionContext;
use super::session::Session;
use super::wait::CommandKind;
use crate::domain::waiter::ResourceReference;
use crate::infrastructure::constants::DEFAULT_WAIT_TIMEOUT_SECS;
use crate::infrastructure::http::with_depth;
use crate::shared::error::CloudError;
use clap::Parser;
use serde_json::Value;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
pub struct GetCommand {
    /// Resource path relative to the API URL, or an absolute URL
    pub path: String,

    /// Level of nested objects to expand
    #[arg(long)]
    pub depth: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
pub struct CreateCommand {
    /// Collection path to POST to
    pub path: String,

    /// Request body as JSON, or @file to read it from a file
    #[arg(long, short = 'd')]
    pub data: String,

    /// Wait for the new resource to become available
    #[arg(long, short = 'w')]
    pub wait_for_state: bool,

    /// Wait timeout in seconds
    #[arg(long, short = 't', default_value_t = DEFAULT_WAIT_TIMEOUT_SECS)]
    pub timeout: u64,
}

#[derive(Parser, Debug, Clone)]
pub struct UpdateCommand {
    /// Resource path to update
    pub path: String,

    /// Request body as JSON, or @file to read it from a file
    #[arg(long, short = 'd')]
    pub data: String,

    /// Send a partial update (PATCH) instead of a full replacement (PUT)
    #[arg(long)]
    pub patch: bool,

    /// Wait for the resource to become available again
    #[arg(long, short = 'w')]
    pub wait_for_state: bool,

    /// Wait timeout in seconds
    #[arg(long, short = 't', default_value_t = DEFAULT_WAIT_TIMEOUT_SECS)]
    pub timeout: u64,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// Resource path to delete
    pub path: String,

    /// Wait until the resource no longer exists
    #[arg(long, short = 'w')]
    pub wait_for_deletion: bool,

    /// Wait timeout in seconds
    #[arg(long, short = 't', default_value_t = DEFAULT_WAIT_TIMEOUT_SECS)]
    pub timeout: u64,
}

#[derive(Parser, Debug, Clone)]
pub struct WaitCommand {
    /// Href of the resource to wait on
    pub reference: String,

    /// Wait for the resource to disappear instead of becoming available
    #[arg(long)]
    pub deletion: bool,

    /// Wait timeout in seconds
    #[arg(long, short = 't', default_value_t = DEFAULT_WAIT_TIMEOUT_SECS)]
    pub timeout: u64,
}

impl GetCommand {
    pub async fn execute(&self, session: &Session) -> anyhow::Result<()> {
        let url = with_depth(&session.url_for(&self.path)?, self.depth)?;
        let response = session
            .client
            .get(&url)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to get {}: {}", self.path, e))?;

        session.print(&response.body)?;
        Ok(())
    }
}

impl CreateCommand {
    pub async fn execute(&self, session: &Session, ctx: &mut ExecutionContext) -> anyhow::Result<()> {
        let body = parse_body(&self.data)?;
        let url = session.url_for(&self.path)?;
        let response = session
            .client
            .post(&url, &body)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create resource at {}: {}", self.path, e))?;

        ctx.capture_from(&response.body);
        session.print(&response.body)?;

        finish_wait(session, ctx, CommandKind::Create, self.wait_for_state, self.timeout).await
    }
}

impl UpdateCommand {
    pub async fn execute(&self, session: &Session, ctx: &mut ExecutionContext) -> anyhow::Result<()> {
        let body = parse_body(&self.data)?;
        let url = session.url_for(&self.path)?;
        let result = if self.patch {
            session.client.patch(&url, &body).await
        } else {
            session.client.put(&url, &body).await
        };
        let response =
            result.map_err(|e| anyhow::anyhow!("Failed to update {}: {}", self.path, e))?;

        ctx.capture_from(&response.body);
        session.print(&response.body)?;

        finish_wait(session, ctx, CommandKind::Update, self.wait_for_state, self.timeout).await
    }
}

impl DeleteCommand {
    pub async fn execute(&self, session: &Session, ctx: &mut ExecutionContext) -> anyhow::Result<()> {
        let url = session.url_for(&self.path)?;
        let response = session
            .client
            .delete(&url)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to delete {}: {}", self.path, e))?;

        // The deleted resource is the one to watch, whatever the body says.
        if let Some(reference) = ResourceReference::new(url) {
            ctx.capture(reference);
        }
        session.print(&response.body)?;
        session.note(&format!("Deletion of {} requested", self.path));

        finish_wait(session, ctx, CommandKind::Delete, self.wait_for_deletion, self.timeout).await
    }
}

impl WaitCommand {
    pub async fn execute(&self, session: &Session, ctx: &mut ExecutionContext) -> anyhow::Result<()> {
        let reference = ResourceReference::new(self.reference.as_str())
            .ok_or_else(|| anyhow::anyhow!("reference must not be empty"))?;
        ctx.capture(reference);

        let kind = if self.deletion {
            CommandKind::Delete
        } else {
            CommandKind::Update
        };
        finish_wait(session, ctx, kind, true, self.timeout).await
    }
}

async fn finish_wait(
    session: &Session,
    ctx: &mut ExecutionContext,
    kind: CommandKind,
    requested: bool,
    timeout_secs: u64,
) -> anyhow::Result<()> {
    let outcome = session
        .waiter
        .wait_if_requested(kind, ctx, requested, Duration::from_secs(timeout_secs))
        .await?;
    outcome.into_result(timeout_secs)?;
    Ok(())
}

/// Parse a request body given inline or as `@path`.
pub fn parse_body(raw: &str) -> Result<Value, CloudError> {
    let content = match raw.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            CloudError::InvalidBody(format!("Failed to read {}: {}", path, e))
        })?,
        None => raw.to_string(),
    };
    serde_json::from_str(&content).map_err(|e| CloudError::InvalidBody(e.to_string()))
}
