// CLI command definitions

use super::context::ExecutionContext;
use super::display::OutputFormat;
use super::resource::{CreateCommand, DeleteCommand, GetCommand, UpdateCommand, WaitCommand};
use super::session::Session;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "cloudctl",
    version,
    about = "Command-line client for the cloud control plane",
    long_about = "Issues REST calls against the cloud API and optionally waits for asynchronous operations to finish"
)]
pub struct CliArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args, Debug, Clone)]
pub struct GlobalArgs {
    /// API base URL (overrides CLOUDCTL_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Bearer token (overrides CLOUDCTL_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Username for basic auth (overrides CLOUDCTL_USERNAME)
    #[arg(long, short = 'u', global = true)]
    pub username: Option<String>,

    /// Password for basic auth (overrides CLOUDCTL_PASSWORD)
    #[arg(long, short = 'p', global = true)]
    pub password: Option<String>,

    /// Path to config file (TOML)
    /// If not specified, uses CLOUDCTL_CONFIG or ~/.config/cloudctl/config.toml
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Suppress progress and informational output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Fetch a resource or collection
    Get(GetCommand),

    /// Create a resource (POST)
    Create(CreateCommand),

    /// Update a resource (PUT, or PATCH with --patch)
    Update(UpdateCommand),

    /// Delete a resource
    Delete(DeleteCommand),

    /// Wait for an existing resource to settle
    Wait(WaitCommand),
}

impl Commands {
    /// Run one command invocation. The context is cleared first so nothing
    /// captured by an earlier invocation can leak into this one's wait.
    pub async fn execute(&self, session: &Session, ctx: &mut ExecutionContext) -> anyhow::Result<()> {
        ctx.reset();
        match self {
            Commands::Get(cmd) => cmd.execute(session).await,
            Commands::Create(cmd) => cmd.execute(session, ctx).await,
            Commands::Update(cmd) => cmd.execute(session, ctx).await,
            Commands::Delete(cmd) => cmd.execute(session, ctx).await,
            Commands::Wait(cmd) => cmd.execute(session, ctx).await,
        }
    }
}
