use clap::Parser;

use crate::build::RepositoryPath;

/// Relay source hosting push webhooks to a build topic
#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Args {
    /// Telemetry URL (disabled as default)
    #[clap(long)]
    pub telemetry_url: Option<String>,

    /// Webhook secret (disabled as default)
    #[clap(long)]
    pub webhook_secret: Option<String>,

    /// Pub/Sub topic, short ID or full path (PUB_SUB_TOPIC as default)
    #[clap(long)]
    pub topic: Option<String>,

    /// Active branches, separated by `___` (all branches as default)
    #[clap(long)]
    pub active_branches: Option<String>,

    /// Google Cloud project used to qualify short topic IDs
    #[clap(long)]
    pub project: Option<String>,

    /// Command
    #[clap(subcommand)]
    pub command: SubCommand,
}

#[derive(Parser, Debug)]
pub enum SubCommand {
    /// Run server
    Serve(ServeCommand),
    /// Publish a build message without a webhook
    Trigger(TriggerCommand),
}

#[derive(Parser, Debug)]
pub struct ServeCommand {
    /// Bind IP (127.0.0.1:3000 as default)
    #[clap(long)]
    pub bind_ip: Option<String>,
}

#[derive(Parser, Debug)]
pub struct TriggerCommand {
    /// Repository full name
    #[clap(long)]
    pub repository: RepositoryPath,

    /// Branch reference (e.g. refs/heads/main)
    #[clap(long)]
    pub branch: String,

    /// Commit hash
    #[clap(long)]
    pub commit: Option<String>,
}
