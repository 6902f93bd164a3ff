use clap::{Parser, Subcommand};
use kcc_cli::cmd;
use kcc_cli::tools::ToolContext;
use kcc_core::config::Config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kcc-mcp",
    about = "Contributor tooling for k8s-config-connector: resource inspection, migration planning, scaffolding and guarded commits",
    version,
    propagate_version = true
)]
struct Cli {
    /// Path to the k8s-config-connector checkout
    #[arg(long, global = true, env = "KCC_REPO_PATH")]
    repo: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run as an MCP stdio server
    Mcp,

    /// Locate the files of a direct-controller resource
    Find { resource: String },

    /// Classify a resource's controller as direct, legacy or unknown
    Detect { resource: String },

    /// Show per-phase migration progress
    Status { resource: String },

    /// Print the seven-phase migration plan
    Plan { resource: String },

    /// Check a commit message against the commit policy without committing
    CheckMessage { message: String },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Mcp => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    // stdout carries JSON-RPC frames, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.repo.as_deref())?;
    tracing::debug!(repo = %config.repo_path.display(), author = %config.author, "configuration loaded");

    match cli.command {
        Commands::Mcp => cmd::mcp::run(&ToolContext::new(config)),
        Commands::Find { resource } => cmd::find::run(&config, &resource, cli.json),
        Commands::Detect { resource } => cmd::detect::run(&config, &resource, cli.json),
        Commands::Status { resource } => cmd::status::run(&config, &resource, cli.json),
        Commands::Plan { resource } => cmd::plan::run(&config, &resource, cli.json),
        Commands::CheckMessage { message } => cmd::check_message::run(&config, &message, cli.json),
    }
}
