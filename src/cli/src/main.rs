//! Idea Box CLI - command-line client for the staff idea box.
//!
//! Provides idea browsing and moderation, user administration with role and
//! permission reconciliation, organisation records, and CLI configuration.

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use ideabox_core::config::Config;
use ideabox_core::session::Session;
use ideabox_core::telemetry;

use commands::config::{self, API_URL_KEY, TOKEN_KEY};
use commands::org::{OrgCommands, OrgKind};
use commands::{access, ideas, users};
use output::OutputFormat;

/// Idea Box - staff idea box client
#[derive(Parser)]
#[command(
    name = "ideabox",
    version = "0.1.0",
    about = "Idea Box - staff idea box client",
    long_about = "CLI tool for browsing and moderating ideas and administering users, roles, departments and categories.",
    propagate_version = true
)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "table")]
    output: OutputFormat,

    /// API base URL
    #[arg(long, global = true, env = "IDEABOX_API_URL")]
    api_url: Option<String>,

    /// Bearer token
    #[arg(long, global = true, env = "IDEABOX_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse, submit and moderate ideas
    #[command(subcommand)]
    Ideas(ideas::IdeaCommands),

    /// User administration
    #[command(subcommand)]
    Users(users::UserCommands),

    /// List roles and the permissions they grant
    Roles,

    /// List permissions and the roles granting them
    Permissions,

    /// Department administration
    #[command(subcommand)]
    Departments(OrgCommands),

    /// Category administration
    #[command(subcommand)]
    Categories(OrgCommands),

    /// Configuration management
    #[command(subcommand)]
    Config(config::ConfigCommands),
}

fn log_level(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Build the client configuration: environment first, then the CLI config
/// file, then command-line flags.
fn client_config(cli: &Cli, settings: &config::CliConfig) -> Result<(Config, Option<String>)> {
    let mut cfg = Config::load().context("Failed to load client configuration")?;

    if let Some(url) = cli.api_url.as_deref().or_else(|| settings.get(API_URL_KEY)) {
        cfg.api.base_url = url.to_string();
    }

    let token = cli
        .token
        .clone()
        .or_else(|| settings.get(TOKEN_KEY).map(str::to_string))
        .or_else(|| cfg.api.token.clone());

    if let Some(level) = log_level(cli.verbose) {
        cfg.logging = cfg.logging.with_level(level);
    }
    Ok((cfg, token))
}

async fn run(cli: Cli) -> Result<()> {
    let format = cli.output;
    let settings = config::load_config()?;
    let (cfg, token) = client_config(&cli, &settings)?;
    telemetry::init_logging(&cfg.logging)?;

    let command = match cli.command {
        Commands::Config(cmd) => return config::execute(cmd, format).await,
        other => other,
    };

    let token = token.context(
        "No API token configured; pass --token, set IDEABOX_TOKEN or run `ideabox config set token <TOKEN>`",
    )?;
    let session = Session::open(cfg, token)?;

    let result = match command {
        Commands::Ideas(cmd) => ideas::execute(cmd, &session, format).await,
        Commands::Users(cmd) => users::execute(cmd, &session, format).await,
        Commands::Roles => access::roles(&session, format).await,
        Commands::Permissions => access::permissions(&session, format).await,
        Commands::Departments(cmd) => {
            commands::org::execute(OrgKind::Department, cmd, &session, format).await
        }
        Commands::Categories(cmd) => {
            commands::org::execute(OrgKind::Category, cmd, &session, format).await
        }
        Commands::Config(_) => Ok(()),
    };

    session.close();
    result
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = run(cli).await {
        output::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
