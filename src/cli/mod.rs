//! CLI argument parsing

mod common;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cf::Domain;
use crate::config::{defaults, session};

pub use common::{parse_filter, OutputFormat};

/// Cloud Foundry v2 API client
#[derive(Parser, Debug)]
#[command(name = "cfctl")]
#[command(version)]
#[command(about = "Explore and manage Cloud Foundry v2 resources", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    /// Batch mode: never prompt, no spinners
    #[arg(long, global = true, default_value_t = false)]
    pub batch: bool,

    /// Session file (default: ~/.cfctl/session.json)
    #[arg(long, global = true, env = session::ENV_VAR)]
    pub session_file: Option<PathBuf>,

    /// Proxy URL for all requests
    #[arg(long, global = true, env = defaults::PROXY_ENV_VAR)]
    pub proxy: Option<String>,

    /// Omit table headers
    #[arg(long, global = true, default_value_t = false)]
    pub no_header: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in with a password and save the session
    Login(LoginArgs),

    /// Remove the saved session
    Logout,

    /// List entities of a domain
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show one entity by guid or name
    Get(GetArgs),

    /// Create an entity from a JSON file or inline JSON
    Create(CreateArgs),

    /// Delete an entity by guid or name
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),

    /// Application operations
    App(AppArgs),
}

#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// API endpoint (e.g. https://api.example.com)
    #[arg(short, long, env = defaults::TARGET_ENV_VAR)]
    pub target: Option<String>,

    /// Accept invalid TLS certificates
    #[arg(long, default_value_t = false)]
    pub skip_ssl_validation: bool,

    /// Login name
    #[arg(short, long)]
    pub username: Option<String>,

    /// Password (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Entity domain
    #[arg(value_enum)]
    pub domain: Domain,

    /// Filter as field=value (repeatable)
    #[arg(short, long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct GetArgs {
    /// Entity domain
    #[arg(value_enum)]
    pub domain: Domain,

    /// Guid or name
    pub id: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Entity domain
    #[arg(value_enum)]
    pub domain: Domain,

    /// Path to a JSON file, or an inline JSON object
    pub data: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Entity domain
    #[arg(value_enum)]
    pub domain: Domain,

    /// Guid or name
    pub id: String,

    /// Skip confirmation prompt
    #[arg(short = 'y', long, default_value_t = false)]
    pub yes: bool,
}

#[derive(Parser, Debug)]
pub struct AppArgs {
    /// Operation
    #[arg(value_enum)]
    pub action: AppAction,

    /// Application guid or name
    pub id: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,
}

/// Application operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AppAction {
    /// Environment variables
    Env,
    /// Mapped routes
    Routes,
    /// Instance states
    Instances,
    /// Per-instance usage stats
    Stats,
    /// Start the application
    Start,
    /// Stop the application
    Stop,
}
