//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod edit;
pub mod flag;
pub mod list;
pub mod output;
pub mod post;
pub mod react;
pub mod rm;
pub mod show;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use discuss_core::config::StoreConfig;
use discuss_core::store::CommentStore;
use discuss_core::types::{TenantId, UserId};
use discuss_storage::FileSystemStorage;

/// discuss - threaded comment store for any object, any tenant
#[derive(Debug, Parser)]
#[command(name = "discuss")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage directory (defaults to the per-user data directory)
    #[arg(short, long, global = true, env = "DISCUSS_DIR")]
    pub dir: Option<PathBuf>,

    /// Tenant all commands operate in
    #[arg(short, long, global = true, env = "DISCUSS_TENANT", default_value = "default")]
    pub tenant: String,

    /// User whose comments are hidden for this invocation (repeatable)
    #[arg(long = "blocked", global = true, value_name = "USER")]
    pub blocked: Vec<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Post a root comment or a reply
    Post(post::PostArgs),

    /// Edit a comment's content
    Edit(edit::EditArgs),

    /// Delete a comment and its whole subtree
    Rm(rm::RmArgs),

    /// Show one comment in detail
    Show(show::ShowArgs),

    /// List root comments of an object, or children of a comment
    List(list::ListArgs),

    /// Add or change a reaction on a comment
    React(react::ReactArgs),

    /// Remove an active reaction from a comment
    Unreact(react::UnreactArgs),

    /// Add or change a flag on a comment
    Flag(flag::FlagArgs),

    /// Remove an active flag from a comment
    Unflag(flag::UnflagArgs),
}

/// Shared handles resolved from the global arguments
pub struct StoreContext {
    /// Tenant all commands operate in
    pub tenant: TenantId,
    /// The opened comment store
    pub store: CommentStore,
}

impl StoreContext {
    /// Open storage and the store from the global arguments
    fn open(cli: &Cli) -> anyhow::Result<Self> {
        let storage = match &cli.dir {
            Some(dir) => FileSystemStorage::new(dir)?,
            None => FileSystemStorage::default_location()?,
        };

        let config = load_config(cli.config.as_deref(), storage.base_dir())?;
        let store = CommentStore::open(config, storage)?;

        for name in &cli.blocked {
            store.block_user(&UserId::from_string(name.clone()))?;
        }

        Ok(Self {
            tenant: TenantId::from_string(cli.tenant.clone()),
            store,
        })
    }
}

/// Load the store configuration
///
/// An explicit --config path must exist; otherwise `config.toml` in the
/// storage directory is used when present, and defaults apply when not.
fn load_config(explicit: Option<&std::path::Path>, base_dir: &PathBuf) -> anyhow::Result<StoreConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default_path = base_dir.join("config.toml");
            if !default_path.exists() {
                return Ok(StoreConfig::default());
            }
            default_path
        }
    };

    let content = std::fs::read_to_string(&path)
        .context(format!("Failed to read config file {:?}", path))?;
    let config: StoreConfig =
        toml::from_str(&content).context(format!("Failed to parse config file {:?}", path))?;
    Ok(config)
}

/// Run the CLI application
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    let ctx = StoreContext::open(&cli)?;

    // Dispatch to command handler
    match cli.command {
        Commands::Post(args) => post::execute(&ctx, args),
        Commands::Edit(args) => edit::execute(&ctx, args),
        Commands::Rm(args) => rm::execute(&ctx, args),
        Commands::Show(args) => show::execute(&ctx, args),
        Commands::List(args) => list::execute(&ctx, args),
        Commands::React(args) => react::execute_add(&ctx, args),
        Commands::Unreact(args) => react::execute_remove(&ctx, args),
        Commands::Flag(args) => flag::execute_add(&ctx, args),
        Commands::Unflag(args) => flag::execute_remove(&ctx, args),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Parse a comment id argument
pub fn parse_comment_id(id: &str) -> anyhow::Result<discuss_core::types::CommentId> {
    discuss_core::types::CommentId::from_string(id)
        .map_err(|_| anyhow::anyhow!("Invalid comment ID: {}", id))
}
