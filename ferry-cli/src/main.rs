//! Ferry - migrate Gitea issues between repositories
//!
//! `ferry export` pulls every issue of a repository (with comments,
//! reactions, dependencies, and optionally attachments) into a single JSON
//! archive; `ferry import` replays such an archive against another
//! repository.

mod commands;

use clap::{Parser, Subcommand};
use ferry_core::{Config, Secrets};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{ExportArgs, ImportArgs};

/// Ferry: Gitea issue export and import
#[derive(Parser, Debug)]
#[command(name = "ferry")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Base URL of the Gitea instance (overrides config)
    #[arg(long, global = true, env = "GITEA_URL")]
    url: Option<String>,

    /// Repository owner (overrides config)
    #[arg(long, global = true, env = "OWNER")]
    owner: Option<String>,

    /// Repository name (overrides config)
    #[arg(long, global = true, env = "REPO")]
    repo: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export all issues of a repository to a JSON archive
    #[command(visible_alias = "e")]
    Export(ExportArgs),

    /// Import a JSON archive into a repository
    #[command(visible_alias = "i")]
    Import(ImportArgs),

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    // Load configuration with overrides
    let config =
        Config::load_with_overrides(cli.url.clone(), cli.owner.clone(), cli.repo.clone())?;

    match cli.command {
        Commands::Export(args) => {
            let config = config.validate()?;
            args.execute(&config).await?;
        }
        Commands::Import(args) => {
            let config = config.validate()?;
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Ferry Configuration");
            println!("===================");
            println!();
            println!("Gitea:");
            println!("  url:   {}", or_unset(&config.gitea.url));
            println!("  owner: {}", or_unset(&config.gitea.owner));
            println!("  repo:  {}", or_unset(&config.gitea.repo));
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
            let token = Secrets::load()?.gitea_token();
            println!(
                "Token: {}",
                if token.is_some() { "(set)" } else { "(not set)" }
            );
        }
    }

    Ok(())
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() {
        "(not set)"
    } else {
        value
    }
}

/// Load the API token, with a pointer to the template on failure
pub(crate) fn load_token() -> anyhow::Result<String> {
    let secrets = Secrets::load()?;
    secrets.gitea_token().ok_or_else(|| {
        anyhow::anyhow!(
            "Gitea token not found. Set the TOKEN environment variable \
             or add it to ~/.config/ferry/secrets.toml"
        )
    })
}
