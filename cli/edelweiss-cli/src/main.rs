//! Edelweiss command-line client
//!
//! Two commands over the client libraries: `authenticate` runs the device
//! authorization flow and prints the resulting tokens, `smoke` exercises
//! the dataset API end to end with an existing bearer token. Logs go to
//! stderr so stdout carries only command output.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "edelweiss", version, about = "Client tools for Edelweiss Data")]
struct Cli {
    /// Base Edelweiss service URL
    #[arg(long, global = true, env = "EDELWEISS_URL")]
    url: Option<String>,

    /// Path to a TOML configuration file
    #[arg(long, global = true, env = "EDELWEISS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate access and refresh tokens
    #[command(visible_alias = "auth")]
    Authenticate {
        /// Request offline access so a refresh token is issued
        #[arg(long)]
        refresh_token: bool,
    },

    /// Exercise the dataset API end to end: create, upload, infer
    /// schema, publish, query, delete
    Smoke {
        /// Bearer token for the dataset API
        #[arg(long, env = "EDELWEISS_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// File to read the bearer token from
        #[arg(long, conflicts_with = "token")]
        token_file: Option<PathBuf>,

        /// Dataset name (defaults to a unique generated name)
        #[arg(long)]
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // LOG_LEVEL / RUST_LOG control verbosity; stderr keeps stdout clean
    // for token and command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::Config::resolve(cli.url.as_deref(), cli.config.as_deref())?;

    match cli.command {
        Command::Authenticate { refresh_token } => {
            commands::authenticate::run(&config, refresh_token).await
        }
        Command::Smoke {
            token,
            token_file,
            name,
        } => commands::smoke::run(&config, token, token_file, name).await,
    }
}
