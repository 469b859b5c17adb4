//! Wallet CLI — Operator tooling for the wallet bootstrap pipeline.
//!
//! Subcommands: init, key, genesis, probe, resume, mark, remote, provision.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use commands::Context;
use config::WalletConfig;

/// Wallet — Key custody, ledger genesis and onboarding state for an identity wallet.
#[derive(Parser, Debug)]
#[command(name = "wallet", version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, default_value = "wallet.toml", global = true)]
    config: PathBuf,

    /// Override the data directory.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default configuration file.
    Init(commands::init::InitArgs),
    /// Ensure the wallet key exists and show its fingerprint.
    Key(commands::key::KeyArgs),
    /// Materialize a pool's genesis file and list its nodes.
    Genesis(commands::genesis::GenesisArgs),
    /// Check which nodes of a pool accept connections.
    Probe(commands::probe::ProbeArgs),
    /// Show where the app would resume from stored onboarding state.
    Resume(commands::resume::ResumeArgs),
    /// Record an onboarding milestone.
    Mark(commands::mark::MarkArgs),
    /// Fetch remote configuration values.
    Remote(commands::remote::RemoteArgs),
    /// Show the agent configuration provisioning would use.
    Provision(commands::provision::ProvisionArgs),
}

fn init_tracing(logging: &config::LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    if logging.format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Handle init before reading any existing file
    if let Commands::Init(args) = &cli.command {
        let mut logging = config::LoggingConfig::default();
        if let Some(ref level) = cli.log_level {
            logging.level = level.clone();
        }
        init_tracing(&logging);
        return commands::init::run(&cli.config, args);
    }

    // Load configuration
    let mut config = WalletConfig::load(&cli.config)?;

    // Apply CLI overrides
    if let Some(ref data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir.clone();
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    init_tracing(&config.logging);

    let ctx = Context::new(config);

    match &cli.command {
        Commands::Init(_) => Ok(()),
        Commands::Key(args) => commands::key::run(&ctx, args).await,
        Commands::Genesis(args) => commands::genesis::run(&ctx, args).await,
        Commands::Probe(args) => commands::probe::run(&ctx, args).await,
        Commands::Resume(args) => commands::resume::run(&ctx, args).await,
        Commands::Mark(args) => commands::mark::run(&ctx, args).await,
        Commands::Remote(args) => commands::remote::run(&ctx, args).await,
        Commands::Provision(args) => commands::provision::run(&ctx, args).await,
    }
}
