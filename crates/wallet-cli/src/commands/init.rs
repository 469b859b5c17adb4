//! `wallet init` — Write a default configuration file.

use clap::Args;
use std::path::Path;

use crate::config::WalletConfig;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file.
    #[arg(long)]
    pub force: bool,
}

pub fn run(path: &Path, args: &InitArgs) -> anyhow::Result<()> {
    if path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let config = WalletConfig::default();
    config.save(path)?;
    tracing::info!(path = %path.display(), "wrote default config");

    println!("Wrote default configuration to {}", path.display());
    println!("  Data dir:  {}", config.storage.data_dir.display());
    for pool in &config.ledger.pools {
        println!("  Pool:      {}", pool.indy_namespace);
    }
    Ok(())
}
