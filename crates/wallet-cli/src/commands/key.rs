//! `wallet key` — Ensure the wallet key exists and show its fingerprint.

use clap::Args;

use wallet_storage::SecureKeyStore;

use super::Context;

#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Only report an existing key; never create one.
    #[arg(long)]
    pub no_create: bool,
}

pub async fn run(ctx: &Context, args: &KeyArgs) -> anyhow::Result<()> {
    let keys = SecureKeyStore::new(ctx.open_store()?);

    let key = if args.no_create {
        keys.load().await?
    } else {
        Some(keys.get_or_create_key().await?)
    };

    match key {
        Some(key) => {
            println!("Wallet key:");
            println!("  Fingerprint:  {}", key.fingerprint());
        }
        None => println!("No wallet key stored yet."),
    }
    Ok(())
}
