//! `wallet remote` — Fetch remote configuration values.

use clap::Args;

use wallet_network::{ConfigSource, RemoteConfigClient};

use super::Context;

#[derive(Args, Debug)]
pub struct RemoteArgs {
    /// Override the configured endpoint.
    #[arg(short, long)]
    pub url: Option<String>,

    /// Fetch a single entry.
    #[arg(long)]
    pub id: Option<String>,
}

pub async fn run(ctx: &Context, args: &RemoteArgs) -> anyhow::Result<()> {
    let Some(url) = args.url.as_ref().or(ctx.config.remote.url.as_ref()) else {
        anyhow::bail!("no remote configuration endpoint (set remote.url or pass --url)");
    };
    let client = RemoteConfigClient::new(url, ctx.config.remote_timeout())?;

    if let Some(ref id) = args.id {
        let entry = client.fetch_entry(id).await?;
        println!("{} = {}", entry.id, entry.value);
        return Ok(());
    }

    let config = client.fetch().await?;
    println!("Remote configuration ({}):", client.base_url());
    if config.is_empty() {
        println!("  (no entries)");
    }
    for entry in config.entries() {
        println!("  {:<24} {}", entry.id, entry.value);
    }
    Ok(())
}
