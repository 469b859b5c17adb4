//! `wallet genesis` — Materialize a pool's genesis file and list its nodes.

use clap::Args;

use wallet_agent::materialize_pool;

use super::Context;

#[derive(Args, Debug)]
pub struct GenesisArgs {
    /// Pool namespace; defaults to the configured selection.
    #[arg(short, long)]
    pub pool: Option<String>,
}

pub async fn run(ctx: &Context, args: &GenesisArgs) -> anyhow::Result<()> {
    let pool = ctx.pool(args.pool.as_deref())?;
    let genesis = ctx.materializer(ctx.open_store()?);

    let path = materialize_pool(&genesis, &ctx.downloader()?, &pool).await?;
    let nodes = genesis.parse_nodes(&pool.indy_namespace).await;

    println!("Genesis for {}:", pool.indy_namespace);
    println!("  Path:     {}", path.display());
    if let Some(marker) = genesis.marker(&pool.indy_namespace).await? {
        println!("  Written:  {} ({} bytes)", marker.written_at.to_rfc3339(), marker.bytes);
    }
    if nodes.is_empty() {
        println!("  Nodes:    (none usable)");
    } else {
        for node in &nodes {
            println!("  Node:     {}", node);
        }
    }
    Ok(())
}
