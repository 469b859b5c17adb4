//! `wallet probe` — Check which nodes of a pool accept connections.

use clap::Args;
use std::time::Duration;

use wallet_agent::materialize_pool;
use wallet_network::LedgerReachabilityProbe;

use super::Context;

#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Pool namespace; defaults to the configured selection.
    #[arg(short, long)]
    pub pool: Option<String>,

    /// Override the per-node timeout in milliseconds.
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

pub async fn run(ctx: &Context, args: &ProbeArgs) -> anyhow::Result<()> {
    let pool = ctx.pool(args.pool.as_deref())?;
    let genesis = ctx.materializer(ctx.open_store()?);
    materialize_pool(&genesis, &ctx.downloader()?, &pool).await?;

    let nodes = genesis.parse_nodes(&pool.indy_namespace).await;
    if nodes.is_empty() {
        println!("No usable ledger nodes for {}", pool.indy_namespace);
        return Ok(());
    }

    let timeout = args
        .timeout_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| ctx.config.probe_timeout());
    let report = LedgerReachabilityProbe::new(timeout).probe_all(&nodes).await;

    println!("{:<40} STATUS", "NODE");
    for result in &report.results {
        let status = if result.reachable { "reachable" } else { "unreachable" };
        println!("{:<40} {}", result.node.to_string(), status);
    }
    println!();
    println!(
        "{}/{} nodes reachable (timeout {} ms)",
        report.reachable(),
        report.total(),
        timeout.as_millis()
    );
    Ok(())
}
