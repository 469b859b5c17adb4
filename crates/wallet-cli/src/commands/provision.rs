//! `wallet provision` — Show the agent configuration provisioning would use.
//!
//! Runs key, genesis and mediator resolution but never opens an agent.

use async_trait::async_trait;
use clap::Args;
use std::sync::Arc;

use wallet_agent::{
    AgentConfig, AgentError, AgentFactory, AgentProvisioner, IdentityAgent, ProvisionRequest,
};
use wallet_network::RemoteConfigClient;
use wallet_storage::{PersistedState, SecureKeyStore};

use super::Context;

#[derive(Args, Debug)]
pub struct ProvisionArgs {
    /// Pool namespace; defaults to the configured selection.
    #[arg(short, long)]
    pub pool: Option<String>,
}

/// The CLI links no identity agent.
struct NoAgent;

#[async_trait]
impl AgentFactory for NoAgent {
    async fn open(&self, _config: &AgentConfig) -> Result<Arc<dyn IdentityAgent>, AgentError> {
        Err(AgentError::new("no identity agent available in the CLI"))
    }
}

pub async fn run(ctx: &Context, args: &ProvisionArgs) -> anyhow::Result<()> {
    let kv = ctx.open_store()?;
    let pool = ctx.pool(args.pool.as_deref())?;
    let wallet_name = PersistedState::load(kv.as_ref()).await?.preferences.wallet_name;

    let mut provisioner = AgentProvisioner::new(
        ctx.config.agent.clone(),
        Arc::new(SecureKeyStore::new(kv.clone())),
        Arc::new(ctx.materializer(kv)),
        Arc::new(NoAgent),
    )
    .with_genesis_downloader(ctx.downloader()?);
    if let Some(ref url) = ctx.config.remote.url {
        let client = RemoteConfigClient::new(url, ctx.config.remote_timeout())?;
        provisioner = provisioner.with_config_source(Arc::new(client));
    }

    let config = provisioner
        .prepare(&ProvisionRequest::new(pool).with_wallet_name(wallet_name))
        .await?;

    println!("Agent configuration (dry run):");
    println!("  Label:             {}", config.label);
    println!("  Wallet id:         {}", config.wallet_id);
    println!("  Key fingerprint:   {}", config.wallet_key.fingerprint());
    println!("  Ledger:            {}", config.ledger.indy_namespace);
    println!("  Production:        {}", config.ledger.is_production);
    println!("  Genesis:           {}", config.ledger.genesis_path.display());
    println!(
        "  Mediator:          {}",
        config.mediator_connection_target.as_deref().unwrap_or("(none)")
    );
    println!("  Pickup strategy:   {:?}", config.mediator_pickup_strategy);
    println!("  Accept credential: {:?}", config.auto_accept_credential);
    println!("  Accept proof:      {:?}", config.auto_accept_proof);
    Ok(())
}
