//! `wallet mark` — Record an onboarding milestone.

use clap::Args;

use wallet_agent::StartupRouter;
use wallet_core::{Milestone, OnboardingStateMachine};
use wallet_storage::PersistedState;

use super::Context;

#[derive(Args, Debug)]
pub struct MarkArgs {
    /// tutorial, terms, pin, wallet-name or biometry.
    pub milestone: Milestone,

    /// Wallet name to store along with the wallet-name milestone.
    #[arg(long)]
    pub name: Option<String>,
}

pub async fn run(ctx: &Context, args: &MarkArgs) -> anyhow::Result<()> {
    let kv = ctx.open_store()?;

    if let Some(ref name) = args.name {
        if args.milestone != Milestone::WalletName {
            anyhow::bail!("--name only applies to the wallet-name milestone");
        }
        let mut prefs = PersistedState::load(kv.as_ref()).await?.preferences;
        prefs.wallet_name = Some(name.clone());
        PersistedState::save_preferences(kv.as_ref(), &prefs).await?;
    }

    let router = StartupRouter::new(kv.clone());
    let onboarding = router.mark(args.milestone).await?;
    let flags = PersistedState::load(kv.as_ref()).await?.flags();

    println!("Recorded {}", args.milestone);
    if onboarding.is_complete() {
        println!("Onboarding complete.");
    } else {
        println!(
            "Next step: {}",
            OnboardingStateMachine::next_screen(&onboarding, flags)
        );
    }
    Ok(())
}
