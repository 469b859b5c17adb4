//! `wallet resume` — Show where the app would resume.

use clap::Args;

use wallet_agent::StartupRouter;
use wallet_core::Milestone;

use super::Context;

#[derive(Args, Debug)]
pub struct ResumeArgs {
    /// Route as if the user already entered their PIN.
    #[arg(long)]
    pub authenticated: bool,
}

pub async fn run(ctx: &Context, args: &ResumeArgs) -> anyhow::Result<()> {
    let router = StartupRouter::new(ctx.open_store()?);
    let decision = router.route(args.authenticated).await?;

    println!("Launch screen: {}", decision.screen);
    match decision.state.onboarding {
        Some(ref onboarding) => {
            for milestone in Milestone::ALL {
                let mark = if onboarding.has(milestone) { "x" } else { " " };
                println!("  [{}] {}", mark, milestone);
            }
        }
        None => println!("  (onboarding not started)"),
    }
    if decision.state.login_attempts.is_locked_out() {
        println!(
            "  Locked out after {} failed attempts",
            decision.state.login_attempts.login_attempts
        );
    }
    Ok(())
}
