//! App-start routing and the provisioning trigger.

use std::sync::Arc;
use tokio::sync::Mutex;

use wallet_core::{Milestone, OnboardingState, OnboardingStateMachine, PoolRegistry, Screen};
use wallet_storage::{KeyValueStore, PersistedState, StorageError};

use crate::error::ProvisionError;
use crate::provisioner::{AgentProvisioner, ProvisionRequest};
use crate::session::SessionHandle;

/// Where the app lands, and the state the decision was made from.
#[derive(Debug, Clone)]
pub struct LaunchDecision {
    pub screen: Screen,
    pub state: PersistedState,
}

/// Reads persisted onboarding state and decides the launch screen.
pub struct StartupRouter {
    kv: Arc<dyn KeyValueStore>,
    /// Serializes read-modify-write of the onboarding record.
    onboarding_lock: Mutex<()>,
}

impl StartupRouter {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            onboarding_lock: Mutex::new(()),
        }
    }

    pub async fn route(&self, authenticated: bool) -> Result<LaunchDecision, StorageError> {
        let _guard = self.onboarding_lock.lock().await;
        let mut state = PersistedState::load(self.kv.as_ref()).await?;

        // Wallets onboarded before naming existed count as named.
        if let Some(onboarding) = state.onboarding.as_mut() {
            if onboarding.is_complete() && !onboarding.did_name_wallet {
                onboarding.mark(Milestone::WalletName);
                PersistedState::save_onboarding(self.kv.as_ref(), onboarding).await?;
                tracing::info!("back-filled wallet naming for existing wallet");
            }
        }

        let screen = OnboardingStateMachine::launch_screen(&state.launch_context(authenticated));
        tracing::info!(%screen, authenticated, "launch route decided");
        Ok(LaunchDecision { screen, state })
    }

    /// Record an onboarding milestone and return the updated progress.
    pub async fn mark(&self, milestone: Milestone) -> Result<OnboardingState, StorageError> {
        let _guard = self.onboarding_lock.lock().await;
        let mut onboarding = PersistedState::load(self.kv.as_ref())
            .await?
            .onboarding
            .unwrap_or_default();
        onboarding.mark(milestone);
        PersistedState::save_onboarding(self.kv.as_ref(), &onboarding).await?;
        tracing::debug!(%milestone, "onboarding milestone recorded");
        Ok(onboarding)
    }
}

#[derive(Debug, Clone)]
pub struct BootstrapOutcome {
    pub screen: Screen,
    /// Set only when the app lands on the main surface.
    pub session: Option<SessionHandle>,
}

/// Routes the app at start and provisions the agent once the user is
/// through onboarding and authenticated.
pub struct WalletBootstrap {
    router: StartupRouter,
    pools: PoolRegistry,
    provisioner: Arc<AgentProvisioner>,
}

impl WalletBootstrap {
    pub fn new(
        kv: Arc<dyn KeyValueStore>,
        pools: PoolRegistry,
        provisioner: Arc<AgentProvisioner>,
    ) -> Self {
        Self {
            router: StartupRouter::new(kv),
            pools,
            provisioner,
        }
    }

    pub fn router(&self) -> &StartupRouter {
        &self.router
    }

    pub fn provisioner(&self) -> &Arc<AgentProvisioner> {
        &self.provisioner
    }

    pub async fn start(&self, authenticated: bool) -> Result<BootstrapOutcome, ProvisionError> {
        let decision = self.router.route(authenticated).await?;

        let biometry_considered = decision
            .state
            .onboarding
            .as_ref()
            .is_some_and(|o| o.did_consider_biometry);
        if decision.screen != Screen::Main || !biometry_considered {
            return Ok(BootstrapOutcome {
                screen: decision.screen,
                session: None,
            });
        }

        let pool = self.pools.selected()?.clone();
        let request =
            ProvisionRequest::new(pool).with_wallet_name(decision.state.preferences.wallet_name);
        let session = self.provisioner.provision(&request).await?;

        Ok(BootstrapOutcome {
            screen: decision.screen,
            session: Some(session),
        })
    }
}
