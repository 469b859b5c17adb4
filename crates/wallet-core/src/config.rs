use serde::{Deserialize, Serialize};

/// How the agent collects messages queued at its mediator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediatorPickupStrategy {
    Implicit,
    PickUpV1,
    PickUpV2,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoAcceptCredential {
    Always,
    ContentApproved,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoAcceptProof {
    Always,
    ContentApproved,
    Never,
}

/// Settings used when provisioning the identity agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisionConfig {
    /// Identifier of the agent's wallet.
    pub wallet_id: String,
    /// Agent label used when the user has not named the wallet.
    pub default_label: String,
    /// Mediator invitation used when remote configuration provides none.
    pub mediator_url: Option<String>,
    pub mediator_pickup_strategy: MediatorPickupStrategy,
    pub auto_accept_credential: AutoAcceptCredential,
    pub auto_accept_proof: AutoAcceptProof,
    /// Reachability probe timeout in milliseconds.
    pub probe_timeout_ms: u64,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            wallet_id: "walletId".into(),
            default_label: "Wallet".into(),
            mediator_url: None,
            mediator_pickup_strategy: MediatorPickupStrategy::Implicit,
            auto_accept_credential: AutoAcceptCredential::Always,
            auto_accept_proof: AutoAcceptProof::Always,
            probe_timeout_ms: 3000,
        }
    }
}
