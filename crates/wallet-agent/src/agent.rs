use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use wallet_core::{AutoAcceptCredential, AutoAcceptProof, MediatorPickupStrategy};
use wallet_crypto::WalletKey;

use crate::error::AgentError;

/// Outbound transports registered with the agent, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutboundTransport {
    WebSocket,
    Http,
}

impl OutboundTransport {
    pub const ALL: [OutboundTransport; 2] = [OutboundTransport::WebSocket, OutboundTransport::Http];
}

impl fmt::Display for OutboundTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WebSocket => write!(f, "ws"),
            Self::Http => write!(f, "http"),
        }
    }
}

/// Ledger the agent connects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    pub indy_namespace: String,
    pub is_production: bool,
    pub genesis_path: PathBuf,
}

/// Everything needed to open the agent's wallet.
///
/// `Debug` shows only the key fingerprint.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub label: String,
    pub wallet_id: String,
    pub wallet_key: WalletKey,
    pub ledger: LedgerConfig,
    pub mediator_connection_target: Option<String>,
    pub mediator_pickup_strategy: MediatorPickupStrategy,
    pub auto_accept_credential: AutoAcceptCredential,
    pub auto_accept_proof: AutoAcceptProof,
}

/// An opened identity agent.
///
/// Credential exchange, proofs and DID handling all live behind this
/// handle; provisioning only drives its startup.
#[async_trait]
pub trait IdentityAgent: Send + Sync {
    /// Register a transport for outbound messages. Must precede `initialize`.
    async fn register_outbound_transport(
        &self,
        transport: OutboundTransport,
    ) -> Result<(), AgentError>;

    /// Connect to the ledger and the mediator.
    async fn initialize(&self) -> Result<(), AgentError>;

    /// Create the link secret used for anonymous credentials if the wallet
    /// has none yet.
    async fn ensure_link_secret(&self) -> Result<(), AgentError>;
}

/// Opens (or creates) the agent wallet described by an [`AgentConfig`].
#[async_trait]
pub trait AgentFactory: Send + Sync {
    async fn open(&self, config: &AgentConfig) -> Result<Arc<dyn IdentityAgent>, AgentError>;
}
