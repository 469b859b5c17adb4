//! Stands up the identity-agent session.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

use wallet_core::{GenesisSource, LedgerPoolConfig, ProvisionConfig};
use wallet_network::{ConfigSource, GenesisDownloader};
use wallet_storage::{GenesisMaterializer, SecureKeyStore, StorageError};

use crate::agent::{AgentConfig, AgentFactory, LedgerConfig, OutboundTransport};
use crate::error::ProvisionError;
use crate::session::SessionHandle;

/// What a provisioning call needs beyond the static settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionRequest {
    pub pool: LedgerPoolConfig,
    /// Name the user gave the wallet, if any.
    pub wallet_name: Option<String>,
}

impl ProvisionRequest {
    pub fn new(pool: LedgerPoolConfig) -> Self {
        Self {
            pool,
            wallet_name: None,
        }
    }

    pub fn with_wallet_name(mut self, name: Option<String>) -> Self {
        self.wallet_name = name;
        self
    }
}

/// Owns the process-wide agent session.
///
/// `provision` is idempotent: once a session is open every call returns it.
/// A failed attempt records nothing, so the next call starts over.
pub struct AgentProvisioner {
    settings: ProvisionConfig,
    keys: Arc<SecureKeyStore>,
    genesis: Arc<GenesisMaterializer>,
    downloader: GenesisDownloader,
    remote: Option<Arc<dyn ConfigSource>>,
    factory: Arc<dyn AgentFactory>,
    /// Held for the whole provisioning sequence.
    provisioning: Mutex<()>,
    /// Set once, when a sequence succeeds.
    session: OnceCell<SessionHandle>,
}

impl AgentProvisioner {
    pub fn new(
        settings: ProvisionConfig,
        keys: Arc<SecureKeyStore>,
        genesis: Arc<GenesisMaterializer>,
        factory: Arc<dyn AgentFactory>,
    ) -> Self {
        Self {
            settings,
            keys,
            genesis,
            downloader: GenesisDownloader::default(),
            remote: None,
            factory,
            provisioning: Mutex::new(()),
            session: OnceCell::new(),
        }
    }

    pub fn with_config_source(mut self, source: Arc<dyn ConfigSource>) -> Self {
        self.remote = Some(source);
        self
    }

    pub fn with_genesis_downloader(mut self, downloader: GenesisDownloader) -> Self {
        self.downloader = downloader;
        self
    }

    pub fn settings(&self) -> &ProvisionConfig {
        &self.settings
    }

    /// The open session, if any.
    pub fn session(&self) -> Option<SessionHandle> {
        self.session.get().cloned()
    }

    /// Open the agent session, or return the one already open.
    pub async fn provision(
        &self,
        request: &ProvisionRequest,
    ) -> Result<SessionHandle, ProvisionError> {
        if let Some(existing) = self.session.get() {
            return Ok(existing.clone());
        }

        let _guard = self.provisioning.lock().await;
        if let Some(existing) = self.session.get() {
            tracing::debug!(session = %existing.id(), "agent session already open");
            return Ok(existing.clone());
        }

        let config = self.prepare(request).await?;

        let agent = self
            .factory
            .open(&config)
            .await
            .map_err(ProvisionError::agent("open"))?;
        for transport in OutboundTransport::ALL {
            agent
                .register_outbound_transport(transport)
                .await
                .map_err(ProvisionError::agent("register transport"))?;
        }
        agent
            .initialize()
            .await
            .map_err(ProvisionError::agent("initialize"))?;
        agent
            .ensure_link_secret()
            .await
            .map_err(ProvisionError::agent("link secret"))?;

        let handle = SessionHandle::new(config.wallet_id.as_str(), agent);
        tracing::info!(
            session = %handle.id(),
            wallet_id = %handle.wallet_id(),
            namespace = %config.ledger.indy_namespace,
            mediator = config.mediator_connection_target.is_some(),
            "agent session opened"
        );
        // Only the guard holder sets the cell, and only while it is empty.
        let _ = self.session.set(handle.clone());
        Ok(handle)
    }

    /// Build the agent configuration without opening the agent: key,
    /// genesis artifact, mediator target and label.
    pub async fn prepare(&self, request: &ProvisionRequest) -> Result<AgentConfig, ProvisionError> {
        let wallet_key = self.keys.get_or_create_key().await?;
        let genesis_path =
            materialize_pool(&self.genesis, &self.downloader, &request.pool).await?;
        let mediator_connection_target = self.mediator_target().await;

        let label = request
            .wallet_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(self.settings.default_label.as_str())
            .to_string();

        Ok(AgentConfig {
            label,
            wallet_id: self.settings.wallet_id.clone(),
            wallet_key,
            ledger: LedgerConfig {
                indy_namespace: request.pool.indy_namespace.clone(),
                is_production: request.pool.is_production,
                genesis_path,
            },
            mediator_connection_target,
            mediator_pickup_strategy: self.settings.mediator_pickup_strategy,
            auto_accept_credential: self.settings.auto_accept_credential,
            auto_accept_proof: self.settings.auto_accept_proof,
        })
    }

    /// Remote `MEDIATOR_URL`, then the configured default.
    async fn mediator_target(&self) -> Option<String> {
        let remote = match self.remote.as_ref() {
            Some(source) => match source.fetch().await {
                Ok(config) => config.mediator_url().map(str::to_string),
                Err(e) => {
                    tracing::warn!(error = %e, "remote configuration unavailable, using defaults");
                    None
                }
            },
            None => None,
        };
        remote.or_else(|| self.settings.mediator_url.clone())
    }
}

/// Write the pool's genesis artifact if absent, downloading it when the
/// pool is not bundled. Returns the artifact path.
pub async fn materialize_pool(
    genesis: &GenesisMaterializer,
    downloader: &GenesisDownloader,
    pool: &LedgerPoolConfig,
) -> Result<PathBuf, ProvisionError> {
    let namespace = pool.indy_namespace.as_str();
    let path = match pool.genesis_source()? {
        GenesisSource::Bundled(text) => {
            genesis
                .ensure_genesis_artifact(namespace, text.as_bytes())
                .await?
        }
        GenesisSource::Remote(url) => {
            genesis
                .ensure_genesis_artifact_with(namespace, || async move {
                    downloader
                        .fetch(&url)
                        .await
                        .map_err(|e| StorageError::PayloadUnavailable(e.to_string()))
                })
                .await?
        }
    };

    if genesis.parse_nodes(namespace).await.is_empty() {
        tracing::warn!(namespace, "genesis artifact lists no usable ledger nodes");
    }
    Ok(path)
}
