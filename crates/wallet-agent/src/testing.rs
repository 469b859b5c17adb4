//! Fakes shared by the unit tests of this crate.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use wallet_core::{GenesisTransaction, LedgerPoolConfig, ProvisionConfig};
use wallet_network::{ConfigEntry, ConfigSource, NetworkError, RemoteConfig, MEDIATOR_URL};
use wallet_storage::{
    GenesisMaterializer, KeyValueStore, LocalFileStore, MemoryStore, SecureKeyStore, StorageError,
};

use crate::agent::{AgentConfig, AgentFactory, IdentityAgent, OutboundTransport};
use crate::error::AgentError;
use crate::provisioner::AgentProvisioner;

/// Records every call made to the agents it opens.
#[derive(Default)]
pub struct FakeFactory {
    pub opens: AtomicUsize,
    pub fail_open: AtomicBool,
    pub fail_initialize: AtomicBool,
    calls: Arc<Mutex<Vec<String>>>,
    last_config: Mutex<Option<AgentConfig>>,
}

impl FakeFactory {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_config(&self) -> Option<AgentConfig> {
        self.last_config.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentFactory for FakeFactory {
    async fn open(&self, config: &AgentConfig) -> Result<Arc<dyn IdentityAgent>, AgentError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push("open".into());
        *self.last_config.lock().unwrap() = Some(config.clone());
        if self.fail_open.load(Ordering::SeqCst) {
            return Err(AgentError::new("wallet could not be opened"));
        }
        // Give concurrent callers a chance to interleave.
        tokio::task::yield_now().await;
        Ok(Arc::new(FakeAgent {
            calls: self.calls.clone(),
            fail_initialize: self.fail_initialize.load(Ordering::SeqCst),
        }))
    }
}

struct FakeAgent {
    calls: Arc<Mutex<Vec<String>>>,
    fail_initialize: bool,
}

#[async_trait]
impl IdentityAgent for FakeAgent {
    async fn register_outbound_transport(
        &self,
        transport: OutboundTransport,
    ) -> Result<(), AgentError> {
        self.calls.lock().unwrap().push(format!("transport:{}", transport));
        Ok(())
    }

    async fn initialize(&self) -> Result<(), AgentError> {
        self.calls.lock().unwrap().push("initialize".into());
        if self.fail_initialize {
            return Err(AgentError::new("mediator unreachable"));
        }
        Ok(())
    }

    async fn ensure_link_secret(&self) -> Result<(), AgentError> {
        self.calls.lock().unwrap().push("link-secret".into());
        Ok(())
    }
}

/// Every operation fails.
pub struct BrokenStore;

#[async_trait]
impl KeyValueStore for BrokenStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("keychain locked".into()))
    }
    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("keychain locked".into()))
    }
    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("keychain locked".into()))
    }
}

pub struct StaticConfig(RemoteConfig);

impl StaticConfig {
    pub fn mediator(url: &str) -> Self {
        Self(
            vec![ConfigEntry {
                id: MEDIATOR_URL.into(),
                value: url.into(),
            }]
            .into_iter()
            .collect(),
        )
    }
}

#[async_trait]
impl ConfigSource for StaticConfig {
    async fn fetch(&self) -> Result<RemoteConfig, NetworkError> {
        Ok(self.0.clone())
    }
}

pub struct FailingConfig;

#[async_trait]
impl ConfigSource for FailingConfig {
    async fn fetch(&self) -> Result<RemoteConfig, NetworkError> {
        Err(NetworkError::InvalidUrl("offline".into()))
    }
}

pub fn bundled_pool(namespace: &str) -> LedgerPoolConfig {
    let lines = [
        GenesisTransaction::for_endpoint("127.0.0.1", "9701"),
        GenesisTransaction::for_endpoint("127.0.0.1", "9703"),
    ]
    .iter()
    .map(|t| serde_json::to_string(t).unwrap())
    .collect::<Vec<_>>()
    .join("\n");

    LedgerPoolConfig {
        indy_namespace: namespace.into(),
        is_production: false,
        genesis_transactions: Some(lines),
        genesis_url: None,
    }
}

pub struct Fixture {
    pub provisioner: Arc<AgentProvisioner>,
    pub factory: Arc<FakeFactory>,
    pub kv: Arc<MemoryStore>,
    pub dir: PathBuf,
}

impl Fixture {
    /// Replace the provisioner, keeping storage and the factory.
    pub fn rebuild(&mut self, settings: ProvisionConfig, source: Option<Arc<dyn ConfigSource>>) {
        let mut provisioner = build(settings, &self.kv, &self.dir, self.factory.clone());
        if let Some(source) = source {
            provisioner = provisioner.with_config_source(source);
        }
        self.provisioner = Arc::new(provisioner);
    }

    pub fn cleanup(self) {
        std::fs::remove_dir_all(&self.dir).ok();
    }
}

fn build(
    settings: ProvisionConfig,
    kv: &Arc<MemoryStore>,
    dir: &PathBuf,
    factory: Arc<FakeFactory>,
) -> AgentProvisioner {
    let kv: Arc<dyn KeyValueStore> = kv.clone();
    AgentProvisioner::new(
        settings,
        Arc::new(SecureKeyStore::new(kv.clone())),
        Arc::new(GenesisMaterializer::new(
            Arc::new(LocalFileStore::new(dir)),
            kv,
        )),
        factory,
    )
}

pub fn fixture() -> Fixture {
    let dir = std::env::temp_dir().join(format!("wallet-agent-test-{}", rand::random::<u64>()));
    let kv = Arc::new(MemoryStore::new());
    let factory = Arc::new(FakeFactory::default());
    let provisioner = build(ProvisionConfig::default(), &kv, &dir, factory.clone());
    Fixture {
        provisioner: Arc::new(provisioner),
        factory,
        kv,
        dir,
    }
}
