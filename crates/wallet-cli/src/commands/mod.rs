pub mod genesis;
pub mod init;
pub mod key;
pub mod mark;
pub mod probe;
pub mod provision;
pub mod remote;
pub mod resume;

use anyhow::Context as _;
use std::sync::Arc;

use wallet_core::LedgerPoolConfig;
use wallet_network::GenesisDownloader;
use wallet_storage::{GenesisMaterializer, KeyValueStore, LocalFileStore, RocksStore};

use crate::config::WalletConfig;

/// Loaded configuration and the stores it points at.
pub struct Context {
    pub config: WalletConfig,
}

impl Context {
    pub fn new(config: WalletConfig) -> Self {
        Self { config }
    }

    pub fn open_store(&self) -> anyhow::Result<Arc<dyn KeyValueStore>> {
        let path = self.config.db_path();
        let store = RocksStore::open(&path)
            .with_context(|| format!("opening wallet store at {}", path.display()))?;
        Ok(Arc::new(store))
    }

    pub fn materializer(&self, kv: Arc<dyn KeyValueStore>) -> GenesisMaterializer {
        GenesisMaterializer::new(Arc::new(LocalFileStore::new(self.config.files_root())), kv)
    }

    pub fn downloader(&self) -> anyhow::Result<GenesisDownloader> {
        Ok(GenesisDownloader::with_timeout(self.config.remote_timeout())?)
    }

    /// The named pool, or the configured selection.
    pub fn pool(&self, namespace: Option<&str>) -> anyhow::Result<LedgerPoolConfig> {
        let mut registry = self.config.pool_registry()?;
        let pool = match namespace {
            Some(ns) => registry.select(ns)?,
            None => registry.selected()?,
        };
        Ok(pool.clone())
    }
}
