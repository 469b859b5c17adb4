//! CLI configuration loading and management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use wallet_core::{CoreError, LedgerPoolConfig, PoolRegistry, ProvisionConfig};

/// Full configuration for the wallet CLI.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WalletConfig {
    /// Storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Identity-agent settings.
    #[serde(default)]
    pub agent: ProvisionConfig,

    /// Remote configuration endpoint.
    #[serde(default)]
    pub remote: RemoteSettings,

    /// Ledger pools.
    #[serde(default)]
    pub ledger: LedgerSettings,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the data directory.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteSettings {
    /// Base URL serving `/urls`; no remote lookups when unset.
    #[serde(default)]
    pub url: Option<String>,
    /// Request timeout in milliseconds.
    #[serde(default = "default_remote_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSettings {
    /// Namespace of the pool to use; the first pool when unset.
    #[serde(default)]
    pub selected: Option<String>,
    #[serde(default = "default_pools")]
    pub pools: Vec<LedgerPoolConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./wallet-data")
}
fn default_remote_timeout_ms() -> u64 {
    5000
}
fn default_pools() -> Vec<LedgerPoolConfig> {
    vec![LedgerPoolConfig {
        indy_namespace: "bcovrin:test".into(),
        is_production: false,
        genesis_transactions: None,
        genesis_url: Some("http://test.bcovrin.vonx.io/genesis".into()),
    }]
}
fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "text".into()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            url: None,
            timeout_ms: default_remote_timeout_ms(),
        }
    }
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            selected: None,
            pools: default_pools(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl WalletConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: WalletConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the current config to a TOML file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// RocksDB directory for the key-value store.
    pub fn db_path(&self) -> PathBuf {
        self.storage.data_dir.join("db")
    }

    /// Root of the file store holding genesis artifacts.
    pub fn files_root(&self) -> PathBuf {
        self.storage.data_dir.join("files")
    }

    pub fn remote_timeout(&self) -> Duration {
        Duration::from_millis(self.remote.timeout_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.agent.probe_timeout_ms)
    }

    /// Configured pools with the configured selection applied.
    pub fn pool_registry(&self) -> Result<PoolRegistry, CoreError> {
        let mut registry = PoolRegistry::new(self.ledger.pools.clone());
        if let Some(ns) = self.ledger.selected.as_deref() {
            registry.select(ns)?;
        }
        Ok(registry)
    }
}
