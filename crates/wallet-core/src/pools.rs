use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A ledger pool the wallet can connect to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerPoolConfig {
    /// Network identifier, e.g. `sovrin` or `bcovrin:test`.
    pub indy_namespace: String,
    #[serde(default)]
    pub is_production: bool,
    /// Bundled newline-delimited genesis transactions.
    #[serde(default)]
    pub genesis_transactions: Option<String>,
    /// Remote location of the genesis file when nothing is bundled.
    #[serde(default)]
    pub genesis_url: Option<String>,
}

/// Where a pool's genesis data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenesisSource {
    Bundled(String),
    Remote(String),
}

impl LedgerPoolConfig {
    /// Bundled transactions win over a remote URL.
    pub fn genesis_source(&self) -> Result<GenesisSource, CoreError> {
        if let Some(txns) = self
            .genesis_transactions
            .as_ref()
            .filter(|t| !t.trim().is_empty())
        {
            return Ok(GenesisSource::Bundled(txns.clone()));
        }
        if let Some(url) = self.genesis_url.as_ref() {
            return Ok(GenesisSource::Remote(url.clone()));
        }
        Err(CoreError::MissingGenesis(self.indy_namespace.clone()))
    }
}

/// Configured pools and the one currently selected.
#[derive(Debug, Clone, Default)]
pub struct PoolRegistry {
    pools: Vec<LedgerPoolConfig>,
    selected: Option<String>,
}

impl PoolRegistry {
    pub fn new(pools: Vec<LedgerPoolConfig>) -> Self {
        Self {
            pools,
            selected: None,
        }
    }

    pub fn get(&self, namespace: &str) -> Option<&LedgerPoolConfig> {
        self.pools.iter().find(|p| p.indy_namespace == namespace)
    }

    pub fn pools(&self) -> &[LedgerPoolConfig] {
        &self.pools
    }

    /// Select a pool, replacing any previous selection.
    pub fn select(&mut self, namespace: &str) -> Result<&LedgerPoolConfig, CoreError> {
        let idx = self
            .pools
            .iter()
            .position(|p| p.indy_namespace == namespace)
            .ok_or_else(|| CoreError::UnknownPool(namespace.to_string()))?;
        if self.selected.as_deref() != Some(namespace) {
            tracing::info!(namespace, "ledger pool selected");
        }
        self.selected = Some(namespace.to_string());
        Ok(&self.pools[idx])
    }

    /// The selected pool, or the first configured one when nothing was
    /// selected explicitly.
    pub fn selected(&self) -> Result<&LedgerPoolConfig, CoreError> {
        match self.selected.as_deref() {
            Some(ns) => self
                .get(ns)
                .ok_or_else(|| CoreError::UnknownPool(ns.to_string())),
            None => self.pools.first().ok_or(CoreError::NoPools),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}
