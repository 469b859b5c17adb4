use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// A network endpoint participating in a ledger pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LedgerNode {
    pub host: String,
    pub port: u16,
}

impl LedgerNode {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for LedgerNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// One line of a genesis file. Only the client endpoint is modelled; every
/// other field of the transaction is ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisTransaction {
    pub txn: GenesisTxn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisTxn {
    pub data: GenesisTxnData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisTxnData {
    pub data: NodeEndpoint,
}

/// Client-facing endpoint of a validator node. The port is carried as a
/// string on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeEndpoint {
    pub client_ip: String,
    pub client_port: String,
}

impl GenesisTransaction {
    /// Build a transaction record for the given endpoint.
    pub fn for_endpoint(client_ip: impl Into<String>, client_port: impl Into<String>) -> Self {
        Self {
            txn: GenesisTxn {
                data: GenesisTxnData {
                    data: NodeEndpoint {
                        client_ip: client_ip.into(),
                        client_port: client_port.into(),
                    },
                },
            },
        }
    }

    /// Extract the ledger node this transaction describes.
    pub fn node(&self) -> Result<LedgerNode, CoreError> {
        let endpoint = &self.txn.data.data;
        let port = endpoint
            .client_port
            .trim()
            .parse::<u16>()
            .map_err(|_| CoreError::InvalidPort(endpoint.client_port.clone()))?;
        Ok(LedgerNode::new(endpoint.client_ip.clone(), port))
    }
}

/// Failed PIN attempts and the lockout they may have triggered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginAttempts {
    pub login_attempts: u32,
    #[serde(with = "chrono::serde::ts_milliseconds_option")]
    pub lockout_date: Option<DateTime<Utc>>,
    pub served_penalty: bool,
}

impl LoginAttempts {
    pub fn is_locked_out(&self) -> bool {
        self.lockout_date.is_some()
    }
}

/// User preferences relevant to bootstrap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub enable_wallet_naming: bool,
    pub wallet_name: Option<String>,
    pub use_biometry: bool,
    pub developer_mode_enabled: bool,
}

/// Storage migration bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MigrationState {
    pub did_migrate_to_askar: bool,
}

/// Which guided tours the user has already seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToursState {
    pub seen_tours_prompt: bool,
    pub tour_enabled: bool,
    pub seen_home_tour: bool,
    pub seen_credentials_tour: bool,
}

/// Feature switches that influence onboarding routing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub wallet_naming_enabled: bool,
}

impl From<&Preferences> for FeatureFlags {
    fn from(prefs: &Preferences) -> Self {
        Self {
            wallet_naming_enabled: prefs.enable_wallet_naming,
        }
    }
}
