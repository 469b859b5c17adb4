//! Wallet Network — Connectivity checks and remote lookups used during
//! wallet bootstrap.
//!
//! - **LedgerReachabilityProbe**: connection-only TCP probes against ledger
//!   nodes, bounded by a timeout and never retried.
//! - **RemoteConfigClient**: fetches named configuration values (such as
//!   the mediator invitation URL) from a JSON endpoint.
//! - **GenesisDownloader**: downloads genesis files for pools that are not
//!   bundled with the app.

pub mod error;
pub mod genesis_fetch;
pub mod probe;
pub mod remote_config;

pub use error::NetworkError;
pub use genesis_fetch::{fetch_genesis, GenesisDownloader};
pub use probe::{LedgerReachabilityProbe, PoolReachability, ProbeResult, DEFAULT_PROBE_TIMEOUT};
pub use remote_config::{
    ConfigEntry, ConfigSource, RemoteConfig, RemoteConfigClient, MEDIATOR_URL,
};
