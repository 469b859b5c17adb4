//! Wallet Agent — Provisions the identity-agent session and decides where
//! the app lands at start.
//!
//! - **AgentProvisioner**: key, genesis artifact, mediator target, then the
//!   external agent's open/initialize sequence; idempotent per process.
//! - **StartupRouter**: launch routing from persisted onboarding state.
//! - **WalletBootstrap**: routes and provisions once the user reaches the
//!   main surface.

pub mod agent;
pub mod bootstrap;
pub mod error;
pub mod provisioner;
pub mod session;

#[cfg(test)]
mod testing;

pub use agent::{AgentConfig, AgentFactory, IdentityAgent, LedgerConfig, OutboundTransport};
pub use bootstrap::{BootstrapOutcome, LaunchDecision, StartupRouter, WalletBootstrap};
pub use error::{AgentError, ProvisionError};
pub use provisioner::{materialize_pool, AgentProvisioner, ProvisionRequest};
pub use session::SessionHandle;
