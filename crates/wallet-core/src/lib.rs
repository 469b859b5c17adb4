//! Wallet Core — Data model, onboarding state machine, and ledger pool
//! registry for the wallet bootstrap pipeline.

pub mod config;
pub mod error;
pub mod onboarding;
pub mod pools;
pub mod types;

pub use config::{AutoAcceptCredential, AutoAcceptProof, MediatorPickupStrategy, ProvisionConfig};
pub use error::CoreError;
pub use onboarding::{
    LaunchContext, Milestone, OnboardingState, OnboardingStateMachine, ResumeRule, Screen,
    RESUME_RULES,
};
pub use pools::{GenesisSource, LedgerPoolConfig, PoolRegistry};
pub use types::{
    FeatureFlags, GenesisTransaction, LedgerNode, LoginAttempts, MigrationState, Preferences,
    ToursState,
};
