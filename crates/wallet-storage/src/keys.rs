//! Namespaced keys used in the durable key-value store.

pub const WALLET_KEY: &str = "walletKey";
pub const ONBOARDING: &str = "OnboardingState";
pub const LOGIN_ATTEMPTS: &str = "LoginAttempts";
pub const PREFERENCES: &str = "PreferencesState";
pub const MIGRATION: &str = "MigrationState";
pub const TOURS: &str = "ToursState";

const GENESIS_MARKER_PREFIX: &str = "GenesisMarker:";

/// Key of the genesis marker for one pool namespace.
pub fn genesis_marker(namespace: &str) -> String {
    format!("{}{}", GENESIS_MARKER_PREFIX, namespace)
}
