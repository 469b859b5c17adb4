/// Failure reported by the external identity agent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct AgentError(pub String);

impl AgentError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Provisioning errors.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] wallet_storage::StorageError),

    #[error("ledger configuration: {0}")]
    Ledger(#[from] wallet_core::CoreError),

    #[error("agent initialization failed during {step}: {source}")]
    AgentInitialization {
        step: &'static str,
        #[source]
        source: AgentError,
    },
}

impl ProvisionError {
    pub(crate) fn agent(step: &'static str) -> impl FnOnce(AgentError) -> Self {
        move |source| Self::AgentInitialization { step, source }
    }

    /// Whether the user should be told about this failure.
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            Self::StorageUnavailable(_) | Self::AgentInitialization { .. }
        )
    }
}
