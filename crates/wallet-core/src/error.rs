/// Core data-model errors.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("malformed genesis transaction on line {line}: {reason}")]
    MalformedGenesis { line: usize, reason: String },

    #[error("invalid ledger node port '{0}'")]
    InvalidPort(String),

    #[error("unknown ledger pool: {0}")]
    UnknownPool(String),

    #[error("no ledger pools configured")]
    NoPools,

    #[error("pool {0} has neither bundled genesis transactions nor a genesis URL")]
    MissingGenesis(String),

    #[error("validation error: {0}")]
    ValidationError(String),
}
