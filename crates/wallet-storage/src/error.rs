/// Storage errors. Every variant means durable storage could not be relied
/// on for the current operation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] rocksdb::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid namespace: {0:?}")]
    InvalidNamespace(String),

    #[error("wallet key error: {0}")]
    Key(#[from] wallet_crypto::CryptoError),

    #[error("genesis payload unavailable: {0}")]
    PayloadUnavailable(String),
}
