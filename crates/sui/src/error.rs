use thiserror::Error;

#[derive(Error, Debug)]
pub enum SuiClientError {
    #[error("RPC connection failed: {0}")]
    RpcConnectionError(String),

    #[error("Transaction failed: {message}{}", tx_digest.as_ref().map(|d| format!(" (tx: {})", d)).unwrap_or_default())]
    TransactionError {
        message: String,
        tx_digest: Option<String>,
    },

    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("Invalid object format: {0}")]
    InvalidObjectFormat(String),

    #[error("No signer configured; set SUI_SECRET_KEY or pass a key")]
    SignerNotConfigured,

    #[error("SharedSuiState not initialized")]
    NotInitialized,

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SuiClientError>;
