use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Verification failed: expected {expected}, found {found}")]
    VerificationFailed { expected: String, found: String },

    #[error(transparent)]
    Bindings(#[from] bindings::BindingsError),

    #[error(transparent)]
    Schema(#[from] bcs_schema::SchemaError),

    #[error(transparent)]
    Sui(#[from] sui_client::SuiClientError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
