use thiserror::Error;

#[derive(Error, Debug)]
pub enum BindingsError {
    #[error("Schema error: {0}")]
    Schema(#[from] bcs_schema::SchemaError),

    #[error("BCS error: {0}")]
    Bcs(#[from] bcs::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("Not a Move object: dataType is {0}")]
    NotMoveObject(String),

    #[error("No struct registered for type {0}")]
    UnknownType(String),

    #[error("Type {type_name} takes {expected} type arguments, got {found}")]
    ArityMismatch {
        type_name: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid type name '{0}'")]
    InvalidTypeName(String),

    #[error("Invalid move call {target}: {message}")]
    InvalidCall { target: String, message: String },

    #[error("Sui client error: {0}")]
    Client(#[from] sui_client::SuiClientError),
}

pub type Result<T> = std::result::Result<T, BindingsError>;
