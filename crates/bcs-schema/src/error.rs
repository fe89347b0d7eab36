use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Unknown type tag: {0}")]
    UnknownType(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Unexpected field: {0}")]
    UnexpectedField(String),

    #[error("Duplicate field: {0}")]
    DuplicateField(String),

    #[error("Expected a JSON object")]
    NotAnObject,

    #[error("Type mismatch at '{path}': expected {expected}")]
    TypeMismatch { path: String, expected: String },

    #[error("Value at '{path}' is out of range for {ty}")]
    OutOfRange { path: String, ty: String },

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Expected {expected} encoded fields, got {found}")]
    FieldCountMismatch { expected: usize, found: usize },

    #[error("BCS error: {0}")]
    Bcs(#[from] bcs::Error),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
