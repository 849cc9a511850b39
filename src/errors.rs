use thiserror::Error;

/// Failures raised by persistence backends and the configuration manager.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Input problems detected before a record reaches the store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Amount is required")]
    EmptyAmount,
    #[error("`{0}` is not a valid amount")]
    InvalidAmount(String),
    #[error("Amount cannot be negative")]
    NegativeAmount,
    #[error("{0} cannot be empty")]
    EmptyName(&'static str),
    #[error("Category `{0}` already exists")]
    DuplicateCategory(String),
    #[error("Tag `{0}` already exists")]
    DuplicateTag(String),
    #[error("`{0}` is not a #RRGGBB colour")]
    InvalidColor(String),
}
