//! Tab error types

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Tab not found: {0}")]
    NotFound(String),

    #[error("Invalid tab key: {0:?}")]
    InvalidKey(String),

    #[error("Buffer not found: {0}")]
    BufferNotFound(String),

    #[error("Unknown menu command: {0}")]
    UnknownCommand(String),

    #[error("No pending confirmation with id {0}")]
    UnknownConfirmation(Uuid),

    #[error("Storage error: {0}")]
    Storage(#[from] studio_storage::StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
