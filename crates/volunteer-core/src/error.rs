//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] volunteer_storage::StorageError),

    #[error("API error: {0}")]
    Api(#[from] volunteer_api::ApiError),

    #[error("Session error: {0}")]
    Session(#[from] volunteer_session::SessionError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
