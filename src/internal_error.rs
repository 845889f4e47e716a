use std::io;
use std::sync::PoisonError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InternalError {
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("Generic internal error: {0}")]
    Other(String),
}

impl<T> From<PoisonError<T>> for InternalError {
    fn from(e: PoisonError<T>) -> InternalError {
        InternalError::Other(e.to_string())
    }
}

pub type InternalResult<T> = Result<T, InternalError>;
