use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Session storage unavailable: {0}")]
    Unavailable(String),

    #[error("Session storage backing data is corrupted: {0}")]
    Corrupted(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;
