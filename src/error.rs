use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid task data: {0}")]
    Validation(String),

    #[error("task not found: {0}")]
    NotFound(String),

    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("malformed store content: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
