use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("i/o error writing report: {0}")]
    Io(#[from] io::Error),

    #[error("report serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type SinkResult<T> = std::result::Result<T, SinkError>;
