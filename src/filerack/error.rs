use crate::model::BufferId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RackError {
    #[error("Rack file not found: {0}")]
    FileNotFound(String),

    #[error("Buffer not found: {0}")]
    BufferNotFound(BufferId),

    #[error("Invalid rack file name: {0:?}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, RackError>;
