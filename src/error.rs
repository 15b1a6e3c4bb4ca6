use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum BridgeError {
    #[error("no coordinator registered for config entry {domain}/{entry_id}")]
    UnknownConfigEntry { domain: String, entry_id: String },

    #[error("reading source unavailable: {0}")]
    SourceUnavailable(String),

    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
