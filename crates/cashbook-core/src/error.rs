use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Snapshot not found: {0}")]
    SnapshotNotFound(String),
    #[error("Unknown book: {0}")]
    UnknownBook(String),
    #[error("Unknown business unit: {0}")]
    UnknownBusinessUnit(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
