use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Card {0} appears more than once on the board")]
    DuplicateCard(String),

    #[error("Card id {0} collides with a column name")]
    IdCollision(String),

    #[error("Board not initialized")]
    BoardNotInitialized,

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
