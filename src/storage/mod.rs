use crate::{domain::Board, error::Result};
use async_trait::async_trait;

#[cfg(feature = "file-storage")]
pub mod file_storage;

/// Storage trait for persisting board state
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Saves the full board state, replacing whatever was stored before
    async fn save_board(&self, board: &Board) -> Result<()>;

    /// Loads the board state
    async fn load_board(&self) -> Result<Board>;

    /// Checks if the store holds a board
    async fn is_initialized(&self) -> bool;
}
