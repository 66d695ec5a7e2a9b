//! # Pipeline Board
//!
//! Drag-and-drop state for kanban pipeline boards, such as a sales CRM
//! pipeline whose stages are columns of deal cards.
//!
//! The crate resolves drag targets to columns, applies cross-column moves and
//! same-column reorders while keeping every card in exactly one column, and
//! persists each user-caused change through a single-flight save bridge.
//! Rendering and the drag engine itself live outside this crate.

pub mod domain;
pub mod error;
pub mod persistence;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use domain::{
    board::{Board, BoardConfig, Column},
    card::{Card, CardId},
    drag::DragTranslator,
    moves::MoveRecord,
};
pub use error::{BoardError, Result};
pub use persistence::{SaveBridge, SaveOutcome};
pub use session::BoardSession;
#[cfg(feature = "file-storage")]
pub use storage::file_storage::FileStorage;
pub use storage::Storage;
