pub mod board;
pub mod card;
pub mod drag;
pub mod moves;

pub use board::{Board, BoardConfig, Column};
pub use card::{Card, CardId};
pub use drag::DragTranslator;
pub use moves::MoveRecord;
