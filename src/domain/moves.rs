use crate::domain::card::CardId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The most recent user-initiated card move, kept for change logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub card_id: CardId,
    pub from_column: String,
    pub to_column: String,
    pub position: usize,
    pub moved_at: DateTime<Utc>,
}

impl MoveRecord {
    pub fn new(
        card_id: impl Into<CardId>,
        from_column: impl Into<String>,
        to_column: impl Into<String>,
        position: usize,
    ) -> Self {
        Self {
            card_id: card_id.into(),
            from_column: from_column.into(),
            to_column: to_column.into(),
            position,
            moved_at: Utc::now(),
        }
    }

    pub fn is_reorder(&self) -> bool {
        self.from_column == self.to_column
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "moved card {} from {} to {} at position {}",
            self.card_id, self.from_column, self.to_column, self.position
        )
    }
}
