use crate::{
    domain::card::Card,
    error::{BoardError, Result},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A pipeline stage holding an ordered list of cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub cards: Vec<Card>,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cards: Vec::new(),
        }
    }

    pub fn with_cards(mut self, cards: Vec<Card>) -> Self {
        self.cards = cards;
        self
    }

    /// Finds the position of a card in this column
    pub fn position_of(&self, card_id: &str) -> Option<usize> {
        self.cards.iter().position(|card| card.id == *card_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card ids in display order
    pub fn card_ids(&self) -> Vec<&str> {
        self.cards.iter().map(|card| card.id.as_str()).collect()
    }
}

/// Board configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub name: String,
    pub columns: Vec<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: "Sales Pipeline".to_string(),
            columns: vec![
                "QUALIFICATION".to_string(),
                "NEED ANALYSIS".to_string(),
                "PROPOSAL".to_string(),
                "CLOSED WON".to_string(),
                "CLOSED LOST".to_string(),
            ],
        }
    }
}

/// Kanban board state: named columns in display order.
///
/// Every card id lives in exactly one column, and no card id equals a
/// column name. Constructors check this and the drag operations keep it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub name: String,
    columns: Vec<Column>,
}

impl Board {
    /// Builds a board from existing columns, rejecting inconsistent layouts
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Result<Self> {
        let board = Self {
            name: name.into(),
            columns,
        };
        board.validate()?;
        Ok(board)
    }

    /// Creates an empty board with the configured stages
    pub fn from_config(config: &BoardConfig) -> Result<Self> {
        Self::new(
            config.name.clone(),
            config.columns.iter().map(Column::new).collect(),
        )
    }

    /// Checks the one-card-one-column invariant and namespace separation
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for column in &self.columns {
            if !names.insert(column.name.as_str()) {
                return Err(BoardError::DuplicateColumn(column.name.clone()));
            }
        }

        let mut seen = HashSet::new();
        for card in self.columns.iter().flat_map(|col| col.cards.iter()) {
            if names.contains(card.id.as_str()) {
                return Err(BoardError::IdCollision(card.id.to_string()));
            }
            if !seen.insert(card.id.as_str()) {
                return Err(BoardError::DuplicateCard(card.id.to_string()));
            }
        }

        Ok(())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|col| col.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|col| col.name.as_str())
    }

    pub fn is_column(&self, id: &str) -> bool {
        self.column(id).is_some()
    }

    /// Total number of cards across all columns
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Finds the column that currently holds `id`.
    ///
    /// A column name resolves to itself, so dropping onto the empty body of
    /// a column works the same as dropping onto one of its cards. Returns
    /// `None` for stale ids.
    pub fn resolve_container(&self, id: &str) -> Option<&str> {
        if let Some(column) = self.column(id) {
            return Some(column.name.as_str());
        }

        self.columns
            .iter()
            .find(|col| col.position_of(id).is_some())
            .map(|col| col.name.as_str())
    }

    /// Finds a card by id in whichever column holds it
    pub fn resolve_card(&self, id: &str) -> Option<&Card> {
        let container = self.resolve_container(id)?;
        self.column(container)?
            .cards
            .iter()
            .find(|card| card.id == *id)
    }

    fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|col| col.name == name)
    }

    /// Moves a card between two different columns.
    ///
    /// The card is removed from `from` by identity and inserted into `to` at
    /// `index`, clamped to the destination length. Returns the index it
    /// landed at, or `None` (board untouched) when either column or the card
    /// is missing.
    pub(crate) fn relocate(
        &mut self,
        card_id: &str,
        from: &str,
        to: &str,
        index: usize,
    ) -> Option<usize> {
        if from == to || !self.is_column(to) {
            return None;
        }

        let source = self.column_mut(from)?;
        let position = source.position_of(card_id)?;
        let card = source.cards.remove(position);

        // `to` was checked above
        let destination = self.column_mut(to)?;
        let index = index.min(destination.len());
        destination.cards.insert(index, card);
        Some(index)
    }

    /// Moves the card at `from_index` to `to_index` within one column,
    /// shifting the cards in between
    pub(crate) fn reorder(&mut self, column: &str, from_index: usize, to_index: usize) -> bool {
        let Some(column) = self.column_mut(column) else {
            return false;
        };
        if from_index >= column.len() || to_index >= column.len() || from_index == to_index {
            return false;
        }

        let card = column.cards.remove(from_index);
        column.cards.insert(to_index, card);
        true
    }
}

impl Default for Board {
    fn default() -> Self {
        let config = BoardConfig::default();
        Self {
            name: config.name,
            columns: config.columns.into_iter().map(Column::new).collect(),
        }
    }
}
