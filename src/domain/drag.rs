use crate::domain::{board::Board, card::CardId, moves::MoveRecord};
use tracing::debug;

/// Translates drag engine events into board transitions.
///
/// The engine reports the id being dragged and the id currently under the
/// pointer; either may be a card id or a column name. Cross-column moves are
/// applied while hovering so the card follows the pointer, same-column
/// reordering is only committed on release.
#[derive(Debug, Default)]
pub struct DragTranslator {
    active: Option<CardId>,
}

impl DragTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The card currently being dragged, if any
    pub fn active(&self) -> Option<&CardId> {
        self.active.as_ref()
    }

    pub fn on_drag_start(&mut self, active_id: &str) {
        self.active = Some(CardId::from(active_id));
    }

    /// Handles the pointer crossing a drop target.
    ///
    /// Fires repeatedly during a drag. Only cross-column hovers mutate the
    /// board; once the card sits in the hovered column the same event
    /// resolves both ids to one container and becomes a no-op.
    pub fn on_drag_over(
        &mut self,
        board: &mut Board,
        active_id: &str,
        over_id: Option<&str>,
    ) -> Option<MoveRecord> {
        let over_id = over_id?;
        let (from, to) = containers(board, active_id, over_id)?;

        if from == to {
            return None;
        }

        relocate(board, active_id, over_id, &from, &to)
    }

    /// Handles the pointer release, committing or cancelling the drag.
    ///
    /// Indices are recomputed from the current board rather than trusted from
    /// earlier hovers. The active id is cleared on every path.
    pub fn on_drag_end(
        &mut self,
        board: &mut Board,
        active_id: &str,
        over_id: Option<&str>,
    ) -> Option<MoveRecord> {
        let record = self.commit(board, active_id, over_id);
        self.active = None;
        record
    }

    fn commit(
        &self,
        board: &mut Board,
        active_id: &str,
        over_id: Option<&str>,
    ) -> Option<MoveRecord> {
        let Some(over_id) = over_id else {
            debug!(active_id, "drag cancelled without a drop target");
            return None;
        };
        let (from, to) = containers(board, active_id, over_id)?;

        if from != to {
            return relocate(board, active_id, over_id, &from, &to);
        }

        let column = board.column(&from)?;
        let active_index = column.position_of(active_id)?;
        // Dropping on the column body of the card's own column sends it to the end
        let over_index = if over_id == from {
            column.len().checked_sub(1)?
        } else {
            column.position_of(over_id)?
        };

        if active_index == over_index {
            return None;
        }

        board
            .reorder(&from, active_index, over_index)
            .then(|| MoveRecord::new(active_id, from.as_str(), to.as_str(), over_index))
    }
}

/// Resolves the source and destination columns of a drag
fn containers(board: &Board, active_id: &str, over_id: &str) -> Option<(String, String)> {
    let from = board.resolve_container(active_id);
    let to = board.resolve_container(over_id);

    match (from, to) {
        (Some(from), Some(to)) => Some((from.to_string(), to.to_string())),
        _ => {
            debug!(active_id, over_id, "drag target no longer on the board");
            None
        }
    }
}

/// Moves `active_id` from `from` into `to`, placed before `over_id`, or at
/// the end when `over_id` is the column itself or not found
fn relocate(
    board: &mut Board,
    active_id: &str,
    over_id: &str,
    from: &str,
    to: &str,
) -> Option<MoveRecord> {
    let destination = board.column(to)?;
    let index = if over_id == to {
        destination.len()
    } else {
        destination
            .position_of(over_id)
            .unwrap_or(destination.len())
    };

    let position = board.relocate(active_id, from, to, index)?;
    Some(MoveRecord::new(active_id, from, to, position))
}
