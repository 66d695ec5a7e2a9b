use crate::{
    domain::{Board, Card, CardId, DragTranslator, MoveRecord},
    error::Result,
    persistence::{SaveBridge, SaveOutcome},
    storage::Storage,
};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::info;

/// A board being edited through drag-and-drop.
///
/// Owns the board, the drag state and the save bridge. Presentation layers
/// read the board through this type and feed it the three drag callbacks;
/// there is no other way to mutate the board. Every user-caused change
/// starts a save when none is running.
///
/// Saves run on the tokio runtime the session was created in, or the one
/// given to [`BoardSession::with_runtime`]. Without either, moves still apply
/// but are not saved.
pub struct BoardSession<S: Storage + 'static> {
    board: Board,
    drag: DragTranslator,
    bridge: SaveBridge<S>,
}

impl<S: Storage + 'static> BoardSession<S> {
    pub fn new(board: Board, storage: Arc<S>) -> Self {
        Self {
            board,
            drag: DragTranslator::new(),
            bridge: SaveBridge::new(storage),
        }
    }

    /// Runs saves on `runtime`, for hosts whose event loop is not a tokio task
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.bridge = self.bridge.with_runtime(runtime);
        self
    }

    /// Opens the stored board, initializing the store on first use
    pub async fn load(storage: Arc<S>) -> Result<Self> {
        if !storage.is_initialized().await {
            storage.initialize().await?;
        }

        let board = storage.load_board().await?;
        info!(
            board = %board.name,
            cards = board.card_count(),
            "loaded board"
        );

        Ok(Self::new(board, storage))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_id(&self) -> Option<&CardId> {
        self.drag.active()
    }

    /// The card being dragged, for drawing the drag preview
    pub fn active_card(&self) -> Option<&Card> {
        self.board.resolve_card(self.drag.active()?.as_str())
    }

    pub fn is_updating(&self) -> bool {
        self.bridge.is_updating()
    }

    pub fn has_pending_changes(&self) -> bool {
        self.bridge.has_pending_changes()
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.bridge.last_move()
    }

    pub fn on_drag_start(&mut self, active_id: &str) {
        self.drag.on_drag_start(active_id);
    }

    /// Returns whether the board changed
    pub fn on_drag_over(&mut self, active_id: &str, over_id: Option<&str>) -> bool {
        let record = self.drag.on_drag_over(&mut self.board, active_id, over_id);
        self.apply(record)
    }

    /// Returns whether the board changed
    pub fn on_drag_end(&mut self, active_id: &str, over_id: Option<&str>) -> bool {
        let record = self.drag.on_drag_end(&mut self.board, active_id, over_id);
        self.apply(record)
    }

    fn apply(&mut self, record: Option<MoveRecord>) -> bool {
        let Some(record) = record else {
            return false;
        };

        info!(%record, "board changed");
        self.bridge.mark_changed(record);
        self.bridge.sync(&self.board);
        true
    }

    /// Waits for the running save, starting a follow-up save if needed
    pub async fn settle(&mut self) -> Option<SaveOutcome> {
        self.bridge.settle(&self.board).await
    }

    /// Settles the running save only if it already finished
    pub async fn poll(&mut self) -> Option<SaveOutcome> {
        self.bridge.poll(&self.board).await
    }

    /// Settles saves until none is running, returning the last outcome
    pub async fn flush(&mut self) -> Option<SaveOutcome> {
        let mut last = None;
        while let Some(outcome) = self.settle().await {
            last = Some(outcome);
        }
        last
    }
}
