//! Single-flight persistence of board changes.
//!
//! Drag operations mark the board as changed; the bridge then saves a
//! snapshot of the whole board, never running more than one save at a time.
//! Changes that arrive while a save is running trigger exactly one follow-up
//! save once it settles. Failed saves are logged and not retried.

use crate::{
    domain::{Board, MoveRecord},
    error::{BoardError, Result},
    storage::Storage,
};
use std::sync::Arc;
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{error, info, warn};

/// How a settled save ended
#[derive(Debug)]
pub enum SaveOutcome {
    Saved,
    Failed(BoardError),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

pub struct SaveBridge<S: Storage + 'static> {
    storage: Arc<S>,
    runtime: Option<Handle>,
    changed: bool,
    in_flight: Option<JoinHandle<Result<()>>>,
    last_move: Option<MoveRecord>,
}

impl<S: Storage + 'static> SaveBridge<S> {
    /// Creates a bridge that saves on the runtime it was created in, if any
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            runtime: Handle::try_current().ok(),
            changed: false,
            in_flight: None,
            last_move: None,
        }
    }

    /// Runs saves on `runtime`, so the bridge can be driven from a thread
    /// outside of tokio
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// True while a save is running
    pub fn is_updating(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// True when the board changed since the last save started
    pub fn has_pending_changes(&self) -> bool {
        self.changed
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.last_move.as_ref()
    }

    /// Records a user-initiated board change
    pub fn mark_changed(&mut self, record: MoveRecord) {
        self.changed = true;
        self.last_move = Some(record);
    }

    /// Starts saving `board` if it changed and no save is running.
    ///
    /// A save that already finished is dropped from the slot first; its
    /// outcome was logged by the save task. Without a runtime the change
    /// stays pending and nothing is saved. Returns whether a save was started.
    pub fn sync(&mut self, board: &Board) -> bool {
        if !self.is_updating() {
            self.in_flight = None;
        }
        if !self.changed || self.in_flight.is_some() {
            return false;
        }

        let Some(runtime) = &self.runtime else {
            warn!("no tokio runtime available, board changes are not saved");
            return false;
        };

        match &self.last_move {
            Some(record) => info!(%record, "saving board"),
            None => info!("saving board"),
        }

        let snapshot = board.clone();
        let storage = Arc::clone(&self.storage);
        self.changed = false;
        self.in_flight = Some(runtime.spawn(async move {
            let result = storage.save_board(&snapshot).await;
            match &result {
                Ok(()) => info!("board saved"),
                Err(err) => error!(%err, "failed to save board"),
            }
            result
        }));

        true
    }

    /// Waits for the running save to finish, then starts a follow-up save
    /// if the board changed meanwhile. Returns `None` when nothing was running.
    pub async fn settle(&mut self, board: &Board) -> Option<SaveOutcome> {
        let handle = self.in_flight.take()?;

        let outcome = match handle.await {
            Ok(Ok(())) => SaveOutcome::Saved,
            Ok(Err(err)) => SaveOutcome::Failed(err),
            Err(join_err) => {
                error!(%join_err, "board save task aborted");
                SaveOutcome::Failed(BoardError::StorageError(join_err.to_string()))
            }
        };

        self.sync(board);
        Some(outcome)
    }

    /// Settles the running save only if it already finished
    pub async fn poll(&mut self, board: &Board) -> Option<SaveOutcome> {
        let finished = self
            .in_flight
            .as_ref()
            .is_some_and(JoinHandle::is_finished);

        if finished {
            self.settle(board).await
        } else {
            None
        }
    }
}
