use async_trait::async_trait;
#[cfg(feature = "file-storage")]
use pipeline_board::FileStorage;
use pipeline_board::{Board, BoardError, BoardSession, Card, Column, Result, SaveOutcome, Storage};
use std::sync::{Arc, Mutex};
#[cfg(feature = "file-storage")]
use tempfile::TempDir;
use tokio::sync::Semaphore;

/// Records every save and holds each one until the test releases it
struct RecordingStorage {
    gate: Semaphore,
    saved: Mutex<Vec<Board>>,
}

impl RecordingStorage {
    fn new() -> Self {
        Self {
            gate: Semaphore::new(0),
            saved: Mutex::new(Vec::new()),
        }
    }

    fn release(&self) {
        self.gate.add_permits(1);
    }

    fn saved(&self) -> Vec<Board> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    async fn save_board(&self, board: &Board) -> Result<()> {
        self.gate
            .acquire()
            .await
            .map_err(|e| BoardError::StorageError(e.to_string()))?
            .forget();
        self.saved.lock().unwrap().push(board.clone());
        Ok(())
    }

    async fn load_board(&self) -> Result<Board> {
        Err(BoardError::BoardNotInitialized)
    }

    async fn is_initialized(&self) -> bool {
        false
    }
}

fn pipeline() -> Board {
    Board::new(
        "Sales Pipeline",
        vec![
            Column::new("QUALIFICATION").with_cards(vec![Card::new("task1")]),
            Column::new("NEED ANALYSIS").with_cards(vec![Card::new("task2"), Card::new("task3")]),
            Column::new("PROPOSAL").with_cards(vec![
                Card::new("task4"),
                Card::new("task5"),
                Card::new("task8"),
            ]),
            Column::new("CLOSED WON").with_cards(vec![Card::new("task6")]),
            Column::new("CLOSED LOST").with_cards(vec![Card::new("task7")]),
        ],
    )
    .unwrap()
}

fn ids<'a>(board: &'a Board, column: &str) -> Vec<&'a str> {
    board.column(column).unwrap().card_ids()
}

#[tokio::test]
async fn every_card_stays_in_exactly_one_column() {
    let storage = Arc::new(RecordingStorage::new());
    storage.gate.add_permits(Semaphore::MAX_PERMITS / 2);
    let mut session = BoardSession::new(pipeline(), storage);

    let targets: Vec<String> = pipeline()
        .columns()
        .iter()
        .flat_map(|col| {
            std::iter::once(col.name.clone())
                .chain(col.cards.iter().map(|card| card.id.to_string()))
        })
        .chain(std::iter::once("stale".to_string()))
        .collect();

    for active in &targets {
        for over in &targets {
            session.on_drag_start(active);
            session.on_drag_over(active, Some(over.as_str()));
            session.on_drag_over(active, Some(over.as_str()));
            session.on_drag_end(active, Some(over.as_str()));

            let board = session.board();
            assert!(board.validate().is_ok(), "{active} over {over}");
            assert_eq!(board.card_count(), 8);
            assert!(session.active_id().is_none());
        }
    }

    session.flush().await;
    assert!(!session.is_updating());
}

#[tokio::test]
async fn repeated_hover_does_not_drift() {
    let storage = Arc::new(RecordingStorage::new());
    let mut session = BoardSession::new(pipeline(), storage);

    session.on_drag_start("task1");
    assert!(session.on_drag_over("task1", Some("task5")));
    let after_first = session.board().clone();

    for _ in 0..10 {
        assert!(!session.on_drag_over("task1", Some("task5")));
    }

    assert_eq!(session.board(), &after_first);
    assert_eq!(
        ids(session.board(), "PROPOSAL"),
        vec!["task4", "task1", "task5", "task8"]
    );
    assert!(ids(session.board(), "QUALIFICATION").is_empty());
}

#[tokio::test]
async fn drop_on_column_appends() {
    let storage = Arc::new(RecordingStorage::new());
    let mut session = BoardSession::new(pipeline(), storage);

    session.on_drag_start("task2");
    assert!(session.on_drag_end("task2", Some("PROPOSAL")));

    assert_eq!(
        ids(session.board(), "PROPOSAL"),
        vec!["task4", "task5", "task8", "task2"]
    );
    assert_eq!(ids(session.board(), "NEED ANALYSIS"), vec!["task3"]);
    assert_eq!(session.last_move().unwrap().position, 3);
}

#[tokio::test]
async fn stale_ids_never_mutate() {
    let storage = Arc::new(RecordingStorage::new());
    let mut session = BoardSession::new(pipeline(), storage);
    let before = session.board().clone();

    assert!(session.board().resolve_container("task99").is_none());
    assert!(session.board().resolve_card("task99").is_none());

    session.on_drag_start("task99");
    assert!(!session.on_drag_over("task99", Some("PROPOSAL")));
    assert!(!session.on_drag_over("task4", Some("task99")));
    assert!(!session.on_drag_end("task4", Some("task99")));
    assert!(!session.on_drag_end("task4", None));

    assert_eq!(session.board(), &before);
    assert!(!session.is_updating());
}

#[tokio::test]
async fn changes_during_a_save_trigger_one_follow_up() {
    let storage = Arc::new(RecordingStorage::new());
    let mut session = BoardSession::new(pipeline(), Arc::clone(&storage));

    session.on_drag_start("task4");
    assert!(session.on_drag_end("task4", Some("CLOSED WON")));
    assert!(session.is_updating());
    let first = session.board().clone();

    session.on_drag_start("task5");
    assert!(session.on_drag_end("task5", Some("task7")));
    session.on_drag_start("task8");
    assert!(session.on_drag_end("task8", Some("task1")));
    assert!(session.has_pending_changes());

    storage.release();
    assert!(matches!(session.settle().await, Some(SaveOutcome::Saved)));
    assert!(session.is_updating());
    assert!(!session.has_pending_changes());

    storage.release();
    assert!(matches!(session.settle().await, Some(SaveOutcome::Saved)));
    assert!(!session.is_updating());
    assert!(session.settle().await.is_none());

    let saved = storage.saved();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0], first);
    assert_eq!(&saved[1], session.board());
}

#[cfg(feature = "file-storage")]
#[tokio::test]
async fn file_storage_keeps_latest_board() {
    let temp_dir = TempDir::new().unwrap();
    let storage = Arc::new(FileStorage::new(temp_dir.path()));

    let mut session = BoardSession::load(Arc::clone(&storage)).await.unwrap();
    assert_eq!(session.board(), &Board::default());

    let seeded = pipeline();
    storage.save_board(&seeded).await.unwrap();
    let mut session_seeded = BoardSession::load(Arc::clone(&storage)).await.unwrap();
    assert_eq!(session_seeded.board(), &seeded);

    session_seeded.on_drag_start("task6");
    session_seeded.on_drag_over("task6", Some("task3"));
    session_seeded.on_drag_end("task6", Some("task2"));
    assert!(session_seeded.flush().await.unwrap().is_saved());

    let reloaded = storage.load_board().await.unwrap();
    assert_eq!(&reloaded, session_seeded.board());
    assert_eq!(
        ids(&reloaded, "NEED ANALYSIS"),
        vec!["task6", "task2", "task3"]
    );

    // The default session never changed, so it has nothing to flush
    assert!(session.flush().await.is_none());
}
