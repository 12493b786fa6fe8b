use kanban_domain::{Board, BoardController, BoardGateway, ColumnId};
use kanban_persistence::{FileStore, KeyValueStore, StorageGateway, STORAGE_KEY};
use tempfile::tempdir;

fn col(id: &str) -> ColumnId {
    ColumnId::new(id)
}

#[tokio::test]
async fn test_board_survives_restart() {
    let dir = tempdir().unwrap();

    {
        let gateway = StorageGateway::new(FileStore::new(dir.path()));
        let mut controller = BoardController::load(gateway).await;
        let card = controller.add_card(&col("column-1"), "Ship it").await.unwrap();
        controller.add_card(&col("column-1"), "Celebrate").await.unwrap();
        controller
            .move_card(&card.id, &col("column-1"), &col("column-3"), 0)
            .await
            .unwrap();
    }

    assert!(dir.path().join("task-board-state.json").exists());

    let gateway = StorageGateway::new(FileStore::new(dir.path()));
    let controller = BoardController::load(gateway).await;
    let board = controller.board();
    assert_eq!(board.column(&col("column-1")).unwrap().cards[0].text, "Celebrate");
    assert_eq!(board.column(&col("column-3")).unwrap().cards[0].text, "Ship it");
}

#[tokio::test]
async fn test_malformed_file_falls_back_to_default_board() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("task-board-state.json"), "][ definitely not json").unwrap();

    let gateway = StorageGateway::new(FileStore::new(dir.path()));
    let controller = BoardController::load(gateway).await;

    let board = controller.board();
    assert_eq!(board, &Board::default());
    let titles: Vec<_> = board.columns.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["To Do", "In Progress", "Done"]);
    assert_eq!(board.card_count(), 0);
}

#[tokio::test]
async fn test_legacy_state_file_is_migrated() {
    let dir = tempdir().unwrap();
    let legacy = r#"{"columns":[
        {"id":"column-1","title":"To Do","cards":[{"id":"card-4fzyo82mv","text":"Legacy"}]},
        {"id":"column-2","title":"In Progress","cards":[]},
        {"id":"column-3","title":"Done","cards":[]}
    ]}"#;
    std::fs::write(dir.path().join("task-board-state.json"), legacy).unwrap();

    let gateway = StorageGateway::new(FileStore::new(dir.path()));
    let board = gateway.load().await.unwrap();
    assert_eq!(board.columns[0].cards[0].text, "Legacy");

    assert!(dir.path().join("task-board-state.v1-backup.json").exists());
    let rewritten = gateway.store().get(STORAGE_KEY).await.unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&rewritten).unwrap();
    assert_eq!(value["version"], 2);
    assert_eq!(value["data"]["columns"][0]["cards"][0]["id"], "card-4fzyo82mv");
}

#[tokio::test]
async fn test_null_state_is_treated_as_empty() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("task-board-state.json"), "null").unwrap();

    let gateway = StorageGateway::new(FileStore::new(dir.path()));
    assert!(gateway.load_checked().await.unwrap().is_none());
}
