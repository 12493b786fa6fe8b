use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::Board;
use serde_json::Value;

/// Reads a v1 payload: the board itself, with no envelope around it.
///
/// A v1 board is only accepted if it passes the same structural checks as
/// a v2 one.
pub fn upgrade_v1(value: Value) -> KanbanResult<Board> {
    let board: Board = serde_json::from_value(value)
        .map_err(|e| KanbanError::CorruptPersistence(format!("v1 board: {}", e)))?;
    board.validate().map_err(|e| {
        KanbanError::CorruptPersistence(format!("v1 board failed validation: {}", e))
    })?;
    Ok(board)
}
