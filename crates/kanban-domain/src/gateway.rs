use async_trait::async_trait;
use kanban_core::KanbanResult;

use crate::board::Board;

/// Durable home of the board.
///
/// `load` never fails: missing or unreadable state is reported as `None`
/// and the caller starts from the default board.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardGateway: Send + Sync {
    async fn load(&self) -> Option<Board>;

    async fn save(&self, board: &Board) -> KanbanResult<()>;
}
