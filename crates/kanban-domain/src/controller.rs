use kanban_core::KanbanResult;

use crate::board::{Board, MoveOutcome};
use crate::card::{Card, CardId};
use crate::column::ColumnId;
use crate::drag::{DragController, DropOutcome};
use crate::gateway::BoardGateway;
use crate::geometry::Point;
use crate::layout::BoardLayout;

/// Owns the board and the drag engine; every mutation goes through here.
///
/// A successful mutation is saved through the gateway and flags a redraw.
/// If saving fails the in-memory change still stands and the error is
/// returned to the caller.
pub struct BoardController<G: BoardGateway> {
    board: Board,
    gateway: G,
    drag: DragController,
    needs_redraw: bool,
}

impl<G: BoardGateway> BoardController<G> {
    pub fn new(board: Board, gateway: G) -> Self {
        Self {
            board,
            gateway,
            drag: DragController::new(),
            needs_redraw: true,
        }
    }

    /// Restores the saved board, or starts from the default one.
    pub async fn load(gateway: G) -> Self {
        let board = match gateway.load().await {
            Some(board) => {
                tracing::info!(
                    "Restored board with {} columns and {} cards",
                    board.columns.len(),
                    board.card_count()
                );
                board
            }
            None => {
                tracing::info!("No saved board, starting from the default layout");
                Board::default()
            }
        };
        Self::new(board, gateway)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Returns whether a redraw was requested since the last call.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    async fn commit(&mut self, description: &str) -> KanbanResult<()> {
        tracing::debug!("Executing: {}", description);
        self.needs_redraw = true;
        if let Err(e) = self.gateway.save(&self.board).await {
            tracing::error!("Failed to save after '{}': {}", description, e);
            return Err(e);
        }
        Ok(())
    }

    pub async fn add_card(&mut self, column_id: &ColumnId, text: &str) -> KanbanResult<Card> {
        let card = self.board.add_card(column_id, text)?;
        self.commit(&format!("Add card '{}' to {}", card.text, column_id))
            .await?;
        Ok(card)
    }

    /// Deletes a card; an absent card is not an error.
    pub async fn delete_card(
        &mut self,
        column_id: &ColumnId,
        card_id: &CardId,
    ) -> KanbanResult<bool> {
        let removed = self.board.delete_card(column_id, card_id);
        if !removed {
            tracing::debug!("Card {} already gone from {}", card_id, column_id);
        }
        self.commit(&format!("Delete card {} from {}", card_id, column_id))
            .await?;
        Ok(removed)
    }

    pub async fn move_card(
        &mut self,
        card_id: &CardId,
        from: &ColumnId,
        to: &ColumnId,
        index: usize,
    ) -> KanbanResult<MoveOutcome> {
        let outcome = match self.board.move_card(card_id, from, to, index) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.needs_redraw = true;
                return Err(e);
            }
        };

        match outcome {
            MoveOutcome::Unchanged => self.needs_redraw = true,
            MoveOutcome::Moved { to_index, .. } => {
                self.commit(&format!(
                    "Move card {} from {} to {} at {}",
                    card_id, from, to, to_index
                ))
                .await?
            }
            MoveOutcome::DroppedDuplicate { .. } => {
                tracing::warn!(
                    "Card {} was already in {}; removed the copy in {}",
                    card_id,
                    to,
                    from
                );
                self.commit(&format!("Drop duplicate card {} from {}", card_id, from))
                    .await?
            }
        }
        Ok(outcome)
    }

    /// Pointer-down. Returns whether a drag session started.
    pub fn pointer_down(&mut self, layout: &BoardLayout, pointer: Point) -> bool {
        let started = self.drag.begin(layout, pointer);
        if started {
            self.needs_redraw = true;
        }
        started
    }

    /// Pointer-move. Returns false when no drag is in progress.
    pub fn pointer_move(&mut self, layout: &BoardLayout, pointer: Point) -> bool {
        let active = self.drag.update(layout, pointer);
        if active {
            self.needs_redraw = true;
        }
        active
    }

    /// Abandons a drag that never saw its pointer-up. The board is left
    /// as it was. Returns whether a session was active.
    pub fn cancel_drag(&mut self) -> bool {
        let Some(session) = self.drag.cancel() else {
            return false;
        };
        tracing::debug!("Cancelled drag of {}", session.card_id);
        self.needs_redraw = true;
        true
    }

    /// Pointer-up: applies the drop, if any, and always leaves the drag
    /// engine idle. Stale or unknown targets are discarded silently.
    pub async fn pointer_up(&mut self) -> KanbanResult<Option<MoveOutcome>> {
        match self.drag.end() {
            DropOutcome::Idle => Ok(None),
            DropOutcome::Aborted { card_id } => {
                tracing::debug!("Drag of {} released outside any column", card_id);
                self.needs_redraw = true;
                Ok(None)
            }
            DropOutcome::Drop(request) => {
                match self
                    .move_card(&request.card_id, &request.from, &request.to, request.index)
                    .await
                {
                    Ok(outcome) => Ok(Some(outcome)),
                    Err(e) if e.is_benign() => {
                        tracing::debug!("Discarded drop of {}: {}", request.card_id, e);
                        Ok(None)
                    }
                    Err(e) => Err(e),
                }
            }
        }
    }
}
