use kanban_core::{KanbanError, KanbanResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::card::{Card, CardId};
use crate::column::{Column, ColumnId};

/// Result of a successful `Board::move_card`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { from_index: usize, to_index: usize },
    /// Same column, same position.
    Unchanged,
    /// The destination already held the card; only the source copy was removed.
    DroppedDuplicate { from_index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub columns: Vec<Column>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(vec![
            Column::new("column-1", "To Do"),
            Column::new("column-2", "In Progress"),
            Column::new("column-3", "Done"),
        ])
    }
}

impl Board {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| &c.id == id)
    }

    /// The column currently holding a card.
    pub fn column_of(&self, card_id: &CardId) -> Option<&Column> {
        self.columns.iter().find(|c| c.contains(card_id))
    }

    pub fn card(&self, card_id: &CardId) -> Option<&Card> {
        self.columns
            .iter()
            .flat_map(|c| c.cards.iter())
            .find(|card| &card.id == card_id)
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Appends a new card to the end of a column.
    ///
    /// Text must be unique within the target column. Moves never re-check
    /// this, so a column can still end up holding duplicate text.
    pub fn add_card(&mut self, column_id: &ColumnId, text: &str) -> KanbanResult<Card> {
        if text.trim().is_empty() {
            return Err(KanbanError::Validation("card text cannot be empty".into()));
        }
        let idx = self
            .column_index(column_id)
            .ok_or_else(|| KanbanError::NotFound(format!("column {}", column_id)))?;

        let column = &mut self.columns[idx];
        if column.has_text(text) {
            return Err(KanbanError::DuplicateText {
                column_id: column_id.to_string(),
                text: text.to_string(),
            });
        }

        let card = Card::new(text);
        column.cards.push(card.clone());
        Ok(card)
    }

    /// Removes a card if present. Returns whether anything was removed.
    pub fn delete_card(&mut self, column_id: &ColumnId, card_id: &CardId) -> bool {
        let Some(idx) = self.column_index(column_id) else {
            return false;
        };
        let column = &mut self.columns[idx];
        match column.position_of(card_id) {
            Some(pos) => {
                column.cards.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Moves a card out of `from` and into `to` at `target_index`.
    ///
    /// The index is clamped to the destination length after the card has
    /// been taken out of its source. Nothing is mutated when an error is
    /// returned.
    pub fn move_card(
        &mut self,
        card_id: &CardId,
        from: &ColumnId,
        to: &ColumnId,
        target_index: usize,
    ) -> KanbanResult<MoveOutcome> {
        let from_idx = self
            .column_index(from)
            .ok_or_else(|| KanbanError::NotFound(format!("column {}", from)))?;
        let to_idx = self
            .column_index(to)
            .ok_or_else(|| KanbanError::NotFound(format!("column {}", to)))?;
        let current = self.columns[from_idx].position_of(card_id).ok_or_else(|| {
            KanbanError::NotFound(format!("card {} in column {}", card_id, from))
        })?;

        if from_idx == to_idx {
            let column = &mut self.columns[from_idx];
            let target = target_index.min(column.len() - 1);
            if target == current {
                return Ok(MoveOutcome::Unchanged);
            }
            let card = column.cards.remove(current);
            column.cards.insert(target, card);
            return Ok(MoveOutcome::Moved {
                from_index: current,
                to_index: target,
            });
        }

        let card = self.columns[from_idx].cards.remove(current);
        if self.columns[to_idx].contains(card_id) {
            return Ok(MoveOutcome::DroppedDuplicate {
                from_index: current,
            });
        }

        let destination = &mut self.columns[to_idx];
        let target = target_index.min(destination.len());
        destination.cards.insert(target, card);
        Ok(MoveOutcome::Moved {
            from_index: current,
            to_index: target,
        })
    }

    /// Checks the structural invariants: unique column ids, every card id
    /// unique across the whole board, no empty card text.
    pub fn validate(&self) -> KanbanResult<()> {
        let mut column_ids = HashSet::new();
        let mut card_ids = HashSet::new();

        for column in &self.columns {
            if !column_ids.insert(&column.id) {
                return Err(KanbanError::Validation(format!(
                    "duplicate column id {}",
                    column.id
                )));
            }
            for card in &column.cards {
                if !card_ids.insert(&card.id) {
                    return Err(KanbanError::Validation(format!(
                        "card {} appears more than once",
                        card.id
                    )));
                }
                if card.text.trim().is_empty() {
                    return Err(KanbanError::Validation(format!(
                        "card {} has empty text",
                        card.id
                    )));
                }
            }
        }
        Ok(())
    }
}
