//! Pointer-driven drag state machine: Idle -> Dragging -> Idle.
//!
//! `DragController` owns the only `DragSession`. A session starts on
//! pointer-down over a card, follows pointer moves, and is always consumed
//! by pointer-up or cancelled. Moves and releases that arrive while idle
//! are ignored.

use crate::card::CardId;
use crate::column::ColumnId;
use crate::drag::insertion::resolve_insertion_point;
use crate::geometry::{Bounds, Point};
use crate::layout::{BoardLayout, DropZone, Hit};

/// Where the dragged card would land if released now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionMarker {
    pub column_id: ColumnId,
    /// Position among all of the column's cards, scrolled-out ones
    /// included, not counting the dragged card.
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub card_id: CardId,
    pub source_column_id: ColumnId,
    /// Pointer position relative to the card's top-left corner at pointer-down.
    pub pointer_offset: Point,
    /// Floating proxy drawn under the pointer.
    pub proxy: Bounds,
    pub marker: Option<InsertionMarker>,
}

impl DragSession {
    fn track(&mut self, pointer: Point) {
        self.proxy = self.proxy.moved_to(pointer.minus(self.pointer_offset));
    }

    fn marker_for(&self, zone: &DropZone, pointer: Point) -> InsertionMarker {
        let others: Vec<Bounds> = zone
            .cards
            .iter()
            .filter(|slot| slot.card_id != self.card_id)
            .map(|slot| slot.bounds)
            .collect();
        InsertionMarker {
            column_id: zone.column_id.clone(),
            index: zone.first_index + resolve_insertion_point(pointer, &others),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// A resolved drop, ready to be applied to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropRequest {
    pub card_id: CardId,
    pub from: ColumnId,
    pub to: ColumnId,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Pointer-up with no session in progress.
    Idle,
    /// Released away from any card list.
    Aborted { card_id: CardId },
    Drop(DropRequest),
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session().is_some()
    }

    /// Starts a session if the pointer is on a card body.
    ///
    /// Pointer-down on a delete control, an add control, or empty space
    /// leaves the controller untouched. The marker starts at the card's
    /// own slot so an immediate release is a no-op move.
    pub fn begin(&mut self, layout: &BoardLayout, pointer: Point) -> bool {
        let Hit::Card {
            column_id,
            card_id,
            bounds,
        } = layout.hit_test(pointer)
        else {
            return false;
        };

        if let DragState::Dragging(previous) = &self.state {
            tracing::debug!(
                "Discarding unfinished drag of {} for a new session",
                previous.card_id
            );
        }

        let marker = layout
            .zone(&column_id)
            .and_then(|zone| {
                zone.cards
                    .iter()
                    .position(|slot| slot.card_id == card_id)
                    .map(|index| zone.first_index + index)
            })
            .map(|index| InsertionMarker {
                column_id: column_id.clone(),
                index,
            });

        tracing::debug!("Drag started: {} from {}", card_id, column_id);
        self.state = DragState::Dragging(DragSession {
            card_id,
            source_column_id: column_id,
            pointer_offset: pointer.offset_from(bounds.origin()),
            proxy: bounds,
            marker,
        });
        true
    }

    /// Follows the pointer. Returns false when no session is active.
    pub fn update(&mut self, layout: &BoardLayout, pointer: Point) -> bool {
        let DragState::Dragging(session) = &mut self.state else {
            tracing::trace!("Pointer move ignored: no drag in progress");
            return false;
        };

        session.track(pointer);
        let marker = layout
            .zone_at(pointer)
            .map(|zone| session.marker_for(zone, pointer));
        session.marker = marker;
        true
    }

    /// Drops the session without producing a drop.
    pub fn cancel(&mut self) -> Option<DragSession> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Ends the session, whatever its outcome, and returns to idle.
    pub fn end(&mut self) -> DropOutcome {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return DropOutcome::Idle;
        };

        match session.marker {
            Some(marker) => DropOutcome::Drop(DropRequest {
                card_id: session.card_id,
                from: session.source_column_id,
                to: marker.column_id,
                index: marker.index,
            }),
            None => DropOutcome::Aborted {
                card_id: session.card_id,
            },
        }
    }
}
