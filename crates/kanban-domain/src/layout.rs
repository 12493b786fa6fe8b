//! Geometry of the last rendered frame.
//!
//! The view records where each column's card list, each card, and each
//! control landed on screen. Pointer events are resolved against this
//! snapshot instead of querying the view directly.

use crate::card::CardId;
use crate::column::ColumnId;
use crate::geometry::{Bounds, Point};

#[derive(Debug, Clone, PartialEq)]
pub struct CardSlot {
    pub card_id: CardId,
    pub bounds: Bounds,
    pub delete_control: Option<Bounds>,
}

/// A column's card-list container.
#[derive(Debug, Clone, PartialEq)]
pub struct DropZone {
    pub column_id: ColumnId,
    pub bounds: Bounds,
    /// Rendered cards in top-to-bottom order.
    pub cards: Vec<CardSlot>,
    /// Cards scrolled out above the first rendered slot.
    pub first_index: usize,
    /// Drawn below `bounds`, so releasing over it is not a drop.
    pub add_control: Option<Bounds>,
}

impl DropZone {
    pub fn new(column_id: ColumnId, bounds: Bounds) -> Self {
        Self {
            column_id,
            bounds,
            cards: Vec::new(),
            first_index: 0,
            add_control: None,
        }
    }

    pub fn with_card(mut self, card_id: CardId, bounds: Bounds) -> Self {
        self.cards.push(CardSlot {
            card_id,
            bounds,
            delete_control: None,
        });
        self
    }
}

/// What lies under a pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum Hit {
    DeleteControl {
        column_id: ColumnId,
        card_id: CardId,
    },
    Card {
        column_id: ColumnId,
        card_id: CardId,
        bounds: Bounds,
    },
    AddControl {
        column_id: ColumnId,
    },
    Zone {
        column_id: ColumnId,
    },
    Nothing,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardLayout {
    zones: Vec<DropZone>,
}

impl BoardLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_zone(&mut self, zone: DropZone) {
        self.zones.push(zone);
    }

    pub fn zones(&self) -> &[DropZone] {
        &self.zones
    }

    pub fn zone(&self, column_id: &ColumnId) -> Option<&DropZone> {
        self.zones.iter().find(|z| &z.column_id == column_id)
    }

    /// The card-list container under the pointer, if any.
    pub fn zone_at(&self, point: Point) -> Option<&DropZone> {
        self.zones.iter().find(|z| z.bounds.contains(point))
    }

    pub fn hit_test(&self, point: Point) -> Hit {
        let Some(zone) = self.zone_at(point) else {
            return self.add_control_at(point);
        };

        for slot in &zone.cards {
            if slot.delete_control.is_some_and(|b| b.contains(point)) {
                return Hit::DeleteControl {
                    column_id: zone.column_id.clone(),
                    card_id: slot.card_id.clone(),
                };
            }
            if slot.bounds.contains(point) {
                return Hit::Card {
                    column_id: zone.column_id.clone(),
                    card_id: slot.card_id.clone(),
                    bounds: slot.bounds,
                };
            }
        }

        if zone.add_control.is_some_and(|b| b.contains(point)) {
            return Hit::AddControl {
                column_id: zone.column_id.clone(),
            };
        }

        Hit::Zone {
            column_id: zone.column_id.clone(),
        }
    }

    fn add_control_at(&self, point: Point) -> Hit {
        self.zones
            .iter()
            .find(|z| z.add_control.is_some_and(|b| b.contains(point)))
            .map_or(Hit::Nothing, |zone| Hit::AddControl {
                column_id: zone.column_id.clone(),
            })
    }
}
