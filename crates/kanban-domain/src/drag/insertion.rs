use crate::geometry::{Bounds, Point};

/// Index at which a dragged card lands among `cards` (top-to-bottom order).
///
/// The card goes before the first card whose vertical midpoint lies below
/// the pointer, or at the end when none does.
pub fn resolve_insertion_point(pointer: Point, cards: &[Bounds]) -> usize {
    cards
        .iter()
        .position(|bounds| pointer.y < bounds.mid_y())
        .unwrap_or(cards.len())
}
