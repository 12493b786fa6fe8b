pub mod insertion;
pub mod session;

pub use insertion::resolve_insertion_point;
pub use session::{DragController, DragSession, DragState, DropOutcome, DropRequest, InsertionMarker};
