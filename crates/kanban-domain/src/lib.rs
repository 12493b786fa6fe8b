pub mod board;
pub mod card;
pub mod column;
pub mod controller;
pub mod drag;
pub mod gateway;
pub mod geometry;
pub mod layout;

pub use board::{Board, MoveOutcome};
pub use card::{Card, CardId};
pub use column::{Column, ColumnId};
pub use controller::BoardController;
pub use drag::{
    resolve_insertion_point, DragController, DragSession, DragState, DropOutcome, DropRequest,
    InsertionMarker,
};
pub use gateway::BoardGateway;
pub use geometry::{Bounds, Point};
pub use layout::{BoardLayout, CardSlot, DropZone, Hit};
