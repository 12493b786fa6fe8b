pub mod config;
pub mod error;
pub mod input;
pub mod result;

pub use config::AppConfig;
pub use error::KanbanError;
pub use input::InputState;
pub use result::KanbanResult;
