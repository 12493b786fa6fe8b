use thiserror::Error;

#[derive(Error, Debug)]
pub enum KanbanError {
    #[error("A card with the text \"{text}\" already exists in column {column_id}")]
    DuplicateText { column_id: String, text: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Corrupt persisted state: {0}")]
    CorruptPersistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl KanbanError {
    /// Errors caused by the model changing underneath a stale reference.
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

