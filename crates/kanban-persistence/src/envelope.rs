use crate::traits::{FormatVersion, PersistenceMetadata};
use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::Board;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// JSON envelope wrapping the board with version and metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonEnvelope {
    pub version: u32,
    pub metadata: PersistenceMetadata,
    pub data: Board,
}

impl JsonEnvelope {
    pub fn new(data: Board, instance_id: Uuid) -> Self {
        let version = FormatVersion::CURRENT.as_u32();
        Self {
            version,
            metadata: PersistenceMetadata::new(version, instance_id),
            data,
        }
    }

    pub fn to_bytes(&self) -> KanbanResult<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| KanbanError::Serialization(e.to_string()))
    }

    /// Parses a stored v2 value; the board inside must pass validation.
    pub fn from_value(value: Value) -> KanbanResult<Self> {
        let envelope: Self = serde_json::from_value(value)
            .map_err(|e| KanbanError::CorruptPersistence(format!("envelope: {}", e)))?;
        envelope.data.validate().map_err(|e| {
            KanbanError::CorruptPersistence(format!("stored board failed validation: {}", e))
        })?;
        Ok(envelope)
    }
}
