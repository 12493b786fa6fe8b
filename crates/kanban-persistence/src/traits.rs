use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kanban_core::KanbanResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata written alongside every saved board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceMetadata {
    /// Version of the persistence format
    pub format_version: u32,
    /// ID of the instance that performed the save
    pub instance_id: Uuid,
    /// When this data was saved
    pub saved_at: DateTime<Utc>,
}

impl PersistenceMetadata {
    pub fn new(format_version: u32, instance_id: Uuid) -> Self {
        Self {
            format_version,
            instance_id,
            saved_at: Utc::now(),
        }
    }
}

/// Trait for durable key-value storage
/// Implementations decide where values live (files, memory, ...)
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    async fn get(&self, key: &str) -> KanbanResult<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &[u8]) -> KanbanResult<()>;
}

/// Format versions for migration tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormatVersion {
    /// Bare `{ "columns": [...] }` board with no envelope
    V1,
    /// Board wrapped in a `JsonEnvelope` with metadata
    V2,
}

impl FormatVersion {
    pub const CURRENT: FormatVersion = FormatVersion::V2;

    pub fn as_u32(self) -> u32 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
        }
    }

    pub fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::V1),
            2 => Some(Self::V2),
            _ => None,
        }
    }
}
