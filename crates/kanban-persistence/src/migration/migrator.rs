use crate::envelope::JsonEnvelope;
use crate::migration::v1_to_v2::upgrade_v1;
use crate::traits::FormatVersion;
use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::Board;
use serde_json::Value;

/// A board read from storage, along with the format it was stored in
#[derive(Debug, Clone, PartialEq)]
pub struct StoredBoard {
    pub board: Board,
    pub version: FormatVersion,
}

impl StoredBoard {
    pub fn needs_upgrade(&self) -> bool {
        self.version < FormatVersion::CURRENT
    }
}

/// Orchestrates reading between format versions
pub struct Migrator;

impl Migrator {
    /// Detect the version of a stored value
    pub fn detect_version(value: &Value) -> KanbanResult<FormatVersion> {
        // V2 values carry a "version" field at root level
        if let Some(version) = value.get("version") {
            let number = version.as_u64().ok_or_else(|| {
                KanbanError::CorruptPersistence(format!("version is not a number: {}", version))
            })?;
            return u32::try_from(number)
                .ok()
                .and_then(FormatVersion::from_u32)
                .ok_or_else(|| {
                    KanbanError::CorruptPersistence(format!(
                        "unsupported format version {}",
                        number
                    ))
                });
        }

        // V1 values are the bare board
        if value.get("columns").is_some() {
            return Ok(FormatVersion::V1);
        }

        Err(KanbanError::CorruptPersistence(
            "stored value is neither a board nor an envelope".to_string(),
        ))
    }

    /// Decode raw stored bytes into a board of the current shape.
    ///
    /// A stored JSON `null` counts as "nothing saved".
    pub fn decode(bytes: &[u8]) -> KanbanResult<Option<StoredBoard>> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| KanbanError::CorruptPersistence(format!("invalid JSON: {}", e)))?;
        if value.is_null() {
            return Ok(None);
        }

        let version = Self::detect_version(&value)?;
        let board = match version {
            FormatVersion::V1 => {
                tracing::info!("Found v1 board, upgrading to v{}", FormatVersion::CURRENT.as_u32());
                upgrade_v1(value)?
            }
            FormatVersion::V2 => JsonEnvelope::from_value(value)?.data,
        };

        Ok(Some(StoredBoard { board, version }))
    }
}
