use crate::store::atomic_writer::AtomicWriter;
use crate::traits::KeyValueStore;
use kanban_core::{KanbanError, KanbanResult};
use std::path::{Path, PathBuf};

/// Directory-backed key-value store
/// Each key is kept in its own `<key>.json` file inside `dir`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> KanbanResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

fn validate_key(key: &str) -> KanbanResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(KanbanError::Validation(format!(
            "invalid storage key '{}'",
            key
        )))
    }
}

#[async_trait::async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> KanbanResult<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        AtomicWriter::read_optional(&path).await
    }

    async fn set(&self, key: &str, value: &[u8]) -> KanbanResult<()> {
        let path = self.path_for(key)?;
        AtomicWriter::write_atomic(&path, value).await?;
        tracing::info!("Saved {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}
