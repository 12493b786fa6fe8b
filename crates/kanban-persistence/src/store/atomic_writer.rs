use kanban_core::KanbanResult;
use std::path::Path;
use tokio::fs;

/// Atomic file writer that prevents data corruption
/// Uses write-to-temp-file → atomic-rename pattern for safety
pub struct AtomicWriter;

impl AtomicWriter {
    /// Write data to a file atomically, creating the parent directory if needed
    /// A crash mid-write leaves the previous contents in place
    pub async fn write_atomic(path: &Path, data: &[u8]) -> KanbanResult<()> {
        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).await?;

        // Temp file in the same directory keeps the rename on one filesystem
        let temp_path = tempfile::Builder::new()
            .prefix(".kanban-")
            .suffix(".tmp")
            .tempfile_in(parent)?
            .into_temp_path();

        fs::write(&temp_path, data).await?;
        fs::rename(&temp_path, path).await?;
        // Already renamed away; nothing left to clean up
        let _ = temp_path.keep();

        tracing::debug!(
            "Atomically wrote {} bytes to {}",
            data.len(),
            path.display()
        );
        Ok(())
    }

    /// Read a whole file, or `None` when it does not exist
    pub async fn read_optional(path: &Path) -> KanbanResult<Option<Vec<u8>>> {
        match fs::read(path).await {
            Ok(data) => {
                tracing::debug!("Read {} bytes from {}", data.len(), path.display());
                Ok(Some(data))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
