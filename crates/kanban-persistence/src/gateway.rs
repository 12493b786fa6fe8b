use crate::envelope::JsonEnvelope;
use crate::migration::Migrator;
use crate::traits::KeyValueStore;
use async_trait::async_trait;
use kanban_core::KanbanResult;
use kanban_domain::{Board, BoardGateway};
use uuid::Uuid;

/// Key the board is stored under unless configured otherwise
pub const STORAGE_KEY: &str = "task-board-state";

/// Saves and restores the board through any `KeyValueStore`
pub struct StorageGateway<S: KeyValueStore> {
    store: S,
    key: String,
    instance_id: Uuid,
}

impl<S: KeyValueStore> StorageGateway<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            instance_id: Uuid::new_v4(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn backup_key(&self) -> String {
        format!("{}.v1-backup", self.key)
    }

    /// Like `load`, but reports why stored state could not be used.
    ///
    /// Legacy data is rewritten in the current format after its original
    /// bytes are copied to a backup key.
    pub async fn load_checked(&self) -> KanbanResult<Option<Board>> {
        let Some(bytes) = self.store.get(&self.key).await? else {
            tracing::debug!("Nothing stored under '{}'", self.key);
            return Ok(None);
        };

        let Some(stored) = Migrator::decode(&bytes)? else {
            return Ok(None);
        };

        if stored.needs_upgrade() {
            if let Err(e) = self.upgrade(&bytes, &stored.board).await {
                tracing::warn!("Loaded legacy board but could not rewrite it: {}", e);
            }
        }

        Ok(Some(stored.board))
    }

    async fn upgrade(&self, original: &[u8], board: &Board) -> KanbanResult<()> {
        let backup_key = self.backup_key();
        self.store.set(&backup_key, original).await?;
        tracing::info!("Backed up legacy board to '{}'", backup_key);
        self.save(board).await?;
        tracing::info!("Migrated '{}' to the current format", self.key);
        Ok(())
    }
}

#[async_trait]
impl<S: KeyValueStore> BoardGateway for StorageGateway<S> {
    async fn load(&self) -> Option<Board> {
        match self.load_checked().await {
            Ok(board) => board,
            Err(e) => {
                tracing::warn!("Ignoring stored board under '{}': {}", self.key, e);
                None
            }
        }
    }

    async fn save(&self, board: &Board) -> KanbanResult<()> {
        let bytes = JsonEnvelope::new(board.clone(), self.instance_id).to_bytes()?;
        self.store.set(&self.key, &bytes).await?;
        tracing::debug!(
            "Saved board ({} cards) under '{}'",
            board.card_count(),
            self.key
        );
        Ok(())
    }
}
