pub mod envelope;
pub mod gateway;
pub mod migration;
pub mod store;
pub mod traits;

pub use envelope::JsonEnvelope;
pub use gateway::{StorageGateway, STORAGE_KEY};
pub use migration::{Migrator, StoredBoard};
pub use store::*;
pub use traits::*;
