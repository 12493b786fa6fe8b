pub mod migrator;
pub mod v1_to_v2;

pub use migrator::{Migrator, StoredBoard};
pub use v1_to_v2::upgrade_v1;
