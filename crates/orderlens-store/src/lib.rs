//! Durable key/value persistence for synced order snapshots.
//!
//! The sync engine treats the store as a collaborator with two calls: `load`
//! (get) and `save` (set). Each call is atomic from the caller's point of view;
//! a `save` either lands the whole `{orderCollection, lastUpdated}` pair or
//! leaves the previous one in place.

mod file;
mod memory;

use orderlens_core::OrderSnapshot;
use thiserror::Error;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("store document at {path} is not valid JSON: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Persistence collaborator for the synced order snapshot.
///
/// Calls are synchronous and are made directly from async code, once per
/// sync or restore. Implementations must stay cheap: a single small local
/// write or read, never network I/O or anything that can block for long.
pub trait OrderStore {
    /// Returns the last persisted snapshot, or `None` if nothing was ever saved.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing medium cannot be read or decoded.
    fn load(&self) -> Result<Option<OrderSnapshot>, StoreError>;

    /// Replaces the persisted snapshot with `snapshot` in one write.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails; the previous snapshot is
    /// left intact in that case.
    fn save(&self, snapshot: &OrderSnapshot) -> Result<(), StoreError>;
}

impl<T: OrderStore + ?Sized> OrderStore for &T {
    fn load(&self) -> Result<Option<OrderSnapshot>, StoreError> {
        (**self).load()
    }

    fn save(&self, snapshot: &OrderSnapshot) -> Result<(), StoreError> {
        (**self).save(snapshot)
    }
}
