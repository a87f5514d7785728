use std::sync::{Mutex, PoisonError};

use orderlens_core::OrderSnapshot;

use crate::{OrderStore, StoreError};

/// In-process store, used by tests and by hosts that manage their own
/// durability.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<OrderSnapshot>>,
    writes: Mutex<usize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `snapshot`.
    #[must_use]
    pub fn with_snapshot(snapshot: OrderSnapshot) -> Self {
        Self {
            slot: Mutex::new(Some(snapshot)),
            writes: Mutex::new(0),
        }
    }

    /// Number of successful `save` calls since construction.
    #[must_use]
    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl OrderStore for MemoryStore {
    fn load(&self) -> Result<Option<OrderSnapshot>, StoreError> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, snapshot: &OrderSnapshot) -> Result<(), StoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot.clone());
        *self.writes.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}
